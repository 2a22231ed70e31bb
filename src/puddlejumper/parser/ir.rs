//! Intermediate tree produced by the grammar
//!
//! These types mirror the final AST but hold byte ranges instead of
//! positions and own their children directly. [`building`](crate::puddlejumper::building)
//! flattens them into the document arena.

use std::ops::Range;

use crate::puddlejumper::ast::Payload;

#[derive(Debug, Clone, PartialEq)]
pub struct BindingWithSpan {
    pub name: Option<String>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayloadWithSpan {
    pub payload: Payload,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeWithSpans {
    pub binding: Option<BindingWithSpan>,
    pub payload: Option<PayloadWithSpan>,
    pub children: Vec<EntryWithSpans>,
    pub span: Range<usize>,
}

impl NodeWithSpans {
    pub fn new(
        binding: Option<BindingWithSpan>,
        payload: Option<PayloadWithSpan>,
        children: Vec<EntryWithSpans>,
    ) -> Self {
        let start = binding
            .as_ref()
            .map(|b| b.span.start)
            .or_else(|| payload.as_ref().map(|p| p.span.start))
            .unwrap_or(0);
        let end = children
            .last()
            .map(|c| c.span().end)
            .or_else(|| payload.as_ref().map(|p| p.span.end))
            .or_else(|| binding.as_ref().map(|b| b.span.end))
            .unwrap_or(start);
        Self {
            binding,
            payload,
            children,
            span: start..end,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockWithSpans {
    pub binding: Option<BindingWithSpan>,
    pub header: NodeWithSpans,
    pub body: Vec<NodeWithSpans>,
    pub span: Range<usize>,
}

impl BlockWithSpans {
    /// `hash` is the range of the `#` token
    pub fn new(
        binding: Option<BindingWithSpan>,
        hash: Range<usize>,
        header: NodeWithSpans,
        body: Vec<NodeWithSpans>,
    ) -> Self {
        let start = binding.as_ref().map(|b| b.span.start).unwrap_or(hash.start);
        let end = body.last().map(|n| n.span.end).unwrap_or(header.span.end);
        Self {
            binding,
            header,
            body,
            span: start..end,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryWithSpans {
    Node(NodeWithSpans),
    Block(BlockWithSpans),
}

impl EntryWithSpans {
    pub fn span(&self) -> Range<usize> {
        match self {
            EntryWithSpans::Node(node) => node.span.clone(),
            EntryWithSpans::Block(block) => block.span.clone(),
        }
    }
}
