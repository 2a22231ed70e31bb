//! Binding registration and reference resolution
//!
//! Resolution runs in two passes over the finished tree so that references
//! may appear before the binding they name:
//!
//! 1. every binding is registered in document order; a name defined twice is
//!    reported at the second definition
//! 2. every reference is looked up, then checked against its own ancestor
//!    chain
//!
//! References are recorded as [`ReferenceEdge`]s. Nothing is copied or
//! expanded.

use crate::puddlejumper::ast::{Document, ReferenceEdge, SymbolTable};
use crate::puddlejumper::error::ParseError;

/// Build the symbol table for a document
pub fn collect_bindings(doc: &Document) -> Result<SymbolTable, ParseError> {
    let mut symbols = SymbolTable::default();
    for visit in doc.iter() {
        let Some(binding) = visit.entry.binding() else {
            continue;
        };
        match &binding.name {
            None => symbols.define_anonymous(visit.id),
            Some(name) => {
                if let Some(first) = symbols.define(name, visit.id) {
                    let first = doc[first]
                        .binding()
                        .map(|b| b.span.start)
                        .unwrap_or(doc[first].span().start);
                    return Err(ParseError::DuplicateBinding {
                        name: name.clone(),
                        position: binding.span.start,
                        first,
                    });
                }
            }
        }
    }
    Ok(symbols)
}

/// Resolve every reference in `doc` against `symbols`, in document order
pub fn resolve_references(
    doc: &Document,
    symbols: &SymbolTable,
) -> Result<Vec<ReferenceEdge>, ParseError> {
    let mut edges = Vec::new();
    for visit in doc.iter() {
        let Some(node) = visit.entry.as_node() else {
            continue;
        };
        let Some(name) = node.reference() else {
            continue;
        };
        let Some(target) = symbols.get(name) else {
            return Err(ParseError::UnresolvedReference {
                name: name.to_string(),
                position: node.span.start,
            });
        };
        if target == visit.id || doc.is_ancestor(target, visit.id) {
            return Err(ParseError::CyclicReference {
                name: name.to_string(),
                position: node.span.start,
            });
        }
        edges.push(ReferenceEdge {
            from: visit.id,
            to: target,
            name: name.to_string(),
        });
    }
    Ok(edges)
}

/// Register bindings and resolve references, storing both on the document
pub fn resolve(doc: &mut Document) -> Result<(), ParseError> {
    let symbols = collect_bindings(doc)?;
    let edges = resolve_references(doc, &symbols)?;
    tracing::debug!(
        named = symbols.len(),
        anonymous = symbols.anonymous().len(),
        references = edges.len(),
        "resolved bindings"
    );
    doc.set_resolution(symbols, edges);
    Ok(())
}
