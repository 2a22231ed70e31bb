//! Grammar for the puddlejumper format
//!
//! The parser consumes the lexer's token stream and produces the intermediate
//! tree in [`ir`]. Grammar, with the choice points tried in order:
//!
//! ```text
//! document  := body? EOF
//! body      := node+ block* | block+
//! block     := (binding NEWLINE)? '#' node node*
//! node      := binding payload NEWLINE children?
//!            | binding NEWLINE children
//!            | binding NEWLINE payload NEWLINE children?
//!            | payload NEWLINE children?
//! payload   := CONTENT | '@' IDENTIFIER
//! binding   := '@' IDENTIFIER? ':'
//! children  := INDENT body DEDENT
//! ```
//!
//! A `binding NEWLINE` pair that is followed by `#` belongs to a block, so the
//! node alternatives fail on it and the block alternative takes over. A block
//! body is the run of nodes following the header at the header's level; it
//! ends at the next block, a dedent, or end of input.

pub mod combinators;
pub mod ir;

use chumsky::prelude::*;
use chumsky::error::SimpleReason;

use crate::puddlejumper::ast::Position;
use crate::puddlejumper::error::ParseError;
use crate::puddlejumper::lexer::{SpannedToken, Token};
use combinators::{binding, payload, token, ParserError, TokenSpan};
use ir::{BlockWithSpans, EntryWithSpans, NodeWithSpans, PayloadWithSpan};

/// What follows a binding: its payload (if any) and children
type NodeRest = (Option<PayloadWithSpan>, Vec<EntryWithSpans>);

/// Build the body parser, recursing through indented children
fn body() -> impl Parser<TokenSpan, Vec<EntryWithSpans>, Error = ParserError> + Clone {
    recursive(|body| {
        let children = token(Token::Indent)
            .ignore_then(body)
            .then_ignore(token(Token::Dedent))
            .labelled("indented children");

        // payload NEWLINE children?
        let payload_line = payload()
            .then_ignore(token(Token::Newline))
            .then(children.clone().or_not())
            .map(|(payload, children)| (Some(payload), children.unwrap_or_default()));

        // A binding whose next line is neither content, children nor `#` is
        // reported at the binding itself
        let bound_node = binding()
            .then(choice((
                payload_line.clone().map(Some),
                token(Token::Newline).ignore_then(choice((
                    // Binding-only node: the children are its whole content
                    children.clone().map(|children| Some((None, children))),
                    payload_line.clone().map(Some),
                    filter(|(token, _): &TokenSpan| *token != Token::Hash)
                        .rewind()
                        .to(None::<NodeRest>),
                ))),
            )))
            .validate(|(binding, rest), span, emit| {
                let (payload, children) = match rest {
                    Some(rest) => rest,
                    None => {
                        emit(ParserError::custom(
                            span,
                            format!(
                                "binding `@{}:` has no content or children",
                                binding.name.as_deref().unwrap_or_default()
                            ),
                        ));
                        (None, Vec::new())
                    }
                };
                NodeWithSpans::new(Some(binding), payload, children)
            });

        let plain_node = payload_line
            .map(|(payload, children)| NodeWithSpans::new(None, payload, children));

        let node = bound_node.or(plain_node).labelled("node").boxed();

        let block = binding()
            .then_ignore(token(Token::Newline))
            .or_not()
            .then(token(Token::Hash))
            .then(node.clone())
            .then(node.clone().repeated())
            .map(|(((binding, hash), header), body)| {
                BlockWithSpans::new(binding, hash, header, body)
            })
            .labelled("block")
            .boxed();

        choice((
            node.clone()
                .map(EntryWithSpans::Node)
                .repeated()
                .at_least(1)
                .chain(block.clone().map(EntryWithSpans::Block).repeated()),
            block.map(EntryWithSpans::Block).repeated().at_least(1),
        ))
    })
}

/// Parse a whole document: an optional body followed by EOF
pub fn document() -> impl Parser<TokenSpan, Vec<EntryWithSpans>, Error = ParserError> {
    body()
        .or_not()
        .map(Option::unwrap_or_default)
        .then_ignore(token(Token::Eof))
        .then_ignore(end())
}

/// Run the grammar over lexed tokens.
///
/// Blank lines are dropped first; they never carry structure.
pub fn parse_tokens(tokens: Vec<SpannedToken>) -> Result<Vec<EntryWithSpans>, ParseError> {
    let (stream, positions): (Vec<TokenSpan>, Vec<Position>) = tokens
        .into_iter()
        .filter(|spanned| spanned.token != Token::BlankLine)
        .map(|spanned| ((spanned.token, spanned.span), spanned.start))
        .unzip();

    document().parse(stream).map_err(|errors| {
        let first = errors
            .into_iter()
            .next()
            .map(|error| convert_error(error, &positions));
        first.unwrap_or_else(|| ParseError::Syntax {
            message: "invalid document".to_string(),
            position: positions.last().copied().unwrap_or(Position::new(1, 1, 0)),
        })
    })
}

/// Map a chumsky error (spans are token indices) to a positioned ParseError
fn convert_error(error: ParserError, positions: &[Position]) -> ParseError {
    let index = error.span().start;
    let position = positions
        .get(index)
        .or_else(|| positions.last())
        .copied()
        .unwrap_or(Position::new(1, 1, 0));

    let found = match error.found() {
        Some((token, _)) => format!("unexpected {}", token),
        None => "unexpected end of input".to_string(),
    };
    let message = match (error.reason(), error.label()) {
        (SimpleReason::Custom(reason), _) => reason.clone(),
        (_, Some(label)) => format!("{} while parsing {}", found, label),
        (_, None) => found,
    };
    ParseError::Syntax { message, position }
}
