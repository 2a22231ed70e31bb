//! Token-level parser combinators for the puddlejumper grammar

use chumsky::prelude::*;
use std::ops::Range;

use crate::puddlejumper::ast::Payload;
use crate::puddlejumper::lexer::Token;
use crate::puddlejumper::parser::ir::{BindingWithSpan, PayloadWithSpan};

/// Type alias for token with span
pub(crate) type TokenSpan = (Token, Range<usize>);

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token type, keeping its byte range
pub(crate) fn token(
    t: Token,
) -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).map(|(_, span)| span)
}

/// An IDENTIFIER token with its byte range
pub(crate) fn identifier(
) -> impl Parser<TokenSpan, (String, Range<usize>), Error = ParserError> + Clone {
    select! { (Token::Identifier(name), range) => (name, range) }.labelled("identifier")
}

/// `@` IDENTIFIER? `:`
pub(crate) fn binding() -> impl Parser<TokenSpan, BindingWithSpan, Error = ParserError> + Clone {
    token(Token::At)
        .then(identifier().or_not())
        .then(token(Token::Colon))
        .map(|((at, name), colon)| BindingWithSpan {
            name: name.map(|(name, _)| name),
            span: at.start..colon.end,
        })
        .labelled("binding")
}

/// `@` IDENTIFIER
pub(crate) fn reference() -> impl Parser<TokenSpan, PayloadWithSpan, Error = ParserError> + Clone
{
    token(Token::At)
        .then(identifier())
        .map(|(at, (name, span))| PayloadWithSpan {
            payload: Payload::Reference(name),
            span: at.start..span.end,
        })
        .labelled("reference")
}

pub(crate) fn content() -> impl Parser<TokenSpan, PayloadWithSpan, Error = ParserError> + Clone {
    select! {
        (Token::Content(text), range) => PayloadWithSpan {
            payload: Payload::Content(text),
            span: range,
        }
    }
    .labelled("content")
}

/// What a node line says: content text or a reference
pub(crate) fn payload() -> impl Parser<TokenSpan, PayloadWithSpan, Error = ParserError> + Clone {
    content().or(reference())
}
