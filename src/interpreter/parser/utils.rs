use std::iter::Peekable;

use crate::{
    ast::LiteralValue,
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::core::ParseResult,
    },
    position::Span,
};

/// Returns the next lexeme without consuming it.
///
/// The token stream always ends in [`Token::Eof`], which no rule consumes,
/// so running dry is reported as an unexpected end of input rather than a
/// panic.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>)
                                                  -> ParseResult<&'a Lexeme>
    where I: Iterator<Item = &'a Lexeme>
{
    tokens.peek()
          .copied()
          .ok_or(ParseError::UnexpectedEndOfInput { span: Span::default() })
}

/// Consumes and returns the next lexeme.
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>)
                                                     -> ParseResult<&'a Lexeme>
    where I: Iterator<Item = &'a Lexeme>
{
    tokens.next()
          .ok_or(ParseError::UnexpectedEndOfInput { span: Span::default() })
}

/// Builds the error for a lexeme that cannot appear where it was found.
pub(in crate::interpreter::parser) fn unexpected(lexeme: &Lexeme) -> ParseError {
    match &lexeme.token {
        Token::Eof => ParseError::UnexpectedEndOfInput { span: lexeme.span },
        token => ParseError::UnexpectedToken { token: token.to_string(),
                                               span:  lexeme.span, },
    }
}

/// Consumes the next lexeme if it is `expected`.
///
/// The lexeme is left in place on a mismatch, and an error naming
/// `description` (e.g. `"')'"`) is returned.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &str)
                                                    -> ParseResult<&'a Lexeme>
    where I: Iterator<Item = &'a Lexeme>
{
    let lexeme = peek(tokens)?;
    if lexeme.token == *expected {
        tokens.next();
        return Ok(lexeme);
    }
    Err(ParseError::Expected { expected: description.to_string(),
                               found:    lexeme.token.to_string(),
                               span:     lexeme.span, })
}

/// Skips any number of `;` statement terminators.
pub(in crate::interpreter::parser) fn skip_semicolons<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Lexeme>
{
    while let Some(Lexeme { token: Token::Semicolon,
                            .. }) = tokens.peek()
    {
        tokens.next();
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call argument lists and
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// The parsed items and the span of the closing token.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<(Vec<T>, Span)>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut items = Vec::new();
    let first = peek(tokens)?;
    if first.token == *closing {
        tokens.next();

        return Ok((items, first.span));
    }
    loop {
        items.push(parse_item(tokens)?);
        let lexeme = advance(tokens)?;
        match &lexeme.token {
            Token::Comma => {},
            tok if tok == closing => return Ok((items, lexeme.span)),
            tok => {
                return Err(ParseError::Expected { expected: format!("',' or '{closing}'"),
                                                  found:    tok.to_string(),
                                                  span:     lexeme.span, });
            },
        }
    }
}

/// Parses a plain identifier and returns its name and span.
///
/// The next token must be `Token::Identifier`. Keywords are rejected here
/// because they lex as their own tokens.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Span)>
    where I: Iterator<Item = &'a Lexeme>
{
    let lexeme = peek(tokens)?;
    match &lexeme.token {
        Token::Identifier(name) => {
            tokens.next();
            Ok((name.clone(), lexeme.span))
        },
        tok => Err(ParseError::Expected { expected: "identifier".to_string(),
                                          found:    tok.to_string(),
                                          span:     lexeme.span, }),
    }
}

/// Parses a name that is about to be bound: a variable or a parameter.
///
/// Besides keywords, the named constants `null`, `undefined`, `true` and
/// `false` are refused since they could never be referenced.
pub(in crate::interpreter::parser) fn parse_binding_name<'a, I>(tokens: &mut Peekable<I>)
                                                                -> ParseResult<(String, Span)>
    where I: Iterator<Item = &'a Lexeme>
{
    let (name, span) = parse_identifier(tokens)?;
    if LiteralValue::from_name(&name).is_some() {
        return Err(ParseError::UnexpectedToken { token: name, span });
    }
    Ok((name, span))
}
