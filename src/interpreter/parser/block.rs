use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{expect, peek, skip_semicolons},
        },
    },
    position::Span,
};

/// Parses a block statement delimited by braces.
///
/// A block consists of zero or more statements, each optionally followed by
/// `;`. Parsing continues until a closing `}` token is encountered. The
/// child scope a block introduces is created at evaluation time, not here.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// A `Node::BlockStatement` containing all parsed statements.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let (body, span) = parse_braced_statements(tokens)?;
    Ok(Node::BlockStatement { body, span })
}

/// Parses a function body. Same shape as a block, but the statements run
/// directly in the call scope, so no block node is produced.
pub fn parse_function_body<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Vec<Node>, Span)>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_braced_statements(tokens)
}

fn parse_braced_statements<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Vec<Node>, Span)>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let open = expect(tokens, &Token::LBrace, "'{'")?;
    let mut statements = Vec::new();

    loop {
        skip_semicolons(tokens);

        let lexeme = peek(tokens)?;
        match lexeme.token {
            Token::RBrace => {
                tokens.next();
                return Ok((statements, open.span.to(lexeme.span)));
            },
            Token::Eof => {
                return Err(ParseError::Expected { expected: "'}'".to_string(),
                                                  found:    lexeme.token.to_string(),
                                                  span:     lexeme.span, });
            },
            _ => statements.push(parse_statement(tokens)?),
        }
    }
}
