use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{DeclarationKind, FunctionDef, LiteralValue, Node, VarDeclarator},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            block::{parse_block, parse_function_body},
            core::{ParseResult, parse_expression, parse_if, parse_while},
            utils::{advance, expect, parse_binding_name, parse_comma_separated, peek},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable declaration (`let` / `var`),
/// - a function declaration (`function name(...) { ... }`),
/// - an `if` statement,
/// - a `while` loop,
/// - a block (`{` in statement position is always a block),
/// - an expression used as a statement.
///
/// The dispatch is decided by the leading token; anything that is not
/// keyword-led or a brace falls through to an expression statement. Blocks
/// nest back into this function, so it runs under
/// [`ensure_sufficient_stack`].
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// A parsed statement [`Node`].
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    ensure_sufficient_stack(|| match peek(tokens)?.token {
        Token::Let | Token::Var => parse_variable_declaration(tokens),
        Token::Function if is_function_declaration(tokens) => parse_function_declaration(tokens),
        Token::If => parse_if(tokens),
        Token::While => parse_while(tokens),
        Token::LBrace => parse_block(tokens),
        _ => parse_expression(tokens),
    })
}

/// A `function` keyword directly followed by a name declares a function;
/// otherwise it starts a function expression.
fn is_function_declaration<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();
    matches!(lookahead.peek(),
             Some(Lexeme { token: Token::Identifier(_),
                           .. }))
}

/// Parses a variable declaration statement.
///
/// A declaration has the form `let <identifier> [= <expression>]`, with
/// further declarators separated by commas:
///
/// ```text
///     let a = 1, b, c = a + 1
/// ```
///
/// An omitted initializer becomes an `undefined` literal.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `let` or `var`.
///
/// # Returns
/// A `Node::VarDeclaration`.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name is missing or is a keyword or named constant,
/// - the initializer is malformed.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let keyword = advance(tokens)?;
    let kind = if keyword.token == Token::Var {
        DeclarationKind::Var
    } else {
        DeclarationKind::Let
    };

    let mut declarations = Vec::new();
    let mut span = keyword.span;

    loop {
        let (name, name_span) = parse_binding_name(tokens)?;

        let init = if peek(tokens)?.token == Token::Equals {
            tokens.next();
            parse_expression(tokens)?
        } else {
            Node::Literal { value: LiteralValue::Undefined,
                            span:  name_span, }
        };

        let declarator_span = name_span.to(init.span());
        span = span.to(declarator_span);
        declarations.push(VarDeclarator { name,
                                          init,
                                          span: declarator_span });

        if peek(tokens)?.token != Token::Comma {
            break;
        }
        tokens.next();
    }

    Ok(Node::VarDeclaration { kind,
                              declarations,
                              span })
}

/// Parses a function declaration of the form
/// `function <name>(param1, param2, ...) { <statements> }`.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let function = parse_function(tokens)?;
    let span = function.span;

    Ok(Node::FunctionDeclaration { function: Rc::new(function),
                                   span })
}

/// Parses the shared shape of function declarations and expressions.
///
/// The name is optional here; callers decide whether one is required.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the parameter list is not parenthesised or names a parameter twice,
/// - the body is not a braced block,
/// - any body statement fails to parse.
pub(in crate::interpreter::parser) fn parse_function<'a, I>(tokens: &mut Peekable<I>)
                                                            -> ParseResult<FunctionDef>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let keyword = advance(tokens)?;

    let name = match peek(tokens)?.token {
        Token::Identifier(_) => Some(parse_binding_name(tokens)?.0),
        _ => None,
    };

    expect(tokens, &Token::LParen, "'(' before parameters")?;
    let (params, _) = parse_comma_separated(tokens, parse_binding_name, &Token::RParen)?;

    let mut names: Vec<String> = Vec::with_capacity(params.len());
    for (param, span) in params {
        if names.contains(&param) {
            return Err(ParseError::DuplicateParameter { name: param,
                                                        span });
        }
        names.push(param);
    }

    let (body, body_span) = parse_function_body(tokens)?;

    Ok(FunctionDef { name,
                     params: names,
                     body,
                     span: keyword.span.to(body_span) })
}
