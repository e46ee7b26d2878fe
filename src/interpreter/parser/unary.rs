use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{LiteralValue, MemberProperty, Node, Property, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            binary::parse_logical,
            core::{ParseResult, parse_expression},
            statement::parse_function,
            utils::{advance, expect, parse_comma_separated, peek, unexpected},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`. They bind tighter than every binary operator: `!a && b` is
/// `(!a) && b`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A [`Node::UnaryExpr`] or a primary expression possibly followed by
/// postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let lexeme = peek(tokens)?;
    let operator = match lexeme.token {
        Token::Minus => UnaryOperator::Negate,
        Token::Bang => UnaryOperator::Not,
        _ => {
            let primary = ensure_sufficient_stack(|| parse_primary(tokens))?;
            return parse_postfix(tokens, primary);
        },
    };
    tokens.next();

    let argument = ensure_sufficient_stack(|| parse_unary(tokens))?;
    let span = lexeme.span.to(argument.span());
    Ok(Node::UnaryExpr { operator,
                         argument: Box::new(argument),
                         span })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric and string literals
/// - the named constants `null`, `undefined`, `true`, `false`
/// - identifiers
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - object literals (`{ ... }`)
/// - function expressions
///
/// A `{` only reaches this point in expression position; in statement
/// position it has already been taken as a block.
///
/// Array, object and grouping literals recurse back into the expression
/// grammar from here, so callers enter it through
/// [`ensure_sufficient_stack`].
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER | STRING | IDENTIFIER
///              | "(" expression ")"
///              | "[" elements "]"
///              | "{" properties "}"
///              | "function" IDENTIFIER? "(" params ")" "{" statements "}"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Node`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let lexeme = peek(tokens)?;

    match &lexeme.token {
        Token::Number(value) => {
            tokens.next();
            Ok(Node::NumericLiteral { value: *value,
                                      span:  lexeme.span, })
        },
        Token::String(value) => {
            tokens.next();
            Ok(Node::StringLiteral { value: value.clone(),
                                     span:  lexeme.span, })
        },
        Token::Identifier(name) => {
            tokens.next();
            Ok(LiteralValue::from_name(name).map_or_else(|| Node::Identifier { name: name.clone(),
                                                                               span: lexeme.span, },
                                                         |value| Node::Literal { value,
                                                                                 span: lexeme.span, }))
        },
        Token::LParen => parse_grouping(tokens),
        Token::LBracket => parse_array_literal(tokens),
        Token::LBrace => parse_object_literal(tokens),
        Token::Function => {
            let function = parse_function(tokens)?;
            let span = function.span;
            Ok(Node::FunctionExpression { function: Rc::new(function),
                                          span })
        },
        _ => Err(unexpected(lexeme)),
    }
}

/// Parses postfix operators applied to an expression.
///
/// This function is called after parsing a primary expression and handles
/// three kinds of postfix constructs, in any order and any number:
///
/// 1. **Named member access** `expr.name`
/// 2. **Computed member access** `expr[ index ]`
/// 3. **Calls** `expr(arg, ...)`
///
/// so `a.b[0](1)(2)` chains left to right.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "." IDENTIFIER
///              | postfix "[" expression "]"
///              | postfix "(" arguments ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression to which postfix operators will be applied.
///
/// # Returns
/// An updated [`Node`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if:
/// - `.` is not followed by an identifier,
/// - an `[` is not properly closed with `]`,
/// - an argument list is malformed.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Node) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    loop {
        let lexeme = peek(tokens)?;
        match lexeme.token {
            Token::Dot => {
                tokens.next();
                let name = advance(tokens)?;
                let Token::Identifier(property) = &name.token else {
                    return Err(ParseError::Expected { expected: "identifier after '.'".to_string(),
                                                      found:    name.token.to_string(),
                                                      span:     name.span, });
                };
                let span = node.span().to(name.span);
                node = Node::MemberExpr { object: Box::new(node),
                                          property: MemberProperty::Named(property.clone()),
                                          span };
            },
            Token::LBracket => {
                tokens.next();
                let index = parse_expression(tokens)?;
                let close = expect(tokens, &Token::RBracket, "']'")?;
                let span = node.span().to(close.span);
                node = Node::MemberExpr { object: Box::new(node),
                                          property: MemberProperty::Computed(Box::new(index)),
                                          span };
            },
            Token::LParen => {
                tokens.next();
                let (arguments, close) =
                    parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                let span = node.span().to(close);
                node = Node::CallExpr { callee: Box::new(node),
                                        arguments,
                                        span };
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`
///
/// Grammar `grouping := "(" expression ")"`
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    tokens.next();
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')'")?;
    Ok(expr)
}

/// Parses an array literal.
///
/// Expected form: `[ element, element, ... ]`
///
/// Elements are parsed at the logical level, so an assignment inside an
/// array literal has to be parenthesised.
///
/// # Returns
/// A [`Node::ArrayLiteral`] spanning both brackets.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let open = advance(tokens)?;
    let (elements, close) = parse_comma_separated(tokens, parse_logical, &Token::RBracket)?;

    Ok(Node::ArrayLiteral { elements,
                            span: open.span.to(close) })
}

/// Parses an object literal.
///
/// Expected form:
/// ```text
///     { key: value, "quoted key": value, shorthand, }
/// ```
/// Keys are identifiers or string literals. An identifier key without a
/// value is shorthand for `key: key`. A trailing comma is allowed.
///
/// # Errors
/// Returns a `ParseError` if:
/// - a key is neither an identifier nor a string,
/// - a string key has no `:` and value,
/// - properties are not separated by commas.
fn parse_object_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let open = advance(tokens)?;
    let mut properties = Vec::new();

    loop {
        let lexeme = advance(tokens)?;
        let (key, shorthand_allowed) = match &lexeme.token {
            Token::RBrace => {
                return Ok(Node::ObjectLiteral { properties,
                                                span: open.span.to(lexeme.span) });
            },
            Token::Identifier(name) => (name.clone(), true),
            Token::String(name) => (name.clone(), false),
            _ => {
                return Err(ParseError::Expected { expected: "property name".to_string(),
                                                  found:    lexeme.token.to_string(),
                                                  span:     lexeme.span, });
            },
        };

        let property = if peek(tokens)?.token == Token::Colon || !shorthand_allowed {
            expect(tokens, &Token::Colon, "':' after property name")?;
            let value = parse_expression(tokens)?;
            Property { key,
                       span: lexeme.span.to(value.span()),
                       value: Some(value) }
        } else {
            Property { key,
                       value: None,
                       span: lexeme.span }
        };
        properties.push(property);

        let separator = peek(tokens)?;
        match separator.token {
            Token::Comma => {
                tokens.next();
            },
            Token::RBrace => {},
            _ => {
                return Err(ParseError::Expected { expected: "',' or '}'".to_string(),
                                                  found:    separator.token.to_string(),
                                                  span:     separator.span, });
            },
        }
    }
}
