use std::iter::Peekable;

use crate::{
    ast::{AssignmentOperator, Comment, Node},
    error::{Error, ParseError},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            binary::parse_logical,
            block::parse_block,
            statement::parse_statement,
            utils::{advance, expect, peek, skip_semicolons},
        },
    },
    position::{Position, Span},
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token list into a [`Node::Program`].
///
/// Comment tokens are set aside into the program's `comments`; everything
/// else is parsed as a sequence of statements, each optionally followed by
/// `;`. Parsing stops at the first error.
///
/// # Errors
/// Returns the first [`ParseError`], tagged with `filename`.
///
/// # Example
/// ```
/// use quill::{
///     ast::Node,
///     interpreter::{lexer::lexerize, parser::parse},
/// };
///
/// let lexemes = lexerize("demo.ql", "// answer\nlet x = 42;").unwrap();
/// let program = parse("demo.ql", &lexemes).unwrap();
/// let Node::Program { body, comments, .. } = &program else {
///     unreachable!()
/// };
///
/// assert_eq!(body.len(), 1);
/// assert_eq!(comments[0].text, " answer");
/// ```
pub fn parse(filename: &str, lexemes: &[Lexeme]) -> Result<Node, Error> {
    let program = parse_program(lexemes).map_err(|e| Error::new(filename, e))?;
    tracing::debug!(filename, "parsed program");
    Ok(program)
}

/// Stage-local parser entry point used by [`parse`].
pub(crate) fn parse_program(lexemes: &[Lexeme]) -> ParseResult<Node> {
    let (comment_lexemes, code): (Vec<&Lexeme>, Vec<&Lexeme>) =
        lexemes.iter()
               .partition(|l| matches!(l.token, Token::Comment(_)));

    let comments = comment_lexemes.into_iter()
                                  .filter_map(|l| match &l.token {
                                      Token::Comment(text) => Some(Comment { text: text.clone(),
                                                                             span: l.span, }),
                                      _ => None,
                                  })
                                  .collect();

    let mut tokens = code.iter().copied().peekable();
    let mut body = Vec::new();

    loop {
        skip_semicolons(&mut tokens);
        match tokens.peek() {
            None
            | Some(Lexeme { token: Token::Eof,
                            .. }) => break,
            Some(_) => body.push(parse_statement(&mut tokens)?),
        }
    }

    let end = lexemes.last().map_or_else(Position::default, |l| l.span.right);
    Ok(Node::Program { body,
                       comments,
                       span: Span::new(Position::default(), end) })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy:
///
/// ```text
///     expression     := assignment
///     assignment     := IDENTIFIER ("=" | "+=" | "-=" | "*=" | "/=" | "%=") expression
///                     | logical
///     logical        := comparison (("&&" | "||") comparison)*
///     comparison     := additive (("<" | ">" | "<=" | ">=" | "==" | "!=") additive)*
///     additive       := multiplicative (("+" | "-") multiplicative)*
///     multiplicative := unary (("*" | "/" | "%") unary)*
///     unary          := ("-" | "!") unary | postfix
///     postfix        := primary ("." IDENTIFIER | "[" expression "]" | "(" arguments ")")*
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    ensure_sufficient_stack(|| parse_assignment(tokens))
}

/// Parses a variable assignment, or falls through to the logical level.
///
/// Assignment cannot be reached by precedence climbing alone: the target
/// has to be recognised before it is parsed as a primary. The parser looks
/// one token past an identifier, and if that token is an assignment
/// operator it builds a [`Node::VarAssignment`] directly. The right-hand
/// side is a full expression, so `a = b = 1` assigns right to left.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let first = peek(tokens)?;
    if let Token::Identifier(name) = &first.token {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some(operator) = lookahead.peek().and_then(|l| token_to_assignment(&l.token)) {
            tokens.next();
            tokens.next();

            let value = parse_expression(tokens)?;
            let span = first.span.to(value.span());
            return Ok(Node::VarAssignment { name: name.clone(),
                                            operator,
                                            value: Box::new(value),
                                            span });
        }
    }

    parse_logical(tokens)
}

/// Maps a token to its assignment operator, if it is one.
#[must_use]
pub const fn token_to_assignment(token: &Token) -> Option<AssignmentOperator> {
    match token {
        Token::Equals => Some(AssignmentOperator::Assign),
        Token::PlusAssign => Some(AssignmentOperator::AddAssign),
        Token::MinusAssign => Some(AssignmentOperator::SubAssign),
        Token::StarAssign => Some(AssignmentOperator::MulAssign),
        Token::SlashAssign => Some(AssignmentOperator::DivAssign),
        Token::PercentAssign => Some(AssignmentOperator::ModAssign),
        _ => None,
    }
}

/// Parses a parenthesised condition: `"(" expression ")"`.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>, keyword: &str) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    expect(tokens, &Token::LParen, &format!("'(' after '{keyword}'"))?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')'")?;
    Ok(condition)
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if (<condition>) { ... }
///     else if (<condition>) { ... }
///     else { ... }
/// ```
/// Nested `else if` constructs are parsed recursively.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
///
/// # Returns
/// A `Node::IfStatement` representing the full conditional.
///
/// # Errors
/// - `Expected` if the parentheses or braces are missing.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let keyword = advance(tokens)?;
    let condition = parse_condition(tokens, "if")?;
    let consequent = parse_block(tokens)?;
    let mut span = keyword.span.to(consequent.span());

    let alternate = match peek(tokens)?.token {
        Token::Else => {
            tokens.next();

            let branch = match peek(tokens)?.token {
                Token::If => parse_if(tokens)?,
                _ => parse_block(tokens)?,
            };
            span = span.to(branch.span());
            Some(Box::new(branch))
        },
        _ => None,
    };

    Ok(Node::IfStatement { condition: Box::new(condition),
                           consequent: Box::new(consequent),
                           alternate,
                           span })
}

/// Parses a `while (<condition>) { ... }` loop.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let keyword = advance(tokens)?;
    let condition = parse_condition(tokens, "while")?;
    let body = parse_block(tokens)?;
    let span = keyword.span.to(body.span());

    Ok(Node::WhileStatement { condition: Box::new(condition),
                              body: Box::new(body),
                              span })
}
