use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, LogicalOperator, Node},
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents an arithmetic
/// or comparison operator. Returns `None` for all other tokens.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::AndAnd), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Determines whether a binary operator belongs to the comparison class:
/// `<`, `>`, `<=`, `>=`, `==`, `!=`.
///
/// # Example
/// ```
/// use quill::{ast::BinaryOperator, interpreter::parser::binary::is_comparison_op};
///
/// assert!(is_comparison_op(BinaryOperator::Less));
/// assert!(!is_comparison_op(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual)
}

/// Parses logical expressions.
///
/// `&&` and `||` share one precedence level and chain left-associatively,
/// so `a || b && c` is `(a || b) && c`.
///
/// Grammar: `logical := comparison (("&&" | "||") comparison)*`
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// A tree of `Node::LogicalExpr` nodes, or the comparison operand itself.
pub fn parse_logical<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut left = parse_comparison(tokens)?;

    loop {
        let operator = match tokens.peek() {
            Some(Lexeme { token: Token::AndAnd,
                          .. }) => LogicalOperator::And,
            Some(Lexeme { token: Token::OrOr,
                          .. }) => LogicalOperator::Or,
            _ => break,
        };
        tokens.next();

        let right = parse_comparison(tokens)?;
        let span = left.span().to(right.span());
        left = Node::LogicalExpr { left: Box::new(left),
                                   operator,
                                   right: Box::new(right),
                                   span };
    }

    Ok(left)
}

/// Parses relational and equality operators.
///
/// All comparison operators share one level and chain left-associatively,
/// e.g. `a < b == true` is `(a < b) == true`.
///
/// Grammar: `comparison := additive (("<" | ">" | "<=" | ">=" | "==" | "!=")
/// additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut left = parse_additive(tokens)?;

    while let Some(lexeme) = tokens.peek() {
        let operator = match token_to_binary_operator(&lexeme.token) {
            Some(op) if is_comparison_op(op) => op,
            _ => break,
        };
        tokens.next();

        let right = parse_additive(tokens)?;
        left = binary(left, operator, right);
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A `Node::BinaryExpr` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some(lexeme) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&lexeme.token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = binary(left, op, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some(lexeme) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&lexeme.token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            tokens.next();
            let right = parse_unary(tokens)?;
            left = binary(left, op, right);
            continue;
        }
        break;
    }
    Ok(left)
}

fn binary(left: Node, operator: BinaryOperator, right: Node) -> Node {
    let span = left.span().to(right.span());
    Node::BinaryExpr { left: Box::new(left),
                       operator,
                       right: Box::new(right),
                       span }
}
