/// Core parsing entry points.
///
/// Contains the program parser, expression entry point, assignment and the
/// `if`/`while` statements, along with the shared `ParseResult` alias.
pub mod core;

/// Prefix, postfix and primary expressions.
///
/// Handles `-`/`!`, member access, calls, literals, grouping and function
/// expressions.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the logical, comparison, additive and multiplicative
/// precedence levels.
pub mod binary;

/// Braced statement lists.
///
/// Parses blocks and function bodies.
pub mod block;

/// Helpers shared by the parsing functions.
pub mod utils;

/// Statement parsing.
///
/// Dispatches on the leading token to declarations, control flow, blocks and
/// expression statements.
pub mod statement;

pub use self::core::parse;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::core::parse_program;
    use crate::{
        ast::{BinaryOperator, LogicalOperator, MemberProperty, Node, UnaryOperator},
        error::ParseError,
        interpreter::lexer::tokenize,
    };

    fn body(source: &str) -> Vec<Node> {
        let lexemes = tokenize(source).unwrap();
        match &parse_program(&lexemes).unwrap() {
            Node::Program { body, .. } => body.clone(),
            other => panic!("expected a program, got {other:?}"),
        }
    }

    fn single(source: &str) -> Node {
        let mut nodes = body(source);
        assert_eq!(nodes.len(), 1, "expected a single statement in {source:?}");
        nodes.remove(0)
    }

    fn parse_error(source: &str) -> ParseError {
        let lexemes = tokenize(source).unwrap();
        parse_program(&lexemes).unwrap_err()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let node = single("2 + 3 * 4");
        let Node::BinaryExpr { operator, right, .. } = &node else {
            panic!("expected a binary expression");
        };
        assert_eq!(*operator, BinaryOperator::Add);
        assert!(matches!(**right,
                         Node::BinaryExpr { operator: BinaryOperator::Mul,
                                            .. }));
    }

    #[test]
    fn same_level_operators_fold_left() {
        let node = single("10 - 4 - 3");
        let Node::BinaryExpr { operator, left, .. } = &node else {
            panic!("expected a binary expression");
        };
        assert_eq!(*operator, BinaryOperator::Sub);
        assert!(matches!(**left,
                         Node::BinaryExpr { operator: BinaryOperator::Sub,
                                            .. }));
    }

    #[test]
    fn comparison_sits_between_additive_and_logical() {
        let node = single("a + 1 < b && c");
        let Node::LogicalExpr { operator, left, right, .. } = &node else {
            panic!("expected a logical expression");
        };
        assert_eq!(*operator, LogicalOperator::And);
        assert!(matches!(**left,
                         Node::BinaryExpr { operator: BinaryOperator::Less,
                                            .. }));
        assert!(matches!(**right, Node::Identifier { .. }));
    }

    #[test]
    fn unary_binds_tightly() {
        let node = single("!a && b");
        let Node::LogicalExpr { left, .. } = &node else {
            panic!("expected a logical expression");
        };
        assert!(matches!(**left,
                         Node::UnaryExpr { operator: UnaryOperator::Not,
                                           .. }));
    }

    #[test]
    fn assignment_is_right_associative() {
        let node = single("a = b += 1");
        let Node::VarAssignment { name, value, .. } = &node else {
            panic!("expected an assignment");
        };
        assert_eq!(name, "a");
        assert!(matches!(**value, Node::VarAssignment { .. }));
    }

    #[test]
    fn identifier_without_assignment_is_an_expression() {
        assert!(matches!(single("a == b"),
                         Node::BinaryExpr { operator: BinaryOperator::Equal,
                                            .. }));
    }

    #[test]
    fn brace_in_statement_position_is_a_block() {
        assert!(matches!(single("{ a; 1 }"), Node::BlockStatement { .. }));
    }

    #[test]
    fn brace_in_expression_position_is_an_object() {
        let node = single("let o = { a: 1, \"b c\": 2, d, };");
        let Node::VarDeclaration { declarations, .. } = &node else {
            panic!("expected a declaration");
        };
        let Node::ObjectLiteral { properties, .. } = &declarations[0].init else {
            panic!("expected an object literal");
        };
        let keys: Vec<&str> = properties.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b c", "d"]);
        assert!(properties[2].value.is_none());
    }

    #[test]
    fn postfix_operators_chain() {
        let node = single("a.b[0](1, 2)");
        let Node::CallExpr { callee, arguments, .. } = &node else {
            panic!("expected a call");
        };
        assert_eq!(arguments.len(), 2);
        let Node::MemberExpr { object, property, .. } = &**callee else {
            panic!("expected a computed member");
        };
        assert!(matches!(property, MemberProperty::Computed(_)));
        assert!(matches!(**object,
                         Node::MemberExpr { property: MemberProperty::Named(_),
                                            .. }));
    }

    #[test]
    fn declaration_with_several_declarators() {
        let node = single("let a = 1, b");
        let Node::VarDeclaration { declarations, .. } = &node else {
            panic!("expected a declaration");
        };
        assert_eq!(declarations.len(), 2);
        assert!(matches!(declarations[1].init, Node::Literal { .. }));
    }

    #[test]
    fn semicolons_are_optional_and_may_repeat() {
        assert_eq!(body("let a = 1;; a a;").len(), 3);
    }

    #[test]
    fn else_if_chains_nest() {
        let node = single("if (a) { 1 } else if (b) { 2 } else { 3 }");
        let Node::IfStatement { alternate, .. } = &node else {
            panic!("expected an if statement");
        };
        assert!(matches!(alternate.as_deref(), Some(Node::IfStatement { .. })));
    }

    #[test]
    fn function_expression_in_expression_position() {
        let node = single("let f = function (x) { x }");
        let Node::VarDeclaration { declarations, .. } = &node else {
            panic!("expected a declaration");
        };
        let Node::FunctionExpression { function, .. } = &declarations[0].init else {
            panic!("expected a function expression");
        };
        assert_eq!(function.name, None);
        assert_eq!(function.params, vec!["x".to_string()]);
    }

    #[test]
    fn rejects_duplicate_parameters() {
        assert_eq!(parse_error("function f(a, a) { a }").to_string(),
                   "Duplicate parameter 'a' in function declaration");
    }

    #[test]
    fn reports_missing_closing_paren() {
        assert_eq!(parse_error("(1 + 2").to_string(),
                   "Expected ')', found 'end of file'");
    }

    #[test]
    fn reports_unexpected_token() {
        assert_eq!(parse_error("let x = * 2").to_string(), "Unexpected token '*'");
    }

    #[test]
    fn reports_end_of_input() {
        assert_eq!(parse_error("1 +").to_string(), "Unexpected end of input");
    }

    #[test]
    fn if_requires_parenthesised_condition() {
        assert!(matches!(parse_error("if a { 1 }"), ParseError::Expected { .. }));
    }

    #[test]
    fn constants_cannot_be_declared() {
        assert!(matches!(parse_error("let true = 1"), ParseError::UnexpectedToken { .. }));
    }
}
