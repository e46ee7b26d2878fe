use std::{fmt, mem, rc::Rc};

use crate::position::Span;

/// One of the four named constants that lex as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralValue {
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `true`
    True,
    /// `false`
    False,
}

impl LiteralValue {
    /// Maps an identifier to a named constant, if it is one.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "undefined" => Some(Self::Undefined),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            _ => None,
        }
    }
}

/// An abstract syntax tree (AST) node.
///
/// `Node` covers every syntax form of the language, statements and
/// expressions alike; the language is expression-oriented, so every node
/// evaluates to a value. Each variant carries the [`Span`] of its full
/// source extent, used for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The whole script.
    Program {
        /// Top-level statements in source order.
        body:     Vec<Self>,
        /// Comments found in the source, kept out of evaluation.
        comments: Vec<Comment>,
        /// Extent of the whole source.
        span:     Span,
    },
    /// A numeric literal such as `4` or `2.5`.
    NumericLiteral {
        /// The literal value.
        value: f64,
        /// Source extent.
        span:  Span,
    },
    /// A string literal.
    StringLiteral {
        /// The contents, without quotes.
        value: String,
        /// Source extent.
        span:  Span,
    },
    /// `null`, `undefined`, `true` or `false`.
    Literal {
        /// Which constant.
        value: LiteralValue,
        /// Source extent.
        span:  Span,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Source extent.
        span: Span,
    },
    /// `[a, b, c]`
    ArrayLiteral {
        /// Element expressions.
        elements: Vec<Self>,
        /// Source extent.
        span:     Span,
    },
    /// `{ key: value, shorthand }`
    ObjectLiteral {
        /// Properties in source order.
        properties: Vec<Property>,
        /// Source extent.
        span:       Span,
    },
    /// `let a = 1, b;` or `var a;`
    VarDeclaration {
        /// Which keyword introduced the declaration.
        kind:         DeclarationKind,
        /// One entry per declared name.
        declarations: Vec<VarDeclarator>,
        /// Source extent.
        span:         Span,
    },
    /// `function name(params) { body }`
    FunctionDeclaration {
        /// The declared function.
        function: Rc<FunctionDef>,
        /// Source extent.
        span:     Span,
    },
    /// `function (params) { body }` in expression position.
    FunctionExpression {
        /// The anonymous function.
        function: Rc<FunctionDef>,
        /// Source extent.
        span:     Span,
    },
    /// `if (condition) { ... } else ...`
    IfStatement {
        /// The condition expression.
        condition:  Box<Self>,
        /// Block run when the condition is truthy.
        consequent: Box<Self>,
        /// Block or chained `if` run otherwise.
        alternate:  Option<Box<Self>>,
        /// Source extent.
        span:       Span,
    },
    /// `while (condition) { ... }`
    WhileStatement {
        /// Re-evaluated before every iteration.
        condition: Box<Self>,
        /// The loop body, a block.
        body:      Box<Self>,
        /// Source extent.
        span:      Span,
    },
    /// `{ statements }` in statement position.
    BlockStatement {
        /// Statements inside the block.
        body: Vec<Self>,
        /// Source extent.
        span: Span,
    },
    /// `name = value`, `name += value`, ...
    VarAssignment {
        /// The assigned variable.
        name:     String,
        /// The assignment operator.
        operator: AssignmentOperator,
        /// Right-hand side.
        value:    Box<Self>,
        /// Source extent.
        span:     Span,
    },
    /// `object.name` or `object[expression]`
    MemberExpr {
        /// The accessed value.
        object:   Box<Self>,
        /// The accessed member.
        property: MemberProperty,
        /// Source extent.
        span:     Span,
    },
    /// `callee(arguments)`
    CallExpr {
        /// The called expression.
        callee:    Box<Self>,
        /// Argument expressions in source order.
        arguments: Vec<Self>,
        /// Source extent.
        span:      Span,
    },
    /// `left && right` or `left || right`
    LogicalExpr {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: LogicalOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Source extent.
        span:     Span,
    },
    /// Arithmetic and comparison operations.
    BinaryExpr {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Source extent.
        span:     Span,
    },
    /// `-argument` or `!argument`
    UnaryExpr {
        /// The operator.
        operator: UnaryOperator,
        /// The operand.
        argument: Box<Self>,
        /// Source extent.
        span:     Span,
    },
}

impl Node {
    /// Gets the source extent of `self`.
    ///
    /// ## Example
    /// ```
    /// use quill::{ast::Node, position::{Position, Span}};
    ///
    /// let span = Span::new(Position::new(0, 0, 0), Position::new(1, 0, 1));
    /// let node = Node::Identifier { name: "x".to_string(), span };
    ///
    /// assert_eq!(node.span(), span);
    /// ```
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Program { span, .. }
            | Self::NumericLiteral { span, .. }
            | Self::StringLiteral { span, .. }
            | Self::Literal { span, .. }
            | Self::Identifier { span, .. }
            | Self::ArrayLiteral { span, .. }
            | Self::ObjectLiteral { span, .. }
            | Self::VarDeclaration { span, .. }
            | Self::FunctionDeclaration { span, .. }
            | Self::FunctionExpression { span, .. }
            | Self::IfStatement { span, .. }
            | Self::WhileStatement { span, .. }
            | Self::BlockStatement { span, .. }
            | Self::VarAssignment { span, .. }
            | Self::MemberExpr { span, .. }
            | Self::CallExpr { span, .. }
            | Self::LogicalExpr { span, .. }
            | Self::BinaryExpr { span, .. }
            | Self::UnaryExpr { span, .. } => *span,
        }
    }

    /// A short name for the node kind, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "program",
            Self::NumericLiteral { .. } => "numeric-literal",
            Self::StringLiteral { .. } => "string-literal",
            Self::Literal { .. } => "literal",
            Self::Identifier { .. } => "identifier",
            Self::ArrayLiteral { .. } => "array-literal",
            Self::ObjectLiteral { .. } => "object-literal",
            Self::VarDeclaration { .. } => "var-declaration",
            Self::FunctionDeclaration { .. } => "function-declaration",
            Self::FunctionExpression { .. } => "function-expression",
            Self::IfStatement { .. } => "if-statement",
            Self::WhileStatement { .. } => "while-statement",
            Self::BlockStatement { .. } => "block-statement",
            Self::VarAssignment { .. } => "var-assignment",
            Self::MemberExpr { .. } => "member-expr",
            Self::CallExpr { .. } => "call-expr",
            Self::LogicalExpr { .. } => "logical-expr",
            Self::BinaryExpr { .. } => "binary-expr",
            Self::UnaryExpr { .. } => "unary-expr",
        }
    }
}

/// Tears the tree down with an explicit work list, so dropping a deeply
/// nested tree cannot exhaust the stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl Node {
    /// Moves the direct children of `self` into `out`, leaving `self` a leaf.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        match self {
            Self::Program { body, .. } | Self::BlockStatement { body, .. } => out.append(body),
            Self::ArrayLiteral { elements, .. } => out.append(elements),
            Self::ObjectLiteral { properties, .. } => {
                out.extend(properties.drain(..).filter_map(|property| property.value));
            },
            Self::VarDeclaration { declarations, .. } => {
                out.extend(declarations.drain(..).map(|declarator| declarator.init));
            },
            Self::FunctionDeclaration { function, .. } | Self::FunctionExpression { function, .. } => {
                if let Some(function) = Rc::get_mut(function) {
                    out.append(&mut function.body);
                }
            },
            Self::IfStatement { condition,
                                consequent,
                                alternate,
                                .. } => {
                out.push(take(condition));
                out.push(take(consequent));
                if let Some(alternate) = alternate.take() {
                    out.push(*alternate);
                }
            },
            Self::WhileStatement { condition, body, .. } => {
                out.push(take(condition));
                out.push(take(body));
            },
            Self::VarAssignment { value, .. } => out.push(take(value)),
            Self::MemberExpr { object, property, .. } => {
                out.push(take(object));
                if let MemberProperty::Computed(expr) = property {
                    out.push(take(expr));
                }
            },
            Self::CallExpr { callee, arguments, .. } => {
                out.push(take(callee));
                out.append(arguments);
            },
            Self::LogicalExpr { left, right, .. } | Self::BinaryExpr { left, right, .. } => {
                out.push(take(left));
                out.push(take(right));
            },
            Self::UnaryExpr { argument, .. } => out.push(take(argument)),
            Self::NumericLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::Literal { .. }
            | Self::Identifier { .. } => {},
        }
    }
}

/// Swaps a boxed child out for a leaf.
fn take(node: &mut Node) -> Node {
    mem::replace(node,
                 Node::Literal { value: LiteralValue::Undefined,
                                 span:  Span::default(), })
}

/// A comment collected from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The comment text without its `//` or `/* */` markers.
    pub text: String,
    /// Source extent, markers included.
    pub span: Span,
}

/// A single `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The property name.
    pub key:   String,
    /// The value, or `None` for shorthand `{ key }`, which resolves `key`
    /// as a variable at evaluation time.
    pub value: Option<Node>,
    /// Source extent.
    pub span:  Span,
}

/// Whether a declaration was introduced with `let` or `var`. Both behave
/// identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `let`
    Let,
    /// `var`
    Var,
}

/// One `name = init` part of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    /// The declared name.
    pub name: String,
    /// The initializer; an omitted one is an `undefined` literal.
    pub init: Node,
    /// Source extent of the name and initializer.
    pub span: Span,
}

/// A user-defined function, shared between the syntax tree and every
/// function value created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The function name, `None` for function expressions.
    pub name:   Option<String>,
    /// The parameter names, in order.
    pub params: Vec<String>,
    /// The statements of the function body.
    pub body:   Vec<Node>,
    /// Source extent of the whole definition.
    pub span:   Span,
}

/// The member named by a [`Node::MemberExpr`].
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `object.name`
    Named(String),
    /// `object[expression]`
    Computed(Box<Node>),
}

/// Represents an assignment operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
}

impl AssignmentOperator {
    /// The arithmetic operator a compound assignment applies, or `None` for
    /// plain `=`.
    #[must_use]
    pub const fn binary_operator(self) -> Option<BinaryOperator> {
        match self {
            Self::Assign => None,
            Self::AddAssign => Some(BinaryOperator::Add),
            Self::SubAssign => Some(BinaryOperator::Sub),
            Self::MulAssign => Some(BinaryOperator::Mul),
            Self::DivAssign => Some(BinaryOperator::Div),
            Self::ModAssign => Some(BinaryOperator::Mod),
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`), value and type
    Equal,
    /// Not equal to (`!=`), value only
    NotEqual,
}

/// Represents a logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_deep_tree_does_not_recurse() {
        let mut node = Node::Literal { value: LiteralValue::True,
                                       span:  Span::default(), };
        for _ in 0..200_000 {
            node = Node::UnaryExpr { operator: UnaryOperator::Not,
                                     argument: Box::new(node),
                                     span:     Span::default(), };
        }
        drop(node);
    }

    #[test]
    fn dropping_a_deep_block_nest_does_not_recurse() {
        let mut node = Node::BlockStatement { body: Vec::new(),
                                              span: Span::default(), };
        for _ in 0..200_000 {
            node = Node::BlockStatement { body: vec![node],
                                          span: Span::default(), };
        }
        drop(node);
    }
}
