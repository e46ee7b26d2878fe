use crate::position::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found a token that cannot start or continue the construct being
    /// parsed.
    UnexpectedToken {
        /// The token encountered, as written in the source.
        token: String,
        /// Where the token was found.
        span:  Span,
    },
    /// A specific token was required but something else was found.
    Expected {
        /// What the parser was looking for, e.g. `')'`.
        expected: String,
        /// The token actually found.
        found:    String,
        /// Where the unexpected token was found.
        span:     Span,
    },
    /// Reached the end of the token stream unexpectedly.
    UnexpectedEndOfInput {
        /// Position of the end of input.
        span: Span,
    },
    /// A function lists the same parameter twice.
    DuplicateParameter {
        /// The repeated parameter name.
        name: String,
        /// Where the second occurrence was found.
        span: Span,
    },
}

impl ParseError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::Expected { span, .. }
            | Self::UnexpectedEndOfInput { span }
            | Self::DuplicateParameter { span, .. } => *span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, .. } => write!(f, "Unexpected token '{token}'"),
            Self::Expected { expected, found, .. } => {
                write!(f, "Expected {expected}, found '{found}'")
            },
            Self::UnexpectedEndOfInput { .. } => write!(f, "Unexpected end of input"),
            Self::DuplicateParameter { name, .. } => {
                write!(f, "Duplicate parameter '{name}' in function declaration")
            },
        }
    }
}

impl std::error::Error for ParseError {}
