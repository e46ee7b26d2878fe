use crate::position::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing.
pub enum LexError {
    /// A character that starts no token.
    UnexpectedCharacter {
        /// The offending text.
        text: String,
        /// Where it was found.
        span: Span,
    },
    /// A string literal whose closing quote is missing.
    UnterminatedString {
        /// The opening quote character.
        quote: char,
        /// From the opening quote to the end of input.
        span:  Span,
    },
}

impl LexError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedCharacter { span, .. } | Self::UnterminatedString { span, .. } => *span,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { text, .. } => write!(f, "Unexpected character '{text}'"),
            Self::UnterminatedString { quote, .. } => {
                write!(f, "Unterminated string literal, expected closing {quote}")
            },
        }
    }
}

impl std::error::Error for LexError {}
