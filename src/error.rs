/// Lexing errors.
///
/// Raised when the lexer meets a character that starts no token, or a
/// string literal that never closes.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// unexpected tokens, missing delimiters and malformed declarations.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// unknown variables, redeclarations and calls to non-callable values.
pub mod runtime_error;

use std::fmt;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

use crate::position::Span;

/// The stage-specific error carried by an [`Error`].
#[derive(Debug)]
pub enum ErrorKind {
    /// The source could not be split into tokens.
    Lex(LexError),
    /// The tokens do not form a valid program.
    Parse(ParseError),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl ErrorKind {
    /// Source extent the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span(),
            Self::Parse(e) => e.span(),
            Self::Runtime(e) => e.span(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl From<LexError> for ErrorKind {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for ErrorKind {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

/// A pipeline error tagged with the file it came from.
///
/// Every stage reports its own error type; the driver attaches the file
/// name when the error leaves the stage. Rendering follows the
/// `<filename>:<line>:<column>: <details>` convention, one-indexed.
///
/// # Example
/// ```
/// let err = quill::run("demo.ql", "let x = 1;\ny = 5;").unwrap_err();
///
/// assert_eq!(err.to_string(), "demo.ql:2:1: Variable 'y' does not exist");
/// ```
#[derive(Debug)]
pub struct Error {
    /// Name of the script that produced the error.
    pub filename: String,
    /// What went wrong, and where.
    pub kind:     ErrorKind,
}

impl Error {
    pub fn new(filename: impl Into<String>, kind: impl Into<ErrorKind>) -> Self {
        Self { filename: filename.into(),
               kind:     kind.into(), }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        self.kind.span()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.filename, self.span().left, self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Lex(e) => Some(e),
            ErrorKind::Parse(e) => Some(e),
            ErrorKind::Runtime(e) => Some(e),
        }
    }
}
