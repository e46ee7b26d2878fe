use crate::position::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Tried to read a variable that no enclosing scope declares.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// Where the variable was referenced.
        span: Span,
    },
    /// Tried to declare a name the current scope already owns.
    Redeclaration {
        /// The name of the variable.
        name: String,
        /// Where the second declaration was found.
        span: Span,
    },
    /// Tried to assign to a name that was never declared.
    AssignmentToUndeclared {
        /// The name of the variable.
        name: String,
        /// Where the assignment was found.
        span: Span,
    },
    /// Called a value that is neither a function nor a native function.
    NotCallable {
        /// Type name of the callee.
        type_name: &'static str,
        /// Where the call was found.
        span:      Span,
    },
    /// Accessed a member on a value that has none.
    NotIndexable {
        /// Type name of the accessed value.
        type_name: &'static str,
        /// Where the member expression was found.
        span:      Span,
    },
    /// Nested user function calls exceeded the configured maximum depth.
    StackOverflow {
        /// The configured maximum.
        max_depth: usize,
        /// The call that went one level too deep.
        span:      Span,
    },
    /// A host-provided function reported a failure.
    NativeFailure {
        /// What the host function reported.
        message: String,
        /// Where the call was found.
        span:    Span,
    },
}

impl RuntimeError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnknownVariable { span, .. }
            | Self::Redeclaration { span, .. }
            | Self::AssignmentToUndeclared { span, .. }
            | Self::NotCallable { span, .. }
            | Self::NotIndexable { span, .. }
            | Self::StackOverflow { span, .. }
            | Self::NativeFailure { span, .. } => *span,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, .. } | Self::AssignmentToUndeclared { name, .. } => {
                write!(f, "Variable '{name}' does not exist")
            },
            Self::Redeclaration { name, .. } => {
                write!(f, "Variable '{name}' cannot be redeclared")
            },
            Self::NotCallable { type_name, .. } => {
                write!(f, "Value of type '{type_name}' is not callable")
            },
            Self::NotIndexable { type_name, .. } => {
                write!(f, "Cannot access a member of a value of type '{type_name}'")
            },
            Self::StackOverflow { max_depth, .. } => {
                write!(f, "Maximum call depth of {max_depth} exceeded")
            },
            Self::NativeFailure { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
