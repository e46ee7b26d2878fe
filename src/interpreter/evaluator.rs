/// Binary and logical operator evaluation.
///
/// Implements arithmetic over numeric coercion, ordering of same-typed
/// primitives, both equality relations, and `&&`/`||`.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements numeric negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the node dispatch, the runtime context and its configuration,
/// and the `evaluate` entry point.
pub mod core;

/// Statement evaluation.
///
/// Declarations, assignment and the `if`/`while` control flow.
pub mod statement;

/// Utility functions for evaluation.
///
/// Member access on arrays, strings and objects.
pub mod utils;

/// Function evaluation.
///
/// Calls of user-defined and native functions, and the host bindings
/// installed in the global scope.
pub mod function;
