/// Host functions installed in the global scope.
///
/// Builds the root scope's bindings: the `log` object and `assert`.
pub mod builtin;
/// The `log.write` and `log.writeln` output functions.
///
/// Format a value with its display form and write it to the host's output
/// sink.
pub mod print;

/// Call evaluation for user-defined and native functions.
pub mod core;
