//! # quill
//!
//! quill is a small, expression-oriented scripting language with a
//! tree-walking interpreter written in Rust. Source text goes through three
//! stages:
//!
//! 1. the [lexer](interpreter::lexer) turns it into tokens,
//! 2. the [parser](interpreter::parser) builds an [AST](ast::Node),
//! 3. the [evaluator](interpreter::evaluator) walks the tree against a chain
//!    of [environments](interpreter::environment::Environment).
//!
//! Every statement has a value, and a program's value is the value of its
//! last statement.
//!
//! ```
//! let value = quill::run("demo.ql", "function twice(x) { x * 2 } twice(21)").unwrap();
//! assert_eq!(value.to_string(), "42");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{cell::RefCell, io, rc::Rc};

use crate::{
    error::Error,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{Context, evaluate},
            function::{builtin::install_bindings, print::Output},
        },
        lexer::lexerize,
        parser::parse,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines one node variant per language construct.
/// - Attaches source spans to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while processing code.
/// Each stage has its own error enum; [`error::Error`] tags one of them with
/// the file name for reporting.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source spans and renders `file:line:column: message`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, scopes, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Source coordinates.
///
/// `Position` is a zero-indexed character location; `Span` covers the
/// extent of a token or node.
pub mod position;
/// General utilities.
///
/// Numeric conversions and formatting, and stack growth for deep recursion.
pub mod util;

/// Builds a global scope with the host bindings installed, writing output to
/// `output`.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use quill::{global_environment, interpreter::evaluator::core::Context, run_in};
///
/// let buffer = Rc::new(RefCell::new(Vec::<u8>::new()));
/// let env = global_environment(buffer.clone());
///
/// run_in("demo.ql", "log.write('hi')", &mut Context::default(), &env).unwrap();
/// assert_eq!(buffer.borrow().as_slice(), b"hi");
/// ```
pub fn global_environment(output: Output) -> Rc<Environment> {
    let env = Environment::new();
    install_bindings(&env, &output);
    env
}

/// Runs a script in a fresh global scope whose output goes to stdout.
///
/// # Errors
/// Returns the first lexing, parsing or runtime error, tagged with
/// `filename`.
///
/// # Examples
/// ```
/// use quill::run;
///
/// let value = run("demo.ql", "let x = 2 + 3 * 4; x").unwrap();
/// assert_eq!(value.to_string(), "14");
///
/// // Example with an intentional error (unknown variable).
/// assert!(run("demo.ql", "let y = x + 1").is_err());
/// ```
pub fn run(filename: &str, source: &str) -> Result<Value, Error> {
    let env = global_environment(Rc::new(RefCell::new(io::stdout())));
    run_in(filename, source, &mut Context::default(), &env)
}

/// Runs a script against an existing scope and context.
///
/// Declarations made by the script stay in `env`, so successive calls see
/// each other's variables, as in a REPL session.
pub fn run_in(filename: &str,
              source: &str,
              context: &mut Context,
              env: &Rc<Environment>)
              -> Result<Value, Error> {
    tracing::debug!(filename, bytes = source.len(), "running script");

    let lexemes = lexerize(filename, source)?;
    let program = parse(filename, &lexemes)?;
    evaluate(filename, &program, context, env)
}
