/// The environment module implements lexical scopes.
///
/// An environment is a mutable name-to-value table linked to its enclosing
/// environment. Blocks and function calls open child environments; closures
/// keep the environment they were created in alive.
///
/// # Responsibilities
/// - Declares names in the innermost scope, refusing redeclaration.
/// - Resolves and reassigns names outward along the parent chain.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages scopes and calls, and produces the value of the program. It is
/// the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every AST node kind to a value.
/// - Applies truthiness and numeric coercion for operators and conditions.
/// - Reports runtime errors such as unknown variables or invalid calls.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, keywords and comments. This is
/// the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source spans.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Resolves operator precedence and the object/block ambiguity of `{`.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// numbers, strings, booleans, `null`, `undefined`, arrays, objects and
/// functions. It also provides the coercions and comparisons the operators
/// are defined in terms of.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, numeric coercion and both equality relations.
/// - Defines how values are displayed to scripts and users.
pub mod value;
