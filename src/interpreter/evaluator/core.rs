use std::rc::Rc;

use crate::{
    ast::{MemberProperty, Node, Property},
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment,
        value::{
            core::{Properties, Value},
            function::Function,
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Tunable limits of the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Calls nested deeper than this fail with
    /// [`RuntimeError::StackOverflow`].
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH }
    }
}

/// Stores the runtime evaluation context.
///
/// Variables live in [`Environment`] chains passed alongside each node, so
/// the context only carries the configuration and the current call depth.
///
/// ## Usage
///
/// A `Context` is created once and reused for every program evaluated
/// against the same scope, e.g. each line of a REPL session.
#[derive(Debug, Default)]
pub struct Context {
    /// The limits evaluation runs under.
    pub config: EvalConfig,
    /// Number of user function calls currently active.
    pub(crate) depth: usize,
}

/// Evaluates a parsed program in `env`.
///
/// # Errors
/// Returns the first [`RuntimeError`], tagged with `filename`.
///
/// # Example
/// ```
/// use quill::interpreter::{
///     environment::Environment,
///     evaluator::core::{Context, evaluate},
///     lexer::lexerize,
///     parser::parse,
///     value::core::Value,
/// };
///
/// let lexemes = lexerize("demo.ql", "let x = 2; x * 21").unwrap();
/// let program = parse("demo.ql", &lexemes).unwrap();
///
/// let value = evaluate("demo.ql", &program, &mut Context::default(), &Environment::new());
/// assert_eq!(value.unwrap(), Value::Number(42.0));
/// ```
pub fn evaluate(filename: &str,
                program: &Node,
                context: &mut Context,
                env: &Rc<Environment>)
                -> Result<Value, Error> {
    let value = context.eval(program, env)
                       .map_err(|e| Error::new(filename, e))?;
    tracing::debug!(filename, result = %value, "evaluated program");
    Ok(value)
}

impl Context {
    /// Creates a context with the given limits.
    #[must_use]
    pub const fn new(config: EvalConfig) -> Self {
        Self { config,
               depth: 0 }
    }

    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for evaluation. Every node kind, the
    /// statements included, produces a value; the evaluator dispatches on
    /// the node variant.
    ///
    /// The tree is only read, so the same node can be evaluated any number
    /// of times against different environments.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `env`: The innermost scope names resolve in.
    ///
    /// # Returns
    /// The value of the node, or the first runtime error encountered.
    pub fn eval(&mut self, node: &Node, env: &Rc<Environment>) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_node(node, env))
    }

    fn eval_node(&mut self, node: &Node, env: &Rc<Environment>) -> EvalResult<Value> {
        match node {
            Node::Program { body, .. } => self.eval_sequence(body, env),
            Node::NumericLiteral { value, .. } => Ok(Value::Number(*value)),
            Node::StringLiteral { value, .. } => Ok(Value::from(value.as_str())),
            Node::Literal { value, .. } => Ok(Value::from(*value)),
            Node::Identifier { name, span } => {
                env.lookup(name)
                   .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                  span: *span, })
            },
            Node::ArrayLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element, env))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Node::ObjectLiteral { properties, .. } => self.eval_object_literal(properties, env),
            Node::VarDeclaration { declarations, .. } => {
                self.eval_var_declaration(declarations, env)
            },
            Node::FunctionDeclaration { function, span } => {
                self.eval_function_declaration(function, *span, env)
            },
            Node::FunctionExpression { function, .. } => {
                Ok(Value::from(Function::new(Rc::clone(function), env)))
            },
            Node::IfStatement { condition,
                                consequent,
                                alternate,
                                .. } => {
                self.eval_if(condition, consequent, alternate.as_deref(), env)
            },
            Node::WhileStatement { condition, body, .. } => self.eval_while(condition, body, env),
            Node::BlockStatement { body, .. } => {
                let scope = Environment::with_parent(env);
                self.eval_sequence(body, &scope)
            },
            Node::VarAssignment { name,
                                  operator,
                                  value,
                                  span, } => self.eval_assignment(name, *operator, value, *span, env),
            Node::MemberExpr { object,
                               property,
                               span, } => {
                let target = self.eval(object, env)?;
                let key = match property {
                    MemberProperty::Named(name) => Value::from(name.as_str()),
                    MemberProperty::Computed(expr) => self.eval(expr, env)?,
                };
                Self::eval_member(&target, &key, *span)
            },
            Node::CallExpr { callee,
                             arguments,
                             span, } => self.eval_call(callee, arguments, *span, env),
            Node::LogicalExpr { left,
                                operator,
                                right,
                                .. } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Ok(Self::eval_logical(*operator, &left, &right))
            },
            Node::BinaryExpr { left,
                               operator,
                               right,
                               .. } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Ok(Self::eval_binary(*operator, &left, &right))
            },
            Node::UnaryExpr { operator, argument, .. } => {
                let value = self.eval(argument, env)?;
                Ok(Self::eval_unary(*operator, &value))
            },
        }
    }

    /// Evaluates statements in order in `env`.
    ///
    /// # Returns
    /// The value of the last statement, or `undefined` for an empty list.
    pub(in crate::interpreter::evaluator) fn eval_sequence(&mut self,
                                                           statements: &[Node],
                                                           env: &Rc<Environment>)
                                                           -> EvalResult<Value> {
        let mut result = Value::Undefined;
        for statement in statements {
            tracing::trace!(kind = statement.kind_name(),
                            line = statement.span().left.line + 1,
                            "statement");
            result = self.eval(statement, env)?;
        }
        Ok(result)
    }

    /// Builds an object from its properties in source order.
    ///
    /// A shorthand property `{ key }` reads the variable `key`. A key given
    /// twice keeps its first position and its last value.
    fn eval_object_literal(&mut self,
                           properties: &[Property],
                           env: &Rc<Environment>)
                           -> EvalResult<Value> {
        let mut object = Properties::with_capacity(properties.len());

        for property in properties {
            let value = match &property.value {
                Some(expr) => self.eval(expr, env)?,
                None => env.lookup(&property.key)
                           .ok_or_else(|| RuntimeError::UnknownVariable { name: property.key
                                                                                        .clone(),
                                                                          span: property.span, })?,
            };
            object.insert(property.key.clone(), value);
        }

        Ok(Value::from(object))
    }
}
