use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{core::Value, function::Function},
    },
    position::Span,
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then every argument left to right,
    /// before anything is called.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the function.
    /// - `arguments`: Argument expressions.
    /// - `span`: Extent of the call, for errors.
    /// - `env`: The caller's scope.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Node,
                                                       arguments: &[Node],
                                                       span: Span,
                                                       env: &Rc<Environment>)
                                                       -> EvalResult<Value> {
        let callee = self.eval(callee, env)?;
        let args = arguments.iter()
                            .map(|argument| self.eval(argument, env))
                            .collect::<EvalResult<Vec<_>>>()?;

        self.call_value(&callee, &args, span, env)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// - Native functions receive the arguments and the caller's scope; a
    ///   reported failure becomes a `NativeFailure` error at `span`.
    /// - User functions run in a fresh child of the scope they were created
    ///   in. Parameters are bound positionally: extra arguments are ignored
    ///   and missing ones are `undefined`. The value of the call is the value
    ///   of the last body statement.
    ///
    /// # Errors
    /// - `NotCallable` if `callee` is not a function.
    /// - `StackOverflow` if the call would nest deeper than
    ///   [`EvalConfig::max_call_depth`](crate::interpreter::evaluator::core::EvalConfig).
    /// - Any error raised by the body.
    ///
    /// # Example
    /// ```
    /// use quill::{
    ///     interpreter::{
    ///         environment::Environment,
    ///         evaluator::core::Context,
    ///         value::{core::Value, function::NativeFunction},
    ///     },
    ///     position::Span,
    /// };
    ///
    /// let first = Value::from(NativeFunction::new("first", |args, _| {
    ///     Ok(args.first().cloned().unwrap_or(Value::Undefined))
    /// }));
    /// let env = Environment::new();
    /// let mut ctx = Context::default();
    ///
    /// let value = ctx.call_value(&first, &[Value::Number(7.0)], Span::default(), &env);
    /// assert_eq!(value, Ok(Value::Number(7.0)));
    ///
    /// let err = ctx.call_value(&Value::Number(1.0), &[], Span::default(), &env).unwrap_err();
    /// assert_eq!(err.to_string(), "Value of type 'number' is not callable");
    /// ```
    pub fn call_value(&mut self,
                      callee: &Value,
                      args: &[Value],
                      span: Span,
                      env: &Rc<Environment>)
                      -> EvalResult<Value> {
        match callee {
            Value::Native(native) => {
                tracing::trace!(native = %native.name, args = args.len(), "native call");
                (native.call)(args, env).map_err(|message| RuntimeError::NativeFailure { message,
                                                                                          span })
            },
            Value::Function(function) => self.call_function(function, args, span),
            other => Err(RuntimeError::NotCallable { type_name: other.type_name(),
                                                     span }),
        }
    }

    fn call_function(&mut self,
                     function: &Function,
                     args: &[Value],
                     span: Span)
                     -> EvalResult<Value> {
        let max_depth = self.config.max_call_depth;
        if self.depth >= max_depth {
            return Err(RuntimeError::StackOverflow { max_depth, span });
        }

        let scope = Environment::with_parent(&function.env);
        for (index, param) in function.def.params.iter().enumerate() {
            let value = args.get(index).cloned().unwrap_or(Value::Undefined);
            scope.declare(param, value);
        }

        self.depth += 1;
        tracing::trace!(function = function.name(), depth = self.depth, "call");
        let result = self.eval_sequence(&function.def.body, &scope);
        self.depth -= 1;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::core::EvalConfig;

    fn program(source: &str) -> Node {
        let lexemes = crate::interpreter::lexer::tokenize(source).unwrap();
        crate::interpreter::parser::core::parse_program(&lexemes).unwrap()
    }

    #[test]
    fn missing_arguments_are_undefined() {
        let env = Environment::new();
        let value = Context::default().eval(&program("function f(a, b) { b } f(1)"), &env);
        assert_eq!(value, Ok(Value::Undefined));
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let env = Environment::new();
        let value = Context::default().eval(&program("function f(a) { a } f(1, 2, 3)"), &env);
        assert_eq!(value, Ok(Value::Number(1.0)));
    }

    #[test]
    fn call_depth_is_bounded() {
        let env = Environment::new();
        let mut ctx = Context::new(EvalConfig { max_call_depth: 50 });

        let err = ctx.eval(&program("function f(n) { f(n + 1) } f(0)"), &env)
                     .unwrap_err();

        assert!(matches!(err, RuntimeError::StackOverflow { max_depth: 50, .. }));
        assert_eq!(ctx.depth, 0);
    }

    #[test]
    fn body_runs_in_the_defining_scope() {
        let env = Environment::new();
        let source = "let x = 'outer';
                      function read() { x }
                      function shadow() { let x = 'caller'; read() }
                      shadow()";

        let value = Context::default().eval(&program(source), &env);
        assert_eq!(value, Ok(Value::from("outer")));
    }
}
