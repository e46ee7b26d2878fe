use crate::{
    ast::UnaryOperator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation of [`Value::to_number`].
    /// - `Not`: boolean negation of [`Value::to_boolean`].
    ///
    /// Neither operator can fail: every value has a numeric and a boolean
    /// reading.
    ///
    /// # Example
    /// ```
    /// use quill::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Number(5.0));
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// // `0` is truthy
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Number(0.0));
    /// assert_eq!(v, Value::Boolean(false));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Boolean(true));
    /// assert_eq!(v, Value::Number(-1.0));
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> Value {
        match op {
            UnaryOperator::Negate => Value::Number(-value.to_number()),
            UnaryOperator::Not => Value::Boolean(!value.to_boolean()),
        }
    }
}
