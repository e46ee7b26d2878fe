use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, LogicalOperator},
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a binary operation on two values.
    ///
    /// - Arithmetic (`+ - * / %`) reads both operands with
    ///   [`Value::to_number`] and always produces a number. Division by zero
    ///   follows IEEE 754 (`Infinity`, `-Infinity` or `NaN`); `%` keeps the
    ///   sign of the dividend.
    /// - Relational operators (`< > <= >=`) order two numbers, two strings or
    ///   two booleans. Any other pairing is unordered and yields `false`.
    /// - `==` requires equal type and value ([`Value::strict_equal`]).
    /// - `!=` compares value only ([`Value::loose_equal`]), so `1 != true` is
    ///   `false` while `1 == true` is also `false`.
    ///
    /// # Example
    /// ```
    /// use quill::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &Value::Number(2.0), &Value::Boolean(true));
    /// assert_eq!(sum, Value::Number(3.0));
    ///
    /// let less = Context::eval_binary(BinaryOperator::Less, &Value::from("a"), &Value::from("b"));
    /// assert_eq!(less, Value::Boolean(true));
    /// ```
    #[must_use]
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        match op {
            BinaryOperator::Add => Value::Number(left.to_number() + right.to_number()),
            BinaryOperator::Sub => Value::Number(left.to_number() - right.to_number()),
            BinaryOperator::Mul => Value::Number(left.to_number() * right.to_number()),
            BinaryOperator::Div => Value::Number(left.to_number() / right.to_number()),
            BinaryOperator::Mod => Value::Number(left.to_number() % right.to_number()),
            BinaryOperator::Less => ordered(left, right, Ordering::is_lt),
            BinaryOperator::Greater => ordered(left, right, Ordering::is_gt),
            BinaryOperator::LessEqual => ordered(left, right, Ordering::is_le),
            BinaryOperator::GreaterEqual => ordered(left, right, Ordering::is_ge),
            BinaryOperator::Equal => Value::Boolean(left.strict_equal(right)),
            BinaryOperator::NotEqual => Value::Boolean(!left.loose_equal(right)),
        }
    }

    /// Evaluates `&&` or `||` on two already evaluated operands.
    ///
    /// Both sides are always evaluated by the caller; the result is a
    /// boolean, not one of the operands.
    #[must_use]
    pub const fn eval_logical(op: LogicalOperator, left: &Value, right: &Value) -> Value {
        let (left, right) = (left.to_boolean(), right.to_boolean());
        Value::Boolean(match op {
                           LogicalOperator::And => left && right,
                           LogicalOperator::Or => left || right,
                       })
    }
}

fn ordered(left: &Value, right: &Value, accept: fn(Ordering) -> bool) -> Value {
    Value::Boolean(left.compare(right).is_some_and(accept))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(op: BinaryOperator, left: impl Into<Value>, right: impl Into<Value>) -> Value {
        Context::eval_binary(op, &left.into(), &right.into())
    }

    #[test]
    fn arithmetic_coerces_through_to_number() {
        assert_eq!(binary(BinaryOperator::Mul, "abc", 7.0), Value::Number(7.0));
        assert_eq!(binary(BinaryOperator::Sub, false, 1.0), Value::Number(-1.0));
        assert_eq!(Context::eval_binary(BinaryOperator::Add, &Value::Null, &Value::Undefined),
                   Value::Number(0.0));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(binary(BinaryOperator::Div, 1.0, 0.0), Value::Number(f64::INFINITY));
        assert_eq!(binary(BinaryOperator::Mod, -7.0, 3.0), Value::Number(-1.0));
    }

    #[test]
    fn mixed_type_comparisons_are_false() {
        for op in [BinaryOperator::Less,
                   BinaryOperator::Greater,
                   BinaryOperator::LessEqual,
                   BinaryOperator::GreaterEqual]
        {
            assert_eq!(binary(op, 1.0, "1"), Value::Boolean(false), "{op}");
        }
        assert_eq!(binary(BinaryOperator::LessEqual, 2.0, 2.0), Value::Boolean(true));
    }

    #[test]
    fn equality_is_strict_and_inequality_is_loose() {
        assert_eq!(binary(BinaryOperator::Equal, 1.0, true), Value::Boolean(false));
        assert_eq!(binary(BinaryOperator::NotEqual, 1.0, true), Value::Boolean(false));
        assert_eq!(binary(BinaryOperator::NotEqual, "2", 2.0), Value::Boolean(false));
        assert_eq!(binary(BinaryOperator::NotEqual, "two", 2.0), Value::Boolean(true));
    }

    #[test]
    fn logical_operators_use_truthiness() {
        let zero = Value::Number(0.0);
        assert_eq!(Context::eval_logical(LogicalOperator::And, &zero, &Value::from("")),
                   Value::Boolean(true));
        assert_eq!(Context::eval_logical(LogicalOperator::Or, &Value::Null, &Value::Undefined),
                   Value::Boolean(false));
    }
}
