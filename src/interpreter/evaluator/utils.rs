use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    position::Span,
    util::num::{f64_to_index, usize_to_f64},
};

/// The one named member arrays and strings expose.
const LENGTH: &str = "length";

impl Context {
    /// Reads `target[key]` or `target.key`.
    ///
    /// - Arrays and strings accept an integral in-range number as index and
    ///   expose `length`; indexing a string yields a one-character string.
    /// - Objects look the key up by its display form, so `o[1]` reads the
    ///   property `"1"`.
    ///
    /// A missing member, and any other key, reads as `undefined`.
    ///
    /// # Errors
    /// `NotIndexable` for numbers, booleans, `null`, `undefined` and
    /// functions.
    ///
    /// # Example
    /// ```
    /// use quill::{
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    ///     position::Span,
    /// };
    ///
    /// let array = Value::from(vec![Value::from("a"), Value::from("b")]);
    /// let span = Span::default();
    ///
    /// assert_eq!(Context::eval_member(&array, &Value::Number(1.0), span), Ok(Value::from("b")));
    /// assert_eq!(Context::eval_member(&array, &Value::Number(5.0), span), Ok(Value::Undefined));
    /// assert_eq!(Context::eval_member(&array, &Value::from("length"), span),
    ///            Ok(Value::Number(2.0)));
    /// assert!(Context::eval_member(&Value::Null, &Value::from("x"), span).is_err());
    /// ```
    pub fn eval_member(target: &Value, key: &Value, span: Span) -> EvalResult<Value> {
        match target {
            Value::Array(values) => {
                if is_length(key) {
                    return Ok(Value::Number(usize_to_f64(values.len())));
                }
                Ok(index_of(key).and_then(|i| values.get(i))
                                .cloned()
                                .unwrap_or(Value::Undefined))
            },
            Value::String(text) => {
                if is_length(key) {
                    return Ok(Value::Number(usize_to_f64(text.chars().count())));
                }
                Ok(index_of(key).and_then(|i| text.chars().nth(i))
                                .map_or(Value::Undefined, |c| Value::from(c.to_string())))
            },
            Value::Object(properties) => {
                Ok(properties.get(&key.to_string())
                             .cloned()
                             .unwrap_or(Value::Undefined))
            },
            _ => Err(RuntimeError::NotIndexable { type_name: target.type_name(),
                                                  span }),
        }
    }
}

fn is_length(key: &Value) -> bool {
    matches!(key, Value::String(name) if &**name == LENGTH)
}

fn index_of(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) => f64_to_index(*n),
        _ => None,
    }
}
