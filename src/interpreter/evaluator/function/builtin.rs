use std::rc::Rc;

use crate::interpreter::{
    environment::Environment,
    evaluator::function::print::{Output, log_object},
    value::{core::Value, function::NativeFunction},
};

/// Names bound in the global scope by [`install_bindings`].
pub const BUILTIN_NAMES: &[&str] = &["log", "assert"];

/// Declares the host bindings in `env`:
///
/// - `log`: an object with `write(value)` and `writeln(value)`, writing to
///   `output`.
/// - `assert(value)`: fails with `Assertion failed` unless `value` is
///   truthy, otherwise returns `true`.
///
/// Names `env` already owns are left untouched.
///
/// # Example
/// ```
/// use std::{cell::RefCell, io, rc::Rc};
///
/// use quill::interpreter::{
///     environment::Environment,
///     evaluator::function::{builtin::install_bindings, print::Output},
/// };
///
/// let env = Environment::new();
/// let output: Output = Rc::new(RefCell::new(io::sink()));
/// install_bindings(&env, &output);
///
/// assert!(env.lookup("log").is_some());
/// assert!(env.lookup("assert").is_some());
/// ```
pub fn install_bindings(env: &Rc<Environment>, output: &Output) {
    env.declare("log", log_object(output));
    env.declare("assert", Value::from(NativeFunction::new("assert", assert)));
    tracing::debug!(names = ?BUILTIN_NAMES, "installed host bindings");
}

fn assert(args: &[Value], _env: &Rc<Environment>) -> Result<Value, String> {
    if args.first().is_some_and(Value::to_boolean) {
        Ok(Value::Boolean(true))
    } else {
        Err("Assertion failed".to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io};

    use super::*;

    #[test]
    fn existing_names_are_kept() {
        let env = Environment::new();
        env.declare("assert", Value::Null);

        let output: Output = Rc::new(RefCell::new(io::sink()));
        install_bindings(&env, &output);

        assert_eq!(env.lookup("assert"), Some(Value::Null));
    }

    #[test]
    fn assert_requires_truthy_argument() {
        let env = Environment::new();
        assert_eq!(assert(&[Value::Number(0.0)], &env), Ok(Value::Boolean(true)));
        assert_eq!(assert(&[Value::Boolean(false)], &env), Err("Assertion failed".to_string()));
        assert_eq!(assert(&[], &env), Err("Assertion failed".to_string()));
    }
}
