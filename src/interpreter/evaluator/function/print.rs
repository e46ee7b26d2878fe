use std::{cell::RefCell, io::Write, rc::Rc};

use crate::interpreter::value::{
    core::{Properties, Value},
    function::NativeFunction,
};

/// Shared output sink the printing functions write to.
pub type Output = Rc<RefCell<dyn Write>>;

/// Builds the `log` object with its `write` and `writeln` functions.
///
/// Both format their first argument (`undefined` when absent) with the value
/// display form, write it to `output`, flush, and return `undefined`.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use quill::interpreter::{
///     environment::Environment,
///     evaluator::function::print::{Output, log_object},
///     value::core::Value,
/// };
///
/// let buffer = Rc::new(RefCell::new(Vec::<u8>::new()));
/// let output: Output = buffer.clone();
///
/// let log = log_object(&output);
/// let Value::Object(log) = &log else { unreachable!() };
/// let Value::Native(writeln) = &log["writeln"] else { unreachable!() };
///
/// (writeln.call)(&[Value::from(vec![Value::from("a"), Value::Number(1.0)])], &Environment::new())
///     .unwrap();
/// assert_eq!(String::from_utf8(buffer.borrow().clone()).unwrap(), "[\"a\", 1]\n");
/// ```
#[must_use]
pub fn log_object(output: &Output) -> Value {
    let mut log = Properties::new();
    log.insert("write".to_string(), writer("write", output, ""));
    log.insert("writeln".to_string(), writer("writeln", output, "\n"));
    Value::from(log)
}

fn writer(name: &str, output: &Output, terminator: &'static str) -> Value {
    let output = Rc::clone(output);
    Value::from(NativeFunction::new(name, move |args, _env| {
        let value = args.first().cloned().unwrap_or(Value::Undefined);
        let mut sink = output.borrow_mut();
        write!(sink, "{value}{terminator}").and_then(|()| sink.flush())
                                          .map_err(|e| format!("Failed to write output: {e}"))?;
        Ok(Value::Undefined)
    }))
}
