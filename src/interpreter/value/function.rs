use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{environment::Environment, value::core::Value},
};

/// A user-defined function value: the definition plus the scope it was
/// created in.
///
/// Calling it evaluates the body in a fresh child of `env`, not of the
/// caller's scope.
pub struct Function {
    /// The parsed definition, shared with the syntax tree.
    pub def: Rc<FunctionDef>,
    /// The defining scope.
    pub env: Rc<Environment>,
}

impl Function {
    #[must_use]
    pub fn new(def: Rc<FunctionDef>, env: &Rc<Environment>) -> Self {
        Self { def,
               env: Rc::clone(env) }
    }

    /// The declared name, or `anonymous` for function expressions.
    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name.as_deref().unwrap_or("anonymous")
    }
}

impl fmt::Debug for Function {
    // The captured scope may contain this very function.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.def.name)
         .field("params", &self.def.params)
         .finish_non_exhaustive()
    }
}

/// Signature of a host callback: the evaluated arguments and the calling
/// scope in, a value or a failure message out.
pub type NativeCallback = dyn Fn(&[Value], &Rc<Environment>) -> Result<Value, String>;

/// A function implemented by the host and exposed to scripts.
pub struct NativeFunction {
    /// Name used when the function is displayed.
    pub name: String,
    /// The host callback.
    pub call: Box<NativeCallback>,
}

impl NativeFunction {
    /// Wraps a host callback.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::{
    ///     environment::Environment,
    ///     value::{core::Value, function::NativeFunction},
    /// };
    ///
    /// let count = NativeFunction::new("count", |args, _env| Ok(Value::from(args.len() as f64)));
    /// let env = Environment::new();
    ///
    /// assert_eq!((count.call)(&[Value::Null, Value::Null], &env), Ok(Value::Number(2.0)));
    /// ```
    pub fn new(name: impl Into<String>,
               call: impl Fn(&[Value], &Rc<Environment>) -> Result<Value, String> + 'static)
               -> Self {
        Self { name: name.into(),
               call: Box::new(call), }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .finish_non_exhaustive()
    }
}
