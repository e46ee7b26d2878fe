use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A lexical scope: a mutable name-to-value table plus a link to the
/// enclosing scope.
///
/// Scopes form a tree rooted at the global scope. Children hold a strong
/// reference to their parent, so a closure that captured a scope keeps its
/// whole ancestor chain alive after control has left it. A scope that ends
/// up referencing itself through a stored closure is never freed; there is
/// no collector.
///
/// The usual shape is a function declared in a loop body: every iteration
/// opens a block scope, binds a closure over it there, and that scope is
/// retained until the process exits. Embedders running long-lived hosts
/// should expect memory to grow with the number of such iterations.
/// Reclaiming these scopes would need `Weak` parent links backed by an arena
/// that owns every scope.
///
/// Environments are shared as `Rc<Environment>` and mutated through
/// `&self`.
#[derive(Debug, Default)]
pub struct Environment {
    parent:   Option<Rc<Environment>>,
    bindings: RefCell<HashMap<String, Value>>,
}

impl Environment {
    /// Creates an empty root scope.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Creates an empty scope whose parent is `parent`.
    #[must_use]
    pub fn with_parent(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { parent:   Some(Rc::clone(parent)),
                       bindings: RefCell::default(), })
    }

    /// Binds `name` in this scope.
    ///
    /// Only this scope is checked: a binding of the same name in an
    /// enclosing scope is shadowed, not replaced.
    ///
    /// # Returns
    /// `false`, with nothing bound, if this scope already owns `name`.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::new();
    /// assert!(global.declare("x", Value::Number(1.0)));
    /// assert!(!global.declare("x", Value::Number(2.0)));
    /// assert_eq!(global.lookup("x"), Some(Value::Number(1.0)));
    /// ```
    pub fn declare(&self, name: &str, value: Value) -> bool {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(name) {
            return false;
        }
        bindings.insert(name.to_string(), value);
        true
    }

    /// Rebinds `name` in the nearest scope that owns it.
    ///
    /// # Returns
    /// `false` if no scope in the chain owns `name`; no binding is created.
    pub fn set(&self, name: &str, value: Value) -> bool {
        let mut scope = self;
        loop {
            if let Some(slot) = scope.bindings.borrow_mut().get_mut(name) {
                *slot = value;
                return true;
            }
            match &scope.parent {
                Some(parent) => scope = parent,
                None => return false,
            }
        }
    }

    /// Looks `name` up from this scope outward.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let global = Environment::new();
    /// global.declare("x", Value::Number(1.0));
    ///
    /// let inner = Environment::with_parent(&global);
    /// assert_eq!(inner.lookup("x"), Some(Value::Number(1.0)));
    /// assert_eq!(inner.lookup("y"), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            match &scope.parent {
                Some(parent) => scope = parent,
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_shadows_outer_binding() {
        let global = Environment::new();
        global.declare("x", Value::Number(1.0));

        let inner = Environment::with_parent(&global);
        assert!(inner.declare("x", Value::Number(2.0)));

        assert_eq!(inner.lookup("x"), Some(Value::Number(2.0)));
        assert_eq!(global.lookup("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn set_mutates_nearest_owner() {
        let global = Environment::new();
        global.declare("x", Value::Number(1.0));
        let middle = Environment::with_parent(&global);
        let inner = Environment::with_parent(&middle);

        assert!(inner.set("x", Value::Number(5.0)));

        assert_eq!(global.lookup("x"), Some(Value::Number(5.0)));
        assert!(middle.declare("x", Value::Null));
        assert!(inner.declare("x", Value::Null));
    }

    #[test]
    fn set_never_creates_a_binding() {
        let global = Environment::new();
        let inner = Environment::with_parent(&global);

        assert!(!inner.set("y", Value::Null));
        assert_eq!(inner.lookup("y"), None);
        assert_eq!(global.lookup("y"), None);
    }

    #[test]
    fn child_keeps_parent_alive() {
        let inner = {
            let block = Environment::new();
            block.declare("kept", Value::Boolean(true));
            Environment::with_parent(&block)
        };

        assert_eq!(inner.lookup("kept"), Some(Value::Boolean(true)));
    }
}
