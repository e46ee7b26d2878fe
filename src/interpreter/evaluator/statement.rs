use std::rc::Rc;

use crate::{
    ast::{AssignmentOperator, BinaryOperator, FunctionDef, Node, VarDeclarator},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{core::Value, function::Function},
    },
    position::Span,
};

impl Context {
    /// Evaluates each declarator and binds it in the current scope.
    ///
    /// # Returns
    /// The last declared value.
    ///
    /// # Errors
    /// `Redeclaration` if the current scope already owns a name. Earlier
    /// declarators of the same statement stay bound.
    pub(in crate::interpreter::evaluator) fn eval_var_declaration(&mut self,
                                                                  declarations: &[VarDeclarator],
                                                                  env: &Rc<Environment>)
                                                                  -> EvalResult<Value> {
        let mut result = Value::Undefined;

        for declarator in declarations {
            let value = self.eval(&declarator.init, env)?;
            if !env.declare(&declarator.name, value.clone()) {
                return Err(RuntimeError::Redeclaration { name: declarator.name.clone(),
                                                         span: declarator.span, });
            }
            result = value;
        }

        Ok(result)
    }

    /// Creates a closure over `env` and binds it under its name.
    ///
    /// Binding happens before the body can ever run, so the function can call
    /// itself recursively.
    pub(in crate::interpreter::evaluator) fn eval_function_declaration(&mut self,
                                                                       function: &Rc<FunctionDef>,
                                                                       span: Span,
                                                                       env: &Rc<Environment>)
                                                                       -> EvalResult<Value> {
        let value = Value::from(Function::new(Rc::clone(function), env));

        if let Some(name) = &function.name
           && !env.declare(name, value.clone())
        {
            return Err(RuntimeError::Redeclaration { name: name.clone(),
                                                     span });
        }

        Ok(value)
    }

    /// Evaluates an `if` statement.
    ///
    /// The condition is converted with [`Value::to_boolean`], so `0` and the
    /// empty string take the `if` branch.
    ///
    /// # Returns
    /// The value of the branch taken, or `undefined` when no branch runs.
    pub(in crate::interpreter::evaluator) fn eval_if(&mut self,
                                                     condition: &Node,
                                                     consequent: &Node,
                                                     alternate: Option<&Node>,
                                                     env: &Rc<Environment>)
                                                     -> EvalResult<Value> {
        if self.eval(condition, env)?.to_boolean() {
            self.eval(consequent, env)
        } else if let Some(alternate) = alternate {
            self.eval(alternate, env)
        } else {
            Ok(Value::Undefined)
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The condition is re-evaluated in `env` before every iteration. The
    /// loop adds no scope of its own; its block body opens a fresh one on
    /// each pass.
    ///
    /// # Returns
    /// The value of the last iteration's body, or `undefined` if the body
    /// never ran.
    pub(in crate::interpreter::evaluator) fn eval_while(&mut self,
                                                        condition: &Node,
                                                        body: &Node,
                                                        env: &Rc<Environment>)
                                                        -> EvalResult<Value> {
        let mut result = Value::Undefined;
        while self.eval(condition, env)?.to_boolean() {
            result = self.eval(body, env)?;
        }
        Ok(result)
    }

    /// Evaluates a plain or compound assignment.
    ///
    /// The variable must already exist. For compound operators the current
    /// value is read before the right-hand side is evaluated, then combined
    /// with it:
    /// - `+=` with a string on either side appends the display form of the
    ///   right-hand value to that of the current one, so `s += 1` on `'a'`
    ///   stores `'a1'`;
    /// - every other combination applies the matching arithmetic operator.
    ///
    /// # Returns
    /// The newly stored value.
    ///
    /// # Errors
    /// `AssignmentToUndeclared` if no scope in the chain owns `name`.
    pub(in crate::interpreter::evaluator) fn eval_assignment(&mut self,
                                                             name: &str,
                                                             operator: AssignmentOperator,
                                                             value: &Node,
                                                             span: Span,
                                                             env: &Rc<Environment>)
                                                             -> EvalResult<Value> {
        let undeclared = || RuntimeError::AssignmentToUndeclared { name: name.to_string(),
                                                                   span };

        let current = env.lookup(name).ok_or_else(undeclared)?;
        let rhs = self.eval(value, env)?;

        let new_value = match operator.binary_operator() {
            Some(BinaryOperator::Add) if concatenates(&current, &rhs) => {
                Value::from(format!("{current}{rhs}"))
            },
            Some(op) => Self::eval_binary(op, &current, &rhs),
            None => rhs,
        };

        if !env.set(name, new_value.clone()) {
            return Err(undeclared());
        }
        Ok(new_value)
    }
}

const fn concatenates(current: &Value, rhs: &Value) -> bool {
    matches!(current, Value::String(_)) || matches!(rhs, Value::String(_))
}
