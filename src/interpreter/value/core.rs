use std::{cmp::Ordering, fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    ast::LiteralValue,
    interpreter::value::function::{Function, NativeFunction},
    util::{num::format_number, stack::ensure_sufficient_stack},
};

/// Properties of an object value, in insertion order.
pub type Properties = IndexMap<String, Value>;

/// Represents a runtime value in the interpreter.
///
/// Every expression and statement evaluates to one of these. Compound values
/// are reference-counted: copying a value into a second variable shares the
/// same array, object or function.
#[derive(Debug, Clone)]
pub enum Value {
    /// A double precision floating-point number.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`
    Null,
    /// `undefined`, also the value of missing members and arguments.
    Undefined,
    /// An ordered sequence of values.
    Array(Rc<Vec<Self>>),
    /// An ordered string-keyed map of values.
    Object(Rc<Properties>),
    /// A user-defined function together with its defining scope.
    Function(Rc<Function>),
    /// A host-provided function.
    Native(Rc<NativeFunction>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<Properties> for Value {
    fn from(v: Properties) -> Self {
        Self::Object(Rc::new(v))
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(Rc::new(v))
    }
}

impl From<NativeFunction> for Value {
    fn from(v: NativeFunction) -> Self {
        Self::Native(Rc::new(v))
    }
}

impl From<LiteralValue> for Value {
    fn from(lit: LiteralValue) -> Self {
        match lit {
            LiteralValue::Null => Self::Null,
            LiteralValue::Undefined => Self::Undefined,
            LiteralValue::True => Self::Boolean(true),
            LiteralValue::False => Self::Boolean(false),
        }
    }
}

impl Value {
    /// The type name shown in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
            Self::Native(_) => "native-function",
        }
    }

    /// Converts the value to a boolean for conditions and logical operators.
    ///
    /// Only `null`, `undefined` and `false` are falsy. Every other value,
    /// including `0`, `NaN` and the empty string, is truthy.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(0.0).to_boolean());
    /// assert!(Value::from("").to_boolean());
    /// assert!(!Value::Null.to_boolean());
    /// assert!(!Value::Boolean(false).to_boolean());
    /// ```
    #[must_use]
    pub const fn to_boolean(&self) -> bool {
        match self {
            Self::Null | Self::Undefined => false,
            Self::Boolean(b) => *b,
            _ => true,
        }
    }

    /// Converts the value to a number for arithmetic.
    ///
    /// A number is itself; `undefined`, `null` and `false` are `0`; every
    /// other value, `true` and strings included, is `1`.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.5).to_number(), 2.5);
    /// assert_eq!(Value::Undefined.to_number(), 0.0);
    /// assert_eq!(Value::from("42").to_number(), 1.0);
    /// ```
    #[must_use]
    pub const fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Null | Self::Undefined | Self::Boolean(false) => 0.0,
            _ => 1.0,
        }
    }

    /// Equality by type and value, as used by `==`.
    ///
    /// Primitives compare by value (`NaN` is unequal to itself). Arrays,
    /// objects and functions are equal only to themselves.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::value::core::Value;
    ///
    /// assert!(Value::from("a").strict_equal(&Value::from("a")));
    /// assert!(!Value::Number(1.0).strict_equal(&Value::Boolean(true)));
    /// assert!(!Value::Null.strict_equal(&Value::Undefined));
    /// ```
    #[must_use]
    pub fn strict_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Equality by value only, whose negation is `!=`.
    ///
    /// Same-typed values compare as in [`Value::strict_equal`]. Across
    /// types:
    /// - `null` and `undefined` equal each other,
    /// - a boolean is compared as `0` or `1`,
    /// - a string compared with a number is read as a number (blank is `0`,
    ///   unreadable text matches nothing),
    /// - any other pairing is unequal.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(1.0).loose_equal(&Value::Boolean(true)));
    /// assert!(Value::from(" 2 ").loose_equal(&Value::Number(2.0)));
    /// assert!(Value::Null.loose_equal(&Value::Undefined));
    /// assert!(!Value::Null.loose_equal(&Value::Number(0.0)));
    /// ```
    #[must_use]
    pub fn loose_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null | Self::Undefined, Self::Null | Self::Undefined) => true,
            (Self::Boolean(b), _) => Self::Number(f64::from(u8::from(*b))).loose_equal(other),
            (_, Self::Boolean(b)) => self.loose_equal(&Self::Number(f64::from(u8::from(*b)))),
            (Self::Number(n), Self::String(s)) | (Self::String(s), Self::Number(n)) => {
                parse_numeric(s).is_some_and(|parsed| parsed == *n)
            },
            _ => self.strict_equal(other),
        }
    }

    /// Orders two values of the same primitive type.
    ///
    /// Numbers compare numerically, strings lexicographically and booleans
    /// with `false < true`. Any other pairing, and `NaN`, has no order, so
    /// every relational operator yields `false` for it.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Writes the value as it appears nested in an array or object, where
    /// strings are quoted.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            other => ensure_sufficient_stack(|| fmt::Display::fmt(other, f)),
        }
    }

    /// Moves the elements of an array or object that nothing else shares
    /// into `out`.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        match self {
            Self::Array(values) => {
                if let Some(values) = Rc::get_mut(values) {
                    out.append(values);
                }
            },
            Self::Object(properties) => {
                if let Some(properties) = Rc::get_mut(properties) {
                    out.extend(properties.drain(..).map(|(_, value)| value));
                }
            },
            _ => {},
        }
    }
}

/// Releases nested arrays and objects with an explicit work list, so a deep
/// value is dropped without recursing once per level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

/// Reads a string as a number for loose comparison.
fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ if trimmed.chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) =>
        {
            trimmed.parse().ok()
        },
        _ => None,
    }
}

/// Structural equality for host code and tests.
///
/// Unlike the script-level [`Value::strict_equal`], arrays and objects
/// compare by contents. Functions still compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => self.strict_equal(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Undefined => write!(f, "undefined"),
            Self::Array(values) => {
                write!(f, "[")?;

                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    value.fmt_nested(f)?;
                }

                write!(f, "]")
            },
            Self::Object(properties) => {
                if properties.is_empty() {
                    return write!(f, "{{}}");
                }

                write!(f, "{{ ")?;
                for (index, (key, value)) in properties.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.fmt_nested(f)?;
                }
                write!(f, " }}")
            },
            Self::Function(function) => write!(f, "[function {}]", function.name()),
            Self::Native(native) => write!(f, "[native {}]", native.name),
        }
    }
}
