use std::fmt;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Represents a runtime value of a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A real number.
    Number(f64),
    /// A boolean, produced by `<`, `>`, `!`, `OR` and `IsNull`.
    Bool(bool),
    /// A variable name that had no value when it was consumed. It is passed
    /// through literally instead of failing the lookup.
    Name(String),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl Value {
    /// Converts the value to an `f64`.
    ///
    /// Booleans count as `1` and `0`.
    ///
    /// # Errors
    /// `ExpectedNumber` for an unresolved name.
    ///
    /// # Example
    /// ```
    /// use yardcalc::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.5).as_number().unwrap(), 2.5);
    /// assert_eq!(Value::Bool(true).as_number().unwrap(), 1.0);
    /// assert!(Value::Name("y".to_string()).as_number().is_err());
    /// ```
    pub fn as_number(&self) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Name(name) => Err(RuntimeError::ExpectedNumber { found: name.clone() }),
        }
    }

    /// Converts the value to a `bool`.
    ///
    /// Numbers are true when non-zero.
    ///
    /// # Errors
    /// `ExpectedBoolean` for an unresolved name.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Number(n) => Ok(*n != 0.0),
            Self::Name(name) => Err(RuntimeError::ExpectedBoolean { found: name.clone() }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// An entry of the evaluation stack.
///
/// Variables stay unresolved until an operator or function consumes them, so
/// assignment targets keep their name.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A value that needs no lookup.
    Literal(Value),
    /// A variable name awaiting resolution.
    Variable(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Variable(name) => f.write_str(name),
        }
    }
}
