//! # yardcalc
//!
//! yardcalc compiles infix formulas into postfix programs and evaluates them
//! against a variable environment. It supports arithmetic, comparison and
//! logical operators, a small set of built-in functions and assignments.
//!
//! ```
//! use yardcalc::{calculate, interpreter::{environment::Environment, value::core::Value}};
//!
//! let mut env = Environment::with_defaults();
//! env.set("complete_value", 10.0);
//!
//! let value = calculate("Min(100, Max(0, complete_value * 4 + 2))", &mut env).unwrap();
//! assert_eq!(value, Some(Value::Number(42.0)));
//! ```
//!
//! Compilation and evaluation do work proportional to the formula length and
//! impose no further limits, so callers accepting formulas from untrusted
//! sources should bound their size.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::{Error, ParseError},
    interpreter::{
        converter::{core::convert, program::Program},
        environment::Environment,
        value::core::Value,
    },
};

pub use crate::interpreter::evaluator::core::evaluate;

/// Provides unified error types for conversion and evaluation.
///
/// This module defines all errors that can be raised while converting a
/// formula or evaluating a program. Conversion errors carry the byte position
/// of the offending lexeme; evaluation errors name the operator or operand
/// involved.
pub mod error;
/// Orchestrates the process of formula evaluation.
///
/// This module ties together lexing, conversion, evaluation, value
/// representations and the variable environment.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, converter, evaluator, and value
///   types.
/// - Provides the registry of supported operators and functions.
/// - Manages the flow of bindings between evaluations and the environment.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Compiles a formula into a postfix program.
///
/// The program does not depend on any environment and can be evaluated any
/// number of times.
///
/// # Errors
/// Returns a `ParseError` for unbalanced parentheses, misplaced separators,
/// unsupported characters or a function called with the wrong number of
/// arguments.
///
/// # Examples
/// ```
/// use yardcalc::{compile, error::ParseError};
///
/// assert_eq!(compile("1 + 2 * 3").unwrap().to_string(), "1 2 3 * +");
/// assert_eq!(compile("(1 + 2"), Err(ParseError::UnmatchedParenthesis { position: 0 }));
/// ```
pub fn compile(formula: &str) -> Result<Program, ParseError> {
    convert(formula)
}

/// Compiles and evaluates a formula, committing its bindings into `env`.
///
/// Returns the value of the formula, or `None` for a formula that only
/// binds variables. On error `env` is left unchanged.
///
/// # Errors
/// Returns an error if conversion or evaluation fails.
///
/// # Examples
/// ```
/// use yardcalc::{calculate, interpreter::{environment::Environment, value::core::Value}};
///
/// let mut env = Environment::new();
///
/// assert_eq!(calculate("x = 2 ^ 3 ^ 2", &mut env).unwrap(), None);
/// assert_eq!(env.get("x"), Some(&Value::Number(512.0)));
///
/// // 'y' is not bound, so it cannot be used as a number.
/// assert!(calculate("y * 2", &mut env).is_err());
/// ```
pub fn calculate(formula: &str, env: &mut Environment) -> Result<Option<Value>, Error> {
    let program = compile(formula)?;
    let evaluation = evaluate(&program, env)?;
    env.apply(evaluation.delta);
    Ok(evaluation.value)
}
