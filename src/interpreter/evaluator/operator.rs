use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Scope, into_array},
        registry::Operator,
        value::core::{Operand, Value},
    },
};

/// Applies an operator to operands popped from the evaluation stack.
///
/// `operands` is in push order, so for a binary operator the first entry is
/// the left-hand side.
///
/// # Returns
/// The value to push, or `None` for `=`, which only records a binding.
///
/// # Example
/// ```
/// use yardcalc::interpreter::{
///     environment::Environment,
///     evaluator::{core::Scope, operator::apply_operator},
///     registry::Operator,
///     value::core::{Operand, Value},
/// };
///
/// let env = Environment::new();
/// let mut scope = Scope::new(&env);
/// let operands = vec![Operand::Literal(Value::Number(7.0)), Operand::Literal(Value::Number(2.0))];
///
/// let result = apply_operator(Operator::Subtract, operands, &mut scope).unwrap();
/// assert_eq!(result, Some(Value::Number(5.0)));
/// ```
pub fn apply_operator(op: Operator,
                      operands: Vec<Operand>,
                      scope: &mut Scope<'_>)
                      -> EvalResult<Option<Value>> {
    let symbol = op.to_string();

    match op {
        Operator::Not => {
            let [operand] = into_array(operands, &symbol)?;
            Ok(Some(Value::Bool(!scope.resolve(operand).as_bool()?)))
        },
        Operator::Assign => {
            let [target, value] = into_array(operands, &symbol)?;
            scope.assign(target, value)?;
            Ok(None)
        },
        Operator::Add => numeric(operands, scope, &symbol, |l, r| Ok(Value::Number(l + r))),
        Operator::Subtract => numeric(operands, scope, &symbol, |l, r| Ok(Value::Number(l - r))),
        Operator::Multiply => numeric(operands, scope, &symbol, |l, r| Ok(Value::Number(l * r))),
        Operator::Divide => numeric(operands, scope, &symbol, |l, r| {
            if r == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Number(l / r))
        }),
        Operator::Modulo => numeric(operands, scope, &symbol, |l, r| {
            if r == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Number(floored_mod(l, r)))
        }),
        Operator::Power => numeric(operands, scope, &symbol, |l, r| Ok(Value::Number(l.powf(r)))),
        Operator::Less => numeric(operands, scope, &symbol, |l, r| Ok(Value::Bool(l < r))),
        Operator::Greater => numeric(operands, scope, &symbol, |l, r| Ok(Value::Bool(l > r))),
    }
}

/// Resolves two operands as numbers and applies `f` to them.
fn numeric(operands: Vec<Operand>,
           scope: &Scope<'_>,
           symbol: &str,
           f: impl FnOnce(f64, f64) -> EvalResult<Value>)
           -> EvalResult<Option<Value>> {
    let [left, right] = into_array(operands, symbol)?;
    let left = scope.resolve(left).as_number()?;
    let right = scope.resolve(right).as_number()?;

    f(left, right).map(Some)
}

/// Modulo whose result takes the sign of the divisor.
///
/// # Example
/// ```
/// use yardcalc::interpreter::evaluator::operator::floored_mod;
///
/// assert_eq!(floored_mod(7.0, 3.0), 1.0);
/// assert_eq!(floored_mod(-7.0, 3.0), 2.0);
/// assert_eq!(floored_mod(7.0, -3.0), -2.0);
/// ```
#[must_use]
pub fn floored_mod(dividend: f64, divisor: f64) -> f64 {
    let remainder = dividend % divisor;
    if remainder != 0.0 && (remainder < 0.0) != (divisor < 0.0) {
        remainder + divisor
    } else {
        remainder
    }
}
