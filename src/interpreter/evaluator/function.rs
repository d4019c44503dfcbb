use crate::{
    interpreter::{
        evaluator::core::{EvalResult, Scope, into_array},
        registry::Function,
        value::core::{Operand, Value},
    },
    util::num::f64_to_i32_checked,
};

/// Applies a built-in function to operands popped from the evaluation stack.
///
/// `operands` is in argument order. `Def` and `IsNull` look at their first
/// operand as a variable name instead of resolving it.
///
/// # Returns
/// The value to push, or `None` for `Def`, which only records a binding.
pub fn apply_function(function: Function,
                      operands: Vec<Operand>,
                      scope: &mut Scope<'_>)
                      -> EvalResult<Option<Value>> {
    let name = function.name();

    let value = match function {
        Function::Min | Function::Max => {
            let [a, b] = into_array(operands, name)?;
            let a = scope.resolve(a).as_number()?;
            let b = scope.resolve(b).as_number()?;
            Value::Number(if function == Function::Min { a.min(b) } else { a.max(b) })
        },
        Function::Round => {
            let [value, places] = into_array(operands, name)?;
            let value = scope.resolve(value).as_number()?;
            let places = f64_to_i32_checked(scope.resolve(places).as_number()?)?;
            Value::Number(round_to(value, places))
        },
        Function::If => {
            let [condition, then, otherwise] = into_array(operands, name)?;
            if scope.resolve(condition).as_bool()? {
                scope.resolve(then)
            } else {
                scope.resolve(otherwise)
            }
        },
        Function::Or => {
            let [a, b] = into_array(operands, name)?;
            Value::Bool(scope.resolve(a).as_bool()? || scope.resolve(b).as_bool()?)
        },
        Function::Def => {
            let [target, value] = into_array(operands, name)?;
            scope.assign(target, value)?;
            return Ok(None);
        },
        Function::IsNull => {
            let [operand] = into_array(operands, name)?;
            match operand {
                Operand::Variable(name) => Value::Bool(scope.is_null(&name)),
                Operand::Literal(_) => Value::Bool(false),
            }
        },
    };

    Ok(Some(value))
}

/// Rounds `value` to `places` decimal places, ties to even.
///
/// Negative `places` round to tens, hundreds and so on. When the scaled
/// value is not finite the input is returned unchanged.
///
/// # Example
/// ```
/// use yardcalc::interpreter::evaluator::function::round_to;
///
/// assert_eq!(round_to(2.5, 0), 2.0);
/// assert_eq!(round_to(0.125, 2), 0.12);
/// assert_eq!(round_to(1234.0, -2), 1200.0);
/// ```
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;

    if factor == 0.0 {
        return 0.0;
    }
    if !scaled.is_finite() {
        return value;
    }

    scaled.round_ties_even() / factor
}
