use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Safely converts an `f64` to `i32` if the value is finite, within range, and
/// not fractional.
///
/// ## Errors
/// Returns an error for non-finite, out-of-range, or fractional values.
///
/// # Parameters
/// - `value`: The floating-point value to convert.
///
/// # Returns
/// - `Ok(i32)`: The converted value if safe.
/// - `Err(RuntimeError::ExpectedNumber | LiteralTooLarge | RealIsFractional)`:
///   If conversion is invalid.
///
/// # Example
/// ```
/// use yardcalc::{error::RuntimeError, util::num::f64_to_i32_checked};
///
/// // Safe conversion
/// assert_eq!(f64_to_i32_checked(-2.0).unwrap(), -2);
///
/// // Fractional value
/// let err = f64_to_i32_checked(1.5).unwrap_err();
/// assert!(matches!(err, RuntimeError::RealIsFractional { .. }));
///
/// // Out of range
/// let err = f64_to_i32_checked(1e20).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooLarge { .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_checked(value: f64) -> EvalResult<i32> {
    if !value.is_finite() {
        return Err(RuntimeError::ExpectedNumber { found: value.to_string() });
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(RuntimeError::LiteralTooLarge { value });
    }
    if value.fract() != 0.0 {
        return Err(RuntimeError::RealIsFractional { value });
    }
    Ok(value as i32)
}
