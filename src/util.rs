/// Numeric conversion helpers.
///
/// Provides checked conversions from `f64` to integer types, so that a
/// runtime value used as a count or an exponent is never truncated silently.
pub mod num;
