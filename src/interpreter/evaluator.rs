/// Core evaluation logic and scope management.
///
/// Contains the postfix stack machine, the per-evaluation `Scope` that layers
/// new bindings over the caller's environment, and operand popping.
pub mod core;

/// Operator evaluation.
///
/// Implements arithmetic, comparison, logical NOT and assignment.
pub mod operator;

/// Built-in function evaluation.
pub mod function;
