/// Shunting-yard conversion from infix formulas to postfix programs.
///
/// Reorders classified lexemes by precedence and associativity, checks
/// parenthesis balance and function arity, and emits a `Program`.
pub mod core;

/// The compiled postfix program and its textual form.
pub mod program;

/// Three-address listing of the steps a program performs.
pub mod order;
