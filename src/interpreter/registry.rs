/// Operator table.
///
/// Maps each operator symbol to its precedence, associativity and arity. The
/// converter reads it to order operators; the evaluator reads the arity to
/// know how many operands to pop.
pub mod operator;
/// Built-in function table.
///
/// Maps each function name to its fixed arity.
pub mod function;

pub use function::{FUNCTIONS, Function, FunctionDescriptor};
pub use operator::{Associativity, OPERATORS, Operator, OperatorDescriptor};
