/// Runtime values and evaluation stack operands.
///
/// Defines `Value` (number, boolean, or a passed-through variable name) and
/// `Operand`, which keeps variables unresolved until they are consumed.
pub mod core;
