/// The converter module turns a formula into a postfix program.
///
/// The converter consumes the lexemes produced by the lexer and reorders them
/// with the shunting-yard algorithm, so that evaluation needs no knowledge of
/// precedence or parentheses.
///
/// # Responsibilities
/// - Applies operator precedence and associativity.
/// - Emits function calls after their arguments and checks their arity.
/// - Reports unbalanced parentheses and misplaced separators with positions.
pub mod converter;
/// The environment module holds variable bindings.
///
/// A formula reads variables from an `Environment`; bindings made while
/// evaluating are returned as an `EnvironmentDelta` and committed by the
/// caller.
pub mod environment;
/// The evaluator module executes postfix programs.
///
/// The evaluator walks a program over an operand stack, applying operators and
/// built-in functions to the values they pop.
///
/// # Responsibilities
/// - Resolves variables when an operator or function consumes them.
/// - Reports runtime errors such as missing operands or division by zero.
/// - Collects assignments without touching the caller's environment.
pub mod evaluator;
/// The lexer module splits a formula into lexemes.
///
/// The lexer reads the raw formula text and produces numbers, variable names,
/// operators, function names and delimiters, each tagged with its byte
/// position. This is the first stage of compilation.
pub mod lexer;
/// The registry of operators and built-in functions.
///
/// Both sets are closed: every symbol the converter emits and the evaluator
/// accepts is a variant of `Operator` or `Function`.
pub mod registry;
/// The value module defines the runtime data types for evaluation.
pub mod value;
