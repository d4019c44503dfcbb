#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while evaluating a postfix program.
pub enum RuntimeError {
    /// An operator or function found fewer operands on the stack than it
    /// consumes.
    InsufficientOperands {
        /// The operator symbol or function name.
        symbol:    String,
        /// The number of operands required.
        required:  usize,
        /// The number of operands that were on the stack.
        available: usize,
    },
    /// The program ended with a stack that did not hold exactly one value.
    MalformedProgram {
        /// The number of operands left on the stack.
        remaining: usize,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero,
    /// A number was expected, but the operand could not be used as one.
    ExpectedNumber {
        /// Rendering of the operand that was found.
        found: String,
    },
    /// A boolean was expected, but the operand could not be used as one.
    ExpectedBoolean {
        /// Rendering of the operand that was found.
        found: String,
    },
    /// The left side of `=` or the first argument of `Def` was not a variable
    /// name.
    InvalidAssignmentTarget {
        /// Rendering of the operand that was found.
        found: String,
    },
    /// Tried to use a real number where an integer was required.
    RealIsFractional {
        /// The fractional value.
        value: f64,
    },
    /// A value was too large to be represented safely.
    LiteralTooLarge {
        /// The value that did not fit.
        value: f64,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientOperands { symbol,
                                         required,
                                         available, } => write!(f,
                                                                "Error: '{symbol}' needs {required} operand(s) but only {available} available."),
            Self::MalformedProgram { remaining } => write!(f,
                                                           "Error: Malformed program, {remaining} value(s) left on the stack."),
            Self::DivisionByZero => write!(f, "Error: Division by zero."),
            Self::ExpectedNumber { found } => write!(f, "Error: Expected number, found {found}."),
            Self::ExpectedBoolean { found } => {
                write!(f, "Error: Expected boolean, found {found}.")
            },
            Self::InvalidAssignmentTarget { found } => {
                write!(f, "Error: Cannot assign to {found}, expected a variable name.")
            },
            Self::RealIsFractional { value } => write!(f,
                                                       "Error: Value {value} is fractional and cannot be used as an integer."),
            Self::LiteralTooLarge { value } => write!(f, "Error: Value {value} is too large."),
        }
    }
}

impl std::error::Error for RuntimeError {}
