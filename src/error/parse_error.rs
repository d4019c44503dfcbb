#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while classifying or converting a
/// formula.
pub enum ParseError {
    /// A `)` had no matching `(`, or a `(` was still open at the end of input.
    UnmatchedParenthesis {
        /// Byte offset of the offending parenthesis.
        position: usize,
    },
    /// An argument separator `,` appeared outside the argument list of a
    /// function call.
    UnmatchedDelimiter {
        /// Byte offset of the separator.
        position: usize,
    },
    /// A lexeme fit none of the known categories.
    UnsupportedCharacter {
        /// The text that could not be classified.
        lexeme:   String,
        /// Byte offset where the lexeme starts.
        position: usize,
    },
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// The function name.
        function: &'static str,
        /// The number of arguments the function takes.
        expected: usize,
        /// The number of arguments that were supplied.
        found:    usize,
        /// Byte offset of the closing parenthesis of the call.
        position: usize,
    },
    /// A function name was not followed by `(`.
    MissingArgumentList {
        /// The function name.
        function: &'static str,
        /// Byte offset of the function name.
        position: usize,
    },
    /// A number or variable was directly followed by `(`.
    NotAFunction {
        /// The text of the operand.
        name:     String,
        /// Byte offset of the operand.
        position: usize,
    },
    /// An item of a textual postfix program is neither a number, an
    /// identifier, an operator nor a function.
    UnknownSymbol {
        /// The unrecognized item.
        symbol: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmatchedParenthesis { position } => {
                write!(f, "Error at position {position}: Unmatched parenthesis.")
            },
            Self::UnmatchedDelimiter { position } => write!(f,
                                                            "Error at position {position}: Argument separator ',' outside of a function call."),
            Self::UnsupportedCharacter { lexeme, position } => {
                write!(f, "Error at position {position}: Unsupported character: \"{lexeme}\".")
            },
            Self::ArityMismatch { function,
                                  expected,
                                  found,
                                  position, } => write!(f,
                                                        "Error at position {position}: {function} takes {expected} argument(s) but {found} were supplied."),
            Self::MissingArgumentList { function, position } => write!(f,
                                                                       "Error at position {position}: Expected '(' after function {function}."),
            Self::NotAFunction { name, position } => {
                write!(f, "Error at position {position}: '{name}' is not a function.")
            },
            Self::UnknownSymbol { symbol } => {
                write!(f, "Unknown symbol in postfix program: \"{symbol}\".")
            },
        }
    }
}

impl std::error::Error for ParseError {}
