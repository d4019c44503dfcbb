use std::fmt;

/// Static facts about a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// The function this entry describes.
    pub function: Function,
    /// The exact, case-sensitive spelling in formulas.
    pub name:     &'static str,
    /// Number of arguments the function takes.
    pub arity:    usize,
}

/// Defines the built-in functions by generating the `Function` enum, its
/// descriptor lookup and the `FUNCTIONS` table from a single list.
///
/// Each entry provides:
/// - the enum variant (with its doc comment),
/// - the name as written in formulas,
/// - the fixed arity.
macro_rules! builtin_functions {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => {
                name: $name:literal,
                arity: $arity:literal $(,)?
            }
        ),* $(,)?
    ) => {
        /// A built-in function of the formula language.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Function {
            $(
                $(#[$meta])*
                $variant,
            )*
        }

        /// Every built-in function, in registry order.
        pub static FUNCTIONS: &[FunctionDescriptor] = &[
            $(
                FunctionDescriptor { function: Function::$variant, name: $name, arity: $arity },
            )*
        ];

        impl Function {
            /// Returns the registry entry for this function.
            #[must_use]
            pub const fn descriptor(self) -> FunctionDescriptor {
                match self {
                    $(
                        Self::$variant => FunctionDescriptor { function: Self::$variant,
                                                               name:     $name,
                                                               arity:    $arity, },
                    )*
                }
            }
        }
    };
}

builtin_functions! {
    /// `Min(a, b)`
    Min    => { name: "Min",    arity: 2 },
    /// `Max(a, b)`
    Max    => { name: "Max",    arity: 2 },
    /// `Round(value, places)`, ties to even.
    Round  => { name: "Round",  arity: 2 },
    /// `IF(condition, then, else)`
    If     => { name: "IF",     arity: 3 },
    /// `OR(a, b)`
    Or     => { name: "OR",     arity: 2 },
    /// `Def(name, value)`, binds `name` like `=` does.
    Def    => { name: "Def",    arity: 2 },
    /// `IsNull(name)`, true when `name` is unbound or null.
    IsNull => { name: "IsNull", arity: 1 },
}

impl Function {
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.descriptor().name
    }

    #[must_use]
    pub const fn arity(self) -> usize {
        self.descriptor().arity
    }

    /// Looks up a function by its exact name.
    ///
    /// # Example
    /// ```
    /// use yardcalc::interpreter::registry::function::Function;
    ///
    /// assert_eq!(Function::from_name("Round"), Some(Function::Round));
    /// assert_eq!(Function::from_name("round"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        FUNCTIONS.iter().find(|d| d.name == name).map(|d| d.function)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_and_descriptor_agree() {
        for entry in FUNCTIONS {
            assert_eq!(entry.function.descriptor(), *entry);
            assert_eq!(Function::from_name(entry.name), Some(entry.function));
        }
    }

    #[test]
    fn arities() {
        assert_eq!(Function::If.arity(), 3);
        assert_eq!(Function::Round.arity(), 2);
        assert_eq!(Function::IsNull.arity(), 1);
    }

    #[test]
    fn flow_control_keywords_are_not_functions() {
        for keyword in ["if", "then", "elif", "endif"] {
            assert_eq!(Function::from_name(keyword), None);
        }
    }
}
