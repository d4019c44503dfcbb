use std::fmt;

/// Tie-break rule for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    Right,
}

/// Static facts about an operator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDescriptor {
    /// The single character that spells the operator.
    pub symbol:        char,
    /// Binding strength; higher binds tighter.
    pub precedence:    u8,
    /// Grouping of a chain of equal-precedence operators.
    pub associativity: Associativity,
    /// Number of operands consumed, 1 or 2.
    pub arity:         usize,
}

/// An operator recognized by the formula language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `!`, logical not.
    Not,
    /// `^`
    Power,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`, floored modulo.
    Modulo,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `=`, binds a variable in the environment delta.
    Assign,
}

/// Every operator, in registry order.
pub const OPERATORS: &[Operator] = &[Operator::Not,
                                     Operator::Power,
                                     Operator::Multiply,
                                     Operator::Divide,
                                     Operator::Modulo,
                                     Operator::Add,
                                     Operator::Subtract,
                                     Operator::Less,
                                     Operator::Greater,
                                     Operator::Assign];

impl Operator {
    /// Returns the registry entry for this operator.
    ///
    /// | Symbol | Arity | Precedence | Assoc |
    /// |---|---|---|---|
    /// | `!` | 1 | 5 | left |
    /// | `^` | 2 | 5 | right |
    /// | `*` `/` `%` | 2 | 4 | left |
    /// | `+` `-` | 2 | 3 | left |
    /// | `<` `>` | 2 | 2 | left |
    /// | `=` | 2 | 1 | left |
    #[must_use]
    pub const fn descriptor(self) -> OperatorDescriptor {
        use Associativity::{Left, Right};

        let (symbol, precedence, associativity, arity) = match self {
            Self::Not => ('!', 5, Left, 1),
            Self::Power => ('^', 5, Right, 2),
            Self::Multiply => ('*', 4, Left, 2),
            Self::Divide => ('/', 4, Left, 2),
            Self::Modulo => ('%', 4, Left, 2),
            Self::Add => ('+', 3, Left, 2),
            Self::Subtract => ('-', 3, Left, 2),
            Self::Less => ('<', 2, Left, 2),
            Self::Greater => ('>', 2, Left, 2),
            Self::Assign => ('=', 1, Left, 2),
        };

        OperatorDescriptor { symbol,
                             precedence,
                             associativity,
                             arity }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        self.descriptor().symbol
    }

    #[must_use]
    pub const fn precedence(self) -> u8 {
        self.descriptor().precedence
    }

    #[must_use]
    pub const fn associativity(self) -> Associativity {
        self.descriptor().associativity
    }

    #[must_use]
    pub const fn arity(self) -> usize {
        self.descriptor().arity
    }

    /// Prefix operators have no left operand.
    #[must_use]
    pub const fn is_prefix(self) -> bool {
        self.arity() == 1
    }

    /// Looks up the operator spelled by `symbol`.
    ///
    /// # Example
    /// ```
    /// use yardcalc::interpreter::registry::operator::Operator;
    ///
    /// assert_eq!(Operator::from_symbol('^'), Some(Operator::Power));
    /// assert_eq!(Operator::from_symbol('#'), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        OPERATORS.iter().copied().find(|op| op.symbol() == symbol)
    }

    /// Tests whether `self`, arriving at the converter, must first pop `top`
    /// off the operator stack.
    ///
    /// A left-associative operator pops operators of greater or equal
    /// precedence, a right-associative one only those of strictly greater
    /// precedence.
    ///
    /// # Example
    /// ```
    /// use yardcalc::interpreter::registry::operator::Operator;
    ///
    /// assert!(Operator::Add.yields_to(Operator::Multiply));
    /// assert!(Operator::Subtract.yields_to(Operator::Add));
    /// assert!(!Operator::Power.yields_to(Operator::Power));
    /// ```
    #[must_use]
    pub const fn yields_to(self, top: Self) -> bool {
        match self.associativity() {
            Associativity::Left => self.precedence() <= top.precedence(),
            Associativity::Right => self.precedence() < top.precedence(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_through_lookup() {
        for op in OPERATORS {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(*op));
        }
    }

    #[test]
    fn only_power_is_right_associative() {
        let right = OPERATORS.iter()
                             .filter(|op| op.associativity() == Associativity::Right)
                             .collect::<Vec<_>>();
        assert_eq!(right, vec![&Operator::Power]);
    }

    #[test]
    fn not_is_the_only_prefix_operator() {
        assert!(Operator::Not.is_prefix());
        assert!(OPERATORS.iter().filter(|op| op.is_prefix()).count() == 1);
    }

    #[test]
    fn assignment_binds_loosest() {
        assert!(OPERATORS.iter().all(|op| op.precedence() >= Operator::Assign.precedence()));
    }
}
