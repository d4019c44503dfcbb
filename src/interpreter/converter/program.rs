use std::{fmt, str::FromStr};

use ordered_float::OrderedFloat;

use crate::{
    error::ParseError,
    interpreter::{
        converter::core::ParseResult,
        lexer::{is_identifier, parse_number},
        registry::{Function, Operator},
    },
};

/// One instruction of a postfix program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostfixItem {
    /// A numeric literal, pushed as-is.
    Number(OrderedFloat<f64>),
    /// A variable name, resolved when an operator consumes it.
    Variable(String),
    /// An operator applied to the top of the stack.
    Operator(Operator),
    /// A function applied to the top of the stack.
    Function(Function),
}

impl PostfixItem {
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn variable(name: &str) -> Self {
        Self::Variable(name.to_string())
    }
}

impl fmt::Display for PostfixItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Variable(name) => f.write_str(name),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Function(function) => write!(f, "{function}"),
        }
    }
}

impl FromStr for PostfixItem {
    type Err = ParseError;

    fn from_str(text: &str) -> ParseResult<Self> {
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
           && let Some(op) = Operator::from_symbol(c)
        {
            return Ok(Self::Operator(op));
        }
        if let Some(value) = parse_number(text) {
            return Ok(Self::number(value));
        }
        if let Some(function) = Function::from_name(text) {
            return Ok(Self::Function(function));
        }
        if is_identifier(text) {
            return Ok(Self::variable(text));
        }

        Err(ParseError::UnknownSymbol { symbol: text.to_string() })
    }
}

/// A compiled formula in Reverse-Polish order.
///
/// Produced once by the converter and consumed by the evaluator. The textual
/// form (`Display`) separates items with single spaces and can be read back
/// with `FromStr`, which lets callers cache or log compiled formulas.
///
/// # Example
/// ```
/// use yardcalc::interpreter::converter::program::Program;
///
/// let program = yardcalc::compile("1 + 2 * 3").unwrap();
/// assert_eq!(program.to_string(), "1 2 3 * +");
///
/// let reloaded: Program = "1 2 3 * +".parse().unwrap();
/// assert_eq!(reloaded, program);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Program {
    items: Vec<PostfixItem>,
}

impl Program {
    #[must_use]
    pub const fn new(items: Vec<PostfixItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[PostfixItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PostfixItem> {
        self.items.iter()
    }
}

impl From<Vec<PostfixItem>> for Program {
    fn from(items: Vec<PostfixItem>) -> Self {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a Program {
    type IntoIter = std::slice::Iter<'a, PostfixItem>;
    type Item = &'a PostfixItem;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl FromStr for Program {
    type Err = ParseError;

    /// Reads a program from whitespace-separated items.
    ///
    /// Items are tried as an operator symbol, a signed decimal literal, a
    /// function name and an identifier, in that order. Anything else is an
    /// `UnknownSymbol`, so a program read from text never references a symbol
    /// missing from the registry.
    fn from_str(text: &str) -> ParseResult<Self> {
        text.split_whitespace()
            .map(str::parse)
            .collect::<ParseResult<Vec<_>>>()
            .map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_literals_survive_text_form() {
        let program = Program::new(vec![PostfixItem::number(-3.5), PostfixItem::number(2.0),
                                        PostfixItem::Operator(Operator::Multiply)]);
        assert_eq!(program.to_string(), "-3.5 2 *");
        assert_eq!("-3.5 2 *".parse::<Program>().unwrap(), program);
    }

    #[test]
    fn items_keep_emission_order() {
        let program: Program = "rate 2 Min".parse().unwrap();
        assert_eq!(program.items(),
                   [PostfixItem::variable("rate"),
                    PostfixItem::number(2.0),
                    PostfixItem::Function(Function::Min)]);
        assert_eq!(Program::from(program.items().to_vec()), program);
    }

    #[test]
    fn minus_alone_is_an_operator() {
        assert_eq!("-".parse::<PostfixItem>().unwrap(), PostfixItem::Operator(Operator::Subtract));
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        assert_eq!("1 2 &".parse::<Program>(),
                   Err(ParseError::UnknownSymbol { symbol: "&".to_string() }));
        assert_eq!("x 2 $y".parse::<Program>(),
                   Err(ParseError::UnknownSymbol { symbol: "$y".to_string() }));
    }
}
