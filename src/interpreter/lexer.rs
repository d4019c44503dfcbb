use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::{
        converter::core::ParseResult,
        registry::{Function, Operator},
    },
};

/// A raw token cut from the formula by the lexer.
///
/// Operators and delimiters are single characters. Everything else between
/// them is captured as one `Word` and classified afterwards by [`classify`].
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Token<'s> {
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// One of `+ - * / % ^ ! = < >`.
    #[regex(r"[-+*/%^!=<>]", |lex| lex.slice().chars().next().and_then(Operator::from_symbol))]
    Operator(Operator),
    /// A maximal run of characters that are neither delimiters, whitespace
    /// nor operator symbols.
    #[regex(r"[^(),;+\-*/%^!=<> \t\r\n\f]+", |lex| lex.slice(), allow_greedy = true)]
    Word(&'s str),
    /// Whitespace and `;` statement separators.
    #[regex(r"[ \t\r\n\f;]+", logos::skip)]
    Ignored,
}

/// The delimiters of the formula language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Separator,
}

/// A classified unit of a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    /// A decimal literal such as `42` or `0.5`.
    Number(f64),
    /// An identifier that is not a function name.
    Variable(String),
    /// An operator symbol.
    Operator(Operator),
    /// A built-in function name.
    Function(Function),
    /// `(`, `)` or `,`.
    Delimiter(Delimiter),
}

/// Iterator over the lexemes of a formula.
///
/// Each item pairs the lexeme with the byte offset where it starts, or
/// reports an `UnsupportedCharacter` error for a run that fits no category.
///
/// # Example
/// ```
/// use yardcalc::interpreter::{
///     lexer::{Delimiter, Lexeme, Lexemes},
///     registry::Function,
/// };
///
/// let lexemes = Lexemes::new("Max(x, 2.5)").map(|l| l.unwrap().0).collect::<Vec<_>>();
///
/// assert_eq!(lexemes,
///            vec![Lexeme::Function(Function::Max),
///                 Lexeme::Delimiter(Delimiter::Open),
///                 Lexeme::Variable("x".to_string()),
///                 Lexeme::Delimiter(Delimiter::Separator),
///                 Lexeme::Number(2.5),
///                 Lexeme::Delimiter(Delimiter::Close)]);
/// ```
pub struct Lexemes<'s> {
    inner: logos::Lexer<'s, Token<'s>>,
}

impl<'s> Lexemes<'s> {
    #[must_use]
    pub fn new(formula: &'s str) -> Self {
        Self { inner: Token::lexer(formula) }
    }
}

impl Iterator for Lexemes<'_> {
    type Item = ParseResult<(Lexeme, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let position = self.inner.span().start;

        let lexeme = match token {
            Ok(Token::LParen) => Ok(Lexeme::Delimiter(Delimiter::Open)),
            Ok(Token::RParen) => Ok(Lexeme::Delimiter(Delimiter::Close)),
            Ok(Token::Comma) => Ok(Lexeme::Delimiter(Delimiter::Separator)),
            Ok(Token::Operator(op)) => Ok(Lexeme::Operator(op)),
            Ok(Token::Word(word)) => classify(word, position),
            Ok(Token::Ignored) | Err(()) => {
                Err(ParseError::UnsupportedCharacter { lexeme: self.inner.slice().to_string(),
                                                       position })
            },
        };

        Some(lexeme.map(|lexeme| (lexeme, position)))
    }
}

/// Classifies a candidate run of characters.
///
/// The categories are tried in a fixed order: number, function name,
/// variable. Function names win over variables, so `Min` is never a
/// variable.
///
/// # Errors
/// `UnsupportedCharacter` when the run fits no category.
///
/// # Example
/// ```
/// use yardcalc::interpreter::{
///     lexer::{Lexeme, classify},
///     registry::Function,
/// };
///
/// assert_eq!(classify("12.5", 0).unwrap(), Lexeme::Number(12.5));
/// assert_eq!(classify("IF", 0).unwrap(), Lexeme::Function(Function::If));
/// assert_eq!(classify("rate", 0).unwrap(), Lexeme::Variable("rate".to_string()));
/// assert!(classify("1.2.3", 0).is_err());
/// ```
pub fn classify(candidate: &str, position: usize) -> ParseResult<Lexeme> {
    if let Some(value) = parse_number(candidate) {
        return Ok(Lexeme::Number(value));
    }
    if let Some(function) = Function::from_name(candidate) {
        return Ok(Lexeme::Function(function));
    }
    if is_identifier(candidate) {
        return Ok(Lexeme::Variable(candidate.to_string()));
    }

    Err(ParseError::UnsupportedCharacter { lexeme: candidate.to_string(),
                                           position })
}

/// Tests whether `text` has identifier shape: an alphabetic character
/// followed by alphanumerics or underscores.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();

    chars.next().is_some_and(char::is_alphabetic)
    && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Parses `text` as a number only if the decimal scanner consumes all of it.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    match parse_decimal(text) {
        Some((value, consumed)) if consumed == text.len() => Some(value),
        _ => None,
    }
}

/// Largest mantissa an `f64` holds exactly (`2^53`).
const MAX_EXACT_MANTISSA: u128 = 1 << 53;

/// Powers of ten that are exact in an `f64`.
const EXACT_POWERS_OF_TEN: [f64; 23] = [1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10,
                                        1e11, 1e12, 1e13, 1e14, 1e15, 1e16, 1e17, 1e18, 1e19,
                                        1e20, 1e21, 1e22];

/// Scans a decimal literal from the start of `text`.
///
/// Accepts an optional sign, digits, and an optional `.` followed by more
/// digits. A second `.` ends the literal without error. The mantissa is
/// accumulated as an integer and divided by the power of ten of the fraction
/// digits. When either is too large to be exact in an `f64`, the scanned
/// text is converted by the standard library instead, so the value is always
/// correctly rounded.
///
/// # Returns
/// - `Some((value, consumed))`: the value and the number of bytes scanned.
/// - `None`: if no digit was found.
///
/// # Example
/// ```
/// use yardcalc::interpreter::lexer::parse_decimal;
///
/// assert_eq!(parse_decimal("-12.5"), Some((-12.5, 5)));
/// assert_eq!(parse_decimal("1.2.3"), Some((1.2, 3)));
/// assert_eq!(parse_decimal("99999999999999999999"), Some((1e20, 20)));
/// assert_eq!(parse_decimal("."), None);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parse_decimal(text: &str) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let mut index = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));

    let mut mantissa = Some(0_u128);
    let mut fraction_digits = 0;
    let mut digits = 0;

    while let Some(&d) = bytes.get(index).filter(|b| b.is_ascii_digit()) {
        mantissa = push_digit(mantissa, d);
        digits += 1;
        index += 1;
    }

    if bytes.get(index) == Some(&b'.') {
        index += 1;
        while let Some(&d) = bytes.get(index).filter(|b| b.is_ascii_digit()) {
            mantissa = push_digit(mantissa, d);
            fraction_digits += 1;
            digits += 1;
            index += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    let scale = EXACT_POWERS_OF_TEN.get(fraction_digits);
    let value = match (mantissa, scale) {
        (Some(m), Some(scale)) if m <= MAX_EXACT_MANTISSA => {
            let magnitude = m as f64 / scale;
            if negative { -magnitude } else { magnitude }
        },
        _ => text[..index].parse().ok()?,
    };

    Some((value, index))
}

fn push_digit(mantissa: Option<u128>, digit: u8) -> Option<u128> {
    mantissa?.checked_mul(10)?.checked_add(u128::from(digit - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(formula: &str) -> Vec<Lexeme> {
        Lexemes::new(formula).map(|l| l.unwrap().0).collect()
    }

    #[test]
    fn integers_and_fractions() {
        assert_eq!(parse_decimal("42"), Some((42.0, 2)));
        assert_eq!(parse_decimal("0.1"), Some((0.1, 3)));
        assert_eq!(parse_decimal(".5"), Some((0.5, 2)));
        assert_eq!(parse_decimal("7."), Some((7.0, 2)));
        assert_eq!(parse_decimal("+3"), Some((3.0, 2)));
    }

    #[test]
    fn long_literals_are_correctly_rounded() {
        for text in ["99999999999999999999",
                     "123456789012345678.5",
                     "0.1234567890123456789012345",
                     "-9007199254740993",
                     "1234567890123456789012345678901234567890"]
        {
            assert_eq!(parse_number(text), text.parse::<f64>().ok(), "{text}");
        }
    }

    #[test]
    fn second_dot_stops_the_scan() {
        assert_eq!(parse_decimal("2.75.15"), Some((2.75, 4)));
        assert_eq!(parse_number("2.75.15"), None);
    }

    #[test]
    fn no_digits_is_not_a_number() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn whitespace_and_separators_are_skipped() {
        assert_eq!(lexemes(" 1 ;\t+ 2\n"),
                   vec![Lexeme::Number(1.0), Lexeme::Operator(Operator::Add), Lexeme::Number(2.0)]);
    }

    #[test]
    fn operators_split_runs() {
        assert_eq!(lexemes("a*b"),
                   vec![Lexeme::Variable("a".to_string()),
                        Lexeme::Operator(Operator::Multiply),
                        Lexeme::Variable("b".to_string())]);
    }

    #[test]
    fn function_names_are_case_sensitive() {
        assert_eq!(lexemes("Min min"),
                   vec![Lexeme::Function(Function::Min), Lexeme::Variable("min".to_string())]);
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(lexemes("完成值"), vec![Lexeme::Variable("完成值".to_string())]);
    }

    #[test]
    fn unsupported_run_reports_position() {
        let err = Lexemes::new("1 + $x").find_map(Result::err).unwrap();
        assert_eq!(err,
                   ParseError::UnsupportedCharacter { lexeme:   "$x".to_string(),
                                                      position: 4, });
    }

    #[test]
    fn placeholder_with_dot_is_unsupported() {
        assert!(classify("item.value", 0).is_err());
    }
}
