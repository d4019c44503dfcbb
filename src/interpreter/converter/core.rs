use log::debug;

use crate::{
    error::ParseError,
    interpreter::{
        converter::program::{PostfixItem, Program},
        lexer::{Delimiter, Lexeme, Lexemes},
        registry::{Function, Operator},
    },
};

/// Result type used by the lexer and the converter.
pub type ParseResult<T> = Result<T, ParseError>;

/// An entry of the conversion stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
    Operator(Operator),
    Function(Function),
    OpenParen,
}

/// Bookkeeping for one open parenthesis, used to count call arguments.
#[derive(Debug, Clone, Copy)]
struct Group {
    /// Byte offset of the `(`.
    position:    usize,
    /// Whether the group is the argument list of a function call.
    call:        bool,
    separators:  usize,
    has_operand: bool,
}

impl Group {
    const fn arguments(self) -> usize {
        if self.has_operand || self.separators > 0 {
            self.separators + 1
        } else {
            0
        }
    }
}

/// State of one shunting-yard pass.
#[derive(Debug, Default)]
struct Converter {
    output:       Vec<PostfixItem>,
    stack:        Vec<StackEntry>,
    groups:       Vec<Group>,
    /// A function name that still waits for its `(`.
    pending_call: Option<(Function, usize)>,
    /// The operand just emitted, which must not be followed by `(`.
    last_operand: Option<(String, usize)>,
}

/// Converts an infix formula into a postfix program.
///
/// This is Dijkstra's shunting-yard algorithm, extended for function calls:
/// operands go straight to the output, operators wait on a stack until an
/// operator of lower precedence (or a closing parenthesis) flushes them, and a
/// function is emitted right after the `)` that closes its argument list.
///
/// Conversion is purely syntactic; nothing is evaluated. Its cost grows
/// linearly with the input and no other limit is enforced, so callers that
/// accept untrusted formulas should bound their length.
///
/// # Errors
/// - `UnmatchedParenthesis` for a `)` without `(` or a `(` left open.
/// - `UnmatchedDelimiter` for a `,` outside the argument list of a call.
/// - `NotAFunction` for a number or variable followed by `(`.
/// - `UnsupportedCharacter` for a lexeme that fits no category.
/// - `MissingArgumentList` for a function name not followed by `(`.
/// - `ArityMismatch` for a call with the wrong number of arguments.
///
/// # Example
/// ```
/// use yardcalc::{error::ParseError, interpreter::converter::core::convert};
///
/// assert_eq!(convert("2 ^ 3 ^ 2").unwrap().to_string(), "2 3 2 ^ ^");
/// assert_eq!(convert("Min(a, 1) * 2").unwrap().to_string(), "a 1 Min 2 *");
/// assert!(matches!(convert("(1 + 2"), Err(ParseError::UnmatchedParenthesis { .. })));
/// ```
pub fn convert(formula: &str) -> ParseResult<Program> {
    let mut converter = Converter::default();

    for lexeme in Lexemes::new(formula) {
        let (lexeme, position) = lexeme?;
        converter.accept(lexeme, position)?;
    }

    let program = converter.finish()?;
    debug!("converted {formula:?} into `{program}`");

    Ok(program)
}

impl Converter {
    /// Feeds one lexeme into the algorithm.
    fn accept(&mut self, lexeme: Lexeme, position: usize) -> ParseResult<()> {
        let call = self.pending_call.take();
        if let Some((function, at)) = call
           && lexeme != Lexeme::Delimiter(Delimiter::Open)
        {
            return Err(ParseError::MissingArgumentList { function: function.name(),
                                                         position: at, });
        }
        if let Some((name, at)) = self.last_operand.take()
           && lexeme == Lexeme::Delimiter(Delimiter::Open)
        {
            return Err(ParseError::NotAFunction { name,
                                                  position: at });
        }

        match lexeme {
            Lexeme::Delimiter(Delimiter::Open) => self.open_group(position, call.is_some()),
            Lexeme::Number(value) => {
                let item = PostfixItem::number(value);
                self.last_operand = Some((item.to_string(), position));
                self.emit_operand(item);
            },
            Lexeme::Variable(name) => {
                self.last_operand = Some((name.clone(), position));
                self.emit_operand(PostfixItem::Variable(name));
            },
            Lexeme::Function(function) => {
                self.stack.push(StackEntry::Function(function));
                self.pending_call = Some((function, position));
            },
            Lexeme::Delimiter(Delimiter::Separator) => self.separate(position)?,
            Lexeme::Operator(op) => self.push_operator(op),
            Lexeme::Delimiter(Delimiter::Close) => self.close_group(position)?,
        }

        Ok(())
    }

    fn open_group(&mut self, position: usize, call: bool) {
        self.stack.push(StackEntry::OpenParen);
        self.groups.push(Group { position,
                                 call,
                                 separators: 0,
                                 has_operand: false });
    }

    fn emit_operand(&mut self, item: PostfixItem) {
        self.output.push(item);
        self.mark_operand();
    }

    fn mark_operand(&mut self) {
        if let Some(group) = self.groups.last_mut() {
            group.has_operand = true;
        }
    }

    /// Moves stack entries to the output until an open parenthesis is on top.
    ///
    /// Returns `false` if the stack ran out without finding one.
    fn drain_to_open_paren(&mut self) -> bool {
        while let Some(&entry) = self.stack.last() {
            match entry {
                StackEntry::OpenParen => return true,
                StackEntry::Operator(op) => self.output.push(PostfixItem::Operator(op)),
                StackEntry::Function(function) => {
                    self.output.push(PostfixItem::Function(function));
                },
            }
            self.stack.pop();
        }
        false
    }

    fn separate(&mut self, position: usize) -> ParseResult<()> {
        if !self.drain_to_open_paren() {
            return Err(ParseError::UnmatchedDelimiter { position });
        }
        match self.groups.last_mut() {
            Some(group) if group.call => {
                group.separators += 1;
                Ok(())
            },
            _ => Err(ParseError::UnmatchedDelimiter { position }),
        }
    }

    fn push_operator(&mut self, op: Operator) {
        // A prefix operator has no left operand, so nothing before it can be
        // complete yet.
        if !op.is_prefix() {
            while let Some(&StackEntry::Operator(top)) = self.stack.last() {
                if !op.yields_to(top) {
                    break;
                }
                self.stack.pop();
                self.output.push(PostfixItem::Operator(top));
            }
        }
        self.stack.push(StackEntry::Operator(op));
    }

    fn close_group(&mut self, position: usize) -> ParseResult<()> {
        if !self.drain_to_open_paren() {
            return Err(ParseError::UnmatchedParenthesis { position });
        }
        self.stack.pop();
        let Some(group) = self.groups.pop() else {
            return Err(ParseError::UnmatchedParenthesis { position });
        };

        if let Some(&StackEntry::Function(function)) = self.stack.last() {
            let found = group.arguments();
            if found != function.arity() {
                return Err(ParseError::ArityMismatch { function: function.name(),
                                                       expected: function.arity(),
                                                       found,
                                                       position });
            }
            self.stack.pop();
            self.output.push(PostfixItem::Function(function));
        }

        // The closed group is one operand of the enclosing group.
        self.mark_operand();
        Ok(())
    }

    /// Flushes the stack once the input is exhausted.
    fn finish(mut self) -> ParseResult<Program> {
        if let Some((function, position)) = self.pending_call {
            return Err(ParseError::MissingArgumentList { function: function.name(),
                                                         position });
        }

        while let Some(entry) = self.stack.pop() {
            match entry {
                StackEntry::OpenParen => {
                    let position = self.groups.last().map_or(0, |group| group.position);
                    return Err(ParseError::UnmatchedParenthesis { position });
                },
                StackEntry::Operator(op) => self.output.push(PostfixItem::Operator(op)),
                StackEntry::Function(function) => {
                    self.output.push(PostfixItem::Function(function));
                },
            }
        }

        Ok(self.output.into())
    }
}
