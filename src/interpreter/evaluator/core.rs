use log::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        converter::program::{PostfixItem, Program},
        environment::{Environment, EnvironmentDelta},
        evaluator::{function::apply_function, operator::apply_operator},
        value::core::{Operand, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of evaluating a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The result, or `None` for a program that only binds variables.
    pub value: Option<Value>,
    /// Bindings made by `=` and `Def`, not yet applied to any environment.
    pub delta: EnvironmentDelta,
}

/// Variable lookup during one evaluation.
///
/// Reads see the bindings made so far by this evaluation first, then the
/// base environment. Writes only go to the delta.
pub struct Scope<'e> {
    base:  &'e Environment,
    delta: EnvironmentDelta,
}

impl<'e> Scope<'e> {
    #[must_use]
    pub fn new(base: &'e Environment) -> Self {
        Self { base,
               delta: EnvironmentDelta::default() }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.delta.get(name).or_else(|| self.base.get(name))
    }

    /// Resolves an operand to a value.
    ///
    /// A bound variable yields its value. An unbound or null variable is
    /// passed through as `Value::Name`, leaving it to the consumer to decide
    /// whether a name is acceptable.
    ///
    /// # Example
    /// ```
    /// use yardcalc::interpreter::{
    ///     environment::Environment,
    ///     evaluator::core::Scope,
    ///     value::core::{Operand, Value},
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.set("x", 5.0);
    /// let scope = Scope::new(&env);
    ///
    /// assert_eq!(scope.resolve(Operand::Variable("x".to_string())), Value::Number(5.0));
    /// assert_eq!(scope.resolve(Operand::Variable("y".to_string())),
    ///            Value::Name("y".to_string()));
    /// ```
    #[must_use]
    pub fn resolve(&self, operand: Operand) -> Value {
        match operand {
            Operand::Literal(value) => value,
            Operand::Variable(name) => match self.lookup(&name) {
                Some(value) => value.clone(),
                None => Value::Name(name),
            },
        }
    }

    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        self.lookup(name).is_none()
    }

    /// Binds the variable named by `target` to the resolved `value`.
    ///
    /// # Errors
    /// `InvalidAssignmentTarget` if `target` is not a variable.
    pub fn assign(&mut self, target: Operand, value: Operand) -> EvalResult<()> {
        match target {
            Operand::Variable(name) => {
                let value = self.resolve(value);
                trace!("assign {name} = {value}");
                self.delta.bind(name, value);
                Ok(())
            },
            Operand::Literal(literal) => {
                Err(RuntimeError::InvalidAssignmentTarget { found: literal.to_string() })
            },
        }
    }

    #[must_use]
    pub fn delta(&self) -> &EnvironmentDelta {
        &self.delta
    }

    #[must_use]
    pub fn into_delta(self) -> EnvironmentDelta {
        self.delta
    }
}

/// Pops the top `required` entries of `stack`, earliest pushed first.
///
/// # Errors
/// `InsufficientOperands` if the stack holds fewer than `required` entries.
pub fn pop_operands<T>(stack: &mut Vec<T>, symbol: &str, required: usize) -> EvalResult<Vec<T>> {
    let available = stack.len();
    if available < required {
        return Err(RuntimeError::InsufficientOperands { symbol: symbol.to_string(),
                                                        required,
                                                        available });
    }
    Ok(stack.split_off(available - required))
}

/// Converts popped operands into a fixed-size array.
pub(crate) fn into_array<const N: usize>(operands: Vec<Operand>,
                                         symbol: &str)
                                         -> EvalResult<[Operand; N]> {
    let available = operands.len();
    operands.try_into()
            .map_err(|_| RuntimeError::InsufficientOperands { symbol: symbol.to_string(),
                                                              required: N,
                                                              available })
}

/// Evaluates a postfix program against an environment.
///
/// Items are processed left to right over a stack. Literals and variable
/// names are pushed; an operator or function pops as many operands as its
/// arity, resolves them and pushes its result. `=` and `Def` push nothing and
/// record a binding in the returned delta instead; `env` itself is never
/// modified.
///
/// # Errors
/// - `InsufficientOperands` when an operator or function finds too few
///   operands.
/// - `MalformedProgram` when the stack does not end with exactly one value
///   (an empty stack is accepted if the program bound at least one
///   variable).
/// - Any error raised by an operator or function, such as `DivisionByZero`.
///
/// # Example
/// ```
/// use yardcalc::interpreter::{
///     environment::Environment, evaluator::core::evaluate, value::core::Value,
/// };
///
/// let program = "x 2 *".parse().unwrap();
/// let mut env = Environment::new();
/// env.set("x", 5.0);
///
/// let evaluation = evaluate(&program, &env).unwrap();
/// assert_eq!(evaluation.value, Some(Value::Number(10.0)));
/// assert!(evaluation.delta.is_empty());
/// ```
pub fn evaluate(program: &Program, env: &Environment) -> EvalResult<Evaluation> {
    let mut scope = Scope::new(env);
    let mut stack: Vec<Operand> = Vec::with_capacity(program.len());

    for item in program {
        trace!("{item} | {stack:?}");

        match item {
            PostfixItem::Number(n) => stack.push(Operand::Literal(Value::Number(n.into_inner()))),
            PostfixItem::Variable(name) => stack.push(Operand::Variable(name.clone())),
            PostfixItem::Operator(op) => {
                let operands = pop_operands(&mut stack, &op.to_string(), op.arity())?;
                if let Some(value) = apply_operator(*op, operands, &mut scope)? {
                    stack.push(Operand::Literal(value));
                }
            },
            PostfixItem::Function(function) => {
                let operands = pop_operands(&mut stack, function.name(), function.arity())?;
                if let Some(value) = apply_function(*function, operands, &mut scope)? {
                    stack.push(Operand::Literal(value));
                }
            },
        }
    }

    let value = match stack.len() {
        1 => stack.pop().map(|operand| scope.resolve(operand)),
        0 if !scope.delta().is_empty() => None,
        remaining => return Err(RuntimeError::MalformedProgram { remaining }),
    };

    Ok(Evaluation { value,
                    delta: scope.into_delta() })
}
