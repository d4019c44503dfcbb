use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        converter::program::{PostfixItem, Program},
        evaluator::core::{EvalResult, pop_operands},
        registry::{Function, Operator},
    },
};

/// One application in an execution order listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionStep {
    /// The temporary (`_00`, `_01`, ...) or variable receiving the result.
    pub target:      String,
    /// The operation applied, written with its operands.
    pub instruction: String,
}

impl fmt::Display for ExecutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.instruction)
    }
}

/// A program rewritten as a sequence of three-address steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOrder {
    pub steps:  Vec<ExecutionStep>,
    /// The operand holding the final value, or `None` when the program only
    /// binds variables.
    pub result: Option<String>,
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.steps.iter().map(ToString::to_string).collect::<Vec<_>>();
        if let Some(result) = &self.result {
            lines.push(format!("result = {result}"));
        }
        f.write_str(&lines.join("\n"))
    }
}

impl Program {
    /// Lists the operator and function applications of the program in the
    /// order the evaluator performs them.
    ///
    /// Each application writes a fresh temporary; assignments write the
    /// variable they bind. No values are computed, so the listing does not
    /// depend on an environment.
    ///
    /// # Errors
    /// The same `InsufficientOperands`, `InvalidAssignmentTarget` and
    /// `MalformedProgram` errors that evaluating the program would report.
    ///
    /// # Example
    /// ```
    /// let program = yardcalc::compile("Min(1 + 2, x) * 3").unwrap();
    /// let order = program.execution_order().unwrap();
    ///
    /// assert_eq!(order.to_string(), "_00 = 1 + 2\n_01 = Min(_00, x)\n_02 = _01 * 3\nresult = _02");
    /// ```
    pub fn execution_order(&self) -> EvalResult<ExecutionOrder> {
        // Each entry is an operand name and whether it names a variable.
        let mut stack: Vec<(String, bool)> = Vec::new();
        let mut steps = Vec::new();
        let mut temporaries = 0;
        let mut assigned = false;

        for item in self {
            let (target, instruction) = match item {
                PostfixItem::Number(_) => {
                    stack.push((item.to_string(), false));
                    continue;
                },
                PostfixItem::Variable(name) => {
                    stack.push((name.clone(), true));
                    continue;
                },
                PostfixItem::Operator(op) => {
                    let operands = pop_operands(&mut stack, &op.to_string(), op.arity())?;
                    match (op, operands.as_slice()) {
                        (Operator::Assign, [target, (value, _)]) => {
                            (Some(assignment_target(target)?), value.clone())
                        },
                        (_, [(operand, _)]) => (None, format!("{op}{operand}")),
                        _ => (None, names(&operands).join(format!(" {op} ").as_str())),
                    }
                },
                PostfixItem::Function(function) => {
                    let operands = pop_operands(&mut stack, function.name(), function.arity())?;
                    match (function, operands.as_slice()) {
                        (Function::Def, [target, (value, _)]) => {
                            (Some(assignment_target(target)?), value.clone())
                        },
                        _ => (None, format!("{function}({})", names(&operands).join(", "))),
                    }
                },
            };

            let target = if let Some(name) = target {
                assigned = true;
                name
            } else {
                let temporary = format!("_{temporaries:02}");
                temporaries += 1;
                stack.push((temporary.clone(), false));
                temporary
            };
            steps.push(ExecutionStep { target, instruction });
        }

        let result = match stack.len() {
            1 => stack.pop().map(|(name, _)| name),
            0 if assigned => None,
            remaining => return Err(RuntimeError::MalformedProgram { remaining }),
        };

        Ok(ExecutionOrder { steps, result })
    }
}

fn names(operands: &[(String, bool)]) -> Vec<&str> {
    operands.iter().map(|(name, _)| name.as_str()).collect()
}

/// Only a variable can receive an assignment; literals and temporaries fail
/// the same way they do during evaluation.
fn assignment_target((name, is_variable): &(String, bool)) -> EvalResult<String> {
    if *is_variable {
        Ok(name.clone())
    } else {
        Err(RuntimeError::InvalidAssignmentTarget { found: name.clone() })
    }
}

#[cfg(test)]
mod tests {
    use crate::compile;

    use super::*;

    fn listing(formula: &str) -> Vec<String> {
        compile(formula).unwrap()
                        .execution_order()
                        .unwrap()
                        .steps
                        .iter()
                        .map(ToString::to_string)
                        .collect()
    }

    #[test]
    fn temporaries_are_numbered_in_order() {
        assert_eq!(listing("2 ^ 3 ^ 2"), ["_00 = 3 ^ 2", "_01 = 2 ^ _00"]);
    }

    #[test]
    fn unary_and_function_steps() {
        assert_eq!(listing("!x"), ["_00 = !x"]);
        assert_eq!(listing("IF(a < b, 1, 2)"), ["_00 = a < b", "_01 = IF(_00, 1, 2)"]);
    }

    #[test]
    fn assignments_target_the_variable() {
        let order = compile("Def(a, 1 + 2)").unwrap().execution_order().unwrap();
        assert_eq!(order.to_string(), "_00 = 1 + 2\na = _00");
        assert_eq!(order.result, None);
    }

    #[test]
    fn only_variables_can_be_assigned() {
        let listing = |formula: &str| compile(formula).unwrap().execution_order();

        assert_eq!(listing("Min(1, 2) = 3"),
                   Err(RuntimeError::InvalidAssignmentTarget { found: "_00".to_string() }));
        assert_eq!(listing("Def(4, 5)"),
                   Err(RuntimeError::InvalidAssignmentTarget { found: "4".to_string() }));

        let env = crate::interpreter::environment::Environment::new();
        let program = compile("Min(1, 2) = 3").unwrap();
        assert!(matches!(crate::evaluate(&program, &env),
                         Err(RuntimeError::InvalidAssignmentTarget { .. })));
    }

    #[test]
    fn single_operand_needs_no_steps() {
        let order = compile("x").unwrap().execution_order().unwrap();
        assert!(order.steps.is_empty());
        assert_eq!(order.result.as_deref(), Some("x"));
    }

    #[test]
    fn malformed_programs_are_reported() {
        let program: Program = "1 +".parse().unwrap();
        assert_eq!(program.execution_order(),
                   Err(RuntimeError::InsufficientOperands { symbol:    "+".to_string(),
                                                            required:  2,
                                                            available: 1, }));

        let program: Program = "1 2".parse().unwrap();
        assert_eq!(program.execution_order(), Err(RuntimeError::MalformedProgram { remaining: 2 }));
    }
}
