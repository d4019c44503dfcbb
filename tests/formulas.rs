use std::fs;

use walkdir::WalkDir;
use yardcalc::{
    calculate, compile,
    error::{Error, ParseError, RuntimeError},
    evaluate,
    interpreter::{
        converter::program::Program,
        environment::Environment,
        lexer::parse_number,
        value::core::Value,
    },
};

/// What a fixture line expects a formula to produce.
#[derive(Debug)]
enum Expected {
    Value(Option<Value>),
    ParseFailure,
    RuntimeFailure,
}

fn parse_expected(text: &str) -> Expected {
    match text {
        "!parse" => Expected::ParseFailure,
        "!runtime" => Expected::RuntimeFailure,
        "none" => Expected::Value(None),
        "true" => Expected::Value(Some(Value::Bool(true))),
        "false" => Expected::Value(Some(Value::Bool(false))),
        _ => match parse_number(text) {
            Some(n) => Expected::Value(Some(Value::Number(n))),
            None => Expected::Value(Some(Value::Name(text.to_string()))),
        },
    }
}

fn matches_expected(actual: &Result<Option<Value>, Error>, expected: &Expected) -> bool {
    match (actual, expected) {
        (Ok(Some(Value::Number(a))), Expected::Value(Some(Value::Number(e)))) => {
            (a - e).abs() < 1e-9
        },
        (Ok(actual), Expected::Value(expected)) => actual == expected,
        (Err(Error::Parse(_)), Expected::ParseFailure)
        | (Err(Error::Runtime(_)), Expected::RuntimeFailure) => true,
        _ => false,
    }
}

#[test]
fn formula_fixtures_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/formulas").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let mut env = Environment::with_defaults();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(binding) = line.strip_prefix('@') {
                let (name, value) = binding.split_once('=')
                                           .unwrap_or_else(|| panic!("{path:?}:{}: bad binding", i + 1));
                let value = parse_number(value.trim())
                            .unwrap_or_else(|| panic!("{path:?}:{}: bad number", i + 1));
                env.set(name.trim(), value);
                continue;
            }

            let (formula, expected) =
                line.rsplit_once(" => ")
                    .unwrap_or_else(|| panic!("{path:?}:{}: missing ' => '", i + 1));
            let expected = parse_expected(expected.trim());
            let actual = calculate(formula, &mut env);

            count += 1;
            assert!(matches_expected(&actual, &expected),
                    "{path:?}:{}: '{formula}' gave {actual:?}, expected {expected:?}",
                    i + 1);
        }
    }

    assert!(count > 0, "No formulas found in tests/formulas");
}

fn assert_success(formula: &str) -> Option<Value> {
    match calculate(formula, &mut Environment::with_defaults()) {
        Ok(value) => value,
        Err(e) => panic!("Formula '{formula}' failed: {e}"),
    }
}

fn assert_failure(formula: &str) -> Error {
    match calculate(formula, &mut Environment::with_defaults()) {
        Ok(value) => panic!("Formula '{formula}' succeeded with {value:?} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn precedence_and_evaluation() {
    assert_eq!(compile("1+2*3").unwrap().to_string(), "1 2 3 * +");
    assert_eq!(assert_success("1+2*3"), Some(Value::Number(7.0)));
    assert_eq!(assert_success("2^3^2"), Some(Value::Number(512.0)));
    assert_eq!(assert_success("Min(100, Max(0, 42))"), Some(Value::Number(42.0)));
}

#[test]
fn unbalanced_parentheses() {
    assert_eq!(assert_failure("(1+2"),
               Error::Parse(ParseError::UnmatchedParenthesis { position: 0 }));
    assert_eq!(assert_failure("1+2)"),
               Error::Parse(ParseError::UnmatchedParenthesis { position: 3 }));
}

#[test]
fn round_arity() {
    assert_eq!(assert_failure("Round(5)"),
               Error::Parse(ParseError::ArityMismatch { function: "Round",
                                                        expected: 2,
                                                        found:    1,
                                                        position: 7, }));
    assert_eq!(assert_success("Round(5,2)"), Some(Value::Number(5.0)));
}

#[test]
fn lone_operator_lacks_operands() {
    let program: Program = "+".parse().unwrap();
    assert_eq!(evaluate(&program, &Environment::new()).unwrap_err(),
               RuntimeError::InsufficientOperands { symbol:    "+".to_string(),
                                                    required:  2,
                                                    available: 0, });
}

#[test]
fn variables_resolve_or_pass_through() {
    let mut env = Environment::new();
    env.set("x", 5.0);

    let program: Program = "x 2 *".parse().unwrap();
    assert_eq!(evaluate(&program, &env).unwrap().value, Some(Value::Number(10.0)));

    let program: Program = "y".parse().unwrap();
    assert_eq!(evaluate(&program, &env).unwrap().value, Some(Value::Name("y".to_string())));

    let program: Program = "y 2 *".parse().unwrap();
    assert_eq!(evaluate(&program, &env).unwrap_err(),
               RuntimeError::ExpectedNumber { found: "y".to_string() });
}

#[test]
fn evaluation_leaves_environment_untouched() {
    let env = Environment::with_defaults();
    let program = compile("Def(target_value, 20)").unwrap();

    let evaluation = evaluate(&program, &env).unwrap();
    assert_eq!(evaluation.value, None);
    assert_eq!(evaluation.delta.get("target_value"), Some(&Value::Number(20.0)));
    assert!(env.is_null("target_value"));

    let mut env = env;
    env.apply(evaluation.delta);
    assert_eq!(env.get("target_value"), Some(&Value::Number(20.0)));
}

#[test]
fn failed_formula_commits_nothing() {
    let mut env = Environment::new();
    assert!(calculate("Def(a, 1) + 1 / 0", &mut env).is_err());
    assert!(env.is_null("a"));
}

#[test]
fn one_program_many_environments() {
    let program = compile("IF(complete_value < target_value, complete_value, target_value)").unwrap();

    let mut env = Environment::with_defaults();
    env.set("complete_value", 10.0);
    env.set("target_value", 20.0);
    assert_eq!(evaluate(&program, &env).unwrap().value, Some(Value::Number(10.0)));

    env.set("complete_value", 30.0);
    assert_eq!(evaluate(&program, &env).unwrap().value, Some(Value::Number(20.0)));
}

#[test]
fn postfix_text_round_trips_through_evaluation() {
    let program = compile("Round(x / 3, 2) + Max(x, 1)").unwrap();
    let reloaded: Program = program.to_string().parse().unwrap();

    let mut env = Environment::new();
    env.set("x", 10.0);
    assert_eq!(evaluate(&reloaded, &env), evaluate(&program, &env));
}

#[test]
fn keywords_are_plain_identifiers() {
    let mut env = Environment::new();
    assert_eq!(calculate("if = 3", &mut env).unwrap(), None);
    assert_eq!(calculate("then + if", &mut env).unwrap_err(),
               Error::Runtime(RuntimeError::ExpectedNumber { found: "then".to_string() }));
}

#[test]
fn function_names_are_case_sensitive() {
    assert_eq!(assert_success("OR(0, 2 > 1)"), Some(Value::Bool(true)));
    assert_eq!(assert_failure("Or(0, 1)"),
               Error::Parse(ParseError::NotAFunction { name:     "Or".to_string(),
                                                       position: 0, }));
}

#[test]
fn commas_belong_to_calls() {
    assert_eq!(assert_failure("(1, 2)"),
               Error::Parse(ParseError::UnmatchedDelimiter { position: 2 }));
}
