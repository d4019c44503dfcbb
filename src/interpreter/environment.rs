use std::collections::HashMap;

use log::debug;

use crate::interpreter::value::core::Value;

/// Domain variables every default environment declares.
///
/// They start out null; `IsNull` reports them as such until a caller or a
/// formula gives them a value.
pub const DOMAIN_VARIABLES: &[&str] = &["complete_value", "target_value", "min_value", "max_value"];

/// The flat variable mapping a formula is evaluated against.
///
/// A name can be absent, declared but null, or bound to a value. Evaluation
/// only reads an environment; bindings made by `=` and `Def` come back as an
/// [`EnvironmentDelta`] that the caller commits with [`Environment::apply`].
///
/// Evaluations never share mutable state, so independent formulas can be
/// evaluated against one environment at the same time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Option<Value>>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment with every name of [`DOMAIN_VARIABLES`]
    /// declared and null.
    ///
    /// # Example
    /// ```
    /// use yardcalc::interpreter::environment::Environment;
    ///
    /// let env = Environment::with_defaults();
    /// assert!(env.is_declared("target_value"));
    /// assert!(env.is_null("target_value"));
    /// ```
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut env = Self::new();
        for name in DOMAIN_VARIABLES {
            env.declare(name);
        }
        env
    }

    /// Declares `name` without a value. An existing binding is kept.
    pub fn declare(&mut self, name: &str) {
        self.variables.entry(name.to_string()).or_insert(None);
    }

    /// Binds `name` to `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), Some(value.into()));
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// A name is null when it is absent or declared without a value.
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        self.get(name).is_none()
    }

    /// Commits the bindings of an evaluation, in order.
    pub fn apply(&mut self, delta: EnvironmentDelta) {
        for (name, value) in delta {
            debug!("binding {name} = {value}");
            self.set(name, value);
        }
    }
}

/// Bindings made by one evaluation, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentDelta {
    bindings: Vec<(String, Value)>,
}

impl EnvironmentDelta {
    pub fn bind(&mut self, name: String, value: Value) {
        self.bindings.push((name, value));
    }

    /// Returns the latest value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for EnvironmentDelta {
    type IntoIter = std::vec::IntoIter<(String, Value)>;
    type Item = (String, Value);

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_keeps_existing_binding() {
        let mut env = Environment::new();
        env.set("x", 5.0);
        env.declare("x");
        assert_eq!(env.get("x"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn absent_and_declared_names_are_null() {
        let env = Environment::with_defaults();
        assert!(env.is_null("min_value"));
        assert!(env.is_null("never_declared"));
        assert!(!env.is_declared("never_declared"));
    }

    #[test]
    fn later_bindings_win() {
        let mut delta = EnvironmentDelta::default();
        delta.bind("a".to_string(), Value::Number(1.0));
        delta.bind("a".to_string(), Value::Number(2.0));
        assert_eq!(delta.get("a"), Some(&Value::Number(2.0)));
        assert_eq!(delta.len(), 2);

        let mut env = Environment::new();
        env.apply(delta);
        assert_eq!(env.get("a"), Some(&Value::Number(2.0)));
    }
}
