//! Stylesheet variable bindings.
//!
//! Variables are declared at the top level of a stylesheet:
//!
//! ```css
//! $accent: #3d7eff;
//! $gutter: px(4);
//!
//! QPushButton {
//!     background-color: $accent;
//! }
//! ```
//!
//! Bindings are scoped to the whole document, so a rule may reference a
//! variable declared after it. A later binding with the same name replaces
//! an earlier one.
//!
//! A declaration value is substituted only when the *whole* value is a
//! `$name` reference, and only once: a bound value that is itself `$other`
//! stays as that literal text.

use std::collections::HashMap;

/// Storage for stylesheet-defined variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableBindings {
    variables: HashMap<String, String>,
}

impl VariableBindings {
    /// Creates an empty variable storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a variable with the given name and raw value text.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Resolves a variable name (without the `$`) to its raw value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Substitutes a `$name` value with its binding, if one exists.
    ///
    /// Anything else, including a reference to an unbound name, is returned
    /// unchanged.
    pub fn substitute<'a>(&'a self, value: &'a str) -> &'a str {
        value
            .strip_prefix('$')
            .and_then(|name| self.resolve(name))
            .unwrap_or(value)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Parses a raw `name: value` statement (the text between `$` and `;`)
    /// and records it. Returns false when the statement has no `:`.
    pub fn define_statement(&mut self, statement: &str) -> bool {
        match statement.split_once(':') {
            Some((name, value)) => {
                self.define(name.trim(), value.trim());
                true
            }
            None => false,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableBindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.define(name, value);
        }
        vars
    }
}
