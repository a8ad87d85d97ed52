//! The result of parsing a navigation script.
use serde_json::Value;

/// A single `var NAME = <literal>;` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Value,
}

/// All bindings of a script, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    bindings: Vec<Binding>,
}

impl Script {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    /// Looks up a binding by variable name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| &b.value)
    }

    /// Removes a binding and returns its value, avoiding a clone of large tables.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let pos = self.bindings.iter().position(|b| b.name == name)?;
        Some(self.bindings.remove(pos).value)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
