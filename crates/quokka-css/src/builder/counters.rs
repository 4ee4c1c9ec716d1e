//! CSS counters.
//!
//! [§ 12.4 Automatic counters and numbering](https://www.w3.org/TR/CSS2/generate.html#counters)
//!
//! "Counters are 'self-nesting', in the sense that resetting a counter in a
//! descendant element or pseudo-element automatically creates a new
//! instance of the counter."
//!
//! One scope is open per element being built. A reset creates the counter in
//! the innermost scope, so it is visible to the following siblings and
//! their descendants; an increment changes the innermost instance.

use std::collections::HashMap;

use crate::style::ComputedStyle;

/// Counter instances of the elements on the current build path.
#[derive(Debug, Clone, Default)]
pub struct Counters {
    scopes: Vec<HashMap<String, i32>>,
}

impl Counters {
    /// Counters with the scope of the viewport open.
    #[must_use]
    pub fn new() -> Self {
        Counters {
            scopes: vec![HashMap::new()],
        }
    }

    /// Open the scope of an element's children.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Close the innermost scope. The outermost scope is never closed.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            let _ = self.scopes.pop();
        }
    }

    /// Create a new instance of a counter in the innermost scope.
    pub fn reset(&mut self, name: &str, value: i32) {
        if let Some(scope) = self.scopes.last_mut() {
            let _ = scope.insert(name.to_string(), value);
        }
    }

    /// "If 'counter-increment' or 'content' on an element or pseudo-element
    /// refers to a counter that is not in the scope of any 'counter-reset',
    /// implementations should behave as though a 'counter-reset' had reset
    /// the counter to 0 on that element or pseudo-element."
    pub fn increment(&mut self, name: &str, by: i32) {
        if let Some(value) = self.scopes.iter_mut().rev().find_map(|s| s.get_mut(name)) {
            *value += by;
            return;
        }
        self.reset(name, by);
    }

    /// Value of the innermost instance, 0 for an unknown counter.
    #[must_use]
    pub fn value(&self, name: &str) -> i32 {
        self.scopes
            .iter()
            .rev()
            .find_map(|s| s.get(name).copied())
            .unwrap_or(0)
    }

    /// Values of all the instances, outermost first. An unknown counter
    /// yields a single 0.
    #[must_use]
    pub fn values(&self, name: &str) -> Vec<i32> {
        let ret: Vec<i32> = self.scopes.iter().filter_map(|s| s.get(name).copied()).collect();
        if ret.is_empty() { vec![0] } else { ret }
    }

    /// "The 'counter-increment' property accepts one or more names of
    /// counters (identifiers), each one optionally followed by an integer."
    ///
    /// Resets are applied before increments.
    pub fn apply_style(&mut self, style: &ComputedStyle) {
        for (name, value) in &style.counter_reset {
            self.reset(name, *value);
        }
        for (name, by) in &style.counter_increment {
            self.increment(name, *by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_without_reset_starts_at_zero() {
        let mut counters = Counters::new();
        counters.increment("item", 1);
        counters.increment("item", 1);
        assert_eq!(counters.value("item"), 2);
        assert_eq!(counters.value("other"), 0);
    }

    #[test]
    fn test_nested_reset_creates_instance() {
        let mut counters = Counters::new();
        counters.reset("section", 0);
        counters.increment("section", 1);
        counters.push_scope();
        counters.reset("section", 0);
        counters.increment("section", 1);
        counters.increment("section", 1);
        assert_eq!(counters.values("section"), vec![1, 2]);
        counters.pop_scope();
        assert_eq!(counters.values("section"), vec![1]);
    }

    #[test]
    fn test_increment_reaches_outer_instance() {
        let mut counters = Counters::new();
        counters.reset("h", 0);
        counters.push_scope();
        counters.increment("h", 1);
        counters.pop_scope();
        counters.push_scope();
        counters.increment("h", 1);
        counters.pop_scope();
        assert_eq!(counters.value("h"), 2);
    }

    #[test]
    fn test_apply_style_resets_first() {
        let mut counters = Counters::new();
        let style = ComputedStyle {
            counter_reset: vec![("c".to_string(), 5)],
            counter_increment: vec![("c".to_string(), 2)],
            ..ComputedStyle::default()
        };
        counters.apply_style(&style);
        assert_eq!(counters.value("c"), 7);
    }

    #[test]
    fn test_outermost_scope_survives_pop() {
        let mut counters = Counters::new();
        counters.pop_scope();
        counters.reset("x", 3);
        assert_eq!(counters.value("x"), 3);
    }
}
