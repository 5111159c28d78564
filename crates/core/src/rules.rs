//! First-match-wins rule cascades.
//!
//! A [`Cascade`] is an ordered list of `(id, predicate, outcome)` rules plus a fallback. It is
//! evaluated top to bottom and the first rule whose predicate holds decides the outcome; later
//! rules are never consulted. Precedence is therefore the position in the list, which can be
//! inspected with [`Cascade::rule_ids`] and changed with [`Cascade::insert`] without touching
//! any predicate.

use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A single guard: a named predicate and the outcome it selects.
pub struct Rule<T, O> {
    id: &'static str,
    predicate: Predicate<T>,
    outcome: O,
}

impl<T, O> Rule<T, O> {
    pub fn new(
        id: &'static str,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        outcome: O,
    ) -> Self {
        Self {
            id,
            predicate: Box::new(predicate),
            outcome,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn outcome(&self) -> &O {
        &self.outcome
    }

    /// Evaluates this rule's predicate in isolation.
    pub fn matches(&self, input: &T) -> bool {
        (self.predicate)(input)
    }
}

impl<T, O: fmt::Debug> fmt::Debug for Rule<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

/// The rule (or fallback) selected by [`Cascade::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a, O> {
    pub rule_id: &'static str,
    pub outcome: &'a O,
    /// `None` when the fallback was taken.
    pub position: Option<usize>,
}

/// Ordered guard list evaluated first-match-wins.
pub struct Cascade<T, O> {
    rules: Vec<Rule<T, O>>,
    fallback_id: &'static str,
    fallback: O,
}

impl<T, O> Cascade<T, O> {
    /// Creates an empty cascade that always yields `fallback`.
    pub fn new(fallback_id: &'static str, fallback: O) -> Self {
        Self {
            rules: Vec::new(),
            fallback_id,
            fallback,
        }
    }

    /// Appends a rule at the lowest precedence (just above the fallback).
    pub fn with_rule(mut self, rule: Rule<T, O>) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: Rule<T, O>) {
        self.rules.push(rule);
    }

    /// Inserts a rule at `index`, shifting later rules down in precedence.
    ///
    /// An index past the end appends.
    pub fn insert(&mut self, index: usize, rule: Rule<T, O>) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    /// Removes the rule with the given id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Rule<T, O>> {
        let index = self.position(id)?;
        Some(self.rules.remove(index))
    }

    /// Precedence of the rule with the given id (0 is evaluated first).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id == id)
    }

    pub fn rule(&self, id: &str) -> Option<&Rule<T, O>> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Rule ids in evaluation order, fallback last.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|rule| rule.id)
            .chain(std::iter::once(self.fallback_id))
            .collect()
    }

    /// Number of guards, not counting the fallback.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the first rule whose predicate holds, or the fallback.
    pub fn evaluate(&self, input: &T) -> Match<'_, O> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(input))
            .map(|(position, rule)| Match {
                rule_id: rule.id,
                outcome: &rule.outcome,
                position: Some(position),
            })
            .unwrap_or(Match {
                rule_id: self.fallback_id,
                outcome: &self.fallback,
                position: None,
            })
    }
}

impl<T, O: fmt::Debug> fmt::Debug for Cascade<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cascade")
            .field("rules", &self.rules)
            .field("fallback_id", &self.fallback_id)
            .field("fallback", &self.fallback)
            .finish()
    }
}
