//! Transition tables.

use crate::core::{Matcher, State, Token};
use crate::engine::emit::Emitter;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

/// Action run at the initial state or once the input is exhausted.
pub type Hook<U, O, E> = Arc<dyn Fn(&mut U, &mut Emitter<O>) -> Result<(), E> + Send + Sync>;

/// Action run when a rule accepts a token.
pub type Action<S, T, U, O, E> =
    Arc<dyn Fn(&mut U, &mut Emitter<O>, Step<'_, S, T>) -> Result<(), E> + Send + Sync>;

/// The token, origin and destination of the transition being taken.
#[derive(Debug)]
pub struct Step<'a, S, T> {
    pub token: &'a T,
    pub from: &'a S,
    pub to: &'a S,
}

impl<S, T> Clone for Step<'_, S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Step<'_, S, T> {}

/// One transition out of a state.
pub struct Rule<S, T, U, O = (), E = Infallible> {
    pub matcher: Matcher<T>,
    pub to: S,
    pub action: Option<Action<S, T, U, O, E>>,
}

impl<S, T: Token, U, O, E> Rule<S, T, U, O, E> {
    /// Whether this rule applies to `token`.
    pub fn accepts(&self, token: &T) -> bool {
        self.matcher.accepts(token)
    }
}

impl<S: Clone, T: Clone, U, O, E> Clone for Rule<S, T, U, O, E> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            to: self.to.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: fmt::Debug, T: fmt::Debug, U, O, E> fmt::Debug for Rule<S, T, U, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("matcher", &self.matcher)
            .field("to", &self.to)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// Immutable transition table of a Mealy machine.
///
/// Maps each state to its ordered rule list, plus the initial state with
/// its optional action and an optional finish action. Tables are built
/// with [`TableBuilder`](crate::builder::TableBuilder) and never change
/// afterwards, so any number of runs can share one table.
pub struct Table<S, T, U, O = (), E = Infallible> {
    initial: S,
    on_start: Option<Hook<U, O, E>>,
    on_finish: Option<Hook<U, O, E>>,
    rules: Vec<(S, Vec<Rule<S, T, U, O, E>>)>,
}

impl<S: State, T: Token, U, O, E> Table<S, T, U, O, E> {
    pub(crate) fn new(
        initial: S,
        on_start: Option<Hook<U, O, E>>,
        on_finish: Option<Hook<U, O, E>>,
    ) -> Self {
        Self {
            initial,
            on_start,
            on_finish,
            rules: Vec::new(),
        }
    }

    /// Append a rule after every rule already declared for `from`.
    pub(crate) fn push_rule(&mut self, from: S, rule: Rule<S, T, U, O, E>) {
        match self.rules.iter_mut().find(|(state, _)| *state == from) {
            Some((_, rules)) => rules.push(rule),
            None => self.rules.push((from, vec![rule])),
        }
    }

    /// Rules declared for `state`, in declaration order.
    ///
    /// Empty for states without rules; those states accept no tokens.
    pub fn rules_for(&self, state: &S) -> &[Rule<S, T, U, O, E>] {
        self.rules
            .iter()
            .find(|(candidate, _)| candidate == state)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    /// First rule of `state` that accepts `token`.
    pub fn resolve(&self, state: &S, token: &T) -> Option<&Rule<S, T, U, O, E>> {
        self.rules_for(state).iter().find(|rule| rule.accepts(token))
    }

    /// The initial state and its action.
    pub fn initial(&self) -> (&S, Option<&Hook<U, O, E>>) {
        (&self.initial, self.on_start.as_ref())
    }

    pub fn finish_action(&self) -> Option<&Hook<U, O, E>> {
        self.on_finish.as_ref()
    }

    /// States that have at least one rule, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.rules.iter().map(|(state, _)| state)
    }

    /// Total number of rules across all states.
    pub fn rule_count(&self) -> usize {
        self.rules.iter().map(|(_, rules)| rules.len()).sum()
    }
}

impl<S: fmt::Debug, T: fmt::Debug, U, O, E> fmt::Debug for Table<S, T, U, O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("initial", &self.initial)
            .field("on_start", &self.on_start.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .field("rules", &self.rules)
            .finish()
    }
}
