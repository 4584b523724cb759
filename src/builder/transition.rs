//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::{Matcher, Predicate, State, Token};
use crate::engine::{Action, Emitter, Rule, Step};
use std::convert::Infallible;
use std::sync::Arc;

/// A declared transition: one rule added to each origin state.
pub struct Transition<S, T, U, O = (), E = Infallible> {
    pub from: Vec<S>,
    pub to: S,
    pub matcher: Matcher<T>,
    pub action: Option<Action<S, T, U, O, E>>,
}

impl<S: State, T: Token, U, O, E> Transition<S, T, U, O, E> {
    /// Whether this transition leaves `state` on `token` (pure).
    pub fn can_fire(&self, state: &S, token: &T) -> bool {
        self.from.contains(state) && self.matcher.accepts(token)
    }

    /// Whether every origin is the target itself.
    pub fn is_self_loop(&self) -> bool {
        self.from.iter().all(|from| *from == self.to)
    }

    /// One rule per origin state, in declaration order.
    pub(crate) fn into_rules(self) -> impl Iterator<Item = (S, Rule<S, T, U, O, E>)> {
        let Transition {
            from,
            to,
            matcher,
            action,
        } = self;
        from.into_iter().map(move |origin| {
            (
                origin,
                Rule {
                    matcher: matcher.clone(),
                    to: to.clone(),
                    action: action.clone(),
                },
            )
        })
    }
}

/// Builder for declaring transitions with a fluent API.
///
/// The matcher defaults to the wildcard, so a transition without `.on(..)`
/// or `.when(..)` accepts every token.
pub struct TransitionBuilder<S, T, U, O = (), E = Infallible> {
    from: Vec<S>,
    to: Option<S>,
    matcher: Matcher<T>,
    action: Option<Action<S, T, U, O, E>>,
}

impl<S: State, T: Token, U, O, E> TransitionBuilder<S, T, U, O, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: Vec::new(),
            to: None,
            matcher: Matcher::Any,
            action: None,
        }
    }

    /// Self-loop: read a token in `state` and stay there.
    pub fn read(self, state: S) -> Self {
        self.from(state.clone()).to(state)
    }

    /// Add a source state (at least one is required).
    ///
    /// May be called repeatedly; the transition is declared for each
    /// source in the order given.
    pub fn from(mut self, state: S) -> Self {
        self.from.push(state);
        self
    }

    /// Add several source states at once.
    pub fn from_each<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.from.extend(states);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Match tokens equal to `token`.
    pub fn on(mut self, token: T) -> Self {
        self.matcher = Matcher::Exact(token);
        self
    }

    /// Match every token.
    pub fn on_any(mut self) -> Self {
        self.matcher = Matcher::Any;
        self
    }

    /// Match tokens accepted by a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.matcher = Matcher::Predicate(Predicate::new(predicate));
        self
    }

    /// Use an already built matcher.
    pub fn matcher(mut self, matcher: Matcher<T>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Set the action run when the transition fires (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut U, &mut Emitter<O>, Step<'_, S, T>) -> Result<(), E> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, T, U, O, E>, BuildError> {
        if self.from.is_empty() {
            return Err(BuildError::MissingFromState);
        }
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            from: self.from,
            to,
            matcher: self.matcher,
            action: self.action,
        })
    }
}

impl<S: State, T: Token, U, O, E> Default for TransitionBuilder<S, T, U, O, E> {
    fn default() -> Self {
        Self::new()
    }
}
