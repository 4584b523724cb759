//! Errors raised while running a machine.

use thiserror::Error;

/// No rule for the current state accepted the incoming token.
///
/// Carries the offending state and token. Always fatal to the run.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("no transition from state {state:?} on token {token:?}")]
pub struct UnmatchedToken<S, T> {
    pub state: S,
    pub token: T,
}

/// Errors that can end a run.
///
/// `E` is the error type of the user's actions. Action failures are carried
/// as-is in [`RunError::Action`] and never folded into
/// [`RunError::Unmatched`].
#[derive(Debug, Error)]
pub enum RunError<S, T, E> {
    #[error("{0}")]
    Unmatched(UnmatchedToken<S, T>),

    #[error(transparent)]
    Action(E),

    #[error("run was halted by an earlier failure")]
    Halted,
}

impl<S, T, E> RunError<S, T, E> {
    /// Whether the run failed on an unmatched token.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, RunError::Unmatched(_))
    }

    /// The unmatched state and token, if that is why the run failed.
    pub fn unmatched(&self) -> Option<&UnmatchedToken<S, T>> {
        match self {
            RunError::Unmatched(unmatched) => Some(unmatched),
            _ => None,
        }
    }

    /// Recover the action's own error.
    pub fn into_action_error(self) -> Option<E> {
        match self {
            RunError::Action(err) => Some(err),
            _ => None,
        }
    }
}

impl<S, T, E> From<UnmatchedToken<S, T>> for RunError<S, T, E> {
    fn from(unmatched: UnmatchedToken<S, T>) -> Self {
        RunError::Unmatched(unmatched)
    }
}
