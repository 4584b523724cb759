//! Builder API for declaring transition tables.
//!
//! This module replaces class-level rule registration with explicit
//! builders that accumulate rules into a [`Table`](crate::engine::Table)
//! value, returned once the declaration is complete.

pub mod error;
pub mod table;
pub mod transition;

pub use error::{BuildError, MalformedTable};
pub use table::TableBuilder;
pub use transition::{Transition, TransitionBuilder};

use crate::core::{Matcher, State, Token};

/// Create a transition without an action.
///
/// # Example
///
/// ```
/// use mealy::builder::transition;
/// use mealy::core::Matcher;
///
/// let to_end = transition::<_, _, (), (), std::convert::Infallible>("start", "end", Matcher::exact(0));
///
/// assert!(to_end.can_fire(&"start", &0));
/// assert!(!to_end.can_fire(&"start", &1));
/// ```
pub fn transition<S, T, U, O, E>(from: S, to: S, matcher: Matcher<T>) -> Transition<S, T, U, O, E>
where
    S: State,
    T: Token,
{
    Transition {
        from: vec![from],
        to,
        matcher,
        action: None,
    }
}

/// Create a self-loop without an action.
///
/// A wildcard self-loop lets a state absorb the rest of the input instead
/// of failing on it.
///
/// # Example
///
/// ```
/// use mealy::builder::read;
/// use mealy::core::Matcher;
///
/// let absorb = read::<_, char, (), (), std::convert::Infallible>("error", Matcher::any());
///
/// assert!(absorb.is_self_loop());
/// assert!(absorb.can_fire(&"error", &'x'));
/// ```
pub fn read<S, T, U, O, E>(state: S, matcher: Matcher<T>) -> Transition<S, T, U, O, E>
where
    S: State,
    T: Token,
{
    transition(state.clone(), state, matcher)
}
