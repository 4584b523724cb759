//! Token matchers.
//!
//! A matcher decides whether a rule applies to an incoming token. Rules for
//! a state are tried in declaration order and the first accepting matcher
//! wins, so the wildcard belongs at the end of a state's rule list.

use super::state::Token;
use std::fmt;
use std::sync::Arc;

/// User-supplied predicate over a token.
///
/// Predicates should be pure. The engine does not enforce this; a
/// predicate with side effects is the caller's responsibility.
///
/// # Example
///
/// ```rust
/// use mealy::core::Predicate;
///
/// let digit = Predicate::new(|c: &char| c.is_ascii_digit());
///
/// assert!(digit.check(&'7'));
/// assert!(!digit.check(&'.'));
/// ```
pub struct Predicate<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    /// Create a predicate from a closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Predicate {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate against a token.
    pub fn check(&self, token: &T) -> bool {
        (self.predicate)(token)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Decides whether a rule accepts a token.
///
/// # Example
///
/// ```rust
/// use mealy::core::Matcher;
///
/// let one = Matcher::exact(1);
/// let anything: Matcher<i32> = Matcher::any();
/// let even = Matcher::predicate(|n: &i32| n % 2 == 0);
///
/// assert!(one.accepts(&1));
/// assert!(!one.accepts(&2));
/// assert!(anything.accepts(&42));
/// assert!(even.accepts(&4));
/// ```
#[derive(Clone, Debug)]
pub enum Matcher<T> {
    /// Accepts a token equal to the stored value.
    Exact(T),

    /// Accepts every token.
    Any,

    /// Delegates to a user predicate.
    Predicate(Predicate<T>),
}

impl<T: Token> Matcher<T> {
    /// Matcher accepting tokens equal to `value`.
    pub fn exact(value: T) -> Self {
        Matcher::Exact(value)
    }

    /// Wildcard matcher.
    pub fn any() -> Self {
        Matcher::Any
    }

    /// Matcher backed by a closure.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Matcher::Predicate(Predicate::new(predicate))
    }

    /// Whether this matcher accepts `token`.
    pub fn accepts(&self, token: &T) -> bool {
        match self {
            Matcher::Exact(value) => value == token,
            Matcher::Any => true,
            Matcher::Predicate(predicate) => predicate.check(token),
        }
    }

    /// Whether this is the wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Matcher::Any)
    }
}

impl<T> Default for Matcher<T> {
    fn default() -> Self {
        Matcher::Any
    }
}

impl<T> From<Predicate<T>> for Matcher<T> {
    fn from(predicate: Predicate<T>) -> Self {
        Matcher::Predicate(predicate)
    }
}
