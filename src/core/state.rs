//! State and token contracts.
//!
//! The engine only ever compares states and tokens for equality and
//! formats them for diagnostics, so both contracts are blanket traits over
//! ordinary Rust values: symbols, enums, integers and characters all work
//! without any extra impls.

use std::fmt::Debug;

/// Trait for automaton states.
///
/// A state is an opaque, comparable value. Lookup in a transition table is
/// a linear scan using `PartialEq`, so neither `Hash` nor `Ord` is needed.
///
/// # Required Traits
///
/// - `Clone`: the current state is copied into errors and transcripts
/// - `PartialEq`: table lookup and transition resolution
/// - `Debug`: diagnostics
///
/// # Example
///
/// ```rust
/// use mealy::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Phase {
///     Start,
///     End,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&Phase::Start);
/// assert_state(&"start");
/// ```
pub trait State: Clone + PartialEq + Debug {}

impl<T: Clone + PartialEq + Debug> State for T {}

/// Trait for input tokens.
///
/// Tokens are read from the input one at a time and never mutated. Exact
/// matchers compare tokens by value, so `PartialEq` is the equality
/// contract for every token type.
pub trait Token: Clone + PartialEq + Debug {}

impl<T: Clone + PartialEq + Debug> Token for T {}
