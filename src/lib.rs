//! Mealy: a deterministic Mealy machine execution engine
//!
//! A Mealy machine reads tokens one at a time; each accepted token moves it
//! from one state to another and may run an action that updates a shared
//! user state and emits output values.
//!
//! # Core Concepts
//!
//! - **Matchers**: exact value, wildcard, or predicate over a token
//! - **Tables**: per-state ordered rules, where the first accepting rule wins
//! - **Runs**: one walk of an input through a table, owning its user state
//! - **Emissions**: values actions hand to their [`Emitter`], collected per run
//!
//! # Example
//!
//! ```rust
//! use mealy::{TableBuilder, UnmatchedToken};
//!
//! #[derive(Debug, Default)]
//! struct Tally {
//!     ones: u32,
//! }
//!
//! let table = TableBuilder::<&str, u8, Tally, u32>::new()
//!     .initial("start")
//!     .with_transition(|t| {
//!         t.read("start").on(1).action(|tally, _, _| {
//!             tally.ones += 1;
//!             Ok(())
//!         })
//!     })
//!     .unwrap()
//!     .with_transition(|t| t.from("start").to("end").on(0))
//!     .unwrap()
//!     .finish(|tally, out| {
//!         out.emit(tally.ones);
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let finished = table.run(Tally::default(), [1, 1, 1, 1, 0]).unwrap();
//! assert_eq!(finished.user.ones, 4);
//! assert_eq!(finished.state, "end");
//!
//! assert_eq!(table.run_emitting(Tally::default(), [1, 0]).unwrap(), vec![1]);
//!
//! let err = table.run(Tally::default(), [2]).unwrap_err();
//! assert_eq!(err.unmatched(), Some(&UnmatchedToken { state: "start", token: 2 }));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, MalformedTable, TableBuilder, TransitionBuilder};
pub use config::{Emission, RunConfig};
pub use core::{Matcher, Predicate, State, Token, Transcript, TranscriptEntry};
pub use engine::{
    emissions, run, run_emitting, run_with, Emissions, Emitter, Finished, RunError, Runner, Step,
    Table, UnmatchedToken,
};
