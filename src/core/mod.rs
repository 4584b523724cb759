//! Core automaton vocabulary.
//!
//! This module contains the pieces every transition table is made of:
//! - State and token contracts via the `State` and `Token` traits
//! - Matchers deciding whether a rule accepts a token
//! - Transcripts recording the transitions a run took
//!
//! Nothing in this module runs user code except predicate matchers.

mod matcher;
mod state;
mod transcript;

pub use matcher::{Matcher, Predicate};
pub use state::{State, Token};
pub use transcript::{Transcript, TranscriptEntry};
