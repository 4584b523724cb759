//! Mealy machine execution.
//!
//! This module walks input through a transition table:
//! - **Table**: immutable rules per state, plus initial and finish actions
//! - **Runner**: one run's current state and user state, advanced token by token
//! - **Emitter**: per-invocation output channel handed to every action
//!
//! Emitting and non-emitting runs share the same walking logic; the
//! [`Emission`](crate::config::Emission) mode only changes what an
//! [`Emitter`] does with the values it is given.

mod emissions;
mod emit;
mod error;
mod runner;
mod table;

pub use emissions::{emissions, Emissions};
pub use emit::Emitter;
pub use error::{RunError, UnmatchedToken};
pub use runner::{run, run_emitting, run_with, Finished, Runner};
pub use table::{Action, Hook, Rule, Step, Table};
