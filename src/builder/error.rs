//! Build errors for transition tables and transitions.

use thiserror::Error;

/// Errors that can occur when declaring transition tables and transitions.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state declared twice: {first} and {second}")]
    DuplicateInitialState { first: String, second: String },

    #[error("Finish action declared more than once")]
    DuplicateFinishAction,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,
}

/// Every problem found while validating a table declaration.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("malformed transition table: {}", join(.errors))]
pub struct MalformedTable {
    pub errors: Vec<BuildError>,
}

impl From<BuildError> for MalformedTable {
    fn from(error: BuildError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

fn join(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
