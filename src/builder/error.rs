//! Configuration errors raised while setting up a state machine.

use thiserror::Error;

/// Errors that can occur when building state machines.
///
/// These are the only fatal failures in the crate. Anything that goes wrong
/// once the machine is running is reported through diagnostics instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' has no entry in the transition table")]
    InitialStateNotInTable { state: String },

    #[error("Frame action for state '{state}' is already registered")]
    DuplicateFrameAction { state: String },

    #[error("Invalid machine configuration: {0}")]
    Config(String),

    #[error("Invalid state machine: {}", join(.0))]
    Invalid(Vec<BuildError>),
}

fn join(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl BuildError {
    /// The individual errors, flattening an accumulated `Invalid`.
    pub fn errors(&self) -> Vec<&BuildError> {
        match self {
            BuildError::Invalid(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
            other => vec![other],
        }
    }
}
