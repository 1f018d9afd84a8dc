//! Core state machine types.
//!
//! This module contains the data the machine is built from:
//! - State definitions via the `State` trait
//! - The immutable transition table
//! - Bounded transition history
//!
//! Nothing here runs callbacks or emits diagnostics; that is the job of
//! [`crate::machine`].

mod history;
pub(crate) mod state;
mod table;

pub use history::{TransitionHistory, TransitionKind, TransitionRecord};
pub use state::State;
pub use table::TransitionTable;
