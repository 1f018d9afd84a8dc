//! The runtime: the state machine and the callbacks it drives.

mod actions;
#[allow(clippy::module_inception)]
mod machine;
mod registry;

pub use actions::{FrameAction, TransitionActions};
pub use machine::{ResetMode, StateMachine};
