//! Core State trait for state machine states.
//!
//! A state is an opaque, cheaply copyable symbol drawn from a closed domain.
//! Actors usually describe their domain with a plain enum and derive the
//! trait through [`state_enum!`](crate::state_enum).

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Copy`: states are threaded through registries and the child stack by value
/// - `Eq` + `Hash`: states key the transition table and every registry
/// - `Debug`: states appear in diagnostics
///
/// There is no reserved "any" member. Wildcard registrations are expressed
/// as `Option<S>` by the machine, so every value of the domain is a real state.
///
/// # Example
///
/// ```rust
/// use actor_fsm::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum DoorState {
///     Closed,
///     Opening,
///     Open,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Opening => "Opening",
///             Self::Open => "Open",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::Opening.name(), "Opening");
/// ```
pub trait State: Copy + Eq + Hash + Debug + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Render an optional registry endpoint, where `None` stands for any state.
pub(crate) fn endpoint_name<S: State>(endpoint: Option<S>) -> String {
    match endpoint {
        Some(state) => state.name().to_string(),
        None => "Any".to_string(),
    }
}
