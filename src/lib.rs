//! actor-fsm: hierarchical state machines for game actors
//!
//! A machine is driven once per simulation tick. Each tick it runs the
//! current state's frame action, evaluates the triggers registered for the
//! current state, and follows the single transition they agree on.
//!
//! # Core Concepts
//!
//! - **State**: any `Copy + Eq + Hash` symbol, usually declared with [`state_enum!`]
//! - **Transition table**: which moves are legal; push needs both directions
//! - **Transitions**: one-way `to`, reversible `push`, and `pop` back
//! - **Triggers**: [`conditions`] over input, motion, positioning, or closures
//! - **Diagnostics**: invalid runtime requests warn instead of failing
//!
//! # Example
//!
//! ```rust
//! use actor_fsm::conditions::{Input, InputAction, Optional, Positioning, Required};
//! use actor_fsm::machine::{FrameAction, TransitionActions};
//! use actor_fsm::{state_enum, GravityType, StateMachineBuilder};
//! use glam::Vec2;
//!
//! state_enum! {
//!     enum Player { Idle, Running, Jumping }
//! }
//!
//! let mut player = StateMachineBuilder::new()
//!     .transition(Player::Idle, [Player::Running, Player::Jumping])
//!     .transition(Player::Running, [Player::Idle, Player::Jumping])
//!     .transition(Player::Jumping, [Player::Idle])
//!     .frame_action(Player::Jumping, GravityType::AfterApplied, FrameAction::new())
//!     .initial(Player::Idle)
//!     .build()
//!     .unwrap();
//!
//! player.add_trigger(Player::Idle, Player::Running, Required::new([Input::Right]));
//! player.add_trigger(Player::Running, Player::Idle, Optional::<Input>::new([]));
//! player.on_transition(
//!     Player::Idle,
//!     Player::Running,
//!     TransitionActions::velocity(|v| Vec2::new(120.0, v.y)),
//! );
//!
//! let right = |action: InputAction| action == InputAction::MoveRight;
//! let velocity = player.update(Some(Positioning::Ground), Some(&right), Some(Vec2::ZERO), 0.016);
//!
//! assert!(player.is(Player::Running));
//! assert_eq!(velocity, Some(Vec2::new(120.0, 0.0)));
//! ```

pub mod builder;
pub mod conditions;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use conditions::{Condition, GravityType, Positioning, TriggerContext};
pub use config::MachineConfig;
pub use core::{State, TransitionHistory, TransitionKind, TransitionTable};
pub use diagnostics::{DiagnosticSink, LogLevel, RecordingSink, TracingSink};
pub use machine::{FrameAction, ResetMode, StateMachine, TransitionActions};
