//! Trigger conditions.
//!
//! Layered bottom-up:
//! - symbolic categories (`Input`, `Motion`) mapped onto atomic identifiers
//! - the Required/Optional/Composite algebra over a category
//! - boolean operators (`And`, `Or`, `Not`) over any [`Condition`]
//!
//! Everything here is evaluated against a [`TriggerContext`] that the state
//! machine assembles once per tick.

mod category;
mod context;
mod guard;
mod input;
mod motion;
mod operator;
mod wrapper;

pub use category::Category;
pub use context::{BoxedCondition, Condition, Observable, TriggerContext};
pub use guard::Guard;
pub use input::{Input, InputAction};
pub use motion::{baseline, is_moving, Direction, GravityType, Motion, Positioning};
pub use operator::{Always, And, ConditionExt, Not, Or};
pub use wrapper::{Composite, Compose, Optional, Required};
