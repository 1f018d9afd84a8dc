//! Context provided to trigger conditions each tick.

use super::category::Category;
use super::input::{Input, InputAction};
use super::motion::{self, Direction, GravityType, Motion, Positioning};
use glam::Vec2;

/// Everything a trigger may look at when deciding whether to fire.
///
/// Built by the machine once per `update`, after the current state's frame
/// action ran, so `velocity` already reflects that frame's callbacks and
/// `gravity` is the current state's gravity mode.
#[derive(Clone, Copy)]
pub struct TriggerContext<'a> {
    pub positioning: Option<Positioning>,
    pub input: Option<&'a dyn Fn(InputAction) -> bool>,
    pub velocity: Option<Vec2>,
    pub gravity: GravityType,
    pub gravity_bias: f32,
    pub epsilon: f32,
}

impl<'a> TriggerContext<'a> {
    /// A context with nothing observed and gravity disabled.
    pub fn empty() -> Self {
        Self {
            positioning: None,
            input: None,
            velocity: None,
            gravity: GravityType::None,
            gravity_bias: 0.0,
            epsilon: f32::EPSILON,
        }
    }

    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = Some(positioning);
        self
    }

    pub fn with_input(mut self, input: &'a dyn Fn(InputAction) -> bool) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_gravity(mut self, gravity: GravityType, bias: f32) -> Self {
        self.gravity = gravity;
        self.gravity_bias = bias;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Whether an input action is held. No input function means nothing is.
    pub fn is_pressed(&self, action: InputAction) -> bool {
        self.input.is_some_and(|input| input(action))
    }

    /// Whether the body is moving in `direction`.
    pub fn is_moving(&self, direction: Direction) -> bool {
        motion::is_moving(
            direction,
            self.velocity,
            self.gravity,
            self.positioning,
            self.gravity_bias,
            self.epsilon,
        )
    }
}

impl std::fmt::Debug for TriggerContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerContext")
            .field("positioning", &self.positioning)
            .field("input", &self.input.map(|_| "fn"))
            .field("velocity", &self.velocity)
            .field("gravity", &self.gravity)
            .field("gravity_bias", &self.gravity_bias)
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

/// A boolean condition a trigger evaluates each tick.
pub trait Condition {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool;
}

pub type BoxedCondition = Box<dyn Condition>;

/// A category whose atoms can be observed in a [`TriggerContext`].
pub trait Observable: Category {
    fn observe(ctx: &TriggerContext<'_>, atom: Self::Atom) -> bool;

    /// Category-level activity of `value` under `ctx`.
    fn is_active_in(self, ctx: &TriggerContext<'_>) -> bool {
        self.is_active(&|atom| Self::observe(ctx, atom))
    }
}

impl Observable for Input {
    fn observe(ctx: &TriggerContext<'_>, atom: InputAction) -> bool {
        ctx.is_pressed(atom)
    }
}

impl Observable for Motion {
    fn observe(ctx: &TriggerContext<'_>, atom: Direction) -> bool {
        ctx.is_moving(atom)
    }
}

impl Condition for Positioning {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        ctx.positioning == Some(*self)
    }
}

impl Condition for Input {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.is_active_in(ctx)
    }
}

impl Condition for Motion {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.is_active_in(ctx)
    }
}

impl<C: Condition + ?Sized> Condition for Box<C> {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        (**self).evaluate(ctx)
    }
}
