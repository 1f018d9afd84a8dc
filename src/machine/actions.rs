//! Callbacks run on transitions and on every tick.
//!
//! Both kinds pair an optional velocity callback with an optional plain one.
//! Velocity is threaded by value as `Option<Vec2>`: the velocity callback
//! receives it and returns the replacement, and is skipped entirely when the
//! caller supplied no velocity. The plain callback always runs after it.

use crate::conditions::GravityType;
use glam::Vec2;

type VelocityCallback = Box<dyn FnMut(Vec2) -> Vec2>;
type Callback = Box<dyn FnMut()>;
type FrameVelocityCallback = Box<dyn FnMut(Vec2, f32) -> Vec2>;
type FrameCallback = Box<dyn FnMut(f32)>;

/// Callbacks run when a transition is executed.
///
/// ```rust
/// use actor_fsm::machine::TransitionActions;
/// use glam::Vec2;
///
/// let jump = TransitionActions::velocity(|v| Vec2::new(v.x, -300.0))
///     .and_run(|| println!("play jump sound"));
/// ```
#[derive(Default)]
pub struct TransitionActions {
    velocity: Option<VelocityCallback>,
    action: Option<Callback>,
}

impl TransitionActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only a plain callback.
    pub fn run<F: FnMut() + 'static>(action: F) -> Self {
        Self::new().and_run(action)
    }

    /// Only a velocity callback.
    pub fn velocity<F: FnMut(Vec2) -> Vec2 + 'static>(velocity: F) -> Self {
        Self::new().and_velocity(velocity)
    }

    pub fn and_run<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn and_velocity<F: FnMut(Vec2) -> Vec2 + 'static>(mut self, velocity: F) -> Self {
        self.velocity = Some(Box::new(velocity));
        self
    }

    pub(crate) fn execute(&mut self, velocity: Option<Vec2>) -> Option<Vec2> {
        let velocity = match (self.velocity.as_mut(), velocity) {
            (Some(callback), Some(v)) => Some(callback(v)),
            (_, v) => v,
        };
        if let Some(action) = self.action.as_mut() {
            action();
        }
        velocity
    }
}

/// Callbacks run every tick while their state is current.
///
/// Both callbacks receive the frame delta.
#[derive(Default)]
pub struct FrameAction {
    velocity: Option<FrameVelocityCallback>,
    action: Option<FrameCallback>,
}

impl FrameAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run<F: FnMut(f32) + 'static>(action: F) -> Self {
        Self::new().and_run(action)
    }

    pub fn velocity<F: FnMut(Vec2, f32) -> Vec2 + 'static>(velocity: F) -> Self {
        Self::new().and_velocity(velocity)
    }

    pub fn and_run<F: FnMut(f32) + 'static>(mut self, action: F) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn and_velocity<F: FnMut(Vec2, f32) -> Vec2 + 'static>(mut self, velocity: F) -> Self {
        self.velocity = Some(Box::new(velocity));
        self
    }

    /// Gravity before → velocity callback → plain callback → gravity after.
    pub(crate) fn execute(
        &mut self,
        gravity: GravityType,
        bias: f32,
        velocity: Option<Vec2>,
        delta: f32,
    ) -> Option<Vec2> {
        let velocity = gravity.apply(GravityType::BeforeApplied, velocity, bias);
        let velocity = match (self.velocity.as_mut(), velocity) {
            (Some(callback), Some(v)) => Some(callback(v, delta)),
            (_, v) => v,
        };
        if let Some(action) = self.action.as_mut() {
            action(delta);
        }
        gravity.apply(GravityType::AfterApplied, velocity, bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn transition_velocity_callback_replaces_velocity() {
        let mut actions = TransitionActions::velocity(|v| v * 2.0);

        assert_eq!(actions.execute(Some(Vec2::new(1.0, 3.0))), Some(Vec2::new(2.0, 6.0)));
    }

    #[test]
    fn transition_velocity_callback_skipped_without_velocity() {
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        let mut actions = TransitionActions::velocity(move |v| {
            flag.set(true);
            v
        });

        assert_eq!(actions.execute(None), None);
        assert!(!called.get());
    }

    #[test]
    fn transition_plain_callback_runs_after_velocity() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (first, second) = (Rc::clone(&order), Rc::clone(&order));
        let mut actions = TransitionActions::velocity(move |v| {
            first.borrow_mut().push("velocity");
            v
        })
        .and_run(move || second.borrow_mut().push("action"));

        actions.execute(Some(Vec2::ZERO));
        actions.execute(None);

        assert_eq!(*order.borrow(), vec!["velocity", "action", "action"]);
    }

    #[test]
    fn frame_gravity_before_is_seen_by_callback() {
        let seen = Rc::new(Cell::new(Vec2::ZERO));
        let sink = Rc::clone(&seen);
        let mut frame = FrameAction::velocity(move |v, _| {
            sink.set(v);
            v
        });

        let result = frame.execute(GravityType::BeforeApplied, 20.0, Some(Vec2::ZERO), 0.016);

        assert_eq!(seen.get(), Vec2::new(0.0, 20.0));
        assert_eq!(result, Some(Vec2::new(0.0, 20.0)));
    }

    #[test]
    fn frame_gravity_after_is_added_to_callback_result() {
        let seen = Rc::new(Cell::new(Vec2::ONE));
        let sink = Rc::clone(&seen);
        let mut frame = FrameAction::velocity(move |v, _| {
            sink.set(v);
            Vec2::new(5.0, v.y)
        });

        let result = frame.execute(GravityType::AfterApplied, 20.0, Some(Vec2::ZERO), 0.016);

        assert_eq!(seen.get(), Vec2::ZERO);
        assert_eq!(result, Some(Vec2::new(5.0, 20.0)));
    }

    #[test]
    fn frame_without_gravity_passes_delta() {
        let delta = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&delta);
        let mut frame = FrameAction::run(move |d| sink.set(d));

        let result = frame.execute(GravityType::None, 20.0, Some(Vec2::X), 0.5);

        assert_eq!(result, Some(Vec2::X));
        assert_eq!(delta.get(), 0.5);
    }
}
