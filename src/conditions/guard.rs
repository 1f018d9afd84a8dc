//! Closure-backed conditions.

use super::context::{Condition, TriggerContext};

/// Predicate over the tick's [`TriggerContext`].
///
/// Guards cover whatever the symbolic categories do not, such as a timer owned
/// by the actor or a query against the tilemap.
///
/// # Example
///
/// ```rust
/// use actor_fsm::conditions::{Condition, Guard, TriggerContext};
/// use glam::Vec2;
///
/// let fast = Guard::new(|ctx: &TriggerContext<'_>| {
///     ctx.velocity.is_some_and(|v| v.length() > 100.0)
/// });
///
/// let ctx = TriggerContext::empty().with_velocity(Vec2::new(150.0, 0.0));
/// assert!(fast.check(&ctx));
/// assert!(!fast.check(&TriggerContext::empty()));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&TriggerContext<'_>) -> bool>,
}

impl Guard {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&TriggerContext<'_>) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard holds for this context.
    pub fn check(&self, ctx: &TriggerContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

impl Condition for Guard {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.check(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Positioning;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn guard_reads_context() {
        let grounded = Guard::new(|ctx: &TriggerContext<'_>| {
            ctx.positioning == Some(Positioning::Ground)
        });

        let ctx = TriggerContext::empty().with_positioning(Positioning::Ground);
        assert!(grounded.check(&ctx));
        assert!(!grounded.check(&TriggerContext::empty()));
    }

    #[test]
    fn guard_can_capture_actor_state() {
        let cooldown = Rc::new(Cell::new(2u32));
        let ready = {
            let cooldown = Rc::clone(&cooldown);
            Guard::new(move |_: &TriggerContext<'_>| cooldown.get() == 0)
        };

        let ctx = TriggerContext::empty();
        assert!(!ready.evaluate(&ctx));
        cooldown.set(0);
        assert!(ready.evaluate(&ctx));
    }
}
