//! Boolean combinators over arbitrary conditions.
//!
//! Operators are conditions themselves, so nesting them builds composite
//! expressions: `Or::new().with(And::new()...).with(Not::new(...))`.

use super::context::{BoxedCondition, Condition, TriggerContext};

/// Holds when every operand holds. An empty `And` holds.
#[derive(Default)]
pub struct And {
    operands: Vec<BoxedCondition>,
}

impl And {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<C: Condition + 'static>(mut self, operand: C) -> Self {
        self.operands.push(Box::new(operand));
        self
    }
}

impl Condition for And {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.operands.iter().all(|operand| operand.evaluate(ctx))
    }
}

/// Holds when any operand holds. An empty `Or` does not.
#[derive(Default)]
pub struct Or {
    operands: Vec<BoxedCondition>,
}

impl Or {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<C: Condition + 'static>(mut self, operand: C) -> Self {
        self.operands.push(Box::new(operand));
        self
    }
}

impl Condition for Or {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.operands.iter().any(|operand| operand.evaluate(ctx))
    }
}

pub struct Not(BoxedCondition);

impl Not {
    pub fn new<C: Condition + 'static>(operand: C) -> Self {
        Self(Box::new(operand))
    }
}

impl Condition for Not {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        !self.0.evaluate(ctx)
    }
}

/// Always holds. Useful for triggers that should fire as soon as the
/// machine enters their source state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Always;

impl Condition for Always {
    fn evaluate(&self, _ctx: &TriggerContext<'_>) -> bool {
        true
    }
}

/// Infix construction of operators.
pub trait ConditionExt: Condition + Sized + 'static {
    fn and<C: Condition + 'static>(self, other: C) -> And {
        And::new().with(self).with(other)
    }

    fn or<C: Condition + 'static>(self, other: C) -> Or {
        Or::new().with(self).with(other)
    }

    fn negate(self) -> Not {
        Not::new(self)
    }
}

impl<T: Condition + Sized + 'static> ConditionExt for T {}
