//! Required/Optional composition over a condition category.
//!
//! A wrapper turns a set of category values into a single predicate and, at
//! construction time, derives which other values of the category must stay
//! inactive for it to hold. This is what lets a trigger say "left or right,
//! and nothing else" without listing every other input.
//!
//! For a wrapper over values `V` with atom mapping `M`:
//!
//! - `Allowed = { x : x ∈ V or ∃ v ∈ V, M[v] ⊆ M[x] }`
//! - `Disallowed = { x : x ∉ V and ∀ v ∈ V, M[v] ∩ M[x] = ∅ }`
//!
//! An [`Optional`] wrapper treats the category's `NONE` value as a member of
//! `V`. A [`Composite`] unions its members' sets and lets any explicit
//! allowance override an implicit disallowance.

use super::category::Category;
use super::context::{Condition, Observable, TriggerContext};
use std::collections::BTreeSet;

/// A composed condition over one category.
pub trait Compose<C: Category> {
    /// Values this condition explicitly permits to be active.
    fn allowed(&self) -> &BTreeSet<C>;

    /// Values that must be inactive for the condition to hold.
    fn disallowed(&self) -> &BTreeSet<C>;

    /// The positive part of the condition, ignoring `disallowed`.
    fn holds(&self, active: &dyn Fn(C) -> bool) -> bool;

    /// Full evaluation: the positive part holds and nothing disallowed is active.
    fn compose(&self, active: &dyn Fn(C) -> bool) -> bool {
        self.holds(active) && self.disallowed().iter().all(|value| !active(*value))
    }
}

fn derive_allowed<C: Category>(values: &BTreeSet<C>) -> BTreeSet<C> {
    C::values()
        .iter()
        .copied()
        .filter(|x| values.iter().any(|v| v.covers(*x)))
        .collect()
}

fn derive_disallowed<C: Category>(values: &BTreeSet<C>) -> BTreeSet<C> {
    C::values()
        .iter()
        .copied()
        .filter(|x| !values.contains(x) && values.iter().all(|v| v.is_disjoint(*x)))
        .collect()
}

/// Every listed value must be active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Required<C: Category> {
    values: BTreeSet<C>,
    allowed: BTreeSet<C>,
    disallowed: BTreeSet<C>,
}

impl<C: Category> Required<C> {
    pub fn new<I: IntoIterator<Item = C>>(values: I) -> Self {
        let values: BTreeSet<C> = values.into_iter().collect();
        Self {
            allowed: derive_allowed(&values),
            disallowed: derive_disallowed(&values),
            values,
        }
    }

    pub fn values(&self) -> &BTreeSet<C> {
        &self.values
    }
}

impl<C: Category> Compose<C> for Required<C> {
    fn allowed(&self) -> &BTreeSet<C> {
        &self.allowed
    }

    fn disallowed(&self) -> &BTreeSet<C> {
        &self.disallowed
    }

    fn holds(&self, active: &dyn Fn(C) -> bool) -> bool {
        self.values.iter().all(|value| active(*value))
    }
}

/// Any of the listed values may be active, or none of them.
///
/// The positive part always holds, so an `Optional` only constrains through
/// its disallowed set: everything unrelated to the listed values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Optional<C: Category> {
    values: BTreeSet<C>,
    allowed: BTreeSet<C>,
    disallowed: BTreeSet<C>,
}

impl<C: Category> Optional<C> {
    pub fn new<I: IntoIterator<Item = C>>(values: I) -> Self {
        let mut values: BTreeSet<C> = values.into_iter().collect();
        values.insert(C::NONE);
        Self {
            allowed: derive_allowed(&values),
            disallowed: derive_disallowed(&values),
            values,
        }
    }

    /// The listed values, including the implicit `NONE`.
    pub fn values(&self) -> &BTreeSet<C> {
        &self.values
    }
}

impl<C: Category> Compose<C> for Optional<C> {
    fn allowed(&self) -> &BTreeSet<C> {
        &self.allowed
    }

    fn disallowed(&self) -> &BTreeSet<C> {
        &self.disallowed
    }

    fn holds(&self, _active: &dyn Fn(C) -> bool) -> bool {
        true
    }
}

/// Several wrappers that must all hold, checked against one merged
/// disallowed set.
///
/// ```rust
/// use actor_fsm::conditions::{Composite, Compose, Input, Optional, Required};
///
/// // Jump, optionally steering, and nothing else.
/// let jump = Composite::new()
///     .with(Required::new([Input::Jump]))
///     .with(Optional::new([Input::Left, Input::Right]));
///
/// let held = |input: Input| matches!(input, Input::Jump | Input::Left | Input::Horizontal);
/// assert!(jump.compose(&held));
/// assert!(!jump.disallowed().contains(&Input::Left));
/// assert!(jump.disallowed().contains(&Input::Attack));
/// ```
pub struct Composite<C: Category> {
    members: Vec<Box<dyn Compose<C>>>,
    allowed: BTreeSet<C>,
    disallowed: BTreeSet<C>,
}

impl<C: Category> Composite<C> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            allowed: BTreeSet::new(),
            disallowed: BTreeSet::new(),
        }
    }

    /// Add a member and re-derive the merged sets.
    pub fn with<W: Compose<C> + 'static>(mut self, member: W) -> Self {
        self.members.push(Box::new(member));
        self.allowed = self
            .members
            .iter()
            .flat_map(|member| member.allowed().iter().copied())
            .collect();
        self.disallowed = self
            .members
            .iter()
            .flat_map(|member| member.disallowed().iter().copied())
            .filter(|value| !self.allowed.contains(value))
            .collect();
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<C: Category> Default for Composite<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> Compose<C> for Composite<C> {
    fn allowed(&self) -> &BTreeSet<C> {
        &self.allowed
    }

    fn disallowed(&self) -> &BTreeSet<C> {
        &self.disallowed
    }

    fn holds(&self, active: &dyn Fn(C) -> bool) -> bool {
        let mut members = self.members.iter();
        let Some(first) = members.next() else {
            return false;
        };
        members.fold(first.holds(active), |acc, member| acc && member.holds(active))
    }
}

impl<C: Observable> Condition for Required<C> {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.compose(&|value: C| value.is_active_in(ctx))
    }
}

impl<C: Observable> Condition for Optional<C> {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.compose(&|value: C| value.is_active_in(ctx))
    }
}

impl<C: Observable> Condition for Composite<C> {
    fn evaluate(&self, ctx: &TriggerContext<'_>) -> bool {
        self.compose(&|value: C| value.is_active_in(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{GravityType, Input, InputAction, Motion, Positioning};
    use glam::Vec2;

    fn set<C: Category>(values: &[C]) -> BTreeSet<C> {
        values.iter().copied().collect()
    }

    fn pressing(actions: &'static [InputAction]) -> impl Fn(Input) -> bool {
        move |input: Input| input.is_active(&|atom| actions.contains(&atom))
    }

    #[test]
    fn required_derives_allowed_supersets() {
        let left = Required::new([Input::Left]);

        assert_eq!(left.allowed(), &set(&[Input::Left, Input::Horizontal]));
    }

    #[test]
    fn required_derives_disjoint_disallowed() {
        let left = Required::new([Input::Left]);

        assert_eq!(
            left.disallowed(),
            &set(&[
                Input::None,
                Input::Right,
                Input::Up,
                Input::Down,
                Input::Vertical,
                Input::Jump,
                Input::Attack,
            ])
        );
    }

    #[test]
    fn required_needs_every_member_and_nothing_else() {
        let both = Required::new([Input::Left, Input::Right]);

        assert!(both.compose(&pressing(&[InputAction::MoveLeft, InputAction::MoveRight])));
        assert!(!both.compose(&pressing(&[InputAction::MoveLeft])));
        assert!(!both.compose(&pressing(&[
            InputAction::MoveLeft,
            InputAction::MoveRight,
            InputAction::Jump,
        ])));
    }

    #[test]
    fn optional_includes_none() {
        let steer = Optional::new([Input::Left, Input::Right]);

        assert!(steer.values().contains(&Input::None));
        assert!(steer.allowed().contains(&Input::None));
        assert!(!steer.disallowed().contains(&Input::None));
    }

    #[test]
    fn optional_accepts_any_member_or_nothing() {
        let steer = Optional::new([Input::Left, Input::Right]);

        assert!(steer.compose(&pressing(&[])));
        assert!(steer.compose(&pressing(&[InputAction::MoveLeft])));
        assert!(steer.compose(&pressing(&[InputAction::MoveLeft, InputAction::MoveRight])));
        assert!(!steer.compose(&pressing(&[InputAction::MoveLeft, InputAction::Attack])));
        assert!(!steer.compose(&pressing(&[InputAction::MoveUp])));
    }

    #[test]
    fn optional_member_does_not_demand_activity_in_composite() {
        let jump = Composite::new()
            .with(Required::new([Input::Jump]))
            .with(Optional::new([Input::Left, Input::Right]));

        assert!(jump.compose(&pressing(&[InputAction::Jump])));
        assert!(jump.compose(&pressing(&[InputAction::Jump, InputAction::MoveRight])));
        assert!(!jump.compose(&pressing(&[InputAction::Jump, InputAction::MoveUp])));
    }

    #[test]
    fn composite_allowance_overrides_disallowance() {
        let composite = Composite::new()
            .with(Required::new([Input::Jump]))
            .with(Required::new([Input::Left]));

        assert!(!composite.disallowed().contains(&Input::Jump));
        assert!(!composite.disallowed().contains(&Input::Left));
        assert!(composite.disallowed().contains(&Input::Right));
        assert!(composite.allowed().contains(&Input::Horizontal));
    }

    #[test]
    fn composite_requires_every_member() {
        let composite = Composite::new()
            .with(Required::new([Input::Jump]))
            .with(Required::new([Input::Left]));

        assert!(composite.compose(&pressing(&[InputAction::Jump, InputAction::MoveLeft])));
        assert!(!composite.compose(&pressing(&[InputAction::Jump])));
        assert!(!composite.compose(&pressing(&[
            InputAction::Jump,
            InputAction::MoveLeft,
            InputAction::Attack,
        ])));
    }

    #[test]
    fn empty_composite_never_holds() {
        let composite: Composite<Input> = Composite::new();

        assert!(composite.is_empty());
        assert!(!composite.compose(&pressing(&[])));
    }

    #[test]
    fn motion_wrappers_evaluate_against_context() {
        let falling = Required::new([Motion::Down]);
        let ctx = TriggerContext::empty()
            .with_positioning(Positioning::Air)
            .with_velocity(Vec2::new(0.0, 35.0))
            .with_gravity(GravityType::AfterApplied, 20.0)
            .with_epsilon(0.001);

        assert!(falling.evaluate(&ctx));

        let drifting = ctx.with_velocity(Vec2::new(4.0, 35.0));
        assert!(!falling.evaluate(&drifting));
        assert!(Composite::new()
            .with(Required::new([Motion::Down]))
            .with(Optional::new([Motion::Right]))
            .evaluate(&drifting));
    }

    #[test]
    fn input_wrappers_evaluate_against_context() {
        let held = |action: InputAction| action == InputAction::Attack;
        let ctx = TriggerContext::empty().with_input(&held);

        assert!(Required::new([Input::Attack]).evaluate(&ctx));
        assert!(!Optional::new([Input::Left]).evaluate(&ctx));
    }
}
