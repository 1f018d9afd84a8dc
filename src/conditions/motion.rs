//! The `Motion` category plus the physical context it is read against.
//!
//! Velocities use screen coordinates: `+x` is right and `+y` is down.

use super::category::Category;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Whether the driven body currently touches a floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Positioning {
    Ground,
    Air,
}

impl Positioning {
    /// Classify from the physics body's floor contact.
    pub fn from_on_floor(on_floor: bool) -> Self {
        if on_floor {
            Positioning::Ground
        } else {
            Positioning::Air
        }
    }
}

/// When, within a frame action, the constant gravity bias enters velocity.
///
/// This also decides what "standing still" looks like when motion is read
/// back from the velocity after the frame action ran; see [`baseline`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GravityType {
    /// Gravity is never applied.
    #[default]
    None,
    /// Gravity is added before the frame callbacks run.
    BeforeApplied,
    /// Gravity is added after the frame callbacks ran.
    AfterApplied,
}

impl GravityType {
    /// Add the bias to `velocity` if this mode applies it at `stage`.
    pub(crate) fn apply(self, stage: GravityType, velocity: Option<Vec2>, bias: f32) -> Option<Vec2> {
        if self == stage && self != GravityType::None {
            velocity.map(|v| v + Vec2::new(0.0, bias))
        } else {
            velocity
        }
    }
}

/// Atomic movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Symbolic motion values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Motion {
    None,
    Left,
    Right,
    Horizontal,
    Up,
    Down,
    Vertical,
}

impl Category for Motion {
    type Atom = Direction;

    const NONE: Self = Motion::None;

    fn values() -> &'static [Self] {
        &[
            Motion::None,
            Motion::Left,
            Motion::Right,
            Motion::Horizontal,
            Motion::Up,
            Motion::Down,
            Motion::Vertical,
        ]
    }

    fn atoms(self) -> &'static [Direction] {
        match self {
            Motion::None => &[],
            Motion::Left => &[Direction::Left],
            Motion::Right => &[Direction::Right],
            Motion::Horizontal => &[Direction::Left, Direction::Right],
            Motion::Up => &[Direction::Up],
            Motion::Down => &[Direction::Down],
            Motion::Vertical => &[Direction::Up, Direction::Down],
        }
    }
}

/// Vertical velocity that counts as "not moving vertically".
///
/// With `BeforeApplied` the bias was added ahead of the frame callbacks, so a
/// resting body on the ground reads exactly zero while an airborne one that
/// cancelled its fall reads `-bias`. With `AfterApplied` the bias is still in
/// the velocity when triggers run. Unknown positioning reads as ground.
pub fn baseline(gravity: GravityType, positioning: Option<Positioning>, bias: f32) -> f32 {
    match (gravity, positioning) {
        (GravityType::None, _) => 0.0,
        (GravityType::BeforeApplied, Some(Positioning::Air)) => -bias,
        (GravityType::BeforeApplied, _) => 0.0,
        (GravityType::AfterApplied, _) => bias,
    }
}

/// Whether the body is moving in `direction`.
///
/// Horizontal directions compare `x` against `±epsilon`; vertical ones compare
/// `y` minus the [`baseline`]. Without a velocity nothing is moving.
pub fn is_moving(
    direction: Direction,
    velocity: Option<Vec2>,
    gravity: GravityType,
    positioning: Option<Positioning>,
    bias: f32,
    epsilon: f32,
) -> bool {
    let Some(velocity) = velocity else {
        return false;
    };
    let vertical = velocity.y - baseline(gravity, positioning, bias);
    match direction {
        Direction::Left => velocity.x < -epsilon,
        Direction::Right => velocity.x > epsilon,
        Direction::Up => vertical < -epsilon,
        Direction::Down => vertical > epsilon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIAS: f32 = 20.0;
    const EPS: f32 = 0.001;

    fn moving(direction: Direction, y: f32, gravity: GravityType, positioning: Positioning) -> bool {
        is_moving(
            direction,
            Some(Vec2::new(0.0, y)),
            gravity,
            Some(positioning),
            BIAS,
            EPS,
        )
    }

    fn still(y: f32, gravity: GravityType, positioning: Positioning) -> bool {
        let active = |d: Direction| {
            is_moving(d, Some(Vec2::new(0.0, y)), gravity, Some(positioning), BIAS, EPS)
        };
        Motion::None.is_active(&active)
    }

    #[test]
    fn no_gravity_reads_velocity_directly() {
        for positioning in [Positioning::Ground, Positioning::Air] {
            assert!(moving(Direction::Up, -5.0, GravityType::None, positioning));
            assert!(moving(Direction::Down, 5.0, GravityType::None, positioning));
            assert!(still(0.0, GravityType::None, positioning));
            assert!(!still(BIAS, GravityType::None, positioning));
        }
    }

    #[test]
    fn before_applied_up() {
        assert!(moving(Direction::Up, -1.0, GravityType::BeforeApplied, Positioning::Ground));
        assert!(!moving(Direction::Up, -1.0, GravityType::BeforeApplied, Positioning::Air));
        assert!(moving(Direction::Up, -BIAS - 1.0, GravityType::BeforeApplied, Positioning::Air));
    }

    #[test]
    fn before_applied_down() {
        assert!(moving(Direction::Down, 1.0, GravityType::BeforeApplied, Positioning::Ground));
        assert!(moving(Direction::Down, -BIAS + 1.0, GravityType::BeforeApplied, Positioning::Air));
        assert!(!moving(Direction::Down, -BIAS, GravityType::BeforeApplied, Positioning::Air));
    }

    #[test]
    fn before_applied_none_depends_on_positioning() {
        assert!(still(0.0, GravityType::BeforeApplied, Positioning::Ground));
        assert!(!still(-BIAS, GravityType::BeforeApplied, Positioning::Ground));
        assert!(still(-BIAS, GravityType::BeforeApplied, Positioning::Air));
        assert!(!still(0.0, GravityType::BeforeApplied, Positioning::Air));
    }

    #[test]
    fn after_applied_up() {
        assert!(moving(Direction::Up, BIAS - 1.0, GravityType::AfterApplied, Positioning::Ground));
        assert!(!moving(Direction::Up, BIAS, GravityType::AfterApplied, Positioning::Air));
    }

    #[test]
    fn after_applied_down_needs_more_than_bias() {
        assert!(!moving(Direction::Down, BIAS, GravityType::AfterApplied, Positioning::Ground));
        assert!(!moving(Direction::Down, BIAS + EPS / 2.0, GravityType::AfterApplied, Positioning::Ground));
        assert!(moving(Direction::Down, BIAS + 0.01, GravityType::AfterApplied, Positioning::Ground));
        assert!(moving(Direction::Down, BIAS + 0.01, GravityType::AfterApplied, Positioning::Air));
    }

    #[test]
    fn after_applied_none_is_resting_on_bias() {
        assert!(still(BIAS, GravityType::AfterApplied, Positioning::Ground));
        assert!(still(BIAS, GravityType::AfterApplied, Positioning::Air));
        assert!(!still(0.0, GravityType::AfterApplied, Positioning::Ground));
    }

    #[test]
    fn horizontal_ignores_gravity() {
        let velocity = Some(Vec2::new(-3.0, BIAS));
        for gravity in [GravityType::None, GravityType::BeforeApplied, GravityType::AfterApplied] {
            assert!(is_moving(Direction::Left, velocity, gravity, Some(Positioning::Ground), BIAS, EPS));
            assert!(!is_moving(Direction::Right, velocity, gravity, Some(Positioning::Ground), BIAS, EPS));
        }
    }

    #[test]
    fn missing_velocity_is_not_moving() {
        for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            assert!(!is_moving(direction, None, GravityType::AfterApplied, None, BIAS, EPS));
        }
    }

    #[test]
    fn gravity_applies_only_at_its_stage() {
        let v = Some(Vec2::ZERO);
        assert_eq!(
            GravityType::BeforeApplied.apply(GravityType::BeforeApplied, v, BIAS),
            Some(Vec2::new(0.0, BIAS))
        );
        assert_eq!(GravityType::BeforeApplied.apply(GravityType::AfterApplied, v, BIAS), v);
        assert_eq!(GravityType::None.apply(GravityType::None, v, BIAS), v);
        assert_eq!(GravityType::AfterApplied.apply(GravityType::AfterApplied, None, BIAS), None);
    }

    #[test]
    fn positioning_from_floor_contact() {
        assert_eq!(Positioning::from_on_floor(true), Positioning::Ground);
        assert_eq!(Positioning::from_on_floor(false), Positioning::Air);
    }
}
