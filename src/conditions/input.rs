//! The `Input` category: what the player or AI is asking the actor to do.

use super::category::Category;
use serde::{Deserialize, Serialize};

/// Atomic input actions, as bound in the engine's input map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,
    Attack,
}

impl InputAction {
    /// The action's name in the engine's input map.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::Jump => "jump",
            Self::Attack => "attack",
        }
    }
}

/// Symbolic input values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Input {
    None,
    Left,
    Right,
    Horizontal,
    Up,
    Down,
    Vertical,
    Jump,
    Attack,
}

impl Category for Input {
    type Atom = InputAction;

    const NONE: Self = Input::None;

    fn values() -> &'static [Self] {
        &[
            Input::None,
            Input::Left,
            Input::Right,
            Input::Horizontal,
            Input::Up,
            Input::Down,
            Input::Vertical,
            Input::Jump,
            Input::Attack,
        ]
    }

    fn atoms(self) -> &'static [InputAction] {
        use InputAction::*;
        match self {
            Input::None => &[],
            Input::Left => &[MoveLeft],
            Input::Right => &[MoveRight],
            Input::Horizontal => &[MoveLeft, MoveRight],
            Input::Up => &[MoveUp],
            Input::Down => &[MoveDown],
            Input::Vertical => &[MoveUp, MoveDown],
            Input::Jump => &[Jump],
            Input::Attack => &[Attack],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_atom_is_reachable_from_some_value() {
        let all = [
            InputAction::MoveLeft,
            InputAction::MoveRight,
            InputAction::MoveUp,
            InputAction::MoveDown,
            InputAction::Jump,
            InputAction::Attack,
        ];
        for atom in all {
            assert!(Input::values().iter().any(|v| v.atoms().contains(&atom)));
        }
    }

    #[test]
    fn only_none_maps_to_nothing() {
        for value in Input::values() {
            assert_eq!(value.atoms().is_empty(), *value == Input::None);
        }
    }

    #[test]
    fn action_names_match_input_map() {
        assert_eq!(InputAction::MoveLeft.name(), "move_left");
        assert_eq!(InputAction::Jump.name(), "jump");
    }

    #[test]
    fn input_deserializes_from_json() {
        let action: InputAction = serde_json::from_str("\"move_right\"").unwrap();
        assert_eq!(action, InputAction::MoveRight);
    }
}
