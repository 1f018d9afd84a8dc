//! Symbolic condition categories.
//!
//! A category is a closed enumeration whose members each stand for a set of
//! atomic identifiers. `Input::Horizontal` covers both `MoveLeft` and
//! `MoveRight`, `Motion::Down` covers only the `Down` direction, and so on.
//! Every category has a `None` member mapping to the empty set, which is
//! active exactly when no atom of the category is.

use std::fmt::Debug;
use std::hash::Hash;

/// A closed enumeration of symbolic values backed by atomic identifiers.
pub trait Category: Copy + Ord + Hash + Debug + 'static {
    /// The atomic identifier a value maps onto.
    type Atom: Copy + Eq + Debug + 'static;

    /// The "nothing active" pseudo-value.
    const NONE: Self;

    /// Every member of the category, `NONE` included.
    fn values() -> &'static [Self];

    /// The atoms this value stands for. Empty only for `NONE`.
    fn atoms(self) -> &'static [Self::Atom];

    /// Whether this value is active given per-atom activity.
    ///
    /// `NONE` is active iff no atom of the whole category is active; every
    /// other value is active iff any of its atoms is.
    fn is_active(self, atom_active: &dyn Fn(Self::Atom) -> bool) -> bool {
        if self == Self::NONE {
            Self::values()
                .iter()
                .flat_map(|value| value.atoms().iter())
                .all(|atom| !atom_active(*atom))
        } else {
            self.atoms().iter().any(|atom| atom_active(*atom))
        }
    }

    /// Whether an explicit requirement on `self` also permits `other`.
    ///
    /// True when they are the same value or every atom of `self` is also an
    /// atom of `other`. `NONE` only covers itself.
    fn covers(self, other: Self) -> bool {
        if self == other {
            return true;
        }
        let atoms = self.atoms();
        !atoms.is_empty() && atoms.iter().all(|atom| other.atoms().contains(atom))
    }

    /// Whether the two values share no atom.
    fn is_disjoint(self, other: Self) -> bool {
        self.atoms()
            .iter()
            .all(|atom| !other.atoms().contains(atom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{Input, InputAction, Motion};

    #[test]
    fn none_is_active_only_without_atoms() {
        let nothing = |_: InputAction| false;
        let jumping = |action: InputAction| action == InputAction::Jump;

        assert!(Input::None.is_active(&nothing));
        assert!(!Input::None.is_active(&jumping));
    }

    #[test]
    fn value_is_active_when_any_atom_is() {
        let left = |action: InputAction| action == InputAction::MoveLeft;

        assert!(Input::Left.is_active(&left));
        assert!(Input::Horizontal.is_active(&left));
        assert!(!Input::Right.is_active(&left));
        assert!(!Input::Jump.is_active(&left));
    }

    #[test]
    fn covers_uses_atom_inclusion() {
        assert!(Input::Left.covers(Input::Horizontal));
        assert!(Input::Left.covers(Input::Left));
        assert!(!Input::Horizontal.covers(Input::Left));
        assert!(!Input::None.covers(Input::Jump));
        assert!(Motion::Down.covers(Motion::Vertical));
    }

    #[test]
    fn disjointness_ignores_shared_parents() {
        assert!(Input::Left.is_disjoint(Input::Right));
        assert!(!Input::Left.is_disjoint(Input::Horizontal));
        assert!(Input::None.is_disjoint(Input::Jump));
    }
}
