//! The immutable transition graph a machine is built from.

use super::state::State;
use std::collections::{HashMap, HashSet};

/// Mapping from a state to the set of states it may move to.
///
/// Destinations do not need to be keys themselves, so leaf states such as
/// `Dead` can be listed only on the right-hand side.
///
/// # Example
///
/// ```rust
/// use actor_fsm::core::TransitionTable;
/// use actor_fsm::state_enum;
///
/// state_enum! {
///     enum Door { Closed, Open, Locked }
/// }
///
/// let table = TransitionTable::new()
///     .with(Door::Closed, [Door::Open, Door::Locked])
///     .with(Door::Open, [Door::Closed])
///     .with(Door::Locked, [Door::Closed]);
///
/// assert!(table.has_edge(Door::Closed, Door::Open));
/// assert!(table.is_reversible(Door::Closed, Door::Open));
/// assert!(!table.has_edge(Door::Open, Door::Locked));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable<S: State> {
    edges: HashMap<S, HashSet<S>>,
}

impl<S: State> TransitionTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Add outgoing edges from `from`, returning the table.
    ///
    /// Calling this twice for the same key merges the destination sets.
    pub fn with<I>(mut self, from: S, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.insert(from, destinations);
        self
    }

    /// Add outgoing edges from `from` in place.
    pub fn insert<I>(&mut self, from: S, destinations: I)
    where
        I: IntoIterator<Item = S>,
    {
        self.edges.entry(from).or_default().extend(destinations);
    }

    /// Whether `state` has an entry of its own.
    pub fn contains_key(&self, state: S) -> bool {
        self.edges.contains_key(&state)
    }

    /// Whether the edge `from -> to` exists.
    pub fn has_edge(&self, from: S, to: S) -> bool {
        self.edges
            .get(&from)
            .is_some_and(|destinations| destinations.contains(&to))
    }

    /// Whether `to` can be entered from `from` and left again back to `from`.
    pub fn is_reversible(&self, from: S, to: S) -> bool {
        self.has_edge(from, to) && self.has_edge(to, from)
    }

    /// Whether any edge leads into `to`.
    pub fn is_destination(&self, to: S) -> bool {
        self.edges.values().any(|destinations| destinations.contains(&to))
    }

    /// Outgoing edges of `from`, if it is a key.
    pub fn destinations(&self, from: S) -> Option<&HashSet<S>> {
        self.edges.get(&from)
    }

    /// Number of keyed states.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<S: State> Default for TransitionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, I> FromIterator<(S, I)> for TransitionTable<S>
where
    I: IntoIterator<Item = S>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (from, destinations) in iter {
            table.insert(from, destinations);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Idle,
            Running,
            Jumping,
            Dead,
        }
    }

    fn table() -> TransitionTable<TestState> {
        TransitionTable::new()
            .with(TestState::Idle, [TestState::Running, TestState::Jumping])
            .with(TestState::Running, [TestState::Idle, TestState::Dead])
            .with(TestState::Jumping, [TestState::Idle])
    }

    #[test]
    fn has_edge_follows_declared_destinations() {
        let table = table();

        assert!(table.has_edge(TestState::Idle, TestState::Running));
        assert!(table.has_edge(TestState::Running, TestState::Dead));
        assert!(!table.has_edge(TestState::Jumping, TestState::Running));
        assert!(!table.has_edge(TestState::Dead, TestState::Idle));
    }

    #[test]
    fn destinations_need_not_be_keys() {
        let table = table();

        assert!(!table.contains_key(TestState::Dead));
        assert!(table.is_destination(TestState::Dead));
    }

    #[test]
    fn reversibility_requires_both_directions() {
        let table = table();

        assert!(table.is_reversible(TestState::Idle, TestState::Running));
        assert!(table.is_reversible(TestState::Running, TestState::Idle));
        assert!(!table.is_reversible(TestState::Running, TestState::Dead));
    }

    #[test]
    fn repeated_keys_merge_destinations() {
        let table = TransitionTable::new()
            .with(TestState::Idle, [TestState::Running])
            .with(TestState::Idle, [TestState::Jumping]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.destinations(TestState::Idle).map(|d| d.len()), Some(2));
    }

    #[test]
    fn collects_from_pairs() {
        let table: TransitionTable<TestState> = vec![
            (TestState::Idle, vec![TestState::Running]),
            (TestState::Running, vec![TestState::Idle]),
        ]
        .into_iter()
        .collect();

        assert!(table.is_reversible(TestState::Idle, TestState::Running));
    }
}
