//! Registries keyed by `(from, to)` where either side may be any state.

use crate::core::State;
use std::collections::{HashMap, HashSet};

/// Registry key. `None` on either side matches any state.
pub(crate) type Key<S> = (Option<S>, Option<S>);

/// At most one entry per key, plus except-lists for the one-sided wildcards.
pub(crate) struct Registry<S: State, T> {
    entries: HashMap<Key<S>, T>,
    /// `(any, to)` registrations skip these `from` states.
    except_from: HashMap<S, HashSet<S>>,
    /// `(from, any)` registrations skip these `to` states.
    except_to: HashMap<S, HashSet<S>>,
}

impl<S: State, T> Registry<S, T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            except_from: HashMap::new(),
            except_to: HashMap::new(),
        }
    }

    /// Insert unless the key is taken. Returns whether it was inserted.
    pub(crate) fn insert(&mut self, key: Key<S>, value: T) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    pub(crate) fn contains(&self, key: &Key<S>) -> bool {
        self.entries.contains_key(key)
    }

    /// Exclude `from` from the `(any, to)` entry. False if already excluded.
    pub(crate) fn except_from(&mut self, to: S, from: S) -> bool {
        self.except_from.entry(to).or_default().insert(from)
    }

    /// Exclude `to` from the `(from, any)` entry. False if already excluded.
    pub(crate) fn except_to(&mut self, from: S, to: S) -> bool {
        self.except_to.entry(from).or_default().insert(to)
    }

    pub(crate) fn is_excepted(&self, key: &Key<S>, from: S, to: S) -> bool {
        match key {
            (None, Some(_)) => self
                .except_from
                .get(&to)
                .is_some_and(|excluded| excluded.contains(&from)),
            (Some(_), None) => self
                .except_to
                .get(&from)
                .is_some_and(|excluded| excluded.contains(&to)),
            _ => false,
        }
    }

    /// Keys whose entries apply to the concrete move `from -> to`, most
    /// specific first: `(from, to)`, `(from, any)`, `(any, to)`, `(any, any)`.
    pub(crate) fn matching(&self, from: S, to: S) -> Vec<Key<S>> {
        [
            (Some(from), Some(to)),
            (Some(from), None),
            (None, Some(to)),
            (None, None),
        ]
        .into_iter()
        .filter(|key| self.entries.contains_key(key) && !self.is_excepted(key, from, to))
        .collect()
    }

    pub(crate) fn get_mut(&mut self, key: &Key<S>) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key<S>, &T)> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
