//! State transition history tracking.
//!
//! Keeps a bounded record of the most recent transitions a machine executed,
//! which is what one usually wants to see when an actor ends up in an
//! unexpected state mid-game.

use super::state::State;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// How a transition was executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// One-way transition that cleared the child stack
    To,
    /// Entered a reversible child state
    Push,
    /// Returned from a child state
    Pop,
    /// Forced return to the initial state
    Reset,
}

/// Record of a single executed transition.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRecord<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// How the transition was executed
    pub kind: TransitionKind,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of transitions.
///
/// Once `capacity` records are held, recording a new one evicts the oldest.
/// A capacity of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use actor_fsm::core::{TransitionHistory, TransitionKind};
/// use actor_fsm::state_enum;
///
/// state_enum! {
///     enum Step { A, B, C }
/// }
///
/// let mut history = TransitionHistory::with_capacity(2);
/// history.record(Step::A, Step::B, TransitionKind::To);
/// history.record(Step::B, Step::C, TransitionKind::Push);
/// history.record(Step::C, Step::B, TransitionKind::Pop);
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec![Step::B, Step::C, Step::B]);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionHistory<S: State> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: usize,
}

impl<S: State> TransitionHistory<S> {
    /// Create an empty history holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a transition stamped with the current time.
    pub fn record(&mut self, from: S, to: S, kind: TransitionKind) {
        self.push(TransitionRecord {
            from,
            to,
            kind,
            timestamp: Utc::now(),
        });
    }

    /// Record a prebuilt transition.
    pub fn push(&mut self, record: TransitionRecord<S>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed by the retained records.
    ///
    /// Returns the `from` state of the oldest record followed by the `to`
    /// state of every record.
    pub fn path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the oldest and newest retained records.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Idle,
            Walking,
            Falling,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: TransitionHistory<TestState> = TransitionHistory::with_capacity(4);
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = TransitionHistory::with_capacity(4);
        history.record(TestState::Idle, TestState::Walking, TransitionKind::To);
        history.record(TestState::Walking, TestState::Falling, TransitionKind::Push);

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.path(),
            vec![TestState::Idle, TestState::Walking, TestState::Falling]
        );
        assert_eq!(history.last().map(|r| r.kind), Some(TransitionKind::Push));
    }

    #[test]
    fn oldest_record_is_evicted_at_capacity() {
        let mut history = TransitionHistory::with_capacity(2);
        history.record(TestState::Idle, TestState::Walking, TransitionKind::To);
        history.record(TestState::Walking, TestState::Falling, TransitionKind::Push);
        history.record(TestState::Falling, TestState::Walking, TransitionKind::Pop);

        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().next().map(|r| r.from), Some(TestState::Walking));
    }

    #[test]
    fn zero_capacity_disables_recording() {
        let mut history = TransitionHistory::with_capacity(0);
        history.record(TestState::Idle, TestState::Walking, TransitionKind::To);

        assert!(history.is_empty());
    }

    #[test]
    fn single_record_has_duration_zero() {
        let mut history = TransitionHistory::with_capacity(4);
        history.push(TransitionRecord {
            from: TestState::Idle,
            to: TestState::Walking,
            kind: TransitionKind::To,
            timestamp: Utc::now(),
        });

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn duration_spans_oldest_to_newest() {
        let mut history = TransitionHistory::with_capacity(4);
        let start = Utc::now();
        history.push(TransitionRecord {
            from: TestState::Idle,
            to: TestState::Walking,
            kind: TransitionKind::To,
            timestamp: start,
        });
        history.push(TransitionRecord {
            from: TestState::Walking,
            to: TestState::Idle,
            kind: TransitionKind::Reset,
            timestamp: start + chrono::Duration::milliseconds(250),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }
}
