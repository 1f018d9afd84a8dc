//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::conditions::GravityType;
use crate::config::MachineConfig;
use crate::core::{State, TransitionTable};
use crate::diagnostics::{DiagnosticSink, LogLevel, TracingSink};
use crate::machine::{FrameAction, StateMachine};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing state machines with a fluent API.
///
/// Unlike the setters on [`StateMachine`], which only warn, the builder
/// treats configuration mistakes as errors and reports all of them at once.
///
/// # Example
///
/// ```rust
/// use actor_fsm::builder::StateMachineBuilder;
/// use actor_fsm::conditions::GravityType;
/// use actor_fsm::machine::FrameAction;
/// use actor_fsm::state_enum;
///
/// state_enum! {
///     enum Slime { Idle, Hop }
/// }
///
/// let machine = StateMachineBuilder::new()
///     .name("slime")
///     .transition(Slime::Idle, [Slime::Hop])
///     .transition(Slime::Hop, [Slime::Idle])
///     .frame_action(Slime::Hop, GravityType::AfterApplied, FrameAction::new())
///     .initial(Slime::Idle)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.state(), Slime::Idle);
/// assert_eq!(machine.config().name, "slime");
/// ```
pub struct StateMachineBuilder<S: State> {
    table: TransitionTable<S>,
    initial: Option<S>,
    config: MachineConfig,
    sink: Option<Box<dyn DiagnosticSink>>,
    frame_actions: Vec<(S, GravityType, FrameAction)>,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            table: TransitionTable::new(),
            initial: None,
            config: MachineConfig::default(),
            sink: None,
            frame_actions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the transition table wholesale.
    pub fn table(mut self, table: TransitionTable<S>) -> Self {
        self.table = table;
        self
    }

    /// Add edges `from -> to` for every `to` in `destinations`.
    pub fn transition<I: IntoIterator<Item = S>>(mut self, from: S, destinations: I) -> Self {
        self.table.insert(from, destinations);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    /// Route diagnostics somewhere other than `tracing`.
    pub fn sink<D: DiagnosticSink + 'static>(mut self, sink: D) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn frame_action(mut self, state: S, gravity: GravityType, action: FrameAction) -> Self {
        self.frame_actions.push((state, gravity, action));
        self
    }

    fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        let check = match self.initial {
            None => Validation::fail(BuildError::MissingInitialState),
            Some(initial) if !self.table.contains_key(initial) => {
                Validation::fail(BuildError::InitialStateNotInTable {
                    state: initial.name().to_string(),
                })
            }
            Some(_) => Validation::success(()),
        };
        checks.push(check);

        let mut seen = HashSet::new();
        for (state, _, _) in &self.frame_actions {
            let check = if seen.insert(*state) {
                Validation::success(())
            } else {
                Validation::fail(BuildError::DuplicateFrameAction {
                    state: state.name().to_string(),
                })
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the state machine.
    ///
    /// Returns the single error if exactly one check failed, otherwise
    /// [`BuildError::Invalid`] carrying all of them.
    pub fn build(self) -> Result<StateMachine<S>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            let mut errors: Vec<BuildError> = errors.iter().cloned().collect();
            return Err(if errors.len() == 1 {
                errors.remove(0)
            } else {
                BuildError::Invalid(errors)
            });
        }

        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let sink = self.sink.unwrap_or_else(|| Box::new(TracingSink));
        let mut machine = StateMachine::with_config(self.table, initial, self.config, sink)?;
        for (state, gravity, action) in self.frame_actions {
            machine.add_frame_action(state, gravity, action)?;
        }

        Ok(machine)
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
