//! The hierarchical, trigger-driven state machine.

use super::actions::{FrameAction, TransitionActions};
use super::registry::{Key, Registry};
use crate::builder::BuildError;
use crate::conditions::{
    BoxedCondition, Condition, GravityType, InputAction, Positioning, TriggerContext,
};
use crate::config::MachineConfig;
use crate::core::state::endpoint_name;
use crate::core::{State, TransitionHistory, TransitionKind, TransitionTable};
use crate::diagnostics::{DiagnosticSink, Diagnostics, LogLevel, TracingSink};
use glam::Vec2;
use std::collections::HashMap;
use uuid::Uuid;

/// Whether [`StateMachine::reset`] runs the transition actions registered for
/// the move back to the initial state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetMode {
    ExecuteTransitionActions,
    IgnoreTransitionActions,
}

/// Hierarchical state machine driving one actor.
///
/// The machine tracks a `current` state, a `parent` state (the last state
/// entered through a one-way transition) and a stack of child states entered
/// through [`push`](Self::push). Popping returns to the next-older child, or
/// to the parent once the stack would empty.
///
/// Invalid runtime requests never fail: they are reported through the
/// machine's diagnostics at [`LogLevel::Warn`] and leave it untouched.
///
/// # Example
///
/// ```rust
/// use actor_fsm::conditions::{Input, Required};
/// use actor_fsm::core::TransitionTable;
/// use actor_fsm::machine::{StateMachine, TransitionActions};
/// use actor_fsm::state_enum;
/// use actor_fsm::conditions::InputAction;
/// use glam::Vec2;
///
/// state_enum! {
///     enum Player { Idle, Running, Jumping }
/// }
///
/// let table = TransitionTable::new()
///     .with(Player::Idle, [Player::Running, Player::Jumping])
///     .with(Player::Running, [Player::Idle, Player::Jumping])
///     .with(Player::Jumping, [Player::Idle]);
///
/// let mut machine = StateMachine::new(table, Player::Idle).unwrap();
/// machine.add_trigger(Player::Idle, Player::Jumping, Required::new([Input::Jump]));
/// machine.on_transition_to(
///     Player::Jumping,
///     TransitionActions::velocity(|v| Vec2::new(v.x, -300.0)),
/// );
///
/// let jump = |action: InputAction| action == InputAction::Jump;
/// let velocity = machine.update(None, Some(&jump), Some(Vec2::ZERO), 0.016);
///
/// assert!(machine.is(Player::Jumping));
/// assert_eq!(velocity, Some(Vec2::new(0.0, -300.0)));
/// ```
pub struct StateMachine<S: State> {
    id: Uuid,
    table: TransitionTable<S>,
    initial: S,
    current: S,
    parent: S,
    children: Vec<S>,
    actions: Registry<S, TransitionActions>,
    triggers: Registry<S, BoxedCondition>,
    frame_actions: HashMap<S, (GravityType, FrameAction)>,
    config: MachineConfig,
    diagnostics: Diagnostics,
    history: TransitionHistory<S>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine with default configuration, logging through `tracing`.
    pub fn new(table: TransitionTable<S>, initial: S) -> Result<Self, BuildError> {
        Self::with_config(table, initial, MachineConfig::default(), Box::new(TracingSink))
    }

    /// Create a machine with explicit configuration and diagnostics sink.
    ///
    /// Fails if `initial` has no entry in `table`.
    pub fn with_config(
        table: TransitionTable<S>,
        initial: S,
        config: MachineConfig,
        sink: Box<dyn DiagnosticSink>,
    ) -> Result<Self, BuildError> {
        if !table.contains_key(initial) {
            return Err(BuildError::InitialStateNotInTable {
                state: initial.name().to_string(),
            });
        }

        let id = Uuid::new_v4();
        let label = format!("{}/{}", config.name, &id.simple().to_string()[..8]);
        let diagnostics = Diagnostics::new(config.log_level, label, sink);
        let history = TransitionHistory::with_capacity(config.history_capacity);

        diagnostics.debug(|| {
            format!(
                "Created with {} keyed states, initial state {}",
                table.len(),
                initial.name()
            )
        });

        Ok(Self {
            id,
            table,
            initial,
            current: initial,
            parent: initial,
            children: Vec::new(),
            actions: Registry::new(),
            triggers: Registry::new(),
            frame_actions: HashMap::new(),
            config,
            diagnostics,
            history,
        })
    }

    /// Get current state (pure)
    pub fn state(&self) -> S {
        self.current
    }

    /// Whether the machine is currently in `state` (pure)
    pub fn is(&self, state: S) -> bool {
        self.current == state
    }

    /// The last state entered through a one-way transition or reset.
    pub fn parent(&self) -> S {
        self.parent
    }

    /// Child states entered through `push`, oldest first.
    pub fn children(&self) -> &[S] {
        &self.children
    }

    /// The state the machine starts in and resets to.
    pub fn initial(&self) -> S {
        self.initial
    }

    /// Unique id of this machine instance, also used in diagnostics.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The transition table the machine was built with.
    pub fn table(&self) -> &TransitionTable<S> {
        &self.table
    }

    /// Get the configuration (pure)
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Recent transitions, oldest first.
    pub fn history(&self) -> &TransitionHistory<S> {
        &self.history
    }

    /// Change diagnostics verbosity. Never affects behavior.
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.config.log_level = level;
        self.diagnostics.set_level(level);
    }

    /// Run `actions` on every `from -> to` transition.
    ///
    /// Dropped with a warning if the edge is not in the table.
    pub fn on_transition(&mut self, from: S, to: S, actions: TransitionActions) {
        if !self.table.has_edge(from, to) {
            self.diagnostics.warn(|| {
                format!(
                    "Ignoring transition actions for {} -> {}: no such edge in the transition table",
                    from.name(),
                    to.name()
                )
            });
            return;
        }
        self.register_actions((Some(from), Some(to)), actions);
    }

    /// Run `actions` on every transition into `to`, whatever the origin.
    pub fn on_transition_to(&mut self, to: S, actions: TransitionActions) {
        self.register_actions((None, Some(to)), actions);
    }

    /// Run `actions` on every transition out of `from`, whatever the destination.
    pub fn on_transition_from(&mut self, from: S, actions: TransitionActions) {
        self.register_actions((Some(from), None), actions);
    }

    /// Run `actions` on every transition.
    pub fn on_any_transition(&mut self, actions: TransitionActions) {
        self.register_actions((None, None), actions);
    }

    /// Like [`on_transition_to`](Self::on_transition_to), but never for
    /// transitions coming from one of `exceptions`.
    ///
    /// A specific `on_transition(exception, to, ..)` can then coexist with
    /// the catch-all.
    pub fn on_transition_to_except_from<I>(&mut self, to: S, exceptions: I, actions: TransitionActions)
    where
        I: IntoIterator<Item = S>,
    {
        if self.register_actions((None, Some(to)), actions) {
            for from in exceptions {
                if !self.actions.except_from(to, from) {
                    self.warn_duplicate_exception(Some(from), Some(to), "transition actions");
                }
            }
        }
    }

    /// Like [`on_transition_from`](Self::on_transition_from), but never for
    /// transitions going to one of `exceptions`.
    pub fn on_transition_from_except_to<I>(
        &mut self,
        from: S,
        exceptions: I,
        actions: TransitionActions,
    ) where
        I: IntoIterator<Item = S>,
    {
        if self.register_actions((Some(from), None), actions) {
            for to in exceptions {
                if !self.actions.except_to(from, to) {
                    self.warn_duplicate_exception(Some(from), Some(to), "transition actions");
                }
            }
        }
    }

    fn register_actions(&mut self, key: Key<S>, actions: TransitionActions) -> bool {
        if !self.actions.insert(key, actions) {
            self.warn_duplicate(key, "transition actions");
            return false;
        }
        self.diagnostics.debug(|| {
            format!(
                "Registered transition actions {} -> {}",
                endpoint_name(key.0),
                endpoint_name(key.1)
            )
        });
        true
    }

    /// Run `action` every tick while the machine is in `state`.
    ///
    /// `gravity` decides where the constant bias enters the velocity and how
    /// triggers read motion while in this state. Only one frame action may be
    /// registered per state.
    pub fn add_frame_action(
        &mut self,
        state: S,
        gravity: GravityType,
        action: FrameAction,
    ) -> Result<(), BuildError> {
        if self.frame_actions.contains_key(&state) {
            return Err(BuildError::DuplicateFrameAction {
                state: state.name().to_string(),
            });
        }
        self.frame_actions.insert(state, (gravity, action));
        self.diagnostics
            .debug(|| format!("Registered frame action for {} ({:?})", state.name(), gravity));
        Ok(())
    }

    /// Request `from -> to` whenever `trigger` holds while in `from`.
    ///
    /// Dropped with a warning if the edge is not in the table.
    pub fn add_trigger<C: Condition + 'static>(&mut self, from: S, to: S, trigger: C) {
        if !self.table.has_edge(from, to) {
            self.diagnostics.warn(|| {
                format!(
                    "Ignoring trigger for {} -> {}: no such edge in the transition table",
                    from.name(),
                    to.name()
                )
            });
            return;
        }
        self.register_trigger((Some(from), Some(to)), Box::new(trigger));
    }

    /// Request a move to `to` whenever `trigger` holds, from any state that
    /// can reach it.
    pub fn add_trigger_to<C: Condition + 'static>(&mut self, to: S, trigger: C) {
        self.register_trigger((None, Some(to)), Box::new(trigger));
    }

    /// Like [`add_trigger_to`](Self::add_trigger_to), but never while in one
    /// of `exceptions`.
    pub fn add_trigger_to_except_from<C, I>(&mut self, to: S, exceptions: I, trigger: C)
    where
        C: Condition + 'static,
        I: IntoIterator<Item = S>,
    {
        if self.register_trigger((None, Some(to)), Box::new(trigger)) {
            for from in exceptions {
                if !self.triggers.except_from(to, from) {
                    self.warn_duplicate_exception(Some(from), Some(to), "trigger");
                }
            }
        }
    }

    fn register_trigger(&mut self, key: Key<S>, trigger: BoxedCondition) -> bool {
        if self.triggers.contains(&key) {
            self.warn_duplicate(key, "trigger");
            return false;
        }
        self.triggers.insert(key, trigger);
        self.diagnostics.debug(|| {
            format!(
                "Registered trigger {} -> {}",
                endpoint_name(key.0),
                endpoint_name(key.1)
            )
        });
        true
    }

    fn warn_duplicate(&self, key: Key<S>, what: &str) {
        self.diagnostics.warn(|| {
            format!(
                "Ignoring duplicate {} for {} -> {}",
                what,
                endpoint_name(key.0),
                endpoint_name(key.1)
            )
        });
    }

    fn warn_duplicate_exception(&self, from: Option<S>, to: Option<S>, what: &str) {
        self.diagnostics.warn(|| {
            format!(
                "Ignoring duplicate {} exception {} -> {}",
                what,
                endpoint_name(from),
                endpoint_name(to)
            )
        });
    }

    /// Advance the machine by one simulation tick.
    ///
    /// Runs the current state's frame action, then evaluates every trigger
    /// registered from the current state or from any state. If exactly one
    /// destination is requested the transition is executed; if several are,
    /// nothing happens and the ambiguity is reported.
    ///
    /// Returns the velocity after the frame action and any transition actions.
    pub fn update(
        &mut self,
        positioning: Option<Positioning>,
        input: Option<&dyn Fn(InputAction) -> bool>,
        velocity: Option<Vec2>,
        delta: f32,
    ) -> Option<Vec2> {
        let (gravity, velocity) = self.run_frame_action(velocity, delta);

        let ctx = TriggerContext {
            positioning,
            input,
            velocity,
            gravity,
            gravity_bias: self.config.gravity_bias,
            epsilon: self.config.motion_epsilon,
        };
        let destinations = self.fired_destinations(&ctx);

        match destinations.as_slice() {
            [] => velocity,
            [to] => self.follow(*to, velocity),
            _ => {
                self.diagnostics.warn(|| {
                    let names: Vec<&str> = destinations.iter().map(|s| s.name()).collect();
                    format!(
                        "Ambiguous triggers in {}: {} all fired, staying put",
                        self.current.name(),
                        names.join(", ")
                    )
                });
                velocity
            }
        }
    }

    fn run_frame_action(&mut self, velocity: Option<Vec2>, delta: f32) -> (GravityType, Option<Vec2>) {
        let bias = self.config.gravity_bias;
        match self.frame_actions.get_mut(&self.current) {
            Some((gravity, action)) => {
                let gravity = *gravity;
                let velocity = action.execute(gravity, bias, velocity, delta);
                self.diagnostics.trace(|| {
                    format!(
                        "Frame action for {} ({:?}) -> {:?}",
                        self.current.name(),
                        gravity,
                        velocity
                    )
                });
                (gravity, velocity)
            }
            None => (GravityType::None, velocity),
        }
    }

    /// Distinct destinations whose triggers hold this tick.
    fn fired_destinations(&self, ctx: &TriggerContext<'_>) -> Vec<S> {
        let mut destinations: Vec<S> = Vec::new();
        for ((from, to), trigger) in self.triggers.iter() {
            let Some(to) = *to else { continue };
            let applies = match from {
                Some(from) => *from == self.current,
                None => !self.triggers.is_excepted(&(None, Some(to)), self.current, to),
            };
            if !applies || to == self.current || !self.can_reach(to) {
                continue;
            }
            if trigger.evaluate(ctx) {
                self.diagnostics.debug(|| {
                    format!(
                        "Trigger {} -> {} fired in {}",
                        endpoint_name(*from),
                        to.name(),
                        self.current.name()
                    )
                });
                if !destinations.contains(&to) {
                    destinations.push(to);
                }
            }
        }
        destinations
    }

    /// Whether `to` can be entered from the current state by some transition.
    fn can_reach(&self, to: S) -> bool {
        self.pop_target() == Some(to) || self.table.has_edge(self.current, to)
    }

    /// Execute whichever transition kind leads to `to`.
    ///
    /// A destination already on the stack, or the parent itself, is entered
    /// with a plain `to` so cycles through reversible states cannot grow the
    /// stack.
    fn follow(&mut self, to: S, velocity: Option<Vec2>) -> Option<Vec2> {
        if self.pop_target() == Some(to) {
            self.pop(velocity)
        } else if to == self.parent || self.children.contains(&to) {
            self.to(to, velocity)
        } else if self.table.is_reversible(self.current, to) {
            self.push(to, velocity)
        } else {
            self.to(to, velocity)
        }
    }

    /// One-way transition to `to`, clearing the child stack.
    ///
    /// Valid only if `current -> to` is an edge and `to` differs from the
    /// current state; otherwise nothing happens and a warning is reported.
    pub fn to(&mut self, to: S, velocity: Option<Vec2>) -> Option<Vec2> {
        let from = self.current;
        if to == from || !self.table.has_edge(from, to) {
            self.diagnostics.warn(|| {
                format!("Invalid transition {} -> {}", from.name(), to.name())
            });
            return velocity;
        }

        self.children.clear();
        self.parent = to;
        let velocity = self.run_transition_actions(from, to, velocity);
        self.enter(from, to, TransitionKind::To);
        velocity
    }

    /// Enter `to` as a child state that can later be popped.
    ///
    /// Valid only if both `current -> to` and `to -> current` are edges.
    pub fn push(&mut self, to: S, velocity: Option<Vec2>) -> Option<Vec2> {
        let from = self.current;
        if !self.table.is_reversible(from, to) {
            self.diagnostics.warn(|| {
                format!(
                    "Invalid push {} -> {}: transition is not reversible",
                    from.name(),
                    to.name()
                )
            });
            return velocity;
        }

        if self.children.last() != Some(&to) {
            self.children.push(to);
        }
        let velocity = self.run_transition_actions(from, to, velocity);
        self.enter(from, to, TransitionKind::Push);
        velocity
    }

    /// Leave the current child state, returning to the state it was pushed
    /// from.
    ///
    /// Valid only if the current state is the top of the child stack.
    pub fn pop(&mut self, velocity: Option<Vec2>) -> Option<Vec2> {
        let from = self.current;
        let Some(to) = self.pop_target() else {
            self.diagnostics
                .warn(|| format!("Invalid pop from {}: not a pushed child state", from.name()));
            return velocity;
        };

        let velocity = self.run_transition_actions(from, to, velocity);
        self.children.pop();
        self.enter(from, to, TransitionKind::Pop);
        velocity
    }

    /// [`to`](Self::to) if `condition` holds, else return `velocity` unchanged.
    pub fn to_if(&mut self, condition: bool, to: S, velocity: Option<Vec2>) -> Option<Vec2> {
        if condition {
            self.to(to, velocity)
        } else {
            velocity
        }
    }

    /// [`push`](Self::push) if `condition` holds, else return `velocity` unchanged.
    pub fn push_if(&mut self, condition: bool, to: S, velocity: Option<Vec2>) -> Option<Vec2> {
        if condition {
            self.push(to, velocity)
        } else {
            velocity
        }
    }

    /// [`pop`](Self::pop) if `condition` holds, else return `velocity` unchanged.
    pub fn pop_if(&mut self, condition: bool, velocity: Option<Vec2>) -> Option<Vec2> {
        if condition {
            self.pop(velocity)
        } else {
            velocity
        }
    }

    /// Force the machine back to its initial state and clear the child stack.
    ///
    /// With [`ResetMode::ExecuteTransitionActions`], the actions registered
    /// for `current -> initial` run first, provided that edge exists. The
    /// reset itself always succeeds.
    pub fn reset(&mut self, mode: ResetMode) {
        let from = self.current;
        let to = self.initial;

        if mode == ResetMode::ExecuteTransitionActions {
            if self.table.has_edge(from, to) {
                self.run_transition_actions(from, to, None);
            } else {
                self.diagnostics.debug(|| {
                    format!(
                        "Reset from {}: no edge to {}, skipping transition actions",
                        from.name(),
                        to.name()
                    )
                });
            }
        }

        self.children.clear();
        self.parent = to;
        self.enter(from, to, TransitionKind::Reset);
    }

    /// Destination of a pop: the next-older child, or the parent if the
    /// current state is the only child.
    fn pop_target(&self) -> Option<S> {
        match self.children.as_slice() {
            [.., below, top] if *top == self.current => Some(*below),
            [top] if *top == self.current => Some(self.parent),
            _ => None,
        }
    }

    fn run_transition_actions(&mut self, from: S, to: S, velocity: Option<Vec2>) -> Option<Vec2> {
        let mut velocity = velocity;
        for key in self.actions.matching(from, to) {
            if let Some(actions) = self.actions.get_mut(&key) {
                velocity = actions.execute(velocity);
            }
        }
        velocity
    }

    fn enter(&mut self, from: S, to: S, kind: TransitionKind) {
        self.current = to;
        self.history.record(from, to, kind);
        self.diagnostics.info(|| {
            format!(
                "{:?} {} -> {} (stack: {:?})",
                kind,
                from.name(),
                to.name(),
                self.children
            )
        });
    }
}

impl<S: State> std::fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("initial", &self.initial)
            .field("actions", &self.actions.len())
            .field("triggers", &self.triggers.len())
            .field("frame_actions", &self.frame_actions.len())
            .finish()
    }
}
