//! Per-machine tuning.

use crate::builder::BuildError;
use crate::diagnostics::LogLevel;
use serde::{Deserialize, Serialize};

/// Settings a machine is built with.
///
/// Every field has a default, so configuration files only need to mention
/// what they change:
///
/// ```rust
/// use actor_fsm::{LogLevel, MachineConfig};
///
/// let config = MachineConfig::from_json(r#"{ "name": "player", "log_level": "info" }"#).unwrap();
/// assert_eq!(config.name, "player");
/// assert_eq!(config.log_level, LogLevel::Info);
/// assert_eq!(config.history_capacity, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Label used in diagnostics.
    pub name: String,
    pub log_level: LogLevel,
    /// Constant vertical bias added by frame actions that apply gravity.
    pub gravity_bias: f32,
    /// Speeds at or below this magnitude do not count as motion.
    pub motion_epsilon: f32,
    /// Number of transitions kept in the history. Zero disables it.
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: "state-machine".to_string(),
            log_level: LogLevel::Warn,
            gravity_bias: 20.0,
            motion_epsilon: 0.001,
            history_capacity: 32,
        }
    }
}

impl MachineConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        serde_json::from_str(json).map_err(|e| BuildError::Config(e.to_string()))
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_gravity_bias(mut self, bias: f32) -> Self {
        self.gravity_bias = bias;
        self
    }

    pub fn with_motion_epsilon(mut self, epsilon: f32) -> Self {
        self.motion_epsilon = epsilon;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
