//! Engine configuration.
//!
//! ```
//! use synergysphere::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.completion_thresholds, vec![25, 50, 75, 100]);
//!
//! let loaded = EngineConfig::from_json(r#"{ "completion_thresholds": [50, 100] }"#)?;
//! assert_eq!(loaded.completion_thresholds, vec![50, 100]);
//! # Ok::<(), synergysphere::config::ConfigError>(())
//! ```

use crate::task::domain::TransitionPolicy;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Tunable behaviour of the state engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which status moves `change_status` accepts.
    pub transitions: TransitionPolicy,
    /// Progress percentages that trigger a `project_update` notification
    /// when a project rises past them.
    pub completion_thresholds: Vec<u8>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transitions: TransitionPolicy::FreeForm,
            completion_thresholds: vec![25, 50, 75, 100],
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid engine configuration: {0}")]
    Parse(Arc<serde_json::Error>),

    /// A completion threshold lies outside `1..=100`.
    #[error("completion threshold {0} must be between 1 and 100")]
    InvalidThreshold(u8),
}

impl EngineConfig {
    /// Configuration enforcing the forward-only workflow.
    #[must_use]
    pub fn strict_workflow() -> Self {
        Self {
            transitions: TransitionPolicy::strict_workflow(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidThreshold`] for out-of-range thresholds.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|err| ConfigError::Parse(Arc::new(err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold lies within `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] for the first offending
    /// value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .completion_thresholds
            .iter()
            .find(|threshold| !(1..=100).contains(*threshold))
        {
            Some(threshold) => Err(ConfigError::InvalidThreshold(*threshold)),
            None => Ok(()),
        }
    }

    /// Returns the highest threshold `t` with `before < t <= after`.
    #[must_use]
    pub fn highest_crossed_threshold(&self, before: u8, after: u8) -> Option<u8> {
        self.completion_thresholds
            .iter()
            .copied()
            .filter(|threshold| before < *threshold && *threshold <= after)
            .max()
    }
}
