//! Policy configuration for business rules.
//!
//! Business-policy constants such as the team member cap are configuration
//! values rather than hard-coded rules. [`PolicyConfig`] carries them, with
//! defaults matching the documented policy.
//!
//! # Environment Variables
//!
//! - `TASKHIVE_TEAM_CAPACITY`: maximum members per team (default: 50)
//! - `TASKHIVE_MAX_NAME_LENGTH`: maximum name/title length (default: 200)

use crate::naming::DEFAULT_MAX_NAME_LENGTH;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum number of members in a team.
pub const DEFAULT_TEAM_CAPACITY: usize = 50;

/// Environment variable overriding [`PolicyConfig::team_capacity`].
pub const TEAM_CAPACITY_ENV: &str = "TASKHIVE_TEAM_CAPACITY";

/// Environment variable overriding [`PolicyConfig::max_name_length`].
pub const MAX_NAME_LENGTH_ENV: &str = "TASKHIVE_MAX_NAME_LENGTH";

/// Errors returned while loading policy configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyConfigError {
    /// A variable holds a value that is not a positive integer.
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidValue {
        /// Name of the offending variable.
        key: &'static str,
        /// Raw value as read.
        value: String,
    },
}

/// Business-policy limits applied by aggregates and services.
///
/// Deserialization applies the same positive-integer check as
/// [`PolicyConfig::from_lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyConfigFields")]
pub struct PolicyConfig {
    /// Maximum number of members a team may hold.
    pub team_capacity: usize,
    /// Maximum length, in characters, of team, project and task names.
    pub max_name_length: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            team_capacity: DEFAULT_TEAM_CAPACITY,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

/// Field values as read by serde, before validation.
#[derive(Deserialize)]
#[serde(default)]
struct PolicyConfigFields {
    team_capacity: usize,
    max_name_length: usize,
}

impl Default for PolicyConfigFields {
    fn default() -> Self {
        let defaults = PolicyConfig::default();
        Self {
            team_capacity: defaults.team_capacity,
            max_name_length: defaults.max_name_length,
        }
    }
}

impl TryFrom<PolicyConfigFields> for PolicyConfig {
    type Error = PolicyConfigError;

    fn try_from(fields: PolicyConfigFields) -> Result<Self, Self::Error> {
        Ok(Self {
            team_capacity: ensure_positive("team_capacity", fields.team_capacity)?,
            max_name_length: ensure_positive("max_name_length", fields.max_name_length)?,
        })
    }
}

impl PolicyConfig {
    /// Creates a tighter policy suited to small deployments.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            team_capacity: 20,
            max_name_length: 100,
        }
    }

    /// Sets the team member cap.
    #[must_use]
    pub const fn with_team_capacity(mut self, capacity: usize) -> Self {
        self.team_capacity = capacity;
        self
    }

    /// Loads configuration from process environment variables, falling back
    /// to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyConfigError::InvalidValue`] when a variable is set to
    /// something other than a positive integer.
    pub fn from_env() -> Result<Self, PolicyConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyConfigError::InvalidValue`] when a present value is
    /// not a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PolicyConfigError> {
        let defaults = Self::default();
        let team_capacity = read_positive(&lookup, TEAM_CAPACITY_ENV)?;
        let max_name_length = read_positive(&lookup, MAX_NAME_LENGTH_ENV)?;

        Ok(Self {
            team_capacity: team_capacity.unwrap_or(defaults.team_capacity),
            max_name_length: max_name_length.unwrap_or(defaults.max_name_length),
        })
    }
}

fn read_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<usize>, PolicyConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    let Ok(value) = raw.trim().parse::<usize>() else {
        return Err(PolicyConfigError::InvalidValue { key, value: raw });
    };
    ensure_positive(key, value).map(Some)
}

fn ensure_positive(key: &'static str, value: usize) -> Result<usize, PolicyConfigError> {
    if value == 0 {
        return Err(PolicyConfigError::InvalidValue {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}
