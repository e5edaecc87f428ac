//! Validated display names shared by teams, projects and tasks.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default upper bound on name length, in characters.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 200;

/// Errors returned while validating a [`Name`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// The value is empty after trimming.
    #[error("name must not be empty")]
    Empty,

    /// The value exceeds the configured character limit.
    #[error("name is {length} characters long, limit is {max}")]
    TooLong {
        /// Length of the trimmed value in characters.
        length: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Trimmed, non-empty, length-bounded name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Validates a name against [`DEFAULT_MAX_NAME_LENGTH`].
    ///
    /// # Errors
    ///
    /// Returns [`NameError`] when the trimmed value is empty or too long.
    pub fn new(value: impl Into<String>) -> Result<Self, NameError> {
        Self::with_limit(value, DEFAULT_MAX_NAME_LENGTH)
    }

    /// Validates a name against an explicit character limit.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::Empty`] when the trimmed value is empty, or
    /// [`NameError::TooLong`] when it has more than `max` characters.
    pub fn with_limit(value: impl Into<String>, max: usize) -> Result<Self, NameError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > max {
            return Err(NameError::TooLong { length, max });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes an optional free-text description, dropping blank values.
#[must_use]
pub fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
