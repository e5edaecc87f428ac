//! Error types for team domain validation and parsing.

use crate::naming::NameError;
use thiserror::Error;

/// Errors returned while constructing team domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The team name is invalid.
    #[error("invalid team name: {0}")]
    InvalidName(#[from] NameError),
}

/// Error returned while parsing team statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown team status: {0}")]
pub struct ParseTeamStatusError(pub String);

/// Error returned while parsing team roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown team role: {0}")]
pub struct ParseTeamRoleError(pub String);
