//! Error types for project domain validation and parsing.

use crate::naming::NameError;
use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is invalid.
    #[error("invalid project name: {0}")]
    InvalidProjectName(NameError),

    /// The task title is invalid.
    #[error("invalid task title: {0}")]
    InvalidTaskTitle(NameError),
}

/// Error returned while parsing project statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
