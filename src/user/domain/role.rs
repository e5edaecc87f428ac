//! System-wide user roles and their privilege hierarchy.

use super::ParseUserRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// System role held by a user account.
///
/// Variants are declared from least to most privileged, so the derived
/// ordering matches the privilege hierarchy
/// `Viewer < Developer < ProjectManager < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Read-only access.
    Viewer,
    /// Works on tasks.
    Developer,
    /// Manages teams, projects and task assignment.
    ProjectManager,
    /// Full administrative control.
    Admin,
}

impl UserRole {
    /// All roles in ascending privilege order.
    pub const ALL: [Self; 4] = [
        Self::Viewer,
        Self::Developer,
        Self::ProjectManager,
        Self::Admin,
    ];

    /// Returns the numeric hierarchy level of the role.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Viewer => 1,
            Self::Developer => 2,
            Self::ProjectManager => 3,
            Self::Admin => 4,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Developer => "developer",
            Self::ProjectManager => "project_manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "viewer" => Ok(Self::Viewer),
            "developer" => Ok(Self::Developer),
            "project_manager" => Ok(Self::ProjectManager),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}
