//! Team membership records.

use super::ParseTeamRoleError;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a member holds within a single team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Read-only participant.
    Viewer,
    /// Works on the team's tasks.
    Developer,
    /// Leads day-to-day work and manages membership.
    TeamLead,
    /// Manages the team's projects and membership.
    ProjectManager,
}

impl TeamRole {
    /// Returns `true` for roles allowed to manage the team's membership,
    /// status and task assignments.
    #[must_use]
    pub const fn can_manage_team(self) -> bool {
        matches!(self, Self::TeamLead | Self::ProjectManager)
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Developer => "developer",
            Self::TeamLead => "team_lead",
            Self::ProjectManager => "project_manager",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TeamRole {
    type Error = ParseTeamRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "viewer" => Ok(Self::Viewer),
            "developer" => Ok(Self::Developer),
            "team_lead" => Ok(Self::TeamLead),
            "project_manager" => Ok(Self::ProjectManager),
            _ => Err(ParseTeamRoleError(value.to_owned())),
        }
    }
}

/// A user's membership in a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    user_id: UserId,
    role: TeamRole,
    joined_at: DateTime<Utc>,
}

impl TeamMember {
    /// Creates a membership record.
    #[must_use]
    pub const fn new(user_id: UserId, role: TeamRole, joined_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            role,
            joined_at,
        }
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the member's role within the team.
    #[must_use]
    pub const fn role(&self) -> TeamRole {
        self.role
    }

    /// Returns when the user joined the team.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
