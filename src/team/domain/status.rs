//! Team lifecycle status.

use super::ParseTeamStatusError;
use crate::rules::{EntityKind, LifecycleStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    /// The team is operating and accepts members and projects.
    Active,
    /// The team is dormant but can be reactivated.
    Inactive,
    /// The team is retired permanently.
    Archived,
}

impl TeamStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Archived];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Archived => "archived",
        }
    }
}

impl LifecycleStatus for TeamStatus {
    const ENTITY: EntityKind = EntityKind::Team;

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Inactive, Self::Archived],
            Self::Inactive => &[Self::Active, Self::Archived],
            Self::Archived => &[],
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TeamStatus {
    type Error = ParseTeamStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseTeamStatusError(value.to_owned())),
        }
    }
}
