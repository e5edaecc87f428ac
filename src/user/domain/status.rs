//! Account status for users.

use super::ParseUserStatusError;
use crate::rules::{EntityKind, LifecycleStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a user account may act and receive work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// The account is usable.
    Active,
    /// The account has been deactivated.
    Inactive,
}

impl UserStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl LifecycleStatus for UserStatus {
    const ENTITY: EntityKind = EntityKind::User;

    fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Inactive],
            Self::Inactive => &[Self::Active],
        }
    }

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserStatus {
    type Error = ParseUserStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseUserStatusError(value.to_owned())),
        }
    }
}
