//! User aggregate root.

use super::{CredentialHash, EmailAddress, UserId, UserRole, UserStatus, Username};
use crate::rules::{Actor, RuleViolation, ensure_transition};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    credential_hash: CredentialHash,
    role: UserRole,
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted credential hash.
    pub credential_hash: CredentialHash,
    /// Persisted system role.
    pub role: UserRole,
    /// Persisted account status.
    pub status: UserStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user.
    #[must_use]
    pub fn new(
        username: Username,
        email: EmailAddress,
        credential_hash: CredentialHash,
        role: UserRole,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            username,
            email,
            credential_hash,
            role,
            status: UserStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            credential_hash: data.credential_hash,
            role: data.role,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored credential hash.
    #[must_use]
    pub const fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }

    /// Returns the system role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the account status.
    #[must_use]
    pub const fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns `true` when the account is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns this user as the acting party of an operation.
    #[must_use]
    pub const fn as_actor(&self) -> Actor {
        Actor::new(self.id, self.role, self.status)
    }

    /// Changes the system role. Setting the current role is a no-op.
    pub fn change_role(&mut self, role: UserRole, clock: &impl Clock) {
        if self.role == role {
            return;
        }
        self.role = role;
        self.touch(clock);
    }

    /// Moves the account to `target` status.
    ///
    /// Moving to the current status is a no-op and leaves `updated_at`
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::InvalidTransition`] when the account status
    /// graph does not permit the move.
    pub fn transition_to(
        &mut self,
        target: UserStatus,
        clock: &impl Clock,
    ) -> Result<(), RuleViolation> {
        ensure_transition(self.status, target)?;
        if self.status != target {
            self.status = target;
            self.touch(clock);
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
