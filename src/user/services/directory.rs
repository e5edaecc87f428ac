//! Service layer for user account registration and administration.

use crate::{
    events::{DomainEvent, EventEnvelope, EventPublisher, publish_committed},
    rules::{
        Actor, Operation, RuleViolation, ensure_can_grant_role, ensure_can_target,
        ensure_no_memberships, ensure_permitted,
    },
    team::ports::{TeamRepository, TeamRepositoryError},
    user::{
        domain::{
            CredentialHash, EmailAddress, User, UserDomainError, UserId, UserRole, UserStatus,
            Username,
        },
        ports::{UserRepository, UserRepositoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    actor_id: UserId,
    username: String,
    email: String,
    credential_hash: String,
    role: UserRole,
}

impl RegisterUserRequest {
    /// Creates a request for a [`UserRole::Developer`] account.
    #[must_use]
    pub fn new(
        actor_id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            actor_id,
            username: username.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
            role: UserRole::Developer,
        }
    }

    /// Sets the role granted to the new account.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Request payload for creating the first administrator of an empty
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAdminRequest {
    username: String,
    email: String,
    credential_hash: String,
}

impl BootstrapAdminRequest {
    /// Creates a bootstrap request.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            credential_hash: credential_hash.into(),
        }
    }
}

/// Request payload for changing a user's system role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRoleRequest {
    actor_id: UserId,
    user_id: UserId,
    role: UserRole,
}

impl ChangeRoleRequest {
    /// Creates a role change request.
    #[must_use]
    pub const fn new(actor_id: UserId, user_id: UserId, role: UserRole) -> Self {
        Self {
            actor_id,
            user_id,
            role,
        }
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// A business rule denied the operation.
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Team lookup failed.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),
    /// The acting user does not exist.
    #[error("acting user not found: {0}")]
    ActorNotFound(UserId),
    /// The targeted user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The directory already holds users.
    #[error("directory is not empty; bootstrap is only allowed once")]
    AlreadyBootstrapped,
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User account orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<R, T, E, C>
where
    R: UserRepository,
    T: TeamRepository,
    E: EventPublisher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    teams: Arc<T>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<R, T, E, C> UserDirectoryService<R, T, E, C>
where
    R: UserRepository,
    T: TeamRepository,
    E: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    ///
    /// `teams` is consulted before deleting accounts.
    #[must_use]
    pub const fn new(repository: Arc<R>, teams: Arc<T>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            repository,
            teams,
            events,
            clock,
        }
    }

    /// Creates the first administrator when the directory is empty.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::AlreadyBootstrapped`] when any user
    /// exists, or [`UserDirectoryError::Domain`] when input validation fails.
    pub async fn bootstrap_admin(&self, request: BootstrapAdminRequest) -> UserDirectoryResult<User> {
        if self.repository.count().await? > 0 {
            return Err(UserDirectoryError::AlreadyBootstrapped);
        }

        let user = User::new(
            Username::new(request.username)?,
            EmailAddress::new(request.email)?,
            CredentialHash::new(request.credential_hash)?,
            UserRole::Admin,
            &*self.clock,
        );
        self.repository.store(&user).await?;
        tracing::info!(user_id = %user.id(), "bootstrapped administrator account");
        self.publish(
            DomainEvent::UserRegistered {
                user_id: user.id(),
                role: user.role(),
            },
            user.id(),
        )
        .await;
        Ok(user)
    }

    /// Registers a new user account on behalf of an administrator.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Rule`] when the actor may not create
    /// users or grant the requested role, [`UserDirectoryError::Domain`] when
    /// input validation fails, or [`UserDirectoryError::Repository`] when the
    /// username is taken.
    pub async fn register_user(&self, request: RegisterUserRequest) -> UserDirectoryResult<User> {
        let RegisterUserRequest {
            actor_id,
            username,
            email,
            credential_hash,
            role,
        } = request;

        let actor = self.actor(actor_id).await?;
        authorize(|| {
            ensure_permitted(&actor, Operation::CreateUser)?;
            ensure_can_grant_role(&actor, role, Operation::CreateUser)
        })?;

        let user = User::new(
            Username::new(username)?,
            EmailAddress::new(email)?,
            CredentialHash::new(credential_hash)?,
            role,
            &*self.clock,
        );
        self.repository.store(&user).await?;
        tracing::info!(
            actor_id = %actor_id,
            user_id = %user.id(),
            role = %role,
            "registered user account"
        );
        self.publish(
            DomainEvent::UserRegistered {
                user_id: user.id(),
                role,
            },
            actor_id,
        )
        .await;
        Ok(user)
    }

    /// Changes another user's system role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Rule`] when the actor does not outrank
    /// the target or may not grant the role, or a not-found error when either
    /// user is missing.
    pub async fn change_role(&self, request: ChangeRoleRequest) -> UserDirectoryResult<User> {
        let actor = self.actor(request.actor_id).await?;
        let mut user = self.target(request.user_id).await?;
        let previous = user.role();
        authorize(|| {
            ensure_can_target(&actor, user.id(), previous, Operation::ModifyRole)?;
            ensure_can_grant_role(&actor, request.role, Operation::ModifyRole)
        })?;

        if previous == request.role {
            return Ok(user);
        }
        user.change_role(request.role, &*self.clock);
        self.repository.update(&user).await?;
        tracing::info!(
            actor_id = %actor.id(),
            user_id = %user.id(),
            from = %previous,
            to = %request.role,
            "changed user role"
        );
        self.publish(
            DomainEvent::UserRoleChanged {
                user_id: user.id(),
                from: previous,
                to: request.role,
            },
            actor.id(),
        )
        .await;
        Ok(user)
    }

    /// Deactivates another user's account.
    ///
    /// Existing task assignments are kept; the user can no longer act, join
    /// teams or receive new assignments.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Rule`] for self-deactivation or missing
    /// privileges, or a not-found error when either user is missing.
    pub async fn deactivate_user(
        &self,
        actor_id: UserId,
        user_id: UserId,
    ) -> UserDirectoryResult<User> {
        self.set_status(actor_id, user_id, UserStatus::Inactive, Operation::DeactivateUser)
            .await
    }

    /// Reactivates another user's account.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Rule`] when the actor lacks privileges,
    /// or a not-found error when either user is missing.
    pub async fn activate_user(
        &self,
        actor_id: UserId,
        user_id: UserId,
    ) -> UserDirectoryResult<User> {
        self.set_status(actor_id, user_id, UserStatus::Active, Operation::ActivateUser)
            .await
    }

    /// Deletes another user's account.
    ///
    /// The user must first be removed from every team. Member removal
    /// refuses members with unfinished tasks, so a deletable user holds no
    /// open assignments either.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Rule`] for self-deletion, missing
    /// privileges or remaining team memberships, or a not-found error when
    /// either user is missing.
    pub async fn delete_user(&self, actor_id: UserId, user_id: UserId) -> UserDirectoryResult<()> {
        let actor = self.actor(actor_id).await?;
        let user = self.target(user_id).await?;
        authorize(|| ensure_can_target(&actor, user.id(), user.role(), Operation::DeleteUser))?;
        let memberships = self.teams.find_by_member(user.id()).await?.len();
        authorize(|| ensure_no_memberships(user.id(), memberships))?;

        self.repository.remove(user.id()).await?;
        tracing::info!(actor_id = %actor_id, user_id = %user_id, "deleted user account");
        self.publish(DomainEvent::UserDeleted { user_id }, actor_id)
            .await;
        Ok(())
    }

    /// Retrieves a user by identifier.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, user_id: UserId) -> UserDirectoryResult<Option<User>> {
        Ok(self.repository.find_by_id(user_id).await?)
    }

    async fn set_status(
        &self,
        actor_id: UserId,
        user_id: UserId,
        status: UserStatus,
        operation: Operation,
    ) -> UserDirectoryResult<User> {
        let actor = self.actor(actor_id).await?;
        let mut user = self.target(user_id).await?;
        authorize(|| ensure_can_target(&actor, user.id(), user.role(), operation))?;

        if user.status() == status {
            return Ok(user);
        }
        authorize(|| user.transition_to(status, &*self.clock))?;
        self.repository.update(&user).await?;
        tracing::info!(
            actor_id = %actor_id,
            user_id = %user_id,
            status = %status,
            "changed user account status"
        );
        self.publish(DomainEvent::UserStatusChanged { user_id, status }, actor_id)
            .await;
        Ok(user)
    }

    async fn actor(&self, actor_id: UserId) -> UserDirectoryResult<Actor> {
        self.repository
            .find_by_id(actor_id)
            .await?
            .map(|user| user.as_actor())
            .ok_or(UserDirectoryError::ActorNotFound(actor_id))
    }

    async fn target(&self, user_id: UserId) -> UserDirectoryResult<User> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserDirectoryError::UserNotFound(user_id))
    }

    async fn publish(&self, event: DomainEvent, actor_id: UserId) {
        publish_committed(&*self.events, EventEnvelope::new(event, actor_id, &*self.clock)).await;
    }
}

/// Evaluates rule checks, logging any denial.
fn authorize(
    check: impl FnOnce() -> Result<(), RuleViolation>,
) -> Result<(), RuleViolation> {
    check().inspect_err(|violation| tracing::warn!(%violation, "user directory operation denied"))
}
