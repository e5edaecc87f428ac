//! Domain rule engine.
//!
//! Pure, stateless functions evaluated by aggregates and services:
//!
//! - [`LifecycleStatus`] and [`ensure_transition`]: status transition graphs
//! - [`ensure_permitted`] and friends: role-based authorization
//! - [`ensure_assignable`] and friends: aggregate consistency rules
//!
//! Every rule returns `Ok(())` or a [`RuleViolation`]. Rules hold no state
//! and can be called from any number of concurrent requests.

mod authorization;
mod consistency;
mod error;
mod transition;

pub use authorization::{
    Actor, Operation, ensure_can_grant_role, ensure_can_target, ensure_permitted,
    ensure_team_privilege, has_sufficient_privileges, role_permits,
};
pub use consistency::{
    ensure_assignable, ensure_no_memberships, ensure_no_open_assignments,
    ensure_project_completable, ensure_project_open, ensure_task_open, ensure_team_active,
    ensure_team_capacity, ensure_user_active,
};
pub use error::{EntityKind, InvariantViolation, PrivilegeRequirement, RuleViolation};
pub use transition::{LifecycleStatus, ensure_transition};

#[cfg(test)]
mod tests;
