//! Domain model for teams and their membership.
//!
//! A team owns a bounded collection of members. Membership changes go
//! through the [`Team`] aggregate so the capacity and activity invariants
//! are always checked together.

mod error;
mod ids;
mod member;
mod status;
mod team;

pub use error::{ParseTeamRoleError, ParseTeamStatusError, TeamDomainError};
pub use ids::TeamId;
pub use member::{TeamMember, TeamRole};
pub use status::TeamStatus;
pub use team::{PersistedTeamData, Team};
