//! Domain model for user accounts.
//!
//! Users carry a system role that places them in the privilege hierarchy and
//! an account status that gates whether they may act or receive work.

mod error;
mod ids;
mod profile;
mod role;
mod status;
mod user;

pub use error::{ParseUserRoleError, ParseUserStatusError, UserDomainError};
pub use ids::UserId;
pub use profile::{CredentialHash, EmailAddress, Username};
pub use role::UserRole;
pub use status::UserStatus;
pub use user::{PersistedUserData, User};
