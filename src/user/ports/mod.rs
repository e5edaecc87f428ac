//! Port contracts for user account management.

pub mod repository;

#[cfg(test)]
pub use repository::MockUserRepository;
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
