//! Application services for user accounts.

mod directory;

pub use directory::{
    BootstrapAdminRequest, ChangeRoleRequest, RegisterUserRequest, UserDirectoryError,
    UserDirectoryResult, UserDirectoryService,
};
