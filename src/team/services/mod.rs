//! Application services for teams.

mod membership;

pub use membership::{
    AddMemberRequest, CreateTeamRequest, RemoveMemberRequest, TeamMembershipService,
    TeamServiceError, TeamServiceResult,
};
