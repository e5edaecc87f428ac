//! In-memory adapters for team ports.

mod team;

pub use team::InMemoryTeamRepository;
