//! Step definitions for team membership scenarios.

mod given;
mod then;
mod when;
pub mod world;
