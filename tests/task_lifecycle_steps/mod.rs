//! Step definitions for task lifecycle scenarios.

mod given;
mod when;
pub mod world;
