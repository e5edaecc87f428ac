//! Taskhive: domain rules for team-based project management.
//!
//! This crate models users, teams, projects and tasks, and enforces the
//! business rules that govern them: lifecycle transitions, role-based
//! authorization and cross-aggregate consistency.
//!
//! # Architecture
//!
//! Taskhive follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and event delivery
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//! - **Services**: Orchestration that loads aggregates, evaluates rules,
//!   persists changes and publishes events
//!
//! # Modules
//!
//! - [`rules`]: Transition graphs, authorization and consistency rules
//! - [`user`]: User accounts and system roles
//! - [`team`]: Teams and membership
//! - [`project`]: Projects, tasks and subtasks
//! - [`events`]: Domain events raised by committed changes
//! - [`config`]: Business policy limits
//! - [`naming`]: Validated display names

pub mod config;
pub mod events;
pub mod naming;
pub mod project;
pub mod rules;
pub mod team;
pub mod user;
