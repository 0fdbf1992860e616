//! Cohort: backend for a student project and mentorship platform.
//!
//! The crate exposes a JSON-over-HTTP API for sign-in sessions, projects,
//! membership, applications, ratings and sprint boards.
//!
//! # Architecture
//!
//! Cohort follows hexagonal architecture principles:
//!
//! - **Domain**: validated value types and aggregates with no
//!   infrastructure dependencies
//! - **Ports**: async traits for identity verification and storage
//! - **Adapters**: Firebase, `PostgreSQL` (Diesel) and in-memory
//!   implementations of the ports
//! - **Services**: use cases that orchestrate domain and ports
//!
//! # Modules
//!
//! - [`session`]: token-verifying handshake and cookie revalidation
//! - [`sprint`]: sprints, tasks and the task status machine
//! - [`project`]: projects, membership, applications, ratings and profiles
//! - [`http`]: routes, session gate and error mapping
//! - [`config`], [`telemetry`], [`bootstrap`]: process wiring

pub mod bootstrap;
pub mod config;
pub mod http;
pub mod ids;
pub mod persistence;
pub mod project;
pub mod session;
pub mod sprint;
pub mod telemetry;

#[cfg(test)]
mod test_support;
