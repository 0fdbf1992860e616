//! Session handshake and revalidation.
//!
//! A session is established by verifying an identity-provider token for a
//! claimed owner id, recording the owner's device fingerprint with a
//! timestamp, and handing the pair back to the client as cookies. Later
//! requests present both cookies and are accepted while the stored
//! fingerprint matches and the record is younger than three days. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
