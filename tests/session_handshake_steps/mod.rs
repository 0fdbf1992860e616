//! Step definitions for session handshake scenarios.

pub mod given;
pub mod then;
pub mod when;
