//! Adapter implementations for session ports.

pub mod firebase;
pub mod memory;
pub mod postgres;
