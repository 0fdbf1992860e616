//! Adapter implementations for sprint board ports.

pub mod memory;
pub mod postgres;
