//! Sprint planning and the task status machine.
//!
//! Sprints belong to a project and are numbered from 1. Tasks enter a sprint
//! only while it is open and then move between pending, review and done in
//! any direction.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
