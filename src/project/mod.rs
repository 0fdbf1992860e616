//! Projects and the people around them.
//!
//! Owners create projects, students apply to join, owners promote members
//! to moderators, and outsiders rate finished work. User profiles live here
//! too because membership listings show display names.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
