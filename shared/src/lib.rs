//! Re-exports the shared building blocks consumed by the scheduling services:
//! configuration handling, the workshop entity model, and the common error
//! type, so every binary pulls them from a single crate.

pub mod config;
pub mod dto;
pub mod error;
