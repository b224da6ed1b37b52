//! Service layer for business logic
//!
//! Core engine operations, independent of the HTTP boundary: link
//! creation with collision handling, redirect resolution with click
//! accounting, and read-only statistics.

mod link_service;
mod stats_service;

pub use link_service::*;
pub use stats_service::*;
