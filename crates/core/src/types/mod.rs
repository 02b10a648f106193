//! Core types for Taskdesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod role;
pub mod status;

pub use id::*;
pub use role::Role;
pub use status::TaskStatus;
