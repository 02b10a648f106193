//! Taskdesk web application library.
//!
//! Admins create employee accounts and assign tasks; employees work through
//! the tasks assigned to them; everyone signed in can update status and
//! comment. The binary in `main.rs` wires configuration, storage, and
//! observability around [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
pub use state::AppState;
