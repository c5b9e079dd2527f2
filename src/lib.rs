//! Lambda handlers for the English coach API.
//!
//! Every binary under `src/bin` wires one [`capabilities::Capability`] into
//! the shared dispatch pipeline in [`handler`].

pub mod capabilities;
pub mod config;
pub mod context;
pub mod credentials;
pub mod handler;
pub mod http;
pub mod models;
pub mod schema;
