//! Vidrelay API Library
//!
//! This crate provides the HTTP handlers, middleware, and application setup
//! for relaying browser video uploads to the remote video host.

mod api_doc;
mod handlers;
mod telemetry;

pub mod auth;
pub mod constants;
pub mod error;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{FilePayload, SpoolConfig, UploadOrchestrator, UploadRequest};
pub use state::AppState;
