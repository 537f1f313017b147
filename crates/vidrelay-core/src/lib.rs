//! Vidrelay Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! video-host abstraction shared by the remote client and the HTTP API.

pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod title;

// Re-export commonly used types
pub use config::Config;
pub use error::{resolve_remote_status, AppError, ErrorMetadata, LogLevel, RemoteError};
pub use host::{
    BearerToken, InsertedVideo, MediaBody, MediaStream, VideoHost, VideoMetadata, VideoSession,
};
pub use models::{UploadResponse, UploadResult, UploadRouteStatus, Visibility};
