//! Upload relay: multipart parsing, validation and the sequential remote loop.

pub mod orchestrator;
pub mod payload;
pub mod request;

pub use orchestrator::UploadOrchestrator;
pub use payload::{FilePayload, ReadFailure, SpoolConfig};
pub use request::{UploadRequest, NO_FILES_MESSAGE};
