//! API constants

/// The single upload endpoint (GET for liveness, POST for uploads).
pub const UPLOAD_ROUTE: &str = "/api/upload";

/// Multipart field carrying the video files (repeatable).
pub const FILES_FIELD: &str = "files";
/// Multipart field carrying the optional title override.
pub const TITLE_FIELD: &str = "title";
/// Multipart field carrying the optional visibility.
pub const PRIVACY_FIELD: &str = "privacy";

/// Media type forwarded when a file part declares none.
pub const DEFAULT_MEDIA_TYPE: &str = "video/mp4";
