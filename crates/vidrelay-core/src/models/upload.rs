use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Visibility;

/// Outcome of one successfully relayed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub ok: bool,
    /// Original filename, echoed for correlation
    pub file: String,
    /// Title actually submitted to the remote host
    pub title: String,
    pub privacy: Visibility,
    /// Identifier assigned by the remote host
    pub video_id: String,
}

impl UploadResult {
    pub fn new(file: String, title: String, privacy: Visibility, video_id: String) -> Self {
        Self {
            ok: true,
            file,
            title,
            privacy,
            video_id,
        }
    }
}

/// Body of a successful `POST /api/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub ok: bool,
    pub count: usize,
    pub results: Vec<UploadResult>,
}

impl UploadResponse {
    pub fn new(results: Vec<UploadResult>) -> Self {
        Self {
            ok: true,
            count: results.len(),
            results,
        }
    }
}

/// Body of `GET /api/upload`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadRouteStatus {
    pub ok: bool,
    pub msg: String,
}

impl UploadRouteStatus {
    pub fn alive() -> Self {
        Self {
            ok: true,
            msg: "Upload route is alive. Use POST.".to_string(),
        }
    }
}
