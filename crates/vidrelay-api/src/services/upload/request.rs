use axum::extract::Multipart;
use vidrelay_core::{title, AppError, BearerToken, Visibility};

use super::payload::{drain_field, multipart_error, read_file_field, FilePayload, SpoolConfig};
use crate::constants::{FILES_FIELD, PRIVACY_FIELD, TITLE_FIELD};

pub const NO_FILES_MESSAGE: &str = "No files received (field name must be 'files')";

/// A validated upload batch.
#[derive(Debug)]
pub struct UploadRequest {
    pub token: BearerToken,
    /// Trimmed, non-empty title applied to every file.
    pub title_override: Option<String>,
    pub visibility: Visibility,
    pub files: Vec<FilePayload>,
}

impl UploadRequest {
    /// Walk the multipart body and classify its parts.
    ///
    /// `files` parts are kept in order with zero-byte parts dropped. The first
    /// `title` and `privacy` fields win. Anything else is read and discarded.
    pub async fn from_multipart(
        token: BearerToken,
        mut multipart: Multipart,
        spool: &SpoolConfig,
    ) -> Result<Self, AppError> {
        let mut files = Vec::new();
        let mut raw_title: Option<String> = None;
        let mut raw_privacy: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                FILES_FIELD => {
                    let payload = read_file_field(field, spool).await?;
                    if payload.is_empty() {
                        tracing::debug!(file_name = ?payload.file_name(), "Skipping empty file part");
                        continue;
                    }
                    files.push(payload);
                }
                TITLE_FIELD if raw_title.is_none() => {
                    raw_title = Some(field.text().await.map_err(multipart_error)?);
                }
                PRIVACY_FIELD if raw_privacy.is_none() => {
                    raw_privacy = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => drain_field(field).await?,
            }
        }

        Self::new(token, raw_title.as_deref(), raw_privacy.as_deref(), files)
    }

    /// Apply the batch rules to already-extracted values.
    pub fn new(
        token: BearerToken,
        raw_title: Option<&str>,
        raw_privacy: Option<&str>,
        files: Vec<FilePayload>,
    ) -> Result<Self, AppError> {
        let files: Vec<FilePayload> = files.into_iter().filter(|f| !f.is_empty()).collect();
        if files.is_empty() {
            return Err(AppError::InvalidInput(NO_FILES_MESSAGE.to_string()));
        }

        Ok(Self {
            token,
            title_override: title::normalize_override(raw_title),
            visibility: Visibility::parse(raw_privacy),
            files,
        })
    }
}
