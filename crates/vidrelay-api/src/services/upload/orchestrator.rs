use vidrelay_core::{title, AppError, RemoteError, UploadResult, VideoHost, VideoMetadata};

use super::payload::ReadFailure;
use super::request::UploadRequest;

/// Relays a validated batch to the video host, one file at a time.
pub struct UploadOrchestrator<'a> {
    host: &'a dyn VideoHost,
    category_id: Option<String>,
}

impl<'a> UploadOrchestrator<'a> {
    pub fn new(host: &'a dyn VideoHost, category_id: Option<String>) -> Self {
        Self { host, category_id }
    }

    /// Upload every file in submission order.
    ///
    /// One session is built from the request's token and reused for the
    /// whole batch. The first remote failure aborts the batch; videos already
    /// created are only reported in the logs.
    pub async fn run(&self, request: UploadRequest) -> Result<Vec<UploadResult>, AppError> {
        let UploadRequest {
            token,
            title_override,
            visibility,
            files,
        } = request;

        let session = self.host.authorize(&token);
        let total = files.len();
        let mut results: Vec<UploadResult> = Vec::with_capacity(total);

        for (index, payload) in files.into_iter().enumerate() {
            let file_name = payload.file_name().unwrap_or_default().to_string();
            let video_title = title::resolve_title(title_override.as_deref(), payload.file_name());
            let metadata = VideoMetadata::new(video_title.clone(), visibility)
                .with_category(self.category_id.clone());

            tracing::debug!(
                index,
                total,
                file_name = %file_name,
                size = payload.size(),
                spooled = payload.is_spooled(),
                "Uploading file"
            );

            let read_failure = ReadFailure::default();
            let media = read_failure.watch(payload.open_media().await?);

            let inserted = match session.insert_video(&metadata, media).await {
                Ok(inserted) => inserted,
                Err(err) => {
                    if !results.is_empty() {
                        let uploaded: Vec<&str> =
                            results.iter().map(|r| r.video_id.as_str()).collect();
                        tracing::warn!(
                            failed_index = index,
                            total,
                            uploaded_video_ids = ?uploaded,
                            "Batch aborted after partial upload"
                        );
                    }
                    return Err(upload_failure(err, &read_failure));
                }
            };

            tracing::info!(
                index,
                total,
                file_name = %file_name,
                video_id = %inserted.id,
                privacy = %visibility,
                "Video uploaded"
            );

            results.push(UploadResult::new(
                file_name,
                video_title,
                visibility,
                inserted.id,
            ));
        }

        Ok(results)
    }
}

/// A remote error caused by our own payload failing to read is an internal error.
fn upload_failure(err: RemoteError, read_failure: &ReadFailure) -> AppError {
    match read_failure.message() {
        Some(message) => {
            tracing::error!(remote_error = %err, read_error = message, "Local payload read failed");
            AppError::Internal(format!("Failed to read upload payload: {}", message))
        }
        None => AppError::Remote(err),
    }
}
