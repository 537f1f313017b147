//! File parts of an upload request
//!
//! A `files` part is streamed to a temporary file while the multipart body is
//! parsed. When no temporary file can be created, or spooling is switched off,
//! the part is buffered in memory instead.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use vidrelay_core::{AppError, Config, MediaBody};

use crate::constants::DEFAULT_MEDIA_TYPE;

const SPOOL_PREFIX: &str = "vidrelay-";

/// Where and whether file parts are spooled to disk.
#[derive(Debug, Clone, Default)]
pub struct SpoolConfig {
    pub enabled: bool,
    pub dir: Option<PathBuf>,
}

impl SpoolConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.spool_enabled,
            dir: config.spool_dir.clone(),
        }
    }

    fn create_temp(&self) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SPOOL_PREFIX);
        match &self.dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

enum PayloadData {
    /// Deleted from disk when dropped.
    Spooled(NamedTempFile),
    Buffered(Bytes),
}

/// One received `files` part.
pub struct FilePayload {
    file_name: Option<String>,
    content_type: String,
    size: u64,
    data: PayloadData,
}

impl FilePayload {
    /// In-memory payload, mostly useful for tests.
    pub fn buffered(file_name: Option<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name,
            content_type: media_type_or_default(content_type),
            size: data.len() as u64,
            data: PayloadData::Buffered(data),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_spooled(&self) -> bool {
        matches!(self.data, PayloadData::Spooled(_))
    }

    /// Turn the payload into a media stream for the remote call.
    ///
    /// A spooled file is reopened asynchronously; the stream owns the temp
    /// path so the file is removed once the stream is dropped.
    pub async fn open_media(self) -> Result<MediaBody, AppError> {
        match self.data {
            PayloadData::Buffered(data) => Ok(MediaBody::from_bytes(self.content_type, data)),
            PayloadData::Spooled(temp) => {
                let temp_path = temp.into_temp_path();
                let file = tokio::fs::File::open(&temp_path).await?;
                let stream = ReaderStream::new(file)
                    .map(move |chunk| {
                        // Owning the temp path keeps the spool file until the stream is dropped.
                        let _spool_file = &temp_path;
                        chunk
                    })
                    .boxed();
                Ok(MediaBody::from_stream(
                    self.content_type,
                    Some(self.size),
                    stream,
                ))
            }
        }
    }
}

/// First local read error seen on a media stream.
///
/// The HTTP client reports a failing request body as a transport error; this
/// lets the caller tell a broken spool file apart from a network failure.
#[derive(Debug, Clone, Default)]
pub struct ReadFailure(Arc<OnceLock<String>>);

impl ReadFailure {
    /// Wrap `media` so that its first read error is recorded here.
    pub fn watch(&self, media: MediaBody) -> MediaBody {
        let slot = self.0.clone();
        let stream = media
            .stream
            .inspect_err(move |e| {
                let _ = slot.set(e.to_string());
            })
            .boxed();
        MediaBody::from_stream(media.content_type, media.content_length, stream)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get().map(String::as_str)
    }
}

impl std::fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePayload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .field("spooled", &self.is_spooled())
            .finish()
    }
}

/// Read one multipart field into a [`FilePayload`].
pub async fn read_file_field(
    field: Field<'_>,
    spool: &SpoolConfig,
) -> Result<FilePayload, AppError> {
    let file_name = field.file_name().map(|s| s.to_string());
    let content_type = media_type_or_default(field.content_type().map(|s| s.to_string()));

    if spool.enabled {
        match spool.create_temp() {
            Ok(temp) => return spool_field(field, temp, file_name, content_type).await,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    spool_dir = ?spool.dir,
                    "Could not create spool file, buffering part in memory"
                );
            }
        }
    }

    let data = field.bytes().await.map_err(multipart_error)?;
    Ok(FilePayload {
        file_name,
        content_type,
        size: data.len() as u64,
        data: PayloadData::Buffered(data),
    })
}

async fn spool_field(
    mut field: Field<'_>,
    temp: NamedTempFile,
    file_name: Option<String>,
    content_type: String,
) -> Result<FilePayload, AppError> {
    let mut writer = tokio::fs::File::from_std(temp.reopen()?);
    let mut size: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        writer.write_all(&chunk).await?;
        size += chunk.len() as u64;
    }
    writer.flush().await?;

    tracing::debug!(
        file_name = ?file_name,
        size,
        path = %temp.path().display(),
        "Spooled file part"
    );

    Ok(FilePayload {
        file_name,
        content_type,
        size,
        data: PayloadData::Spooled(temp),
    })
}

/// Read and discard a field we have no use for.
pub async fn drain_field(mut field: Field<'_>) -> Result<(), AppError> {
    while field.chunk().await.map_err(multipart_error)?.is_some() {}
    Ok(())
}

pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

fn media_type_or_default(content_type: Option<String>) -> String {
    content_type
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_content_type_defaults_to_mp4() {
        let payload = FilePayload::buffered(None, None, Bytes::from_static(b"x"));
        assert_eq!(payload.content_type(), "video/mp4");

        let payload = FilePayload::buffered(None, Some("  ".into()), Bytes::from_static(b"x"));
        assert_eq!(payload.content_type(), "video/mp4");

        let payload =
            FilePayload::buffered(None, Some("video/webm".into()), Bytes::from_static(b"x"));
        assert_eq!(payload.content_type(), "video/webm");
    }

    #[tokio::test]
    async fn buffered_payload_streams_its_bytes() {
        let payload = FilePayload::buffered(
            Some("clip.mov".into()),
            Some("video/quicktime".into()),
            Bytes::from_static(b"movie"),
        );
        assert!(!payload.is_spooled());
        assert_eq!(payload.size(), 5);

        let media = payload.open_media().await.unwrap();
        assert_eq!(media.content_type, "video/quicktime");
        assert_eq!(media.content_length, Some(5));
        let chunks: Vec<Bytes> = media.stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"movie");
    }

    #[tokio::test]
    async fn spooled_file_is_removed_after_stream_drops() {
        let dir = tempfile::tempdir().unwrap();
        let spool = SpoolConfig {
            enabled: true,
            dir: Some(dir.path().to_path_buf()),
        };
        let temp = spool.create_temp().unwrap();
        std::fs::write(temp.path(), b"spooled bytes").unwrap();
        let path = temp.path().to_path_buf();

        let payload = FilePayload {
            file_name: Some("a.mp4".into()),
            content_type: "video/mp4".into(),
            size: 13,
            data: PayloadData::Spooled(temp),
        };
        assert!(payload.is_spooled());

        let media = payload.open_media().await.unwrap();
        assert!(path.exists());
        let chunks: Vec<Bytes> = media.stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"spooled bytes");
        assert!(!path.exists());
    }

    #[test]
    fn dropping_a_spooled_payload_deletes_the_file() {
        let spool = SpoolConfig {
            enabled: true,
            dir: None,
        };
        let temp = spool.create_temp().unwrap();
        let path = temp.path().to_path_buf();
        let payload = FilePayload {
            file_name: None,
            content_type: "video/mp4".into(),
            size: 0,
            data: PayloadData::Spooled(temp),
        };
        assert!(path.exists());
        drop(payload);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn read_failure_records_first_stream_error() {
        let failing = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"ok")),
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "disk gone")),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "second")),
        ])
        .boxed();
        let read_failure = ReadFailure::default();
        let media = read_failure.watch(MediaBody::from_stream("video/mp4", None, failing));
        assert!(read_failure.message().is_none());

        let collected: Result<Vec<Bytes>, _> = media.stream.try_collect().await;
        assert!(collected.is_err());
        assert_eq!(read_failure.message(), Some("disk gone"));
    }

    #[tokio::test]
    async fn read_failure_stays_empty_for_clean_streams() {
        let read_failure = ReadFailure::default();
        let media = read_failure.watch(MediaBody::from_bytes("video/mp4", Bytes::from_static(b"x")));
        let chunks: Vec<Bytes> = media.stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"x");
        assert!(read_failure.message().is_none());
    }

    #[test]
    fn spool_files_use_prefix() {
        let spool = SpoolConfig::default();
        let temp = spool.create_temp().unwrap();
        let name = temp.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(SPOOL_PREFIX));
    }
}
