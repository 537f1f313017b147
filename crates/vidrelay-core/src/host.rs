//! Remote video host abstraction.
//!
//! A [`VideoHost`] turns a caller's bearer token into an authenticated
//! [`VideoSession`]. Sessions are built per request and never cached, so one
//! caller's credential cannot leak into another caller's uploads.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use std::fmt;

use crate::error::RemoteError;
use crate::models::Visibility;

/// Sequential byte stream carrying a video's content.
pub type MediaStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// Opaque caller credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Metadata sent with a create-video call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub made_for_kids: bool,
    pub category_id: Option<String>,
}

impl VideoMetadata {
    /// Metadata with an empty description and an explicit "not made for kids" declaration.
    pub fn new(title: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            visibility,
            made_for_kids: false,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Option<String>) -> Self {
        self.category_id = category_id;
        self
    }
}

/// The media part of a create-video call.
pub struct MediaBody {
    pub content_type: String,
    /// Total byte length when known up front.
    pub content_length: Option<u64>,
    pub stream: MediaStream,
}

impl MediaBody {
    pub fn from_stream(
        content_type: impl Into<String>,
        content_length: Option<u64>,
        stream: MediaStream,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            content_length,
            stream,
        }
    }

    /// Single-chunk body over bytes already held in memory.
    pub fn from_bytes(content_type: impl Into<String>, data: Bytes) -> Self {
        let len = data.len() as u64;
        Self::from_stream(
            content_type,
            Some(len),
            stream::once(async move { Ok(data) }).boxed(),
        )
    }
}

impl fmt::Debug for MediaBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaBody")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// What the remote host hands back for a created video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedVideo {
    pub id: String,
}

/// A video host client bound to one caller's credential.
#[async_trait]
pub trait VideoSession: Send + Sync {
    /// Create one video. The call completes only once the media stream has been consumed.
    async fn insert_video(
        &self,
        metadata: &VideoMetadata,
        media: MediaBody,
    ) -> Result<InsertedVideo, RemoteError>;
}

/// Factory for authenticated sessions.
pub trait VideoHost: Send + Sync {
    fn authorize(&self, token: &BearerToken) -> Box<dyn VideoSession>;
}
