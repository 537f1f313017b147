use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::time::Duration;
use vidrelay_core::{
    BearerToken, Config, InsertedVideo, MediaBody, RemoteError, VideoHost, VideoMetadata,
    VideoSession,
};

use crate::related::{new_boundary, related_body};
use crate::resource::{ErrorEnvelope, InsertedResource, VideoResource};

/// Path of the `videos.insert` media upload endpoint, relative to the API base URL.
pub const UPLOAD_PATH: &str = "/upload/youtube/v3/videos";

const MAX_ERROR_TEXT_CHARS: usize = 500;

/// YouTube Data API client.
///
/// Holds only the connection pool and endpoint; credentials live in the
/// [`YouTubeSession`]s it hands out.
#[derive(Clone, Debug)]
pub struct YouTubeClient {
    http: reqwest::Client,
    upload_url: String,
}

impl YouTubeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for YouTube Data API")?;

        Ok(Self {
            http,
            upload_url: format!("{}{}", base_url.trim_end_matches('/'), UPLOAD_PATH),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.youtube_api_base_url,
            Duration::from_secs(config.remote_timeout_secs),
        )
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

impl VideoHost for YouTubeClient {
    fn authorize(&self, token: &BearerToken) -> Box<dyn VideoSession> {
        Box::new(YouTubeSession {
            http: self.http.clone(),
            upload_url: self.upload_url.clone(),
            token: token.clone(),
        })
    }
}

/// A [`YouTubeClient`] bound to one caller's access token.
#[derive(Debug)]
pub struct YouTubeSession {
    http: reqwest::Client,
    upload_url: String,
    token: BearerToken,
}

#[async_trait]
impl VideoSession for YouTubeSession {
    async fn insert_video(
        &self,
        metadata: &VideoMetadata,
        media: MediaBody,
    ) -> Result<InsertedVideo, RemoteError> {
        let metadata_json = serde_json::to_vec(&VideoResource::from(metadata)).map_err(|e| {
            RemoteError::transport(format!("Failed to encode video resource: {}", e))
        })?;

        tracing::debug!(
            title = %metadata.title,
            privacy = %metadata.visibility,
            media_type = %media.content_type,
            media_bytes = ?media.content_length,
            "Sending videos.insert request"
        );

        let body = related_body(&new_boundary(), &metadata_json, media);

        let mut request = self
            .http
            .post(&self.upload_url)
            .bearer_auth(self.token.expose())
            .query(&[("uploadType", "multipart"), ("part", "snippet,status")])
            .header(CONTENT_TYPE, body.content_type);
        if let Some(len) = body.content_length {
            request = request.header(CONTENT_LENGTH, len);
        }

        let response = request
            .body(reqwest::Body::wrap_stream(body.stream))
            .send()
            .await
            .map_err(|e| RemoteError::transport(describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &error_text));
        }

        let inserted: InsertedResource = response.json().await.map_err(|e| {
            RemoteError::api(None, format!("Failed to parse YouTube API response: {}", e))
        })?;

        match inserted.id.filter(|id| !id.is_empty()) {
            Some(id) => Ok(InsertedVideo { id }),
            None => Err(RemoteError::api(
                None,
                "YouTube API response did not include a video id",
            )),
        }
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "YouTube API request timed out".to_string()
    } else {
        format!("Failed to send request to YouTube API: {}", err)
    }
}

/// Build a [`RemoteError`] from a non-success response.
///
/// The API's own `error.code` is preferred over the HTTP status when present.
fn api_error(http_status: u16, body: &str) -> RemoteError {
    let fallback = || format!("YouTube API request failed with status {}", http_status);

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let status = envelope
                .error
                .code
                .filter(|code| *code != 0)
                .unwrap_or(http_status);
            let message = envelope
                .error
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(fallback);
            RemoteError::api(Some(status), message)
        }
        Err(_) => {
            let text = body.trim();
            let message = if text.is_empty() {
                fallback()
            } else {
                text.chars().take(MAX_ERROR_TEXT_CHARS).collect()
            };
            RemoteError::api(Some(http_status), message)
        }
    }
}
