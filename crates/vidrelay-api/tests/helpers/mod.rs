#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::multipart::Part;
use axum_test::TestServer;
use bytes::Bytes;
use futures::TryStreamExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vidrelay_api::setup::build_app;
use vidrelay_core::{
    BearerToken, Config, InsertedVideo, MediaBody, RemoteError, VideoHost, VideoMetadata,
    VideoSession, Visibility,
};

pub const UPLOAD_PATH: &str = "/api/upload";

/// One create-video call as seen by the fake host.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub token: String,
    pub title: String,
    pub visibility: Visibility,
    pub category_id: Option<String>,
    pub made_for_kids: bool,
    pub content_type: String,
    pub content_length: Option<u64>,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<RecordedCall>>,
    authorizations: Mutex<Vec<String>>,
    fail_on: Option<(usize, RemoteError)>,
    delay: Option<Duration>,
}

/// In-process video host that records every call.
#[derive(Clone, Default)]
pub struct FakeVideoHost {
    inner: Arc<Inner>,
}

impl FakeVideoHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call with the given zero-based index.
    pub fn failing_on(index: usize, error: RemoteError) -> Self {
        Self {
            inner: Arc::new(Inner {
                fail_on: Some((index, error)),
                ..Default::default()
            }),
        }
    }

    /// Sleep inside every call so concurrent batches interleave.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                delay: Some(delay),
                ..Default::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.inner.authorizations.lock().unwrap().clone()
    }
}

impl VideoHost for FakeVideoHost {
    fn authorize(&self, token: &BearerToken) -> Box<dyn VideoSession> {
        self.inner
            .authorizations
            .lock()
            .unwrap()
            .push(token.expose().to_string());
        Box::new(FakeSession {
            inner: self.inner.clone(),
            token: token.expose().to_string(),
        })
    }
}

struct FakeSession {
    inner: Arc<Inner>,
    token: String,
}

#[async_trait]
impl VideoSession for FakeSession {
    async fn insert_video(
        &self,
        metadata: &VideoMetadata,
        media: MediaBody,
    ) -> Result<InsertedVideo, RemoteError> {
        if let Some(delay) = self.inner.delay {
            tokio::time::sleep(delay).await;
        }

        let chunks: Vec<Bytes> = media
            .stream
            .try_collect()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let index = {
            let mut calls = self.inner.calls.lock().unwrap();
            calls.push(RecordedCall {
                token: self.token.clone(),
                title: metadata.title.clone(),
                visibility: metadata.visibility,
                category_id: metadata.category_id.clone(),
                made_for_kids: metadata.made_for_kids,
                content_type: media.content_type.clone(),
                content_length: media.content_length,
                body: chunks.concat(),
            });
            calls.len() - 1
        };

        if let Some((fail_index, error)) = &self.inner.fail_on {
            if *fail_index == index {
                return Err(error.clone());
            }
        }

        Ok(InsertedVideo {
            id: format!("vid-{}-{}", self.token, index),
        })
    }
}

/// Router over the fake host with default configuration.
pub fn setup_test_app(host: &FakeVideoHost) -> TestServer {
    setup_test_app_with_config(Config::default(), host)
}

pub fn setup_test_app_with_config(config: Config, host: &FakeVideoHost) -> TestServer {
    let (_state, app) =
        build_app(config, Arc::new(host.clone())).expect("Failed to build test app");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// A `files` part with a filename and declared media type.
pub fn video_part(file_name: &str, data: &[u8]) -> Part {
    Part::bytes(data.to_vec())
        .file_name(file_name.to_string())
        .mime_type("video/mp4")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
