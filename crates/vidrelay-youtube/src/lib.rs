//! YouTube Data API v3 client.
//!
//! Implements [`vidrelay_core::VideoHost`] on top of the `videos.insert`
//! endpoint using the single-request `multipart` upload type: one
//! `multipart/related` body carrying the JSON resource followed by the media bytes.

mod client;
mod related;
mod resource;

pub use client::{YouTubeClient, YouTubeSession, UPLOAD_PATH};
