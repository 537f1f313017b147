//! `multipart/related` body assembly.
//!
//! The body is built as a stream (preamble, media chunks, closing boundary) so
//! the media is never collected in memory.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use vidrelay_core::{MediaBody, MediaStream};

pub(crate) struct RelatedBody {
    pub content_type: String,
    pub content_length: Option<u64>,
    pub stream: MediaStream,
}

pub(crate) fn new_boundary() -> String {
    format!("vidrelay_{}", uuid::Uuid::new_v4().simple())
}

pub(crate) fn related_body(boundary: &str, metadata_json: &[u8], media: MediaBody) -> RelatedBody {
    let mut head = Vec::with_capacity(metadata_json.len() + 192);
    head.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n")
            .as_bytes(),
    );
    head.extend_from_slice(metadata_json);
    head.extend_from_slice(
        format!(
            "\r\n--{boundary}\r\nContent-Type: {}\r\n\r\n",
            media.content_type
        )
        .as_bytes(),
    );
    let tail = format!("\r\n--{boundary}--\r\n").into_bytes();

    let content_length = media
        .content_length
        .map(|len| head.len() as u64 + len + tail.len() as u64);

    let head = Bytes::from(head);
    let tail = Bytes::from(tail);
    let stream = stream::once(async move { Ok(head) })
        .chain(media.stream)
        .chain(stream::once(async move { Ok(tail) }))
        .boxed();

    RelatedBody {
        content_type: format!("multipart/related; boundary={boundary}"),
        content_length,
        stream,
    }
}
