//! Wire types for `videos.insert`.

use serde::{Deserialize, Serialize};
use vidrelay_core::VideoMetadata;

#[derive(Debug, Serialize)]
pub(crate) struct VideoResource<'a> {
    pub snippet: Snippet<'a>,
    pub status: Status<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet<'a> {
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Status<'a> {
    pub privacy_status: &'a str,
    pub self_declared_made_for_kids: bool,
}

impl<'a> From<&'a VideoMetadata> for VideoResource<'a> {
    fn from(metadata: &'a VideoMetadata) -> Self {
        Self {
            snippet: Snippet {
                title: &metadata.title,
                description: &metadata.description,
                category_id: metadata.category_id.as_deref(),
            },
            status: Status {
                privacy_status: metadata.visibility.as_str(),
                self_declared_made_for_kids: metadata.made_for_kids,
            },
        }
    }
}

/// Subset of the `Video` resource returned on success.
#[derive(Debug, Deserialize)]
pub(crate) struct InsertedResource {
    pub id: Option<String>,
}

/// Google API error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub code: Option<u16>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidrelay_core::Visibility;

    #[test]
    fn resource_serializes_snippet_and_status() {
        let metadata = VideoMetadata::new("My Trip 2024", Visibility::Unlisted);
        let json = serde_json::to_value(VideoResource::from(&metadata)).unwrap();
        assert_eq!(json["snippet"]["title"], "My Trip 2024");
        assert_eq!(json["snippet"]["description"], "");
        assert!(json["snippet"].get("categoryId").is_none());
        assert_eq!(json["status"]["privacyStatus"], "unlisted");
        assert_eq!(json["status"]["selfDeclaredMadeForKids"], false);
    }

    #[test]
    fn category_is_included_when_set() {
        let metadata = VideoMetadata::new("t", Visibility::Private)
            .with_category(Some("20".to_string()));
        let json = serde_json::to_value(VideoResource::from(&metadata)).unwrap();
        assert_eq!(json["snippet"]["categoryId"], "20");
    }

    #[test]
    fn error_envelope_parses_partial_bodies() {
        let env: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"code":401,"message":"Invalid Credentials"}}"#)
                .unwrap();
        assert_eq!(env.error.code, Some(401));
        assert_eq!(env.error.message.as_deref(), Some("Invalid Credentials"));

        let env: ErrorEnvelope = serde_json::from_str(r#"{"error":{}}"#).unwrap();
        assert!(env.error.code.is_none());
    }
}
