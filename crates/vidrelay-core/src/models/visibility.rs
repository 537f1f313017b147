use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Access level of an uploaded video as understood by the remote host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    #[default]
    Private,
}

impl Visibility {
    /// Map free-form caller input onto the closed set of visibilities.
    ///
    /// Unknown or missing input resolves to [`Visibility::Private`]; it is never rejected.
    pub fn parse(input: Option<&str>) -> Self {
        let normalized = input.unwrap_or_default().trim().to_lowercase();
        match normalized.as_str() {
            "public" | "pub" => Visibility::Public,
            "unlisted" | "unl" => Visibility::Unlisted,
            "private" | "pri" => Visibility::Private,
            _ => Visibility::Private,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
