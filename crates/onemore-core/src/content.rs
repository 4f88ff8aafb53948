use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Id of the synthetic item returned when the catalog has nothing eligible.
pub const SENTINEL_ID: &str = "0";
/// Text of the synthetic empty-catalog item.
pub const SENTINEL_TEXT: &str = "Nothing here yet.";

/// Category of a content item.
///
/// Stored as lowercase text in the `content.type` column and serialized the
/// same way on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    Fact,
    Thought,
    Confession,
    Question,
    /// Generated by the service itself (e.g. the empty-catalog placeholder).
    System,
    /// Scripted milestone messages injected by the client.
    Meta,
}

/// A displayable item: exactly the fields clients are allowed to see.
///
/// Catalog-internal fields (`weight`, `approved`) live on the server's row
/// type and never reach this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContentItem {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
        }
    }

    /// The placeholder served when no approved content exists.
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_ID, SENTINEL_TEXT, ContentKind::System)
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind == ContentKind::System && self.id == SENTINEL_ID
    }
}
