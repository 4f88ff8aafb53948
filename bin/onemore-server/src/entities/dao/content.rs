use chrono::{DateTime, Utc};
use onemore_core::{ContentItem, ContentKind};
use uuid::Uuid;

/// A row in the `content` table.
#[derive(Debug, Clone)]
pub struct ContentRecord {
    pub id: String,
    pub text: String,
    pub kind: ContentKind,
    /// Relative selection weight. The schema rejects 0.
    pub weight: u32,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl ContentRecord {
    /// A fresh approved row with a random id.
    pub fn approved(text: impl Into<String>, kind: ContentKind, weight: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            kind,
            weight,
            approved: true,
            created_at: Utc::now(),
        }
    }

    /// Public projection; drops `weight` and `approved`.
    pub fn to_item(&self) -> ContentItem {
        ContentItem::new(self.id.clone(), self.text.clone(), self.kind)
    }
}
