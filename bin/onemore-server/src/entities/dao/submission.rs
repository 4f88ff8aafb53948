use chrono::{DateTime, Utc};
use onemore_core::SubmissionText;
use uuid::Uuid;

/// A row in the `submissions` table.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub id: String,
    pub text: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// A new unapproved submission holding already-validated text.
    pub fn pending(text: SubmissionText) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into_inner(),
            approved: false,
            created_at: Utc::now(),
        }
    }
}
