use crate::entities::{SqliteStore, dao::SubmissionRecord};
use std::future::Future;

pub trait SubmissionStore: Send + Sync + 'static {
    fn insert_submission(
        &self,
        record: SubmissionRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl SubmissionStore for SqliteStore {
    async fn insert_submission(&self, record: SubmissionRecord) -> Result<(), sqlx::Error> {
        let created_at = record.created_at.to_rfc3339();
        sqlx::query(
            "INSERT INTO submissions (id, text, approved, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&record.id)
        .bind(&record.text)
        .bind(record.approved)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Review happens outside the service; tests read the queue back directly.
#[cfg(test)]
impl SqliteStore {
    /// All submissions, newest first.
    pub async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
        let rows: Vec<(String, String, bool, String)> = sqlx::query_as(
            "SELECT id, text, approved, created_at FROM submissions ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|(id, text, approved, created_at)| -> Result<SubmissionRecord, sqlx::Error> {
                let created_at = created_at
                    .parse()
                    .map_err(|e: chrono::ParseError| sqlx::Error::Decode(Box::new(e)))?;
                Ok(SubmissionRecord {
                    id,
                    text,
                    approved,
                    created_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use onemore_core::SubmissionText;

    #[tokio::test]
    async fn submissions_are_stored_unapproved() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let text = SubmissionText::parse("  I check their profile every day. ").unwrap();
        store
            .insert_submission(SubmissionRecord::pending(text))
            .await
            .unwrap();

        let rows = store.list_submissions().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "I check their profile every day.");
        assert!(!rows[0].approved);
    }

    #[tokio::test]
    async fn unreadable_timestamp_is_a_decode_error() {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        sqlx::query(
            "INSERT INTO submissions (id, text, approved, created_at) \
             VALUES ('x', 'hello', 0, 'last tuesday')",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        assert!(matches!(
            store.list_submissions().await,
            Err(sqlx::Error::Decode(_))
        ));
    }
}
