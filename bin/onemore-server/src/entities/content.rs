use crate::entities::{SqliteStore, dao::ContentRecord};
use onemore_core::{Candidate, ContentItem, ContentKind};
use std::future::Future;

pub trait ContentStore: Send + Sync + 'static {
    /// `(id, weight)` of every approved item with a positive weight, ordered
    /// by id so the selection walk is stable.
    fn list_candidates(&self) -> impl Future<Output = Result<Vec<Candidate>, sqlx::Error>> + Send;

    /// Public projection of one item, only if it is approved.
    fn find_approved(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<ContentItem>, sqlx::Error>> + Send;

    fn insert_content(
        &self,
        record: ContentRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn count_content(&self) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl ContentStore for SqliteStore {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT id, weight FROM content \
             WHERE approved = 1 AND weight >= 1 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, weight)| Candidate::new(id, u32::try_from(weight).unwrap_or(u32::MAX)))
            .collect())
    }

    async fn find_approved(&self, id: &str) -> Result<Option<ContentItem>, sqlx::Error> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT id, text, type FROM content WHERE id = ?1 AND approved = 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|(id, text, kind)| -> Result<ContentItem, sqlx::Error> {
            let kind = kind
                .parse::<ContentKind>()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            Ok(ContentItem::new(id, text, kind))
        })
        .transpose()
    }

    async fn insert_content(&self, record: ContentRecord) -> Result<(), sqlx::Error> {
        let created_at = record.created_at.to_rfc3339();
        sqlx::query(
            "INSERT INTO content (id, text, type, weight, approved, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.id)
        .bind(&record.text)
        .bind(record.kind.as_ref())
        .bind(i64::from(record.weight))
        .bind(record.approved)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_content(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
