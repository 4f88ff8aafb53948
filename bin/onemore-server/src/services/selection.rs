//! Weighted random selection over the content store.
//!
//! Two store round trips: load approved `(id, weight)` pairs, then fetch the
//! public projection of the chosen id. Store faults are returned to the
//! caller unchanged and never retried here.

use onemore_core::{Candidate, ContentItem, choose};
use tracing::debug;

use crate::entities::ContentStore;
use crate::error::ServerError;

/// Pick one approved item, avoiding `exclude` when anything else is eligible.
///
/// An empty catalog is not an error: the sentinel item is returned.
pub async fn select_random<S>(store: &S, exclude: Option<&str>) -> Result<ContentItem, ServerError>
where
    S: ContentStore,
{
    let candidates = store.list_candidates().await?;
    let Some(chosen) = draw(&candidates, exclude) else {
        debug!("catalog is empty; serving sentinel");
        return Ok(ContentItem::sentinel());
    };
    debug!(id = %chosen, candidates = candidates.len(), "content selected");

    store
        .find_approved(&chosen)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("content {chosen} not found")))
}

// The thread-local RNG is not `Send`, so it must not live across an await.
fn draw(candidates: &[Candidate], exclude: Option<&str>) -> Option<String> {
    choose(candidates, exclude, &mut rand::thread_rng()).map(|c| c.id.clone())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::{ContentRecord, SqliteStore};
    use onemore_core::ContentKind;

    async fn store_with(records: &[ContentRecord]) -> SqliteStore {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        for record in records {
            store.insert_content(record.clone()).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn empty_store_serves_sentinel() {
        let store = store_with(&[]).await;
        let item = select_random(&store, None).await.unwrap();
        assert!(item.is_sentinel());
    }

    #[tokio::test]
    async fn only_unapproved_rows_behave_like_empty_store() {
        let mut hidden = ContentRecord::approved("pending review", ContentKind::Thought, 5);
        hidden.approved = false;
        let store = store_with(&[hidden]).await;
        assert!(select_random(&store, None).await.unwrap().is_sentinel());
    }

    #[tokio::test]
    async fn never_selects_unapproved_items() {
        let shown = ContentRecord::approved("shown", ContentKind::Fact, 1);
        let mut hidden = ContentRecord::approved("hidden", ContentKind::Fact, 100);
        hidden.approved = false;
        let store = store_with(&[shown.clone(), hidden]).await;

        for _ in 0..100 {
            assert_eq!(select_random(&store, None).await.unwrap(), shown.to_item());
        }
    }

    #[tokio::test]
    async fn exclusion_is_honoured_when_alternatives_exist() {
        let a = ContentRecord::approved("a", ContentKind::Fact, 20);
        let b = ContentRecord::approved("b", ContentKind::Question, 1);
        let store = store_with(&[a.clone(), b.clone()]).await;

        for _ in 0..100 {
            let item = select_random(&store, Some(&a.id)).await.unwrap();
            assert_eq!(item.id, b.id);
        }
    }

    #[tokio::test]
    async fn sole_item_is_served_despite_exclusion() {
        let only = ContentRecord::approved("only", ContentKind::Confession, 2);
        let store = store_with(&[only.clone()]).await;
        let item = select_random(&store, Some(&only.id)).await.unwrap();
        assert_eq!(item, only.to_item());
    }
}
