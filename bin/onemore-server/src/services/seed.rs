//! Starter catalog for fresh databases.

use onemore_core::ContentKind;
use tracing::info;

use crate::entities::{ContentRecord, ContentStore};

/// `(text, kind, weight)` rows inserted by `onemore-server seed`.
pub const STARTER_CATALOG: &[(&str, ContentKind, u32)] = &[
    ("You have never seen your own face, only reflections and photos.", ContentKind::Fact, 3),
    ("One day, you will place a book down and never pick it up again.", ContentKind::Thought, 4),
    ("We suffer more often in imagination than in reality.", ContentKind::Thought, 5),
    (
        "Confession: I check their profile every day, even though we haven't spoken in years.",
        ContentKind::Confession,
        2,
    ),
    (
        "If you could see the deadline of your life, what would you stop doing immediately?",
        ContentKind::Question,
        5,
    ),
    ("Most of your memories are actually memories of memories.", ContentKind::Fact, 3),
    ("You are the villain in someone else's story.", ContentKind::Thought, 5),
    ("Everything you own will one day belong to someone else.", ContentKind::Fact, 4),
    ("Confession: I lied when I said I was fine.", ContentKind::Confession, 2),
    ("Is it better to speak or to die?", ContentKind::Question, 3),
    ("The universe doesn't care about your plans.", ContentKind::Thought, 4),
    ("You are younger today than you will ever be again.", ContentKind::Fact, 5),
];

/// Insert [`STARTER_CATALOG`] unless the catalog already has rows.
///
/// Returns the number of rows inserted.
pub async fn seed<S: ContentStore>(store: &S) -> Result<usize, sqlx::Error> {
    let existing = store.count_content().await?;
    if existing > 0 {
        info!(existing, "catalog already populated; skipping seed");
        return Ok(0);
    }

    info!("start seeding");
    for (text, kind, weight) in STARTER_CATALOG {
        let record = ContentRecord::approved(*text, *kind, *weight);
        let id = record.id.clone();
        store.insert_content(record).await?;
        info!(%id, "created content");
    }
    info!(count = STARTER_CATALOG.len(), "seeding finished");
    Ok(STARTER_CATALOG.len())
}
