//! Database abstraction layer.
//!
//! [`ContentStore`] and [`SubmissionStore`] define the operations handlers
//! need. The default implementation is [`SqliteStore`]. To swap to another
//! database, implement the traits for your new type and change the concrete
//! type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures so no extra
//! `async-trait` crate is required.
//!
//! # Migrations path
//!
//! `sqlx::migrate!("./migrations")` resolves the path at compile time
//! relative to `CARGO_MANIFEST_DIR`, so the SQL files are embedded into the
//! binary. Queries use the runtime-checked `sqlx::query` form so no
//! `DATABASE_URL` is needed at compile time.

pub mod content;
pub mod dao;
pub mod submission;

pub use dao::{ContentRecord, SubmissionRecord};

pub use content::ContentStore;
pub use submission::SubmissionStore;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://onemore.db"` or `"sqlite::memory:"` for tests.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to `:memory:` gets its own database, so an
        // in-memory store must stay on one connection that never expires.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Round-trip a trivial query; used by the health endpoint.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
