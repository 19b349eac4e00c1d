//! SQLite database handle for the Turfshop shop store.

use std::path::Path;

use sqlx::{Pool, Sqlite};
use tracing::info;

use turfshop_core::db::{open_pool, open_pool_in_memory};

pub use turfshop_core::db::DatabaseError;

/// Shared handle to the shop database. Cheap to clone.
#[derive(Clone)]
pub struct ShopDatabase {
    pool: Pool<Sqlite>,
}

impl ShopDatabase {
    /// Open or create the database at the given path and run migrations.
    pub async fn open(path: &Path) -> Result<Self, DatabaseError> {
        let pool = open_pool(path).await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub async fn open_in_memory() -> Result<Self, DatabaseError> {
        let pool = open_pool_in_memory().await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("Shop database migrations complete");
        Ok(())
    }

    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close the underlying pool. Subsequent queries fail with a query
    /// error; the service layer degrades to cached snapshots for reads.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
