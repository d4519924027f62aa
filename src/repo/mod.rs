mod bookmark_repo;
mod chip_repo;
mod folder_repo;

pub use bookmark_repo::BookmarkRepo;
pub use chip_repo::ChipRepo;
pub use folder_repo::FolderRepo;

use std::future::Future;

use sqlx::{sqlite::SqlitePool, Sqlite, Transaction};

use crate::error::Result;

/// Unit-of-work capability the stores share, so multi-statement operations
/// either land completely or not at all.
pub trait Atomic {
    type Tx;

    fn start_tx(&self) -> impl Future<Output = Result<Self::Tx>>;

    fn commit_tx(&self, tx: Self::Tx) -> impl Future<Output = Result<()>>;

    fn abort_tx(&self, tx: Self::Tx) -> impl Future<Output = Result<()>>;
}

impl Atomic for SqlitePool {
    type Tx = Transaction<'static, Sqlite>;

    // Write lock up front: two deferred read-then-write transactions
    // dead-lock and SQLite fails one with SQLITE_BUSY without waiting.
    async fn start_tx(&self) -> Result<Self::Tx> {
        Ok(self.begin_with("BEGIN IMMEDIATE").await?)
    }

    async fn commit_tx(&self, tx: Self::Tx) -> Result<()> {
        tx.commit().await?;
        Ok(())
    }

    async fn abort_tx(&self, tx: Self::Tx) -> Result<()> {
        tx.rollback().await?;
        Ok(())
    }
}
