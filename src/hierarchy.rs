//! Cascading removal of a folder subtree.
//!
//! Folders form a tree through the nullable `folder_id` parent pointer. Removing
//! a folder marks it and every descendant deleted, together with the bookmarks
//! each of them owns. Rows are only flagged, never dropped.
//!
//! The walk is an explicit worklist rather than recursion, so its stack use is
//! flat whatever the depth of the tree, and a visited set turns a malformed
//! (cyclic) parent chain into a logged skip. The whole walk runs inside one
//! transaction: either the full subtree ends up deleted or nothing changes.

use std::collections::HashSet;

use sqlx::sqlite::{SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::model::CascadeReport;
use crate::repo::{Atomic, BookmarkRepo, FolderRepo};

enum Step {
    /// Expand the folder's children.
    Enter(i64),
    /// All children are done; delete the folder itself.
    Exit(i64),
}

pub struct FolderHierarchy<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FolderHierarchy<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Soft-deletes `folder_id`, its whole subtree and the bookmarks of every
    /// folder in it, children before parents.
    ///
    /// Unknown or already-deleted ids are not an error. On any failure the
    /// transaction is rolled back and the error returned.
    pub async fn remove_folder_cascade(&self, folder_id: i64) -> Result<CascadeReport> {
        log::info!("Removing folder {} and its subtree", folder_id);

        let mut tx = self.pool.start_tx().await?;
        match Self::cascade(&mut tx, folder_id).await {
            Ok(report) => {
                self.pool.commit_tx(tx).await?;
                log::info!(
                    "Removed folder {}: {} folder(s), {} bookmark(s)",
                    folder_id,
                    report.folders.len(),
                    report.bookmarks
                );
                Ok(report)
            }
            Err(e) => {
                log::error!("Cascade for folder {} failed, rolling back: {}", folder_id, e);
                if let Err(abort_err) = self.pool.abort_tx(tx).await {
                    log::error!("Rollback for folder {} failed: {}", folder_id, abort_err);
                }
                Err(e)
            }
        }
    }

    async fn cascade(conn: &mut SqliteConnection, root: i64) -> Result<CascadeReport> {
        let mut report = CascadeReport::default();
        let mut visited = HashSet::new();
        let mut worklist = vec![Step::Enter(root)];

        while let Some(step) = worklist.pop() {
            match step {
                Step::Enter(id) => {
                    if !visited.insert(id) {
                        log::warn!("Folder {} reached twice while removing {}, parent chain has a cycle", id, root);
                        continue;
                    }
                    worklist.push(Step::Exit(id));

                    let children = FolderRepo::fetch_all_children_unfiltered(conn, id).await?;
                    // reversed so the lowest id is popped, and finished, first
                    worklist.extend(children.iter().rev().map(|child| Step::Enter(child.id)));
                }
                Step::Exit(id) => {
                    let matched = FolderRepo::soft_delete(conn, id).await?;
                    let bookmarks = BookmarkRepo::soft_delete_by_folder(conn, id).await?;
                    log::debug!("Folder {} deleted with {} bookmark(s)", id, bookmarks);

                    if matched > 0 {
                        report.folders.push(id);
                    }
                    report.bookmarks += bookmarks;
                }
            }
        }

        Ok(report)
    }
}
