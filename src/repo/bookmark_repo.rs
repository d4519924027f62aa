use sqlx::sqlite::{SqliteConnection, SqlitePool, SqliteRow};
use sqlx::Row;

use crate::constants::{
    MESSAGE_BOOKMARK_DELETE_FAILED, MESSAGE_BOOKMARK_NOT_FOUND, MESSAGE_BOOKMARK_UPDATE_FAILED,
};
use crate::error::{AppError, Result};
use crate::model::{Bookmark, NewBookmark, RecordStatus, SortKey, SortOrder};

const BOOKMARK_COLUMNS: &str = "id, title, url, image_id, user_id, folder_id, chip_id, isdeleted, \
     created_by, updated_by, click_date, created_at, updated_at";

fn bookmark_from_row(row: &SqliteRow) -> std::result::Result<Bookmark, sqlx::Error> {
    Ok(Bookmark {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        url: row.try_get("url")?,
        image_id: row.try_get("image_id")?,
        user_id: row.try_get("user_id")?,
        folder_id: row.try_get("folder_id")?,
        chip_id: row.try_get("chip_id")?,
        status: RecordStatus::from_flag(row.try_get("isdeleted")?),
        created_by: row.try_get("created_by")?,
        updated_by: row.try_get("updated_by")?,
        click_date: row.try_get("click_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn bookmarks_from_rows(rows: Vec<SqliteRow>) -> Result<Vec<Bookmark>> {
    let bookmarks = rows
        .iter()
        .map(bookmark_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(bookmarks)
}

fn like_pattern(title: &str) -> String {
    format!("%{}%", title.to_lowercase())
}

pub struct BookmarkRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookmarkRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn fetch_all(&self, user_id: i64) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE user_id = ? AND isdeleted = 0 ORDER BY id",
            BOOKMARK_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        bookmarks_from_rows(rows)
    }

    pub async fn fetch_by_folder(&self, user_id: i64, folder_id: i64) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE user_id = ? AND folder_id = ? AND isdeleted = 0 ORDER BY id",
            BOOKMARK_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(folder_id)
            .fetch_all(self.pool)
            .await?;

        bookmarks_from_rows(rows)
    }

    pub async fn fetch_by_id(&self, bookmark_id: i64) -> Result<Bookmark> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE id = ? AND isdeleted = 0",
            BOOKMARK_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(bookmark_id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(bookmark_from_row(&row)?),
            None => Err(AppError::NotFound(MESSAGE_BOOKMARK_NOT_FOUND)),
        }
    }

    pub async fn insert(&self, bookmark: &NewBookmark) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO bookmarks (title, url, image_id, user_id, folder_id, chip_id, isdeleted, created_by, updated_by) \
             VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?)"
        )
            .bind(&bookmark.title)
            .bind(&bookmark.url)
            .bind(bookmark.image_id)
            .bind(bookmark.user_id)
            .bind(bookmark.folder_id)
            .bind(bookmark.chip_id)
            .bind(&bookmark.created_by)
            .bind(&bookmark.created_by)
            .execute(self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update_title(&self, bookmark_id: i64, title: &str, updated_by: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE bookmarks SET title = ?, updated_by = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND isdeleted = 0"
        )
            .bind(title)
            .bind(updated_by)
            .bind(bookmark_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreFailure(MESSAGE_BOOKMARK_UPDATE_FAILED));
        }
        Ok(())
    }

    /// Soft-deletes a single live bookmark.
    pub async fn remove(&self, bookmark_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE bookmarks SET isdeleted = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND isdeleted = ?"
        )
            .bind(RecordStatus::Deleted.as_flag())
            .bind(bookmark_id)
            .bind(RecordStatus::Active.as_flag())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreFailure(MESSAGE_BOOKMARK_DELETE_FAILED));
        }
        Ok(())
    }

    /// Flags every bookmark of `folder_id` deleted, already-deleted ones included.
    /// Runs on the caller's connection so it can join a cascade transaction.
    pub async fn soft_delete_by_folder(conn: &mut SqliteConnection, folder_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE bookmarks SET isdeleted = ?, updated_at = CURRENT_TIMESTAMP WHERE folder_id = ?"
        )
            .bind(RecordStatus::Deleted.as_flag())
            .bind(folder_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Case-insensitive title match among the live bookmarks of a folder.
    pub async fn search_by_title(&self, title: &str, folder_id: i64) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE LOWER(title) LIKE ? AND folder_id = ? AND isdeleted = 0 ORDER BY id",
            BOOKMARK_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(like_pattern(title))
            .bind(folder_id)
            .fetch_all(self.pool)
            .await?;

        bookmarks_from_rows(rows)
    }

    pub async fn sort_by(
        &self,
        key: SortKey,
        user_id: i64,
        folder_id: i64,
        order: SortOrder,
    ) -> Result<Vec<Bookmark>> {
        let column = match key {
            SortKey::Date => "created_at",
            SortKey::Alphabet => "title",
        };
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE user_id = ? AND folder_id = ? AND isdeleted = 0 ORDER BY {} {}, id ASC",
            BOOKMARK_COLUMNS,
            column,
            order.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(folder_id)
            .fetch_all(self.pool)
            .await?;

        bookmarks_from_rows(rows)
    }

    // Recently clicked

    pub async fn record_click(&self, bookmark_id: i64, user_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE bookmarks SET click_date = CURRENT_TIMESTAMP WHERE id = ? AND user_id = ? AND isdeleted = 0"
        )
            .bind(bookmark_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreFailure(MESSAGE_BOOKMARK_UPDATE_FAILED));
        }
        Ok(())
    }

    pub async fn clear_click(&self, bookmark_id: i64, user_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE bookmarks SET click_date = NULL WHERE id = ? AND user_id = ?"
        )
            .bind(bookmark_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreFailure(MESSAGE_BOOKMARK_DELETE_FAILED));
        }
        Ok(())
    }

    pub async fn fetch_recent(&self, user_id: i64, key: SortKey, order: SortOrder) -> Result<Vec<Bookmark>> {
        let column = match key {
            SortKey::Date => "click_date",
            SortKey::Alphabet => "title",
        };
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE user_id = ? AND isdeleted = 0 AND click_date IS NOT NULL ORDER BY {} {}, id DESC",
            BOOKMARK_COLUMNS,
            column,
            order.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        bookmarks_from_rows(rows)
    }

    pub async fn filter_recent_by_chip(&self, user_id: i64, chip_id: i64) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE user_id = ? AND chip_id = ? AND isdeleted = 0 AND click_date IS NOT NULL \
             ORDER BY click_date DESC, id DESC",
            BOOKMARK_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(chip_id)
            .fetch_all(self.pool)
            .await?;

        bookmarks_from_rows(rows)
    }

    pub async fn search_recent(&self, title: &str, user_id: i64) -> Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT {} FROM bookmarks WHERE LOWER(title) LIKE ? AND user_id = ? AND isdeleted = 0 AND click_date IS NOT NULL \
             ORDER BY click_date DESC, id DESC",
            BOOKMARK_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(like_pattern(title))
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        bookmarks_from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis_mock::{seed_bookmark, seed_folder, setup_test_db};

    #[actix_rt::test]
    async fn test_soft_delete_by_folder_only_touches_that_folder() {
        let pool = setup_test_db().await;
        let repo = BookmarkRepo::new(&pool);
        let a = seed_folder(&pool, 1, None, "A").await;
        let b = seed_folder(&pool, 1, None, "B").await;
        seed_bookmark(&pool, 1, a, "one").await;
        seed_bookmark(&pool, 1, a, "two").await;
        let kept = seed_bookmark(&pool, 1, b, "three").await;

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(BookmarkRepo::soft_delete_by_folder(&mut conn, a).await.unwrap(), 2);
        // already-deleted rows still match, so a repeat is harmless
        assert_eq!(BookmarkRepo::soft_delete_by_folder(&mut conn, a).await.unwrap(), 2);
        assert_eq!(BookmarkRepo::soft_delete_by_folder(&mut conn, 999).await.unwrap(), 0);
        drop(conn);

        assert!(repo.fetch_by_folder(1, a).await.unwrap().is_empty());
        assert_eq!(repo.fetch_by_id(kept).await.unwrap().title, "three");
    }

    #[actix_rt::test]
    async fn test_remove_and_update() {
        let pool = setup_test_db().await;
        let repo = BookmarkRepo::new(&pool);
        let folder = seed_folder(&pool, 1, None, "A").await;
        let id = seed_bookmark(&pool, 1, folder, "Rust book").await;

        repo.update_title(id, "The Rust Book", "alice").await.unwrap();
        assert_eq!(repo.fetch_by_id(id).await.unwrap().title, "The Rust Book");

        repo.remove(id).await.unwrap();
        assert!(matches!(repo.fetch_by_id(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.remove(id).await, Err(AppError::StoreFailure(_))));
    }

    #[actix_rt::test]
    async fn test_search_is_case_insensitive() {
        let pool = setup_test_db().await;
        let repo = BookmarkRepo::new(&pool);
        let folder = seed_folder(&pool, 1, None, "A").await;
        seed_bookmark(&pool, 1, folder, "Tokio Tutorial").await;
        seed_bookmark(&pool, 1, folder, "Serde guide").await;

        let found = repo.search_by_title("TOKIO", folder).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Tokio Tutorial");
    }

    #[actix_rt::test]
    async fn test_recent_clicks() {
        let pool = setup_test_db().await;
        let repo = BookmarkRepo::new(&pool);
        let folder = seed_folder(&pool, 1, None, "A").await;
        let first = seed_bookmark(&pool, 1, folder, "b-first").await;
        let second = seed_bookmark(&pool, 1, folder, "a-second").await;
        seed_bookmark(&pool, 1, folder, "never clicked").await;

        assert!(repo.fetch_recent(1, SortKey::Date, SortOrder::Desc).await.unwrap().is_empty());

        repo.record_click(first, 1).await.unwrap();
        repo.record_click(second, 1).await.unwrap();
        // another user cannot touch the bookmark
        assert!(repo.record_click(first, 2).await.is_err());

        let by_title = repo.fetch_recent(1, SortKey::Alphabet, SortOrder::Asc).await.unwrap();
        let titles: Vec<_> = by_title.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["a-second", "b-first"]);
        assert!(by_title.iter().all(|b| b.click_date.is_some()));

        repo.clear_click(first, 1).await.unwrap();
        let recent = repo.fetch_recent(1, SortKey::Date, SortOrder::Desc).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, second);

        assert_eq!(repo.search_recent("SECOND", 1).await.unwrap().len(), 1);
        assert!(repo.search_recent("first", 1).await.unwrap().is_empty());
    }
}
