use sqlx::sqlite::{SqliteConnection, SqlitePool, SqliteRow};
use sqlx::Row;

use crate::constants::{MESSAGE_FOLDER_NOT_FOUND, MESSAGE_FOLDER_UPDATE_FAILED};
use crate::error::{AppError, Result};
use crate::model::{Folder, FolderUpdate, NewFolder, RecordStatus, SortKey, SortOrder};

const FOLDER_COLUMNS: &str =
    "id, name, image_id, user_id, folder_id, isdeleted, created_by, updated_by, created_at, updated_at";

fn folder_from_row(row: &SqliteRow) -> std::result::Result<Folder, sqlx::Error> {
    Ok(Folder {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        image_id: row.try_get("image_id")?,
        user_id: row.try_get("user_id")?,
        folder_id: row.try_get("folder_id")?,
        status: RecordStatus::from_flag(row.try_get("isdeleted")?),
        created_by: row.try_get("created_by")?,
        updated_by: row.try_get("updated_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn folders_from_rows(rows: Vec<SqliteRow>) -> Result<Vec<Folder>> {
    let folders = rows
        .iter()
        .map(folder_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(folders)
}

pub struct FolderRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FolderRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Live folders of `user_id` that have no parent.
    pub async fn fetch_top_level(&self, user_id: i64) -> Result<Vec<Folder>> {
        let sql = format!(
            "SELECT {} FROM folders WHERE user_id = ? AND folder_id IS NULL AND isdeleted = 0 ORDER BY id",
            FOLDER_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        folders_from_rows(rows)
    }

    /// Live direct children of `parent_id` owned by `user_id`.
    pub async fn fetch_children(&self, user_id: i64, parent_id: i64) -> Result<Vec<Folder>> {
        let sql = format!(
            "SELECT {} FROM folders WHERE user_id = ? AND folder_id = ? AND isdeleted = 0 ORDER BY id",
            FOLDER_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(parent_id)
            .fetch_all(self.pool)
            .await?;

        folders_from_rows(rows)
    }

    pub async fn fetch_by_id(&self, folder_id: i64) -> Result<Folder> {
        let sql = format!(
            "SELECT {} FROM folders WHERE id = ? AND isdeleted = 0",
            FOLDER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(folder_id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(folder_from_row(&row)?),
            None => Err(AppError::NotFound(MESSAGE_FOLDER_NOT_FOUND)),
        }
    }

    pub async fn insert(&self, folder: &NewFolder) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO folders (name, image_id, user_id, folder_id, isdeleted, created_by, updated_by) VALUES (?, ?, ?, ?, 0, ?, ?)"
        )
            .bind(&folder.name)
            .bind(folder.image_id)
            .bind(folder.user_id)
            .bind(folder.folder_id)
            .bind(&folder.created_by)
            .bind(&folder.created_by)
            .execute(self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Renames / re-images a live folder. The parent pointer is never touched.
    pub async fn update(&self, folder: &FolderUpdate, folder_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE folders SET name = ?, image_id = ?, updated_by = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND isdeleted = 0"
        )
            .bind(&folder.name)
            .bind(folder.image_id)
            .bind(&folder.updated_by)
            .bind(folder_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreFailure(MESSAGE_FOLDER_UPDATE_FAILED));
        }
        Ok(())
    }

    /// Live folders of `user_id` under `parent_id` (top level when `None`), ordered by `key`.
    pub async fn sort_by(
        &self,
        key: SortKey,
        user_id: i64,
        parent_id: Option<i64>,
        order: SortOrder,
    ) -> Result<Vec<Folder>> {
        let column = match key {
            SortKey::Date => "created_at",
            SortKey::Alphabet => "name",
        };
        let sql = format!(
            "SELECT {} FROM folders WHERE user_id = ? AND folder_id IS ? AND isdeleted = 0 ORDER BY {} {}, id ASC",
            FOLDER_COLUMNS,
            column,
            order.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(parent_id)
            .fetch_all(self.pool)
            .await?;

        folders_from_rows(rows)
    }

    /// Every folder whose parent is `folder_id`, whatever its owner or status.
    /// Runs on the caller's connection so it can join a cascade transaction.
    pub async fn fetch_all_children_unfiltered(
        conn: &mut SqliteConnection,
        folder_id: i64,
    ) -> Result<Vec<Folder>> {
        let sql = format!(
            "SELECT {} FROM folders WHERE folder_id = ? ORDER BY id",
            FOLDER_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(folder_id)
            .fetch_all(&mut *conn)
            .await?;

        folders_from_rows(rows)
    }

    /// Flags the folder deleted; name and parent pointer are left as they are.
    /// Idempotent, an unknown id touches nothing.
    pub async fn soft_delete(conn: &mut SqliteConnection, folder_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE folders SET isdeleted = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?"
        )
            .bind(RecordStatus::Deleted.as_flag())
            .bind(folder_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis_mock::{seed_folder, setup_test_db};

    #[actix_rt::test]
    async fn test_top_level_and_children_filtering() {
        let pool = setup_test_db().await;
        let repo = FolderRepo::new(&pool);

        let work = seed_folder(&pool, 1, None, "Work").await;
        let home = seed_folder(&pool, 1, None, "Home").await;
        let _other_user = seed_folder(&pool, 2, None, "Theirs").await;
        let docs = seed_folder(&pool, 1, Some(work), "Docs").await;
        let gone = seed_folder(&pool, 1, Some(work), "Gone").await;

        let mut conn = pool.acquire().await.unwrap();
        FolderRepo::soft_delete(&mut conn, gone).await.unwrap();
        drop(conn);

        let top: Vec<i64> = repo.fetch_top_level(1).await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(top, vec![work, home]);

        let children = repo.fetch_children(1, work).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, docs);
        assert_eq!(children[0].folder_id, Some(work));

        // someone else's folder id does not leak through
        assert!(repo.fetch_children(2, work).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_fetch_by_id_hides_deleted() {
        let pool = setup_test_db().await;
        let repo = FolderRepo::new(&pool);
        let id = seed_folder(&pool, 1, None, "Reading").await;

        let folder = repo.fetch_by_id(id).await.unwrap();
        assert_eq!(folder.name, "Reading");
        assert_eq!(folder.status, RecordStatus::Active);

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(FolderRepo::soft_delete(&mut conn, id).await.unwrap(), 1);
        drop(conn);

        match repo.fetch_by_id(id).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, MESSAGE_FOLDER_NOT_FOUND),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_unfiltered_children_include_deleted_and_foreign() {
        let pool = setup_test_db().await;
        let root = seed_folder(&pool, 1, None, "Root").await;
        let mine = seed_folder(&pool, 1, Some(root), "Mine").await;
        let theirs = seed_folder(&pool, 2, Some(root), "Theirs").await;

        let mut conn = pool.acquire().await.unwrap();
        FolderRepo::soft_delete(&mut conn, mine).await.unwrap();

        let children = FolderRepo::fetch_all_children_unfiltered(&mut conn, root).await.unwrap();
        let ids: Vec<i64> = children.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![mine, theirs]);
        assert_eq!(children[0].status, RecordStatus::Deleted);
    }

    #[actix_rt::test]
    async fn test_update_keeps_parent() {
        let pool = setup_test_db().await;
        let repo = FolderRepo::new(&pool);
        let root = seed_folder(&pool, 1, None, "Root").await;
        let child = seed_folder(&pool, 1, Some(root), "Old").await;

        let update = FolderUpdate {
            name: "New".to_string(),
            image_id: 9,
            updated_by: "bob".to_string(),
        };
        repo.update(&update, child).await.unwrap();

        let folder = repo.fetch_by_id(child).await.unwrap();
        assert_eq!(folder.name, "New");
        assert_eq!(folder.image_id, 9);
        assert_eq!(folder.updated_by, "bob");
        assert_eq!(folder.folder_id, Some(root));

        let err = repo.update(&update, 999).await.unwrap_err();
        assert_eq!(err.to_string(), MESSAGE_FOLDER_UPDATE_FAILED);
    }

    #[actix_rt::test]
    async fn test_sort_by_name_and_level() {
        let pool = setup_test_db().await;
        let repo = FolderRepo::new(&pool);
        let root = seed_folder(&pool, 1, None, "Root").await;
        seed_folder(&pool, 1, Some(root), "beta").await;
        seed_folder(&pool, 1, Some(root), "alpha").await;
        seed_folder(&pool, 1, Some(root), "gamma").await;

        let names = |folders: Vec<Folder>| folders.into_iter().map(|f| f.name).collect::<Vec<_>>();

        let asc = repo.sort_by(SortKey::Alphabet, 1, Some(root), SortOrder::Asc).await.unwrap();
        assert_eq!(names(asc), vec!["alpha", "beta", "gamma"]);

        let desc = repo.sort_by(SortKey::Alphabet, 1, Some(root), SortOrder::Desc).await.unwrap();
        assert_eq!(names(desc), vec!["gamma", "beta", "alpha"]);

        let top = repo.sort_by(SortKey::Date, 1, None, SortOrder::Asc).await.unwrap();
        assert_eq!(names(top), vec!["Root"]);
    }
}
