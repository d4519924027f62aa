use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::constants::{MESSAGE_CHIP_NOT_FOUND, MESSAGE_CHIP_UPDATE_FAILED};
use crate::error::{AppError, Result};
use crate::model::{Chip, NewChip, RecordStatus};

const CHIP_COLUMNS: &str =
    "id, name, user_id, folder_id, isdeleted, created_by, updated_by, created_at, updated_at";

fn chip_from_row(row: &SqliteRow) -> std::result::Result<Chip, sqlx::Error> {
    Ok(Chip {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        user_id: row.try_get("user_id")?,
        folder_id: row.try_get("folder_id")?,
        status: RecordStatus::from_flag(row.try_get("isdeleted")?),
        created_by: row.try_get("created_by")?,
        updated_by: row.try_get("updated_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub struct ChipRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ChipRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn fetch_by_id(&self, chip_id: i64) -> Result<Chip> {
        let sql = format!("SELECT {} FROM chips WHERE id = ? AND isdeleted = 0", CHIP_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(chip_id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(chip_from_row(&row)?),
            None => Err(AppError::NotFound(MESSAGE_CHIP_NOT_FOUND)),
        }
    }

    pub async fn fetch_all(&self, user_id: i64) -> Result<Vec<Chip>> {
        let sql = format!(
            "SELECT {} FROM chips WHERE user_id = ? AND isdeleted = 0 ORDER BY id",
            CHIP_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        let chips = rows
            .iter()
            .map(chip_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(chips)
    }

    pub async fn insert(&self, chip: &NewChip) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO chips (name, user_id, folder_id, isdeleted, created_by, updated_by) VALUES (?, ?, ?, 0, ?, ?)"
        )
            .bind(&chip.name)
            .bind(chip.user_id)
            .bind(chip.folder_id)
            .bind(&chip.created_by)
            .bind(&chip.created_by)
            .execute(self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn rename(&self, chip_id: i64, name: &str, updated_by: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE chips SET name = ?, updated_by = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND isdeleted = 0"
        )
            .bind(name)
            .bind(updated_by)
            .bind(chip_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreFailure(MESSAGE_CHIP_UPDATE_FAILED));
        }
        Ok(())
    }

    /// Soft-deletes a live chip. Bookmarks keep their `chip_id`.
    pub async fn remove(&self, chip_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE chips SET isdeleted = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND isdeleted = ?"
        )
            .bind(RecordStatus::Deleted.as_flag())
            .bind(chip_id)
            .bind(RecordStatus::Active.as_flag())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(MESSAGE_CHIP_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis_mock::{seed_chip, seed_folder, setup_test_db};

    #[actix_rt::test]
    async fn test_fetch_all_is_per_user_and_live() {
        let pool = setup_test_db().await;
        let repo = ChipRepo::new(&pool);
        let folder = seed_folder(&pool, 1, None, "Work").await;
        let work = seed_chip(&pool, 1, folder, "work").await;
        let gone = seed_chip(&pool, 1, folder, "gone").await;
        seed_chip(&pool, 2, folder, "theirs").await;

        repo.remove(gone).await.unwrap();

        let chips = repo.fetch_all(1).await.unwrap();
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].id, work);
        assert_eq!(chips[0].folder_id, folder);
        assert_eq!(chips[0].status, RecordStatus::Active);
    }

    #[actix_rt::test]
    async fn test_rename_and_remove() {
        let pool = setup_test_db().await;
        let repo = ChipRepo::new(&pool);
        let folder = seed_folder(&pool, 1, None, "Work").await;
        let id = seed_chip(&pool, 1, folder, "old").await;

        repo.rename(id, "new", "bob").await.unwrap();
        let chip = repo.fetch_by_id(id).await.unwrap();
        assert_eq!(chip.name, "new");
        assert_eq!(chip.updated_by, "bob");

        repo.remove(id).await.unwrap();
        match repo.fetch_by_id(id).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, MESSAGE_CHIP_NOT_FOUND),
            other => panic!("expected NotFound, got {:?}", other),
        }
        // the row is only flagged
        let flagged: bool = sqlx::query("SELECT isdeleted FROM chips WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap()
            .get("isdeleted");
        assert!(flagged);

        assert!(matches!(repo.remove(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.rename(id, "again", "bob").await, Err(AppError::StoreFailure(_))));
    }
}
