use actix_web::{web, HttpResponse};
use sqlx::sqlite::SqlitePool;

use crate::constants::{MESSAGE_CHIP_FIELDS_REQUIRED, MESSAGE_INVALID_CHIP_ID, MESSAGE_NAME_REQUIRED};
use crate::error::AppError;
use crate::jwt::Claims;
use crate::model::{ApiResponse, ChipReq, ChipUpdateReq, NewChip};
use crate::repo::{ChipRepo, FolderRepo};
use crate::utils::{parse_id, require_text};

pub struct ChipHandler;

impl ChipHandler {
    pub async fn get_all(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
    ) -> Result<HttpResponse, AppError> {
        let chips = ChipRepo::new(pool.get_ref()).fetch_all(user.id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(chips)))
    }

    pub async fn create(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        body: web::Json<ChipReq>,
    ) -> Result<HttpResponse, AppError> {
        let name = require_text(&body.name, MESSAGE_CHIP_FIELDS_REQUIRED)?;
        let folder_id = body
            .folder_id
            .ok_or(AppError::InvalidInput(MESSAGE_CHIP_FIELDS_REQUIRED))?;

        FolderRepo::new(pool.get_ref()).fetch_by_id(folder_id).await?;

        let chip_repo = ChipRepo::new(pool.get_ref());
        let id = chip_repo
            .insert(&NewChip {
                name: name.to_string(),
                user_id: user.id,
                folder_id,
                created_by: user.username.clone(),
            })
            .await?;
        log::info!("## Chip {} created by {}", id, user.username);

        let chip = chip_repo.fetch_by_id(id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(chip)))
    }

    pub async fn update(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        chip_id: web::Path<String>,
        body: web::Json<ChipUpdateReq>,
    ) -> Result<HttpResponse, AppError> {
        let chip_id = parse_id(&chip_id, MESSAGE_INVALID_CHIP_ID)?;
        let name = require_text(&body.name, MESSAGE_NAME_REQUIRED)?;
        let chip_repo = ChipRepo::new(pool.get_ref());

        chip_repo.fetch_by_id(chip_id).await?;
        chip_repo.rename(chip_id, name, &user.username).await?;

        let chip = chip_repo.fetch_by_id(chip_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(chip)))
    }

    /// Answers with the chip as it was before removal.
    pub async fn delete(
        pool: web::Data<SqlitePool>,
        chip_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let chip_id = parse_id(&chip_id, MESSAGE_INVALID_CHIP_ID)?;
        let chip_repo = ChipRepo::new(pool.get_ref());

        let chip = chip_repo.fetch_by_id(chip_id).await?;
        chip_repo.remove(chip_id).await?;
        log::info!("## Chip {} removed", chip_id);

        Ok(HttpResponse::Ok().json(ApiResponse::ok(chip)))
    }
}
