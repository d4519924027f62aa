use actix_web::{web, HttpResponse};
use sqlx::sqlite::SqlitePool;

use crate::constants::{
    DEFAULT_FOLDER_IMAGE_ID, MESSAGE_FOLDER_DELETED, MESSAGE_INVALID_FOLDER_ID, MESSAGE_NAME_REQUIRED,
};
use crate::error::AppError;
use crate::hierarchy::FolderHierarchy;
use crate::jwt::Claims;
use crate::model::{ApiResponse, FolderReq, FolderUpdate, FolderUpdateReq, NewFolder, SortOrder, SortQuery};
use crate::repo::FolderRepo;
use crate::utils::{parse_id, parse_sort_key, parse_sort_order, require_text};

pub struct FolderHandler;

impl FolderHandler {
    pub async fn get_top_level(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
    ) -> Result<HttpResponse, AppError> {
        let folders = FolderRepo::new(pool.get_ref()).fetch_top_level(user.id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(folders)))
    }

    pub async fn get_nested(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        folder_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let parent_id = parse_id(&folder_id, MESSAGE_INVALID_FOLDER_ID)?;
        let folders = FolderRepo::new(pool.get_ref())
            .fetch_children(user.id, parent_id)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(folders)))
    }

    pub async fn get_sorted(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        query: web::Query<SortQuery>,
    ) -> Result<HttpResponse, AppError> {
        let key = parse_sort_key(query.sort.as_deref())?;
        let order = parse_sort_order(query.order.as_deref(), SortOrder::Asc)?;

        let folders = FolderRepo::new(pool.get_ref())
            .sort_by(key, user.id, query.folder_id, order)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(folders)))
    }

    pub async fn create(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        body: web::Json<FolderReq>,
    ) -> Result<HttpResponse, AppError> {
        let name = require_text(&body.name, MESSAGE_NAME_REQUIRED)?;
        let folder_repo = FolderRepo::new(pool.get_ref());

        // a new folder may only hang under a live one
        if let Some(parent_id) = body.folder_id {
            folder_repo.fetch_by_id(parent_id).await?;
        }

        let id = folder_repo
            .insert(&NewFolder {
                name: name.to_string(),
                image_id: body.image_id.unwrap_or(DEFAULT_FOLDER_IMAGE_ID),
                user_id: user.id,
                folder_id: body.folder_id,
                created_by: user.username.clone(),
            })
            .await?;
        log::info!("## Folder {} created by {}", id, user.username);

        let folder = folder_repo.fetch_by_id(id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(folder)))
    }

    pub async fn update(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        folder_id: web::Path<String>,
        body: web::Json<FolderUpdateReq>,
    ) -> Result<HttpResponse, AppError> {
        let folder_id = parse_id(&folder_id, MESSAGE_INVALID_FOLDER_ID)?;
        let name = require_text(&body.name, MESSAGE_NAME_REQUIRED)?;
        let folder_repo = FolderRepo::new(pool.get_ref());

        let current = folder_repo.fetch_by_id(folder_id).await?;
        folder_repo
            .update(
                &FolderUpdate {
                    name: name.to_string(),
                    image_id: body.image_id.unwrap_or(current.image_id),
                    updated_by: user.username.clone(),
                },
                folder_id,
            )
            .await?;

        let folder = folder_repo.fetch_by_id(folder_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(folder)))
    }

    pub async fn delete(
        pool: web::Data<SqlitePool>,
        folder_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let folder_id = parse_id(&folder_id, MESSAGE_INVALID_FOLDER_ID)?;
        log::info!("## Deleting folder: {}", folder_id);

        let report = FolderHierarchy::new(pool.get_ref())
            .remove_folder_cascade(folder_id)
            .await?;
        log::info!(
            "## Folder {} deleted: {} folder(s), {} bookmark(s)",
            folder_id,
            report.folders.len(),
            report.bookmarks
        );
        Ok(HttpResponse::Ok().json(ApiResponse::ok(MESSAGE_FOLDER_DELETED)))
    }
}
