use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::sqlite::SqlitePool;

use crate::constants::{
    MESSAGE_BOOKMARK_DELETED, MESSAGE_INVALID_BOOKMARK_ID, MESSAGE_INVALID_DATA,
    MESSAGE_INVALID_FOLDER_ID, MESSAGE_RECENT_REMOVED, MESSAGE_RECENT_UPDATED,
    MESSAGE_SEARCH_QUERY_EMPTY, MESSAGE_TITLE_REQUIRED, MESSAGE_URL_REQUIRED,
};
use crate::error::AppError;
use crate::jwt::Claims;
use crate::model::{
    ApiResponse, BookmarkReq, BookmarkUpdateReq, ChipQuery, NewBookmark, SearchQuery, SortKey,
    SortOrder, SortQuery,
};
use crate::repo::{BookmarkRepo, ChipRepo, FolderRepo};
use crate::utils::{parse_id, parse_sort_key, parse_sort_order, require_text};

#[derive(Deserialize)]
pub struct RecentSortQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

pub struct BookmarkHandler;

impl BookmarkHandler {
    pub async fn get_all(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
    ) -> Result<HttpResponse, AppError> {
        let bookmarks = BookmarkRepo::new(pool.get_ref()).fetch_all(user.id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    pub async fn get_by_folder(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        folder_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let folder_id = parse_id(&folder_id, MESSAGE_INVALID_FOLDER_ID)?;
        let bookmarks = BookmarkRepo::new(pool.get_ref())
            .fetch_by_folder(user.id, folder_id)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    pub async fn create(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        body: web::Json<BookmarkReq>,
    ) -> Result<HttpResponse, AppError> {
        let title = require_text(&body.title, MESSAGE_TITLE_REQUIRED)?;
        let url = require_text(&body.url, MESSAGE_URL_REQUIRED)?;

        // the owning folder, and the chip when one is given, have to be live
        FolderRepo::new(pool.get_ref()).fetch_by_id(body.folder_id).await?;
        if let Some(chip_id) = body.chip_id {
            ChipRepo::new(pool.get_ref()).fetch_by_id(chip_id).await?;
        }

        let bookmark_repo = BookmarkRepo::new(pool.get_ref());
        let id = bookmark_repo
            .insert(&NewBookmark {
                title: title.to_string(),
                url: url.to_string(),
                image_id: body.image_id,
                user_id: user.id,
                folder_id: body.folder_id,
                chip_id: body.chip_id,
                created_by: user.username.clone(),
            })
            .await?;

        let bookmark = bookmark_repo.fetch_by_id(id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmark)))
    }

    pub async fn update(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        bookmark_id: web::Path<String>,
        body: web::Json<BookmarkUpdateReq>,
    ) -> Result<HttpResponse, AppError> {
        let bookmark_id = parse_id(&bookmark_id, MESSAGE_INVALID_BOOKMARK_ID)?;
        let title = require_text(&body.title, MESSAGE_TITLE_REQUIRED)?;
        let bookmark_repo = BookmarkRepo::new(pool.get_ref());

        bookmark_repo.update_title(bookmark_id, title, &user.username).await?;

        let bookmark = bookmark_repo.fetch_by_id(bookmark_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmark)))
    }

    pub async fn delete(
        pool: web::Data<SqlitePool>,
        bookmark_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let bookmark_id = parse_id(&bookmark_id, MESSAGE_INVALID_BOOKMARK_ID)?;
        let bookmark_repo = BookmarkRepo::new(pool.get_ref());

        bookmark_repo.fetch_by_id(bookmark_id).await?;
        bookmark_repo.remove(bookmark_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(MESSAGE_BOOKMARK_DELETED)))
    }

    pub async fn search(
        pool: web::Data<SqlitePool>,
        query: web::Query<SearchQuery>,
    ) -> Result<HttpResponse, AppError> {
        let title = require_text(query.title.as_deref().unwrap_or_default(), MESSAGE_SEARCH_QUERY_EMPTY)?;
        let folder_id = query.folder_id.ok_or(AppError::InvalidInput(MESSAGE_INVALID_FOLDER_ID))?;

        let bookmarks = BookmarkRepo::new(pool.get_ref())
            .search_by_title(title, folder_id)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    pub async fn get_sorted(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        query: web::Query<SortQuery>,
    ) -> Result<HttpResponse, AppError> {
        let key = parse_sort_key(query.sort.as_deref())?;
        let order = parse_sort_order(query.order.as_deref(), SortOrder::Asc)?;
        let folder_id = query.folder_id.ok_or(AppError::InvalidInput(MESSAGE_INVALID_FOLDER_ID))?;

        let bookmarks = BookmarkRepo::new(pool.get_ref())
            .sort_by(key, user.id, folder_id, order)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    /// Clicked bookmarks, latest click first.
    pub async fn get_recent(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
    ) -> Result<HttpResponse, AppError> {
        let bookmarks = BookmarkRepo::new(pool.get_ref())
            .fetch_recent(user.id, SortKey::Date, SortOrder::Desc)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    /// `sortBy=date|alphabet` honours `order` (default asc); a missing or
    /// unknown key falls back to latest click first.
    pub async fn sort_recent(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        query: web::Query<RecentSortQuery>,
    ) -> Result<HttpResponse, AppError> {
        let (key, order) = match parse_sort_key(query.sort_by.as_deref()) {
            Ok(key) => (key, parse_sort_order(query.order.as_deref(), SortOrder::Asc)?),
            Err(_) => (SortKey::Date, SortOrder::Desc),
        };

        let bookmarks = BookmarkRepo::new(pool.get_ref())
            .fetch_recent(user.id, key, order)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    pub async fn filter_recent(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        query: web::Query<ChipQuery>,
    ) -> Result<HttpResponse, AppError> {
        let chip_id = query.chip_id.ok_or(AppError::InvalidInput(MESSAGE_INVALID_DATA))?;
        ChipRepo::new(pool.get_ref()).fetch_by_id(chip_id).await?;

        let bookmarks = BookmarkRepo::new(pool.get_ref())
            .filter_recent_by_chip(user.id, chip_id)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    pub async fn search_recent(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        query: web::Query<SearchQuery>,
    ) -> Result<HttpResponse, AppError> {
        let title = require_text(query.title.as_deref().unwrap_or_default(), MESSAGE_SEARCH_QUERY_EMPTY)?;

        let bookmarks = BookmarkRepo::new(pool.get_ref())
            .search_recent(title, user.id)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(bookmarks)))
    }

    pub async fn record_click(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        bookmark_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let bookmark_id = parse_id(&bookmark_id, MESSAGE_INVALID_BOOKMARK_ID)?;

        BookmarkRepo::new(pool.get_ref()).record_click(bookmark_id, user.id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(MESSAGE_RECENT_UPDATED)))
    }

    pub async fn clear_click(
        pool: web::Data<SqlitePool>,
        user: web::ReqData<Claims>,
        bookmark_id: web::Path<String>,
    ) -> Result<HttpResponse, AppError> {
        let bookmark_id = parse_id(&bookmark_id, MESSAGE_INVALID_BOOKMARK_ID)?;

        BookmarkRepo::new(pool.get_ref()).clear_click(bookmark_id, user.id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::ok(MESSAGE_RECENT_REMOVED)))
    }
}
