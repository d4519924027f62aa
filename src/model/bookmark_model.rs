use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

#[derive(Debug, Clone, Serialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub image_id: Option<i64>,
    pub user_id: i64,
    pub folder_id: i64,
    pub chip_id: Option<i64>,
    pub status: RecordStatus,
    pub created_by: String,
    pub updated_by: String,
    pub click_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub image_id: Option<i64>,
    pub user_id: i64,
    pub folder_id: i64,
    pub chip_id: Option<i64>,
    pub created_by: String,
}

#[derive(Deserialize)]
pub struct BookmarkReq {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub folder_id: i64,
    // optional
    #[serde(default)]
    pub chip_id: Option<i64>,
    #[serde(default)]
    pub image_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct BookmarkUpdateReq {
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub folder_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct ChipQuery {
    pub chip_id: Option<i64>,
}
