use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    pub image_id: i64,
    pub user_id: i64,
    pub folder_id: Option<i64>, // parent, None at top level
    pub status: RecordStatus,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewFolder {
    pub name: String,
    pub image_id: i64,
    pub user_id: i64,
    pub folder_id: Option<i64>,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct FolderUpdate {
    pub name: String,
    pub image_id: i64,
    pub updated_by: String,
}

#[derive(Deserialize)]
pub struct FolderReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub folder_id: Option<i64>,
    // optional
    #[serde(default)]
    pub image_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct FolderUpdateReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_id: Option<i64>,
}

/// Outcome of a cascading folder removal.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    /// Folder ids in the order they were marked deleted, children first.
    pub folders: Vec<i64>,
    /// Bookmark rows matched by the per-folder soft delete.
    pub bookmarks: u64,
}
