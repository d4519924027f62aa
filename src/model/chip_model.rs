use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// A named tag tied to a folder; bookmarks may carry one.
#[derive(Debug, Clone, Serialize)]
pub struct Chip {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    pub folder_id: i64,
    pub status: RecordStatus,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewChip {
    pub name: String,
    pub user_id: i64,
    pub folder_id: i64,
    pub created_by: String,
}

#[derive(Deserialize)]
pub struct ChipReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub folder_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct ChipUpdateReq {
    #[serde(default)]
    pub name: String,
}
