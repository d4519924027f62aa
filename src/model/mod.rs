mod bookmark_model;
mod chip_model;
mod folder_model;

pub use bookmark_model::*;
pub use chip_model::*;
pub use folder_model::*;

use serde::{Deserialize, Serialize};

/// Logical lifecycle of a folder, bookmark or chip row. Rows are never
/// removed, only moved to `Deleted`; on disk this is the `isdeleted` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Deleted,
}

impl RecordStatus {
    pub fn from_flag(isdeleted: bool) -> Self {
        if isdeleted {
            RecordStatus::Deleted
        } else {
            RecordStatus::Active
        }
    }

    /// Value stored in the `isdeleted` column.
    pub fn as_flag(self) -> bool {
        self == RecordStatus::Deleted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Alphabet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
    pub folder_id: Option<i64>,
    pub order: Option<String>,
}

/// Success envelope shared by every route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: true, data }
    }
}
