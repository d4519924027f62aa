// Folder messages
pub const MESSAGE_INVALID_FOLDER_ID: &str = "Invalid folder ID.";
pub const MESSAGE_NAME_REQUIRED: &str = "Name is required.";
pub const MESSAGE_FOLDER_NOT_FOUND: &str = "Folder does not exist.";
pub const MESSAGE_FOLDER_UPDATE_FAILED: &str = "Failed to update folder.";
pub const MESSAGE_FOLDER_DELETED: &str = "Folder deleted successfully";

// Bookmark messages
pub const MESSAGE_INVALID_BOOKMARK_ID: &str = "Invalid bookmark ID.";
pub const MESSAGE_TITLE_REQUIRED: &str = "Title is required.";
pub const MESSAGE_URL_REQUIRED: &str = "Url is required.";
pub const MESSAGE_BOOKMARK_NOT_FOUND: &str = "Bookmark does not exist.";
pub const MESSAGE_BOOKMARK_UPDATE_FAILED: &str = "Failed to update bookmark.";
pub const MESSAGE_BOOKMARK_DELETE_FAILED: &str = "Failed to delete bookmark.";
pub const MESSAGE_BOOKMARK_DELETED: &str = "Bookmark deleted successfully";
pub const MESSAGE_SEARCH_QUERY_EMPTY: &str = "Search query is empty";
pub const MESSAGE_RECENT_UPDATED: &str = "Recent bookmark updated";
pub const MESSAGE_RECENT_REMOVED: &str = "Recent bookmark removed";

// Chip messages
pub const MESSAGE_INVALID_CHIP_ID: &str = "Invalid chip ID.";
pub const MESSAGE_CHIP_FIELDS_REQUIRED: &str = "Name and folder ID are required.";
pub const MESSAGE_CHIP_NOT_FOUND: &str = "Chip does not exist.";
pub const MESSAGE_CHIP_UPDATE_FAILED: &str = "Failed to update chip.";

// Shared
pub const MESSAGE_INVALID_DATA: &str = "Invalid Data";
pub const MESSAGE_INVALID_TOKEN: &str = "Invalid token, please login again";
pub const MESSAGE_INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// Defaults
pub const DEFAULT_FOLDER_IMAGE_ID: i64 = 1;
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
