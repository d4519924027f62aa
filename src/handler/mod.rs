mod bookmark_handler;
mod chip_handler;
mod folder_handler;

pub use bookmark_handler::BookmarkHandler;
pub use chip_handler::ChipHandler;
pub use folder_handler::FolderHandler;
