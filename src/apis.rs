use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::handler::{BookmarkHandler, ChipHandler, FolderHandler};
use crate::jwt::validator;

/// Registers every route. Literal segments (`/sort`, `/recent`, ...) come
/// before the `{id}` catch-alls of the same method.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/folder")
            .wrap(HttpAuthentication::bearer(validator))
            .route("/sort", web::get().to(FolderHandler::get_sorted))
            .route("", web::get().to(FolderHandler::get_top_level))
            .route("", web::post().to(FolderHandler::create))
            .route("/{id}", web::get().to(FolderHandler::get_nested))
            .route("/{id}", web::patch().to(FolderHandler::update))
            .route("/{id}", web::delete().to(FolderHandler::delete)),
    )
    .service(
        web::scope("/bookmark")
            .wrap(HttpAuthentication::bearer(validator))
            .route("/recent", web::get().to(BookmarkHandler::get_recent))
            .route("/recent/sort", web::get().to(BookmarkHandler::sort_recent))
            .route("/recent/filter", web::get().to(BookmarkHandler::filter_recent))
            .route("/recent/search", web::get().to(BookmarkHandler::search_recent))
            .route("/recent/{id}", web::patch().to(BookmarkHandler::record_click))
            .route("/recent/{id}", web::delete().to(BookmarkHandler::clear_click))
            .route("/search", web::get().to(BookmarkHandler::search))
            .route("/sort", web::get().to(BookmarkHandler::get_sorted))
            .route("", web::get().to(BookmarkHandler::get_all))
            .route("", web::post().to(BookmarkHandler::create))
            .route("/{folder_id}", web::get().to(BookmarkHandler::get_by_folder))
            .route("/{id}", web::patch().to(BookmarkHandler::update))
            .route("/{id}", web::delete().to(BookmarkHandler::delete)),
    )
    .service(
        web::scope("/chip")
            .wrap(HttpAuthentication::bearer(validator))
            .route("", web::get().to(ChipHandler::get_all))
            .route("", web::post().to(ChipHandler::create))
            .route("/{id}", web::patch().to(ChipHandler::update))
            .route("/{id}", web::delete().to(ChipHandler::delete)),
    );
}
