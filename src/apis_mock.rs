use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::db::{init_pool, initialize_db};
use crate::jwt::{create_jwt, Claims};
use crate::model::{NewBookmark, NewChip, NewFolder};
use crate::repo::{BookmarkRepo, ChipRepo, FolderRepo};

pub const TEST_SECRET: &str = "test-secret";

/// In-memory database with the production schema. One connection that never
/// expires, since every `sqlite::memory:` connection is its own database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    initialize_db(&pool).await.unwrap();
    pool
}

/// File-backed database behind the production pool, so several connections
/// really compete for the SQLite locks. Returns the file path for cleanup.
pub async fn setup_file_db(name: &str) -> (SqlitePool, PathBuf) {
    let path = std::env::temp_dir().join(format!("litmark-{}-{}.db", name, std::process::id()));
    remove_db_files(&path);

    let config = Config {
        database_url: format!("sqlite://{}", path.display()),
        max_connections: 5,
        ..test_config()
    };
    let pool = init_pool(&config).await.unwrap();
    initialize_db(&pool).await.unwrap();
    (pool, path)
}

pub fn remove_db_files(path: &Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        max_connections: 1,
    }
}

pub fn bearer(user_id: i64) -> String {
    let claims = Claims {
        id: user_id,
        username: format!("user{}", user_id),
        email: format!("user{}@example.com", user_id),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    format!("Bearer {}", create_jwt(&claims, TEST_SECRET).unwrap())
}

pub async fn seed_folder(pool: &SqlitePool, user_id: i64, parent: Option<i64>, name: &str) -> i64 {
    FolderRepo::new(pool)
        .insert(&NewFolder {
            name: name.to_string(),
            image_id: 1,
            user_id,
            folder_id: parent,
            created_by: format!("user{}", user_id),
        })
        .await
        .unwrap()
}

pub async fn seed_bookmark(pool: &SqlitePool, user_id: i64, folder_id: i64, title: &str) -> i64 {
    BookmarkRepo::new(pool)
        .insert(&NewBookmark {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            image_id: None,
            user_id,
            folder_id,
            chip_id: None,
            created_by: format!("user{}", user_id),
        })
        .await
        .unwrap()
}

pub async fn seed_chip(pool: &SqlitePool, user_id: i64, folder_id: i64, name: &str) -> i64 {
    ChipRepo::new(pool)
        .insert(&NewChip {
            name: name.to_string(),
            user_id,
            folder_id,
            created_by: format!("user{}", user_id),
        })
        .await
        .unwrap()
}

/// Builds the full app around `pool`, the way `main` does minus CORS.
macro_rules! setup_test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($crate::apis_mock::test_config()))
                .configure($crate::apis::config),
        )
        .await
    };
}

pub(crate) use setup_test_app;
