mod apis;
mod config;
mod constants;
mod db;
mod error;
mod handler;
mod hierarchy;
mod jwt;
mod model;
mod repo;
mod utils;

#[cfg(test)]
mod apis_mock;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;

use config::Config;
use db::{init_pool, initialize_db};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env()?;

    let pool = init_pool(&config)
        .await
        .with_context(|| format!("Unable to open the db at {}", config.database_url))?;
    initialize_db(&pool)
        .await
        .context("Unable to initialize the db")?;

    let bind_addr = config.bind_addr();
    log::info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(actix_web::middleware::Logger::default())
            .configure(apis::config)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
