pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::import_service::{ImportService, SharedImportService};
use domain::ports::ImportRepository;
use errors::AppError;
use infrastructure::import_repo::DieselImportRepository;

pub use auth::JwtKeys;
pub use config::AppConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Registers every route of the service.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/health", web::get().to(handlers::health::health))
        .service(
            web::scope("/imports")
                .route("", web::get().to(handlers::imports::list_imports))
                .route("", web::post().to(handlers::imports::create_import))
                .route("/stats/dashboard", web::get().to(handlers::imports::dashboard))
                .route("/{id}", web::get().to(handlers::imports::get_import))
                .route("/{id}/status", web::put().to(handlers::imports::update_status)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation {
            field: "body".to_string(),
            message: err.to_string(),
        }
        .into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation {
            field: "query".to_string(),
            message: err.to_string(),
        }
        .into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| AppError::NotFound.into())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    keys: JwtKeys,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let repo: Box<dyn ImportRepository> = Box::new(DieselImportRepository::new(pool));
    let service: web::Data<SharedImportService> = web::Data::new(ImportService::new(repo));
    let keys = web::Data::new(keys);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(keys.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
