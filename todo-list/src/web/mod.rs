use axum::Router;
use axum::routing::get;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{self, Config};
use crate::task::{TodoState, create_todo_router};

pub mod docs;
pub mod error;
pub mod extract;

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let app = create_app(&config, Arc::new(db));
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assembles the full application: health check, to-do API, optional docs, tracing and CORS.
pub fn create_app(config: &Config, db: Arc<DatabaseConnection>) -> Router {
    let todo_router = create_todo_router(TodoState { db });

    let mut app = Router::new()
        .route("/health", get(health_check_handler))
        .merge(todo_router);

    if config.docs_enabled() {
        tracing::info!("Serving API documentation at {}", docs::SWAGGER_UI_PATH);
        app = app.merge(docs::swagger_ui());
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(config)),
    )
}

/// Builds the CORS policy from the startup configuration.
fn cors_layer(config: &Config) -> CorsLayer {
    let mut cors = CorsLayer::new();
    if config.cors_allow_any_origin {
        cors = cors.allow_origin(Any);
    }
    if config.cors_allow_any_header {
        cors = cors.allow_headers(Any);
    }
    if config.cors_allow_any_method {
        cors = cors.allow_methods(Any);
    }
    cors
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
