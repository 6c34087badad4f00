//! Driftwood - A personal blog and portfolio site

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use driftwood::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxAboutRepository, SqlxCollaborateRepository, SqlxCommentRepository,
            SqlxPostRepository, SqlxSessionRepository, SqlxUserRepository,
        },
    },
    services::{AboutService, CommentService, IdentityService, PostService},
    theme::ThemeEngine,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "driftwood=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Driftwood...");

    let config = Config::load(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database).await?;
    db::migrations::run_migrations(&pool).await?;
    tracing::info!(url = %config.database.url, "Database ready");

    let theme_engine = ThemeEngine::new(Path::new(&config.templates.path))?;
    tracing::info!(path = %config.templates.path, "Templates loaded");

    let state = AppState {
        post_service: Arc::new(PostService::new(SqlxPostRepository::boxed(pool.clone()))),
        comment_service: Arc::new(CommentService::new(SqlxCommentRepository::boxed(
            pool.clone(),
        ))),
        about_service: Arc::new(AboutService::new(
            SqlxAboutRepository::boxed(pool.clone()),
            SqlxCollaborateRepository::boxed(pool.clone()),
        )),
        identity_service: Arc::new(IdentityService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool.clone()),
        )),
        theme_engine: Arc::new(theme_engine),
    };

    let app = api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
