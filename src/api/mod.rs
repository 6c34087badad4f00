//! API layer - HTTP handlers and routing
//!
//! Thin axum adapters over the services: extract, call the workflow, render
//! or redirect with the returned notifications.

pub mod about;
pub mod comments;
pub mod flash;
pub mod middleware;
pub mod posts;

use axum::{response::Html, routing::get, routing::post, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use middleware::{AppState, CurrentUser, MaybeUser, PageError};

/// Render a template against the shared engine.
pub(crate) fn render(
    state: &AppState,
    template: &str,
    ctx: &tera::Context,
) -> Result<Html<String>, PageError> {
    let body = state.theme_engine.render(template, ctx)?;
    Ok(Html(body))
}

/// Build the site router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(posts::list_posts))
        .route(
            "/about",
            get(about::show_about).post(about::submit_collaboration),
        )
        .route(
            "/blog/{slug}",
            get(posts::show_post).post(posts::create_comment),
        )
        .route(
            "/blog/{slug}/edit_comment/{comment_id}",
            post(comments::edit_comment),
        )
        .route(
            "/blog/{slug}/delete_comment/{comment_id}",
            get(comments::delete_comment).post(comments::delete_comment),
        )
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
