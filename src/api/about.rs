//! About page with collaboration-request form

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tera::Context;

use crate::api::middleware::{AppState, PageError};
use crate::api::render;
use crate::models::Notification;

/// GET /about
pub async fn show_about(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render_about(&state, &[]).await
}

#[derive(Debug, Deserialize)]
pub struct CollaborateForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// POST /about — submit a collaboration request.
pub async fn submit_collaboration(
    State(state): State<AppState>,
    Form(form): Form<CollaborateForm>,
) -> Result<Html<String>, PageError> {
    let notifications = state
        .about_service
        .submit_collaboration(&form.name, &form.email, &form.message)
        .await?;
    render_about(&state, &notifications).await
}

/// Render the About page with a fresh, empty collaboration form.
async fn render_about(
    state: &AppState,
    notifications: &[Notification],
) -> Result<Html<String>, PageError> {
    let about = state.about_service.latest().await?;

    let mut ctx = Context::new();
    ctx.insert("about", &about);
    ctx.insert("notifications", notifications);

    render(state, "about.html", &ctx)
}
