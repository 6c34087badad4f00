//! Blog listing and post detail pages

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tera::Context;

use crate::api::middleware::{AppState, CurrentUser, MaybeUser, PageError};
use crate::api::{flash, render};
use crate::models::{Notification, Post, User};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// GET / — paginated listing of published posts.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, PageError> {
    // A page parameter that is not a positive integer is a 404, matching
    // the usual pagination contract; a too-large page clamps instead.
    let page = match query.page.as_deref() {
        None => 1,
        Some(raw) => raw.parse::<i64>().map_err(|_| PageError::NotFound)?,
    };

    let post_page = state.post_service.page(page).await?;

    let mut ctx = Context::new();
    ctx.insert("posts", &post_page.posts);
    ctx.insert("page", &post_page.page);
    ctx.insert("total_pages", &post_page.total_pages);
    ctx.insert("has_previous", &post_page.has_previous());
    ctx.insert("has_next", &post_page.has_next());

    Ok(render(&state, "index.html", &ctx)?.into_response())
}

/// GET /blog/{slug} — post detail with comments.
pub async fn show_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let post = state.post_service.published_by_slug(&slug).await?;
    let notifications = flash::take(&headers);
    let had_flash = !notifications.is_empty();

    let page = render_detail(&state, &post, user.as_ref(), &notifications).await?;

    let mut response = page.into_response();
    if had_flash {
        if let Ok(value) = HeaderValue::from_str(&flash::clear_cookie()) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    Ok(response)
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

/// POST /blog/{slug} — submit a comment (authenticated only).
pub async fn create_comment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<CommentForm>,
) -> Result<Response, PageError> {
    let post = state.post_service.published_by_slug(&slug).await?;
    let notifications = state
        .comment_service
        .submit(post.id, &user, &form.body)
        .await?;

    Ok(render_detail(&state, &post, Some(&user), &notifications)
        .await?
        .into_response())
}

/// Render the post-detail page with a fresh comment section.
async fn render_detail(
    state: &AppState,
    post: &Post,
    user: Option<&User>,
    notifications: &[Notification],
) -> Result<axum::response::Html<String>, PageError> {
    let section = state.comment_service.section_for_post(post.id).await?;

    let mut ctx = Context::new();
    ctx.insert("post", post);
    ctx.insert("comments", &section.comments);
    ctx.insert("comment_count", &section.approved_count);
    ctx.insert("notifications", notifications);
    ctx.insert("user", &user);

    render(state, "post_detail.html", &ctx)
}
