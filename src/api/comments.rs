//! Comment edit and delete endpoints
//!
//! Both redirect back to the post-detail page; the outcome travels in the
//! flash cookie.

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::api::flash;
use crate::api::middleware::{AppState, CurrentUser, PageError};

#[derive(Debug, Deserialize)]
pub struct EditCommentForm {
    pub body: String,
}

/// POST /blog/{slug}/edit_comment/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    Path((slug, comment_id)): Path<(String, i64)>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<EditCommentForm>,
) -> Result<Response, PageError> {
    let notifications = state
        .comment_service
        .edit(comment_id, &user, &form.body)
        .await?;
    Ok(flash::redirect_with(
        &format!("/blog/{}", slug),
        &notifications,
    ))
}

/// GET or POST /blog/{slug}/delete_comment/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((slug, comment_id)): Path<(String, i64)>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, PageError> {
    let notifications = state.comment_service.delete(comment_id, &user).await?;
    Ok(flash::redirect_with(
        &format!("/blog/{}", slug),
        &notifications,
    ))
}
