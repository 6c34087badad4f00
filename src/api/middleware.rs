//! Shared API state, error mapping and identity extraction

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::models::User;
use crate::services::{
    AboutService, CommentService, CommentServiceError, IdentityService, PostService,
    PostServiceError,
};
use crate::theme::ThemeEngine;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PostService>,
    pub comment_service: Arc<CommentService>,
    pub about_service: Arc<AboutService>,
    pub identity_service: Arc<IdentityService>,
    pub theme_engine: Arc<ThemeEngine>,
}

/// Page-level error outcome
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Referenced post or comment does not exist
    #[error("Not found")]
    NotFound,

    /// Mutation attempted without a valid session
    #[error("Authentication required")]
    Unauthorized,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PostServiceError> for PageError {
    fn from(err: PostServiceError) -> Self {
        match err {
            PostServiceError::NotFound => Self::NotFound,
            PostServiceError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<CommentServiceError> for PageError {
    fn from(err: CommentServiceError) -> Self {
        match err {
            CommentServiceError::NotFound => Self::NotFound,
            CommentServiceError::Internal(e) => Self::Internal(e),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                "<h1>404</h1><p>The page you were looking for does not exist.</p>".to_string(),
            ),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "<h1>401</h1><p>You must be logged in to do that.</p>".to_string(),
            ),
            Self::Internal(e) => {
                tracing::error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "<h1>500</h1><p>Something went wrong.</p>".to_string(),
                )
            }
        };
        (status, Html(body)).into_response()
    }
}

/// Authenticated user resolved from the session cookie
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Pull the session token out of a Cookie header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|c| c.trim().strip_prefix("session="))
        .map(str::to_string)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(PageError::Unauthorized)?;
        let user = state
            .identity_service
            .validate_session(&token)
            .await
            .map_err(PageError::Internal)?
            .ok_or(PageError::Unauthorized)?;
        Ok(CurrentUser(user))
    }
}

/// Possibly-anonymous visitor; pages that render for everyone use this to
/// decide whether to show the comment form and ownership controls.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Ok(Self(None));
        };
        let user = state
            .identity_service
            .validate_session(&token)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Session validation failed");
                None
            });
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc-123; flash=x"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_missing_session_token() {
        assert!(session_token(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());
    }
}
