//! Flash messaging
//!
//! Notifications produced by a workflow that ends in a redirect travel to
//! the next request in a short-lived cookie: the redirect response sets it,
//! the redirected GET reads and clears it.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use crate::models::Notification;

const COOKIE_NAME: &str = "flash";

/// Serialize notifications into a flash cookie value.
fn encode(notifications: &[Notification]) -> String {
    let json = serde_json::to_string(notifications).unwrap_or_else(|_| "[]".to_string());
    urlencoding::encode(&json).into_owned()
}

/// Parse the flash cookie out of a Cookie header, if present.
pub fn take(headers: &HeaderMap) -> Vec<Notification> {
    let Some(cookie) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return Vec::new();
    };

    cookie
        .split(';')
        .find_map(|c| c.trim().strip_prefix("flash="))
        .and_then(|raw| urlencoding::decode(raw).ok())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

/// Set-Cookie value carrying notifications to the next request.
pub fn set_cookie(notifications: &[Notification]) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=60",
        COOKIE_NAME,
        encode(notifications)
    )
}

/// Set-Cookie value that clears a consumed flash cookie.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", COOKIE_NAME)
}

/// A 303 redirect that carries notifications in the flash cookie.
pub fn redirect_with(location: &str, notifications: &[Notification]) -> Response {
    let mut response = Response::new(axum::body::Body::empty());
    *response.status_mut() = StatusCode::SEE_OTHER;
    response.headers_mut().insert(
        header::LOCATION,
        HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/")),
    );
    if !notifications.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&set_cookie(notifications)) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).expect("valid header"));
        headers
    }

    #[test]
    fn test_round_trip_through_cookie() {
        let notes = vec![
            Notification::success("Comment updated."),
            Notification::error("You can only delete your own comments."),
        ];
        let set = set_cookie(&notes);
        let value = set.split(';').next().expect("cookie pair");

        let headers = headers_with_cookie(&format!("session=abc; {}", value));
        assert_eq!(take(&headers), notes);
    }

    #[test]
    fn test_no_cookie_is_empty() {
        assert!(take(&HeaderMap::new()).is_empty());
        let headers = headers_with_cookie("session=abc");
        assert!(take(&headers).is_empty());
    }

    #[test]
    fn test_garbage_cookie_is_empty() {
        let headers = headers_with_cookie("flash=%7Bnot-json");
        assert!(take(&headers).is_empty());
    }

    #[test]
    fn test_redirect_sets_location_and_cookie() {
        let notes = vec![Notification::success("Comment deleted.")];
        let response = redirect_with("/blog/blog-slug", &notes);

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).expect("location"),
            "/blog/blog-slug"
        );
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }
}
