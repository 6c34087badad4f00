//! Identity service
//!
//! This core does not do authentication; it consumes the identity that the
//! session cookie resolves to. `create_user` and `open_session` exist for
//! the external auth collaborator and for test fixtures.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{Session, User};

/// Session lifetime in days
const SESSION_EXPIRATION_DAYS: i64 = 7;

/// Identity service
pub struct IdentityService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
}

impl IdentityService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    /// Create an identity record.
    pub async fn create_user(&self, username: &str, email: &str) -> Result<User> {
        self.user_repo.create(username, email).await
    }

    /// Open a session for a user and return it, token included.
    pub async fn open_session(&self, user_id: i64) -> Result<Session> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::days(SESSION_EXPIRATION_DAYS);
        self.session_repo.create(&token, user_id, expires_at).await
    }

    /// Resolve a session token to its user.
    ///
    /// Expired sessions are dropped on sight and resolve to nobody.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>> {
        let Some(session) = self.session_repo.get_by_token(token).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete(token).await?;
            return Ok(None);
        }

        self.user_repo.get_by_id(session.user_id).await
    }
}
