//! About page service
//!
//! Reads the latest About content and stores collaboration requests.

use std::sync::Arc;

use anyhow::Result;

use crate::db::repositories::{AboutRepository, CollaborateRepository};
use crate::models::{About, Notification};
use crate::services::validation::validate_collaborate_request;

pub const MSG_COLLABORATE_RECEIVED: &str =
    "Collaboration request received! I endeavour to respond within 2 working days.";
pub const MSG_COLLABORATE_ERROR: &str =
    "Error saving your collaboration request. Please try again.";

/// About page service
pub struct AboutService {
    about_repo: Arc<dyn AboutRepository>,
    collaborate_repo: Arc<dyn CollaborateRepository>,
}

impl AboutService {
    pub fn new(
        about_repo: Arc<dyn AboutRepository>,
        collaborate_repo: Arc<dyn CollaborateRepository>,
    ) -> Self {
        Self {
            about_repo,
            collaborate_repo,
        }
    }

    /// The most recently updated About record. An empty store is not an
    /// error; the page renders without content.
    pub async fn latest(&self) -> Result<Option<About>> {
        self.about_repo.latest().await
    }

    /// Store a collaboration request.
    ///
    /// Valid submissions are persisted unread; invalid ones persist nothing.
    /// Either way the caller gets the notifications to display.
    pub async fn submit_collaboration(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Vec<Notification>> {
        match validate_collaborate_request(name, email, message) {
            Ok(fields) => {
                let request = self.collaborate_repo.create(&fields).await?;
                tracing::info!(request_id = request.id, "Collaboration request received");
                Ok(vec![Notification::success(MSG_COLLABORATE_RECEIVED)])
            }
            Err(errors) => {
                tracing::debug!(%errors, "Collaboration request rejected");
                Ok(vec![Notification::error(MSG_COLLABORATE_ERROR)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxAboutRepository, SqlxCollaborateRepository};
    use crate::db::{create_test_pool, migrations};
    use sqlx::SqlitePool;

    async fn setup() -> (SqlitePool, AboutService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let service = AboutService::new(
            SqlxAboutRepository::boxed(pool.clone()),
            SqlxCollaborateRepository::boxed(pool.clone()),
        );
        (pool, service)
    }

    #[tokio::test]
    async fn test_latest_on_empty_store_is_none() {
        let (_pool, service) = setup().await;
        assert!(service.latest().await.expect("Should succeed").is_none());
    }

    #[tokio::test]
    async fn test_latest_picks_most_recently_updated() {
        let (pool, service) = setup().await;
        let repo = SqlxAboutRepository::new(pool.clone());
        repo.create("Old", "placeholder", "old content")
            .await
            .expect("Failed to create about");
        // Second record lands with a later updated_on
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create("New", "placeholder", "new content")
            .await
            .expect("Failed to create about");

        let about = service
            .latest()
            .await
            .expect("Should succeed")
            .expect("Record should exist");
        assert_eq!(about.title, "New");
    }

    #[tokio::test]
    async fn test_valid_submission_stored_unread() {
        let (pool, service) = setup().await;

        let notes = service
            .submit_collaboration("Jo", "jo@example.com", "Let's build something")
            .await
            .expect("Submit should succeed");
        assert_eq!(notes, vec![Notification::success(MSG_COLLABORATE_RECEIVED)]);

        let requests = SqlxCollaborateRepository::new(pool)
            .list_unread()
            .await
            .expect("Listing should succeed");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "Jo");
        assert!(!requests[0].read);
    }

    #[tokio::test]
    async fn test_invalid_submission_stores_nothing() {
        let (pool, service) = setup().await;

        let notes = service
            .submit_collaboration("Jo", "not-an-email", "hello")
            .await
            .expect("Submit should complete");
        assert_eq!(notes, vec![Notification::error(MSG_COLLABORATE_ERROR)]);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collaborate_requests")
            .fetch_one(&pool)
            .await
            .expect("Count should succeed");
        assert_eq!(count, 0);
    }
}
