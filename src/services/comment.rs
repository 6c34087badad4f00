//! Comment service
//!
//! The comment moderation and ownership workflow: submissions and edits
//! always re-enter moderation, and only a comment's author may change or
//! remove it. Every workflow returns the notifications the page should
//! surface, so the HTTP layer stays a thin adapter.

use std::sync::Arc;

use crate::db::repositories::CommentRepository;
use crate::models::{CommentWithAuthor, Notification, User};
use crate::services::validation::validate_comment_body;

pub const MSG_COMMENT_SUBMITTED: &str = "Comment submitted and awaiting approval";
pub const MSG_COMMENT_UPDATED: &str = "Comment updated.";
pub const MSG_COMMENT_UPDATE_ERROR: &str = "Error updating comment.";
pub const MSG_COMMENT_DELETED: &str = "Comment deleted.";
pub const MSG_COMMENT_DELETE_DENIED: &str = "You can only delete your own comments.";

/// Error types for comment workflows
///
/// Validation and authorization failures are not errors here: they resolve
/// into ERROR notifications and the request still completes. Only a missing
/// comment (or a store fault) aborts the workflow.
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Comment does not exist
    #[error("Comment not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A post's comment section as the detail page shows it
#[derive(Debug, Clone)]
pub struct CommentSection {
    /// All comments, newest first, unapproved included
    pub comments: Vec<CommentWithAuthor>,
    /// Count of approved comments only
    pub approved_count: i64,
}

/// Comment service
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    /// The comment list and approved count for a post's detail page.
    pub async fn section_for_post(&self, post_id: i64) -> Result<CommentSection, CommentServiceError> {
        let comments = self.repo.list_for_post(post_id).await?;
        let approved_count = self.repo.count_approved(post_id).await?;
        Ok(CommentSection {
            comments,
            approved_count,
        })
    }

    /// Submit a new comment on a post.
    ///
    /// A valid body is stored unapproved under the requester's identity; an
    /// invalid body stores nothing. Either way the caller gets the
    /// notifications to display.
    pub async fn submit(
        &self,
        post_id: i64,
        author: &User,
        body: &str,
    ) -> Result<Vec<Notification>, CommentServiceError> {
        match validate_comment_body(body) {
            Ok(body) => {
                let comment = self.repo.create(post_id, author.id, &body).await?;
                tracing::info!(comment_id = comment.id, post_id, "Comment submitted");
                Ok(vec![Notification::success(MSG_COMMENT_SUBMITTED)])
            }
            Err(_) => Ok(vec![Notification::error(MSG_COMMENT_UPDATE_ERROR)]),
        }
    }

    /// Edit an existing comment.
    ///
    /// The comment must exist regardless of anything else. The update only
    /// happens when the body validates and the requester is the stored
    /// author; the edited comment goes back into moderation.
    pub async fn edit(
        &self,
        comment_id: i64,
        requester: &User,
        body: &str,
    ) -> Result<Vec<Notification>, CommentServiceError> {
        let comment = self
            .repo
            .get_by_id(comment_id)
            .await?
            .ok_or(CommentServiceError::NotFound)?;

        // Validity first, ownership second; both must hold
        match validate_comment_body(body) {
            Ok(body) if comment.is_owned_by(requester.id) => {
                self.repo.update_body(comment.id, &body).await?;
                tracing::info!(comment_id, "Comment updated");
                Ok(vec![Notification::success(MSG_COMMENT_UPDATED)])
            }
            _ => Ok(vec![Notification::error(MSG_COMMENT_UPDATE_ERROR)]),
        }
    }

    /// Delete an existing comment, author only.
    pub async fn delete(
        &self,
        comment_id: i64,
        requester: &User,
    ) -> Result<Vec<Notification>, CommentServiceError> {
        let comment = self
            .repo
            .get_by_id(comment_id)
            .await?
            .ok_or(CommentServiceError::NotFound)?;

        if comment.is_owned_by(requester.id) {
            self.repo.delete(comment.id).await?;
            tracing::info!(comment_id, "Comment deleted");
            Ok(vec![Notification::success(MSG_COMMENT_DELETED)])
        } else {
            Ok(vec![Notification::error(MSG_COMMENT_DELETE_DENIED)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        PostRepository, SqlxCommentRepository, SqlxPostRepository, SqlxUserRepository,
        UserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::{Comment, CreatePostInput, PostStatus, Severity};
    use sqlx::SqlitePool;

    struct Fixture {
        pool: SqlitePool,
        service: CommentService,
        repo: Arc<dyn CommentRepository>,
        alice: User,
        bob: User,
        post_id: i64,
    }

    async fn setup() -> Fixture {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::new(pool.clone());
        let alice = users
            .create("alice", "alice@example.com")
            .await
            .expect("Failed to create alice");
        let bob = users
            .create("bob", "bob@example.com")
            .await
            .expect("Failed to create bob");

        let post = SqlxPostRepository::new(pool.clone())
            .create(CreatePostInput {
                title: "Blog title".to_string(),
                author_id: alice.id,
                slug: "blog-slug".to_string(),
                excerpt: "Blog excerpt".to_string(),
                content: "Blog content".to_string(),
                status: PostStatus::Published,
            })
            .await
            .expect("Failed to create post");

        let repo = SqlxCommentRepository::boxed(pool.clone());
        Fixture {
            pool,
            service: CommentService::new(repo.clone()),
            repo,
            alice,
            bob,
            post_id: post.id,
        }
    }

    async fn stored_comment(fx: &Fixture, id: i64) -> Comment {
        fx.repo
            .get_by_id(id)
            .await
            .expect("Lookup should succeed")
            .expect("Comment should exist")
    }

    #[tokio::test]
    async fn test_submit_creates_unapproved_comment() {
        let fx = setup().await;

        let notes = fx
            .service
            .submit(fx.post_id, &fx.alice, "Comment body")
            .await
            .expect("Submit should succeed");
        assert_eq!(notes, vec![Notification::success(MSG_COMMENT_SUBMITTED)]);

        let section = fx
            .service
            .section_for_post(fx.post_id)
            .await
            .expect("Section should load");
        assert_eq!(section.comments.len(), 1);
        let comment = &section.comments[0];
        assert_eq!(comment.author_id, fx.alice.id);
        assert_eq!(comment.author_name, "alice");
        assert_eq!(comment.body, "Comment body");
        assert!(!comment.approved);
        // Unapproved comments are listed but not counted
        assert_eq!(section.approved_count, 0);
    }

    #[tokio::test]
    async fn test_submit_blank_body_stores_nothing() {
        let fx = setup().await;

        let notes = fx
            .service
            .submit(fx.post_id, &fx.alice, "   ")
            .await
            .expect("Submit should complete");
        assert_eq!(notes, vec![Notification::error(MSG_COMMENT_UPDATE_ERROR)]);

        let section = fx
            .service
            .section_for_post(fx.post_id)
            .await
            .expect("Section should load");
        assert!(section.comments.is_empty());
    }

    #[tokio::test]
    async fn test_comments_listed_newest_first() {
        let fx = setup().await;
        fx.service
            .submit(fx.post_id, &fx.alice, "first")
            .await
            .expect("Submit should succeed");
        fx.service
            .submit(fx.post_id, &fx.bob, "second")
            .await
            .expect("Submit should succeed");

        let section = fx
            .service
            .section_for_post(fx.post_id)
            .await
            .expect("Section should load");
        let bodies: Vec<_> = section.comments.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_approved_count_tracks_moderation() {
        let fx = setup().await;
        fx.service
            .submit(fx.post_id, &fx.alice, "one")
            .await
            .expect("Submit should succeed");
        fx.service
            .submit(fx.post_id, &fx.bob, "two")
            .await
            .expect("Submit should succeed");

        // External moderation approves one comment
        sqlx::query("UPDATE comments SET approved = 1 WHERE body = 'one'")
            .execute(&fx.pool)
            .await
            .expect("Moderation update should succeed");

        let section = fx
            .service
            .section_for_post(fx.post_id)
            .await
            .expect("Section should load");
        assert_eq!(section.comments.len(), 2);
        assert_eq!(section.approved_count, 1);
    }

    #[tokio::test]
    async fn test_author_edit_updates_and_resets_approval() {
        let fx = setup().await;
        fx.service
            .submit(fx.post_id, &fx.alice, "original")
            .await
            .expect("Submit should succeed");
        let id = stored_id(&fx).await;

        // Moderator approved it in the meantime
        sqlx::query("UPDATE comments SET approved = 1 WHERE id = ?")
            .bind(id)
            .execute(&fx.pool)
            .await
            .expect("Moderation update should succeed");

        let notes = fx
            .service
            .edit(id, &fx.alice, "revised")
            .await
            .expect("Edit should succeed");
        assert_eq!(notes, vec![Notification::success(MSG_COMMENT_UPDATED)]);

        let comment = stored_comment(&fx, id).await;
        assert_eq!(comment.body, "revised");
        // Edits always go back into moderation
        assert!(!comment.approved);
    }

    #[tokio::test]
    async fn test_non_author_edit_changes_nothing() {
        let fx = setup().await;
        fx.service
            .submit(fx.post_id, &fx.alice, "original")
            .await
            .expect("Submit should succeed");
        let id = stored_id(&fx).await;

        let notes = fx
            .service
            .edit(id, &fx.bob, "hack")
            .await
            .expect("Edit should complete");
        assert_eq!(notes, vec![Notification::error(MSG_COMMENT_UPDATE_ERROR)]);
        assert_eq!(notes[0].severity, Severity::Error);

        let comment = stored_comment(&fx, id).await;
        assert_eq!(comment.body, "original");
    }

    #[tokio::test]
    async fn test_author_edit_with_blank_body_changes_nothing() {
        let fx = setup().await;
        fx.service
            .submit(fx.post_id, &fx.alice, "original")
            .await
            .expect("Submit should succeed");
        let id = stored_id(&fx).await;

        let notes = fx
            .service
            .edit(id, &fx.alice, "")
            .await
            .expect("Edit should complete");
        assert_eq!(notes, vec![Notification::error(MSG_COMMENT_UPDATE_ERROR)]);
        assert_eq!(stored_comment(&fx, id).await.body, "original");
    }

    #[tokio::test]
    async fn test_edit_missing_comment_is_not_found() {
        let fx = setup().await;
        assert!(matches!(
            fx.service.edit(404, &fx.alice, "body").await,
            Err(CommentServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_author_delete_removes_row() {
        let fx = setup().await;
        fx.service
            .submit(fx.post_id, &fx.alice, "bye")
            .await
            .expect("Submit should succeed");
        let id = stored_id(&fx).await;

        let notes = fx
            .service
            .delete(id, &fx.alice)
            .await
            .expect("Delete should succeed");
        assert_eq!(notes, vec![Notification::success(MSG_COMMENT_DELETED)]);
        assert!(fx
            .repo
            .get_by_id(id)
            .await
            .expect("Lookup should succeed")
            .is_none());
    }

    #[tokio::test]
    async fn test_non_author_delete_leaves_row() {
        let fx = setup().await;
        fx.service
            .submit(fx.post_id, &fx.alice, "keep")
            .await
            .expect("Submit should succeed");
        let id = stored_id(&fx).await;

        let notes = fx
            .service
            .delete(id, &fx.bob)
            .await
            .expect("Delete should complete");
        assert_eq!(
            notes,
            vec![Notification::error(MSG_COMMENT_DELETE_DENIED)]
        );
        assert!(fx
            .repo
            .get_by_id(id)
            .await
            .expect("Lookup should succeed")
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_found() {
        let fx = setup().await;
        assert!(matches!(
            fx.service.delete(404, &fx.alice).await,
            Err(CommentServiceError::NotFound)
        ));
    }

    async fn stored_id(fx: &Fixture) -> i64 {
        sqlx::query_scalar("SELECT id FROM comments ORDER BY id DESC LIMIT 1")
            .fetch_one(&fx.pool)
            .await
            .expect("Comment id should exist")
    }
}
