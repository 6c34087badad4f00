//! Comment repository

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::models::{Comment, CommentWithAuthor};

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a comment; new comments always await moderation
    async fn create(&self, post_id: i64, author_id: i64, body: &str) -> Result<Comment>;

    /// Get a comment by id
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>>;

    /// Comments for a post with author names, newest first
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>>;

    /// Count of approved comments for a post
    async fn count_approved(&self, post_id: i64) -> Result<i64>;

    /// Replace a comment's body; the edit sends it back into moderation
    async fn update_body(&self, id: i64, body: &str) -> Result<bool>;

    /// Delete a comment
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// sqlx-backed comment repository
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> std::sync::Arc<dyn CommentRepository> {
        std::sync::Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, post_id: i64, author_id: i64, body: &str) -> Result<Comment> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO comments (post_id, author_id, body, approved, created_on)
               VALUES (?, ?, ?, 0, ?)"#,
        )
        .bind(post_id)
        .bind(author_id)
        .bind(body)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            post_id,
            author_id,
            body: body.to_string(),
            approved: false,
            created_on: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Comment {
            id: r.get("id"),
            post_id: r.get("post_id"),
            author_id: r.get("author_id"),
            body: r.get("body"),
            approved: r.get("approved"),
            created_on: r.get("created_on"),
        }))
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query(
            r#"SELECT c.*, u.username
               FROM comments c
               JOIN users u ON c.author_id = u.id
               WHERE c.post_id = ?
               ORDER BY c.created_on DESC, c.id DESC"#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| CommentWithAuthor {
                id: r.get("id"),
                post_id: r.get("post_id"),
                author_id: r.get("author_id"),
                author_name: r.get("username"),
                body: r.get("body"),
                approved: r.get("approved"),
                created_on: r.get("created_on"),
            })
            .collect())
    }

    async fn count_approved(&self, post_id: i64) -> Result<i64> {
        let count =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ? AND approved = 1")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn update_body(&self, id: i64, body: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE comments SET body = ?, approved = 0 WHERE id = ?")
            .bind(body)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
