//! Post repository

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::models::{CreatePostInput, Post, PostStatus};

/// Post repository trait
///
/// Posts are written by an external authoring collaborator; the public
/// workflows only read published rows.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a post (authoring side, also used by test fixtures)
    async fn create(&self, input: CreatePostInput) -> Result<Post>;

    /// List published posts in stable id order
    async fn list_published(&self, limit: i64, offset: i64) -> Result<Vec<Post>>;

    /// Count published posts
    async fn count_published(&self) -> Result<i64>;

    /// Find a published post by slug
    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Post>>;
}

/// sqlx-backed post repository
pub struct SqlxPostRepository {
    pool: SqlitePool,
}

impl SqlxPostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> std::sync::Arc<dyn PostRepository> {
        std::sync::Arc::new(Self::new(pool))
    }
}

fn row_to_post(r: &sqlx::sqlite::SqliteRow) -> Post {
    Post {
        id: r.get("id"),
        title: r.get("title"),
        author_id: r.get("author_id"),
        slug: r.get("slug"),
        excerpt: r.get("excerpt"),
        content: r.get("content"),
        status: r.get::<String, _>("status").parse().unwrap_or_default(),
        created_on: r.get("created_on"),
        updated_on: r.get("updated_on"),
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, input: CreatePostInput) -> Result<Post> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO posts (title, author_id, slug, excerpt, content, status, created_on, updated_on)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&input.title)
        .bind(input.author_id)
        .bind(&input.slug)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(input.status.to_string())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Post {
            id: result.last_insert_rowid(),
            title: input.title,
            author_id: input.author_id,
            slug: input.slug,
            excerpt: input.excerpt,
            content: input.content,
            status: input.status,
            created_on: now,
            updated_on: now,
        })
    }

    async fn list_published(&self, limit: i64, offset: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            r#"SELECT * FROM posts WHERE status = 'published'
               ORDER BY id ASC LIMIT ? OFFSET ?"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn count_published(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE status = 'published'")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE slug = ? AND status = 'published'")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_post))
    }
}
