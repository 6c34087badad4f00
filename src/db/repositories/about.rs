//! About page repository

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::models::About;

/// About repository trait
///
/// Records are authored by an external admin collaborator; the web workflow
/// only ever reads the newest one.
#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Create an About record (authoring side, also used by test fixtures)
    async fn create(&self, title: &str, profile_image: &str, content: &str) -> Result<About>;

    /// The most recently updated About record, if any
    async fn latest(&self) -> Result<Option<About>>;
}

/// sqlx-backed About repository
pub struct SqlxAboutRepository {
    pool: SqlitePool,
}

impl SqlxAboutRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> std::sync::Arc<dyn AboutRepository> {
        std::sync::Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AboutRepository for SqlxAboutRepository {
    async fn create(&self, title: &str, profile_image: &str, content: &str) -> Result<About> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO about (title, profile_image, content, updated_on) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(profile_image)
        .bind(content)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(About {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            profile_image: profile_image.to_string(),
            content: content.to_string(),
            updated_on: now,
        })
    }

    async fn latest(&self) -> Result<Option<About>> {
        let row = sqlx::query("SELECT * FROM about ORDER BY updated_on DESC, id DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| About {
            id: r.get("id"),
            title: r.get("title"),
            profile_image: r.get("profile_image"),
            content: r.get("content"),
            updated_on: r.get("updated_on"),
        }))
    }
}
