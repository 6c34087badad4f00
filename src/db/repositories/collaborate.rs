//! Collaboration request repository

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::models::CollaborateRequest;
use crate::services::validation::CollaborateFields;

/// Collaboration request repository trait
///
/// Insert-only from the web workflow; the unread listing serves the external
/// triage process that later flips the read flag.
#[async_trait]
pub trait CollaborateRepository: Send + Sync {
    /// Store an already-validated collaboration request, unread
    async fn create(&self, fields: &CollaborateFields) -> Result<CollaborateRequest>;

    /// Requests not yet triaged, oldest first
    async fn list_unread(&self) -> Result<Vec<CollaborateRequest>>;
}

/// sqlx-backed collaboration request repository
pub struct SqlxCollaborateRepository {
    pool: SqlitePool,
}

impl SqlxCollaborateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> std::sync::Arc<dyn CollaborateRepository> {
        std::sync::Arc::new(Self::new(pool))
    }
}

fn row_to_request(r: &sqlx::sqlite::SqliteRow) -> CollaborateRequest {
    CollaborateRequest {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        message: r.get("message"),
        read: r.get("read"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl CollaborateRepository for SqlxCollaborateRepository {
    async fn create(&self, fields: &CollaborateFields) -> Result<CollaborateRequest> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO collaborate_requests (name, email, message, read, created_at)
               VALUES (?, ?, ?, 0, ?)"#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.message)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(CollaborateRequest {
            id: result.last_insert_rowid(),
            name: fields.name.clone(),
            email: fields.email.clone(),
            message: fields.message.clone(),
            read: false,
            created_at: now,
        })
    }

    async fn list_unread(&self) -> Result<Vec<CollaborateRequest>> {
        let rows =
            sqlx::query("SELECT * FROM collaborate_requests WHERE read = 0 ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(row_to_request).collect())
    }
}
