//! About page and collaboration request models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content for the About page
///
/// Written by an external admin collaborator; the web workflow only reads
/// the most recently updated record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct About {
    pub id: i64,
    pub title: String,
    pub profile_image: String,
    pub content: String,
    pub updated_on: DateTime<Utc>,
}

/// A visitor request for collaboration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborateRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Flipped by an external triage process, never by this core.
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
