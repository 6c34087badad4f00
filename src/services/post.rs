//! Post service
//!
//! Read-only views over published posts: the paginated listing and the
//! slug lookup backing the detail page.

use std::sync::Arc;

use crate::db::repositories::PostRepository;
use crate::models::{Post, PostPage};

/// Published posts shown per listing page
pub const POSTS_PER_PAGE: i64 = 6;

/// Error types for post lookups
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    /// No such post, or the post is not published
    #[error("Post not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Post service
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// One page of published posts.
    ///
    /// Pages are 1-based. A non-positive page is a NotFound failure; a page
    /// past the end clamps to the last page. An empty store still has one
    /// (empty) page.
    pub async fn page(&self, page: i64) -> Result<PostPage, PostServiceError> {
        if page < 1 {
            return Err(PostServiceError::NotFound);
        }

        let total = self.repo.count_published().await?;
        let total_pages = ((total + POSTS_PER_PAGE - 1) / POSTS_PER_PAGE).max(1);
        let page = page.min(total_pages);

        let posts = self
            .repo
            .list_published(POSTS_PER_PAGE, (page - 1) * POSTS_PER_PAGE)
            .await?;

        Ok(PostPage {
            posts,
            page,
            total_pages,
            total,
        })
    }

    /// Find a published post by slug; drafts are invisible here.
    pub async fn published_by_slug(&self, slug: &str) -> Result<Post, PostServiceError> {
        self.repo
            .get_published_by_slug(slug)
            .await?
            .ok_or(PostServiceError::NotFound)
    }
}
