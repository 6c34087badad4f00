//! Data models
//!
//! Plain data structures shared between the repository, service and API
//! layers: database entities, input records and notification types.

mod about;
mod comment;
mod notification;
mod post;
mod user;

pub use about::{About, CollaborateRequest};
pub use comment::{Comment, CommentWithAuthor};
pub use notification::{Notification, Severity};
pub use post::{CreatePostInput, Post, PostPage, PostStatus};
pub use user::{Session, User};
