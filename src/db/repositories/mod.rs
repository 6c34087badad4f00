//! Repository layer
//!
//! One trait plus sqlx implementation per record kind.

mod about;
mod collaborate;
mod comment;
mod post;
mod session;
mod user;

pub use about::{AboutRepository, SqlxAboutRepository};
pub use collaborate::{CollaborateRepository, SqlxCollaborateRepository};
pub use comment::{CommentRepository, SqlxCommentRepository};
pub use post::{PostRepository, SqlxPostRepository};
pub use session::{SessionRepository, SqlxSessionRepository};
pub use user::{SqlxUserRepository, UserRepository};
