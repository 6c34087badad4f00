//! Services layer - Business logic
//!
//! Workflows live here: validation, lookups and single-row mutations,
//! returning page data plus the notifications the HTTP layer should show.

pub mod about;
pub mod comment;
pub mod identity;
pub mod post;
pub mod validation;

pub use about::{AboutService, MSG_COLLABORATE_ERROR, MSG_COLLABORATE_RECEIVED};
pub use comment::{
    CommentSection, CommentService, CommentServiceError, MSG_COMMENT_DELETED,
    MSG_COMMENT_DELETE_DENIED, MSG_COMMENT_SUBMITTED, MSG_COMMENT_UPDATED,
    MSG_COMMENT_UPDATE_ERROR,
};
pub use identity::IdentityService;
pub use post::{PostService, PostServiceError, POSTS_PER_PAGE};
pub use validation::{
    is_valid_email, validate_collaborate_request, validate_comment_body, CollaborateFields,
    FieldError, FieldErrors,
};
