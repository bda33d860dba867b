mod post;
mod session;
mod sort;

pub use post::{normalize_tags, Comment, CommentId, Post, PostId, AVAILABLE_TAGS};
pub use session::Session;
pub use sort::SortMode;
