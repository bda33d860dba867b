/// Feed operations
///
/// - `ranking`: filtering and ordering of the post collection
/// - `feed`: the feed state and its mutations
/// - `session`: sign-in lifecycle owning the feed
/// - `share`: share links and platform payloads
/// - `analytics`: per-post engagement figures
pub mod analytics;
pub mod feed;
pub mod ranking;
pub mod session;
pub mod share;

pub use analytics::PostStats;
pub use feed::FeedState;
pub use ranking::{trending_score, visible_posts, FeedQuery};
pub use session::SessionManager;
pub use share::{
    share_link, share_payload, LoggingShareDispatcher, ShareDispatcher, SharePayload,
    ShareService, ShareTarget,
};
