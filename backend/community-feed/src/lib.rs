/// Community Feed Library
///
/// In-memory community feed: posts with votes, comments, tags and a saved
/// flag, plus the ranking engine that turns the collection into what a reader
/// sees under a search query, a tag filter and one of three sort modes.
///
/// # Modules
///
/// - `models`: posts, comments, identifiers, sort modes, sessions
/// - `services`: ranking, feed state, session lifecycle, sharing, analytics
/// - `utils`: clocks, identifier parsing, time helpers
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `telemetry`: tracing subscriber setup
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{Config, RankingConfig};
pub use error::{AppError, Result};
pub use models::{Comment, CommentId, Post, PostId, Session, SortMode};
pub use services::{FeedQuery, FeedState, PostStats, SessionManager, ShareService, ShareTarget};
