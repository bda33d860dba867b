use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;
use crate::utils::ids::parse_uuid;

/// Suggested tag palette offered by the post composer.
///
/// Posts may carry tags outside this list; ranking treats every tag alike.
pub const AVAILABLE_TAGS: [&str; 8] = [
    "Community",
    "Events",
    "Support",
    "Discussion",
    "News",
    "Resource",
    "Question",
    "Social",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PostId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uuid(s, "post_id").map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CommentId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uuid(s, "comment_id").map(Self)
    }
}

/// Comment entity - appended to a post, never edited afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub upvotes: u32,
    pub downvotes: u32,
}

impl Comment {
    pub fn new(content: String, author: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new(),
            content,
            author,
            timestamp,
            upvotes: 0,
            downvotes: 0,
        }
    }
}

/// Post entity held in the feed collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub upvotes: u32,
    pub downvotes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub saved: bool,
}

impl Post {
    pub fn new(content: String, author: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: PostId::new(),
            content,
            author,
            timestamp,
            upvotes: 0,
            downvotes: 0,
            tags: Vec::new(),
            media_urls: Vec::new(),
            comments: Vec::new(),
            saved: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    /// Upvotes minus downvotes; negative when a post is mostly downvoted
    pub fn net_score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn increment_upvotes(&mut self) {
        self.upvotes = self.upvotes.saturating_add(1);
    }

    pub fn increment_downvotes(&mut self) {
        self.downvotes = self.downvotes.saturating_add(1);
    }

    pub fn toggle_saved(&mut self) {
        self.saved = !self.saved;
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }
}

/// Trim tags, drop blanks and keep only the first occurrence of each.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| {
            let tag: String = tag.into();
            tag.trim().to_string()
        })
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
