//! Feed ranking and filtering
//!
//! Turns the canonical post collection plus the reader's view settings into
//! the ordered sequence of posts to display:
//!
//! 1. Search: case-insensitive substring match against content or any tag
//! 2. Tag: exact, case-sensitive membership of the selected tag
//! 3. Sort: newest first, highest net score, or time-decayed trending score
//!
//! All sorts are stable, so posts with equal keys keep their collection order
//! (newest-created first). Nothing here reads a clock: trending takes `now`
//! from the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::config::RankingConfig;
use crate::models::{Post, SortMode};
use crate::utils::hours_between;

/// The reader's current view settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedQuery {
    pub search: String,
    pub tag: Option<String>,
    pub sort: SortMode,
}

impl FeedQuery {
    pub fn new(sort: SortMode) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Select a tag filter; an empty tag means no filter
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into()).filter(|tag| !tag.is_empty());
        self
    }

    /// Whether a post passes both the search and the tag filter
    pub fn matches(&self, post: &Post) -> bool {
        self.matches_search(post) && self.matches_tag(post)
    }

    fn matches_search(&self, post: &Post) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        post.content.to_lowercase().contains(&needle)
            || post
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    fn matches_tag(&self, post: &Post) -> bool {
        match self.tag.as_deref() {
            Some("") | None => true,
            Some(tag) => post.has_tag(tag),
        }
    }
}

/// Time-decayed score used by the trending sort
///
/// `net / (age_hours + offset) ^ exponent`. Posts stamped after `now` count as
/// brand new rather than producing a negative base.
pub fn trending_score(post: &Post, now: DateTime<Utc>, config: &RankingConfig) -> f64 {
    let age_hours = hours_between(post.timestamp, now);
    let denominator = (age_hours + config.trending_offset_hours).powf(config.trending_exponent);
    post.net_score() as f64 / denominator
}

/// Filter and order `posts` for display.
///
/// Returns references into `posts`; the collection itself is untouched.
pub fn visible_posts<'a>(
    posts: &'a [Post],
    query: &FeedQuery,
    now: DateTime<Utc>,
    config: &RankingConfig,
) -> Vec<&'a Post> {
    ranked_indices(posts, query, now, config)
        .into_iter()
        .map(|index| &posts[index])
        .collect()
}

/// Positions within `posts` of the visible posts, in display order
pub fn ranked_indices(
    posts: &[Post],
    query: &FeedQuery,
    now: DateTime<Utc>,
    config: &RankingConfig,
) -> Vec<usize> {
    let mut visible: Vec<usize> = posts
        .iter()
        .enumerate()
        .filter(|(_, post)| query.matches(post))
        .map(|(index, _)| index)
        .collect();

    match query.sort {
        SortMode::Newest => visible.sort_by(|&a, &b| posts[b].timestamp.cmp(&posts[a].timestamp)),
        SortMode::Top => visible.sort_by_key(|&index| std::cmp::Reverse(posts[index].net_score())),
        SortMode::Trending => {
            let mut scored: Vec<(usize, f64)> = visible
                .into_iter()
                .map(|index| (index, trending_score(&posts[index], now, config)))
                .collect();
            scored.sort_by(|a, b| compare_scores_desc(a.1, b.1));
            visible = scored.into_iter().map(|(index, _)| index).collect();
        }
    }

    debug!(
        total = posts.len(),
        visible = visible.len(),
        sort = %query.sort,
        "Feed view computed"
    );

    visible
}

/// Owned variant of [`visible_posts`] for callers that need to keep the view
pub fn visible_posts_owned(
    posts: &[Post],
    query: &FeedQuery,
    now: DateTime<Utc>,
    config: &RankingConfig,
) -> Vec<Post> {
    visible_posts(posts, query, now, config)
        .into_iter()
        .cloned()
        .collect()
}

// NaN sorts last; equal scores keep input order
fn compare_scores_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
