use serde::{Deserialize, Serialize};

use crate::models::Post;

/// Engagement figures shown on the post detail screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostStats {
    pub net_score: i64,
    pub total_votes: u64,
    /// Share of votes that are upvotes, in `0.0..=1.0`; `None` before any vote
    pub upvote_rate: Option<f64>,
    pub comment_count: usize,
}

impl PostStats {
    pub fn from_post(post: &Post) -> Self {
        let total_votes = u64::from(post.upvotes) + u64::from(post.downvotes);
        let upvote_rate = if total_votes == 0 {
            None
        } else {
            Some(post.upvotes as f64 / total_votes as f64)
        };

        Self {
            net_score: post.net_score(),
            total_votes,
            upvote_rate,
            comment_count: post.comments.len(),
        }
    }

    /// Upvote rate as a whole percentage, rounded
    pub fn upvote_percent(&self) -> Option<u8> {
        self.upvote_rate.map(|rate| (rate * 100.0).round() as u8)
    }
}

impl From<&Post> for PostStats {
    fn from(post: &Post) -> Self {
        Self::from_post(post)
    }
}
