/// Feed state - owns the post collection and the reader's view settings
///
/// The collection is shared as `Arc<Vec<Post>>` and mutated copy-on-write, so
/// a snapshot handed out earlier never changes underneath its holder.
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::RankingConfig;
use crate::error::{AppError, Result};
use crate::models::{normalize_tags, Comment, Post, PostId, Session, SortMode};
use crate::services::ranking::{self, FeedQuery};
use crate::utils::{Clock, SystemClock};

/// Memoized view, stored as indices into the collection it was computed from
#[derive(Debug, Clone)]
struct CachedView {
    generation: u64,
    query: FeedQuery,
    evaluated_at: Option<DateTime<Utc>>,
    indices: Vec<usize>,
}

pub struct FeedState {
    posts: Arc<Vec<Post>>,
    generation: u64,
    query: FeedQuery,
    ranking: RankingConfig,
    clock: Arc<dyn Clock>,
    view_cache: Option<CachedView>,
}

impl FeedState {
    pub fn new(ranking: RankingConfig) -> Self {
        Self::with_clock(ranking, Arc::new(SystemClock))
    }

    pub fn with_clock(ranking: RankingConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: Arc::new(Vec::new()),
            generation: 0,
            query: FeedQuery::default(),
            ranking,
            clock,
            view_cache: None,
        }
    }

    pub fn with_default_sort(mut self, sort: SortMode) -> Self {
        self.query.sort = sort;
        self
    }

    /// Seed the feed with an existing collection (newest-created first)
    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = Arc::new(posts);
        self.bump_generation();
        self
    }

    /// Current collection in insertion order; unaffected by later mutations
    pub fn snapshot(&self) -> Arc<Vec<Post>> {
        Arc::clone(&self.posts)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find_post(&self, post_id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == post_id)
    }

    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }

    pub fn set_search_query(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_sort_mode(&mut self, sort: SortMode) {
        self.query.sort = sort;
    }

    /// Select a tag filter, or `None` (or an empty tag) to show every tag
    pub fn set_selected_tag(&mut self, tag: Option<String>) {
        self.query.tag = tag.filter(|tag| !tag.is_empty());
    }

    /// Create a post authored by the session user and prepend it
    pub fn create_post(
        &mut self,
        session: &Session,
        content: &str,
        tags: Vec<String>,
        media_urls: Vec<String>,
    ) -> Result<Post> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "post content must not be empty".to_string(),
            ));
        }

        let post = Post {
            tags: normalize_tags(tags),
            media_urls,
            ..Post::new(
                content.to_string(),
                session.display_name.clone(),
                self.clock.now(),
            )
        };

        Arc::make_mut(&mut self.posts).insert(0, post.clone());
        self.bump_generation();

        debug!(post_id = %post.id, author = %post.author, tags = ?post.tags, "Post created");
        Ok(post)
    }

    pub fn upvote(&mut self, post_id: &PostId) -> Result<Post> {
        self.update_post(post_id, Post::increment_upvotes)
    }

    pub fn downvote(&mut self, post_id: &PostId) -> Result<Post> {
        self.update_post(post_id, Post::increment_downvotes)
    }

    pub fn toggle_save(&mut self, post_id: &PostId) -> Result<Post> {
        self.update_post(post_id, Post::toggle_saved)
    }

    /// Append a comment authored by the session user
    pub fn add_comment(
        &mut self,
        session: &Session,
        post_id: &PostId,
        content: &str,
    ) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "comment content must not be empty".to_string(),
            ));
        }

        let comment = Comment::new(
            content.to_string(),
            session.display_name.clone(),
            self.clock.now(),
        );
        let appended = comment.clone();
        self.update_post(post_id, move |post| post.add_comment(appended))?;

        debug!(%post_id, comment_id = %comment.id, "Comment added");
        Ok(comment)
    }

    /// Ranked view of the current collection under the current settings.
    ///
    /// Reuses the previous result when neither the collection nor the query
    /// changed (and, for trending, `now` is the same instant).
    pub fn visible_posts(&mut self, now: DateTime<Utc>) -> Vec<&Post> {
        let evaluated_at = self.query.sort.is_time_dependent().then_some(now);
        let fresh = matches!(
            &self.view_cache,
            Some(cached) if cached.generation == self.generation
                && cached.query == self.query
                && cached.evaluated_at == evaluated_at
        );

        if !fresh {
            let indices =
                ranking::ranked_indices(&self.posts, &self.query, now, &self.ranking);
            self.view_cache = Some(CachedView {
                generation: self.generation,
                query: self.query.clone(),
                evaluated_at,
                indices,
            });
        }

        match &self.view_cache {
            Some(cached) => cached.indices.iter().map(|&i| &self.posts[i]).collect(),
            None => Vec::new(),
        }
    }

    fn update_post<F>(&mut self, post_id: &PostId, apply: F) -> Result<Post>
    where
        F: FnOnce(&mut Post),
    {
        let Some(index) = self.posts.iter().position(|post| &post.id == post_id) else {
            warn!(%post_id, "Feed mutation for unknown post");
            return Err(AppError::post_not_found(post_id));
        };

        let posts = Arc::make_mut(&mut self.posts);
        apply(&mut posts[index]);
        let updated = posts[index].clone();
        self.bump_generation();

        debug!(
            %post_id,
            upvotes = updated.upvotes,
            downvotes = updated.downvotes,
            saved = updated.saved,
            comments = updated.comments.len(),
            "Post updated"
        );
        Ok(updated)
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}
