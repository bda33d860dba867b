use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Session;
use crate::services::feed::FeedState;
use crate::utils::{Clock, SystemClock};

struct ActiveSession {
    session: Session,
    feed: FeedState,
}

/// Signed-in / signed-out lifecycle around a single feed.
///
/// The app starts signed out. Signing in creates an empty feed owned by the
/// session; signing out drops it together with every post it held.
pub struct SessionManager {
    config: Config,
    clock: Arc<dyn Clock>,
    active: Option<ActiveSession>,
}

impl SessionManager {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            active: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_signed_in(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|active| &active.session)
    }

    /// Start a session for `display_name`, replacing any current one
    pub fn sign_in(&mut self, display_name: &str) -> Result<&Session> {
        let session = Session::new(display_name, self.clock.now())?;
        let feed = FeedState::with_clock(self.config.ranking, Arc::clone(&self.clock))
            .with_default_sort(self.config.feed.default_sort);

        if let Some(previous) = self.active.take() {
            info!(
                user_id = %previous.session.user_id,
                "Replacing existing session"
            );
        }

        info!(
            user_id = %session.user_id,
            display_name = %session.display_name,
            "User signed in"
        );

        let active = self.active.insert(ActiveSession { session, feed });
        Ok(&active.session)
    }

    /// End the session and discard its feed. Returns the ended session, if any.
    pub fn sign_out(&mut self) -> Option<Session> {
        let ended = self.active.take()?;
        info!(
            user_id = %ended.session.user_id,
            posts_discarded = ended.feed.len(),
            "User signed out"
        );
        Some(ended.session)
    }

    pub fn feed(&self) -> Result<&FeedState> {
        self.active
            .as_ref()
            .map(|active| &active.feed)
            .ok_or_else(not_signed_in)
    }

    pub fn feed_mut(&mut self) -> Result<&mut FeedState> {
        self.active
            .as_mut()
            .map(|active| &mut active.feed)
            .ok_or_else(not_signed_in)
    }

    /// Borrow the session and its feed together, for authoring operations
    pub fn session_and_feed_mut(&mut self) -> Result<(&Session, &mut FeedState)> {
        self.active
            .as_mut()
            .map(|active| (&active.session, &mut active.feed))
            .ok_or_else(not_signed_in)
    }
}

fn not_signed_in() -> AppError {
    AppError::Unauthorized("sign in to access the feed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortMode;
    use crate::utils::FixedClock;
    use chrono::{TimeZone, Utc};

    fn manager() -> SessionManager {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        SessionManager::with_clock(Config::default(), clock)
    }

    #[test]
    fn test_starts_signed_out() {
        let mut manager = manager();
        assert!(!manager.is_signed_in());
        assert!(manager.session().is_none());
        assert!(matches!(manager.feed(), Err(AppError::Unauthorized(_))));
        assert!(matches!(manager.feed_mut(), Err(AppError::Unauthorized(_))));
        assert!(manager.sign_out().is_none());
    }

    #[test]
    fn test_sign_in_creates_empty_feed() {
        let mut manager = manager();
        let session = manager.sign_in("Current User").unwrap().clone();
        assert_eq!(session.display_name, "Current User");
        assert_eq!(
            session.signed_in_at,
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
        );
        assert!(manager.feed().unwrap().is_empty());
    }

    #[test]
    fn test_sign_in_rejects_blank_name() {
        let mut manager = manager();
        assert!(matches!(manager.sign_in("   "), Err(AppError::Validation(_))));
        assert!(!manager.is_signed_in());
    }

    #[test]
    fn test_sign_out_discards_posts() {
        let mut manager = manager();
        manager.sign_in("Current User").unwrap();
        {
            let (session, feed) = manager.session_and_feed_mut().unwrap();
            feed.create_post(session, "hello", vec![], vec![]).unwrap();
        }
        assert_eq!(manager.feed().unwrap().len(), 1);

        let ended = manager.sign_out().unwrap();
        assert_eq!(ended.display_name, "Current User");
        assert!(matches!(manager.feed(), Err(AppError::Unauthorized(_))));

        manager.sign_in("Current User").unwrap();
        assert!(manager.feed().unwrap().is_empty());
    }

    #[test]
    fn test_feed_uses_configured_default_sort() {
        let mut config = Config::default();
        config.feed.default_sort = SortMode::Trending;
        let mut manager = SessionManager::new(config);
        manager.sign_in("reader").unwrap();
        assert_eq!(manager.feed().unwrap().query().sort, SortMode::Trending);
    }
}
