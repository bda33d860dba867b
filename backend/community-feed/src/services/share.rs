//! Post sharing
//!
//! Builds the link for a post and the per-platform payload a share sheet hands
//! to the operating system. Delivery goes through [`ShareDispatcher`]; the
//! default dispatcher only records the share in the log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::config::ShareConfig;
use crate::error::{AppError, Result};
use crate::models::{Post, PostId};
use crate::services::feed::FeedState;

/// Longest content excerpt placed into a share message, in characters
const SHARE_TEXT_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    #[serde(rename = "copy")]
    CopyLink,
    Twitter,
    Facebook,
    WhatsApp,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 4] = [
        ShareTarget::CopyLink,
        ShareTarget::Twitter,
        ShareTarget::Facebook,
        ShareTarget::WhatsApp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareTarget::CopyLink => "copy",
            ShareTarget::Twitter => "twitter",
            ShareTarget::Facebook => "facebook",
            ShareTarget::WhatsApp => "whatsapp",
        }
    }

    /// Label shown on the share sheet
    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::CopyLink => "Copy Link",
            ShareTarget::Twitter => "Twitter",
            ShareTarget::Facebook => "Facebook",
            ShareTarget::WhatsApp => "WhatsApp",
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copy" => Ok(ShareTarget::CopyLink),
            "twitter" => Ok(ShareTarget::Twitter),
            "facebook" => Ok(ShareTarget::Facebook),
            "whatsapp" => Ok(ShareTarget::WhatsApp),
            other => Err(AppError::Validation(format!(
                "unknown share target '{}'",
                other
            ))),
        }
    }
}

/// What a share action produces for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub target: ShareTarget,
    pub post_id: PostId,
    /// Canonical link to the post
    pub link: String,
    /// Value handed to the platform: the link itself for copy, otherwise a
    /// web share intent URL
    pub payload: String,
}

/// `{base_url}/{post_id}`; a trailing slash on `base_url` is ignored
pub fn share_link(post_id: &PostId, base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), post_id)
}

pub fn share_payload(target: ShareTarget, post: &Post, base_url: &str) -> SharePayload {
    let link = share_link(&post.id, base_url);
    let encoded_link = urlencoding::encode(&link).into_owned();

    let payload = match target {
        ShareTarget::CopyLink => link.clone(),
        ShareTarget::Twitter => format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            urlencoding::encode(&share_text(post)),
            encoded_link
        ),
        ShareTarget::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded_link)
        }
        ShareTarget::WhatsApp => {
            let message = format!("{} {}", share_text(post), link);
            format!(
                "https://api.whatsapp.com/send?text={}",
                urlencoding::encode(message.trim_start())
            )
        }
    };

    SharePayload {
        target,
        post_id: post.id,
        link,
        payload,
    }
}

// Trimmed content, cut on a character boundary
fn share_text(post: &Post) -> String {
    let content = post.content.trim();
    if content.chars().count() <= SHARE_TEXT_MAX_CHARS {
        return content.to_string();
    }
    let mut excerpt: String = content.chars().take(SHARE_TEXT_MAX_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

/// Hands a built payload to whatever performs the share on this platform
pub trait ShareDispatcher: Send + Sync {
    fn dispatch(&self, share: &SharePayload) -> Result<()>;
}

/// Dispatcher that only records the share
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingShareDispatcher;

impl ShareDispatcher for LoggingShareDispatcher {
    fn dispatch(&self, share: &SharePayload) -> Result<()> {
        info!(
            post_id = %share.post_id,
            target = %share.target,
            link = %share.link,
            "Sharing post"
        );
        Ok(())
    }
}

pub struct ShareService {
    base_url: String,
    dispatcher: Box<dyn ShareDispatcher>,
}

impl ShareService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_dispatcher(base_url, Box::new(LoggingShareDispatcher))
    }

    pub fn from_config(config: &ShareConfig) -> Self {
        Self::new(config.link_base_url.clone())
    }

    pub fn with_dispatcher(
        base_url: impl Into<String>,
        dispatcher: Box<dyn ShareDispatcher>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            dispatcher,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the payload for a post in `feed` and dispatch it
    pub fn share(
        &self,
        feed: &FeedState,
        post_id: &PostId,
        target: ShareTarget,
    ) -> Result<SharePayload> {
        let Some(post) = feed.find_post(post_id) else {
            warn!(%post_id, %target, "Share requested for unknown post");
            return Err(AppError::post_not_found(post_id));
        };

        let share = share_payload(target, post, &self.base_url);
        self.dispatcher.dispatch(&share)?;
        Ok(share)
    }
}
