use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// The signed-in user on whose behalf posts and comments are authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub display_name: String,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(display_name: &str, signed_in_at: DateTime<Utc>) -> Result<Self> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::Validation(
                "display name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            user_id: Uuid::new_v4(),
            display_name: display_name.to_string(),
            signed_in_at,
        })
    }
}
