use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Newest, // creation time, most recent first
    Top,      // raw net score
    Trending, // net score decayed by age
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Newest, SortMode::Top, SortMode::Trending];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Top => "top",
            SortMode::Trending => "trending",
        }
    }

    /// Whether the ordering depends on the evaluation instant
    pub fn is_time_dependent(&self) -> bool {
        matches!(self, SortMode::Trending)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortMode::Newest),
            "top" => Ok(SortMode::Top),
            "trending" => Ok(SortMode::Trending),
            other => Err(AppError::Validation(format!("unknown sort mode '{}'", other))),
        }
    }
}
