//! Identifier parsing
//!
//! Post and comment identifiers arrive from the presentation layer as text.
//! Parsing them here keeps the error message pointing at the offending field:
//!
//! ```
//! use community_feed::utils::ids::parse_uuid;
//!
//! let err = parse_uuid("not-a-uuid", "post_id").unwrap_err();
//! assert!(err.to_string().contains("post_id"));
//! ```

use uuid::Uuid;

use crate::error::{AppError, Result};

/// Parse a UUID from string with field name for error context
pub fn parse_uuid(input: &str, field: &str) -> Result<Uuid> {
    Uuid::parse_str(input.trim()).map_err(|e| {
        AppError::Validation(format!("invalid identifier for '{}': {}", field, e))
    })
}
