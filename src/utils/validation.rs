// Validation of user input before it reaches the ranker
use crate::error::{Error, Result};
use tracing::warn;

/// Shown when the user submits nothing to search for
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter your ingredient or preference.";

/// Trim a raw query and reject it when blank or longer than `max_len` characters
pub fn validate_query(raw: &str, max_len: usize) -> Result<String> {
    let query = raw.trim();

    if query.is_empty() {
        return Err(Error::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }

    let len = query.chars().count();
    if len > max_len {
        warn!("Rejected query of {} characters (max {})", len, max_len);
        return Err(Error::Validation(format!(
            "Query is too long ({len} characters, max {max_len})"
        )));
    }

    Ok(query.to_string())
}

/// Resolve a requested result count against the configured default and cap
pub fn validate_limit(requested: Option<usize>, default: usize, max: usize) -> Result<usize> {
    match requested {
        None => Ok(default),
        Some(0) => Err(Error::Validation(
            "limit must be at least 1".to_string(),
        )),
        Some(limit) => Ok(limit.min(max)),
    }
}
