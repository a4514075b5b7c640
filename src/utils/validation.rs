//! Input validation primitives.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn utility_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid regex"))
}

/// Require a collection to be non-empty.
pub fn require_non_empty_vec<'a, T>(vec: &'a [T], field: &str) -> Result<&'a [T]> {
    if vec.is_empty() {
        Err(Error::validation_missing_argument(vec![field.to_string()]))
    } else {
        Ok(vec)
    }
}

/// Require a utility name that is safe to use as a file stem and URL segment.
pub fn require_utility_name(name: &str) -> Result<&str> {
    if utility_name_pattern().is_match(name) {
        Ok(name)
    } else {
        Err(Error::validation_invalid_argument(
            "utils",
            "Utility names may only contain letters, digits, '-' and '_'",
            Some(name.to_string()),
        ))
    }
}
