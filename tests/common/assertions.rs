//! Common assertion helpers for CLI output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Error banner printed by every failing command
pub fn is_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

pub fn missing_api_key() -> impl Predicate<str> {
    predicates::str::contains("No TMDb API key configured")
        .and(predicates::str::contains("TMDB_API_KEY"))
}

pub fn removed_entries(count: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("Removed {count} "))
}

pub fn invalid_argument() -> impl Predicate<str> {
    predicates::str::contains("Invalid argument")
}
