//! # Slug Generation
//!
//! Slugs are lowercase, hyphen-separated and contain only word characters
//! (Unicode letters, digits, underscore) and hyphens. No uniqueness is
//! implied here; callers check collisions against the store.

use std::sync::OnceLock;

use regex::Regex;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();
static NON_SLUG_CHARS: OnceLock<Regex> = OnceLock::new();

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn non_slug_chars() -> &'static Regex {
    NON_SLUG_CHARS.get_or_init(|| Regex::new(r"[^\w\-]").expect("static regex"))
}

/// Derive a URL-safe slug from a title.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = whitespace().replace_all(&lowered, "-");
    non_slug_chars().replace_all(&hyphenated, "").into_owned()
}
