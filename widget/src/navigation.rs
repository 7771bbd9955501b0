//! Semester-card navigation.
//!
//! A card click follows the card's `data-url` unless the click started
//! inside a nested link, which then handles navigation itself.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

/// Decide where a card click should navigate, if anywhere.
pub fn navigation_target(inside_anchor: bool, data_url: Option<&str>) -> Option<&str> {
    if inside_anchor {
        return None;
    }
    data_url.filter(|url| !url.is_empty())
}
