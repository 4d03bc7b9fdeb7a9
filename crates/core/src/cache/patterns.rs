//! Glob matching for cache keys.
//!
//! `*` matches any run of characters, including none. No other character is
//! special.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use biodash_core::cache::pattern_matches;
///
/// assert!(pattern_matches("api:person:7", "api:person:7"));
/// assert!(pattern_matches("api:people:list:*", "api:people:list:search=:size=20"));
/// assert!(pattern_matches("api:*:7", "api:person_stats:7"));
/// assert!(!pattern_matches("api:people:list:*", "api:person:7"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == key;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => return key.is_empty(),
    };
    let (last, middle) = match rest.split_last() {
        Some(split) => split,
        None => return pattern == key,
    };

    let Some(mut remaining) = key.strip_prefix(first) else {
        return false;
    };

    for segment in middle.iter().filter(|s| !s.is_empty()) {
        match remaining.find(segment) {
            Some(pos) => remaining = &remaining[pos + segment.len()..],
            None => return false,
        }
    }

    remaining.ends_with(last)
}
