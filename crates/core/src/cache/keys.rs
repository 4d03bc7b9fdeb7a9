use crate::api::PeopleQuery;

const PEOPLE_LIST_PREFIX: &str = "api:people:list:";

/// Returns the cache key for one people listing.
///
/// The search term is percent-encoded so user input cannot introduce `:` or
/// `*` and collide with another query's key.
pub fn people_list_key(query: &PeopleQuery) -> String {
    let search = query.search.as_deref().unwrap_or_default();
    let size = query
        .page_size
        .map(|s| s.to_string())
        .unwrap_or_else(|| "default".to_string());
    format!(
        "{}search={}:size={}",
        PEOPLE_LIST_PREFIX,
        urlencoding::encode(search),
        size
    )
}

/// Returns the pattern matching every people listing key.
pub fn people_list_pattern() -> String {
    format!("{}*", PEOPLE_LIST_PREFIX)
}

/// Returns the cache key for a single person.
pub fn person_key(person_id: i64) -> String {
    format!("api:person:{}", person_id)
}

/// Returns the cache key for a person's statistics.
pub fn person_statistics_key(person_id: i64) -> String {
    format!("api:person_stats:{}", person_id)
}

/// Extracts the person ID from a per-person cache key, if present.
///
/// Returns `None` for listing keys and anything outside the `api:` namespace.
///
/// # Examples
///
/// ```
/// use biodash_core::cache::extract_person_id_from_key;
///
/// assert_eq!(extract_person_id_from_key("api:person:42"), Some(42));
/// assert_eq!(extract_person_id_from_key("api:person_stats:7"), Some(7));
/// assert_eq!(extract_person_id_from_key("api:people:list:search=:size=20"), None);
/// ```
pub fn extract_person_id_from_key(key: &str) -> Option<i64> {
    let rest = key.strip_prefix("api:")?;
    let (resource, id) = rest.split_once(':')?;
    match resource {
        "person" | "person_stats" => id.parse().ok(),
        _ => None,
    }
}

/// Checks if a cache key belongs to a people listing.
pub fn is_people_list_key(key: &str) -> bool {
    key.starts_with(PEOPLE_LIST_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::pattern_matches;

    #[test]
    fn test_person_key() {
        assert_eq!(person_key(42), "api:person:42");
    }

    #[test]
    fn test_person_statistics_key() {
        assert_eq!(person_statistics_key(42), "api:person_stats:42");
    }

    #[test]
    fn test_people_list_key_default_query() {
        let key = people_list_key(&PeopleQuery::default());
        assert_eq!(key, "api:people:list:search=:size=default");
    }

    #[test]
    fn test_people_list_key_with_parameters() {
        let key = people_list_key(&PeopleQuery::search("ada lovelace").with_page_size(50));
        assert_eq!(key, "api:people:list:search=ada%20lovelace:size=50");
    }

    #[test]
    fn test_people_list_keys_do_not_collide() {
        let a = people_list_key(&PeopleQuery::search("a:size=1"));
        let b = people_list_key(&PeopleQuery::search("a").with_page_size(1));
        assert_ne!(a, b);

        let c = people_list_key(&PeopleQuery::search("x*"));
        assert!(!c.contains("x*"));
    }

    #[test]
    fn test_people_list_pattern_matches_only_listings() {
        let pattern = people_list_pattern();

        assert!(pattern_matches(&pattern, &people_list_key(&PeopleQuery::default())));
        assert!(pattern_matches(
            &pattern,
            &people_list_key(&PeopleQuery::search("bob"))
        ));
        assert!(!pattern_matches(&pattern, &person_key(1)));
        assert!(!pattern_matches(&pattern, &person_statistics_key(1)));
    }

    #[test]
    fn test_resource_keys_are_distinct() {
        assert_ne!(person_key(1), person_statistics_key(1));
        assert_ne!(person_key(1), person_key(11));
        assert!(!pattern_matches(&person_key(1), &person_key(11)));
    }

    #[test]
    fn test_extract_person_id_from_key() {
        assert_eq!(extract_person_id_from_key(&person_key(9)), Some(9));
        assert_eq!(extract_person_id_from_key(&person_statistics_key(9)), Some(9));
        assert_eq!(extract_person_id_from_key("api:person:not-a-number"), None);
        assert_eq!(extract_person_id_from_key("person:9"), None);
        assert_eq!(
            extract_person_id_from_key(&people_list_key(&PeopleQuery::default())),
            None
        );
    }

    #[test]
    fn test_is_people_list_key() {
        assert!(is_people_list_key(&people_list_key(&PeopleQuery::default())));
        assert!(!is_people_list_key(&person_key(3)));
    }
}
