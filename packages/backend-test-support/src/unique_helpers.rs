//! Test helpers for generating unique test data
//!
//! ULID-based identifiers keep tests isolated from each other even when
//! they share an in-memory store.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate `count` unique player ids sharing a prefix.
///
/// ```
/// use backend_test_support::unique_helpers::unique_player_ids;
///
/// let ids = unique_player_ids("seat", 3);
/// assert_eq!(ids.len(), 3);
/// assert_ne!(ids[0], ids[1]);
/// ```
pub fn unique_player_ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|seat| unique_str(&format!("{prefix}{seat}")))
        .collect()
}
