//! Unique fixture names backed by ULIDs, so tests sharing a database never
//! collide on house names or card numbers.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("house");
/// let b = unique_str("house");
/// assert_ne!(a, b);
/// assert!(a.starts_with("house-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Short card number: the prefix plus the last eight ULID characters.
///
/// ```
/// use backend_test_support::unique_helpers::unique_card_no;
///
/// let card = unique_card_no("C");
/// assert_eq!(card.len(), 9);
/// assert!(card.starts_with('C'));
/// ```
pub fn unique_card_no(prefix: &str) -> String {
    let ulid = Ulid::new().to_string();
    format!("{prefix}{}", &ulid[ulid.len() - 8..])
}
