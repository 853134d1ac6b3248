//! Helpers for the 24-hex-digit record ids the server hands out.
//!
//! The first 8 hex digits are the creation time in seconds since the Unix epoch.

use chrono::{DateTime, TimeZone, Utc};

/// Creation time embedded in an id, or `None` when the prefix is not hex.
pub fn timestamp_secs(id: &str) -> Option<u32> {
    let prefix = id.get(..8)?;
    u32::from_str_radix(prefix, 16).ok()
}

pub fn created_at(id: &str) -> Option<DateTime<Utc>> {
    timestamp_secs(id).and_then(|secs| Utc.timestamp_opt(i64::from(secs), 0).single())
}

/// Sort key for newest-first ordering. Unparsable ids sort after every real one.
pub fn newest_first_key(id: &str) -> std::cmp::Reverse<Option<u32>> {
    std::cmp::Reverse(timestamp_secs(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_secs() {
        assert_eq!(timestamp_secs("65a0f0c0aaaaaaaaaaaaaaaa"), Some(0x65a0f0c0));
        assert_eq!(timestamp_secs("00000001"), Some(1));
        assert_eq!(timestamp_secs("short"), None);
        assert_eq!(timestamp_secs("zzzzzzzzaaaaaaaaaaaaaaaa"), None);
    }

    #[test]
    fn test_created_at() {
        let at = created_at("65a0f0c0aaaaaaaaaaaaaaaa").unwrap();
        assert_eq!(at.timestamp(), 0x65a0f0c0);
    }

    #[test]
    fn test_newest_first_key() {
        let mut ids = vec!["bad-id", "65000000aaaa", "66000000aaaa"];
        ids.sort_by_key(|id| newest_first_key(id));
        assert_eq!(ids, vec!["66000000aaaa", "65000000aaaa", "bad-id"]);
    }
}
