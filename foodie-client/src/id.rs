//! Unique ID generation
//!
//! IDs are the hex Unix seconds, the millisecond part padded to five hex
//! digits, then random hex padding. They sort roughly by creation time and
//! satisfy the backend's ID rules (`[a-zA-Z0-9]`, at most 36 chars).

use chrono::Utc;
use rand::Rng;

/// Default number of random hex digits
pub const DEFAULT_PADDING: usize = 7;

/// Generate a fresh unique ID
pub fn unique() -> String {
    unique_with_padding(DEFAULT_PADDING)
}

/// Generate a unique ID with `padding` random hex digits
pub fn unique_with_padding(padding: usize) -> String {
    let now = Utc::now();
    let mut id = format!(
        "{:x}{:05x}",
        now.timestamp(),
        now.timestamp_subsec_millis()
    );

    let mut rng = rand::thread_rng();
    for _ in 0..padding {
        let digit: u32 = rng.gen_range(0..16);
        if let Some(c) = char::from_digit(digit, 16) {
            id.push(c);
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_unique_shape() {
        let id = unique();
        assert_eq!(id.len(), 8 + 5 + DEFAULT_PADDING);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unique_does_not_repeat() {
        let ids: HashSet<String> = (0..200).map(|_| unique()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_padding() {
        assert_eq!(unique_with_padding(0).len(), 13);
        assert_eq!(unique_with_padding(20).len(), 33);
    }
}
