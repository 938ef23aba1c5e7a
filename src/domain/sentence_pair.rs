// ============================================================
// Layer 3 — SentencePair Domain Type
// ============================================================
// Two related sentences, each carrying an in-band `@` marker
// next to the word being compared, e.g.
//
//   ("The @man bought a car", "The @man sold a car")
//
// The marker is removed before encoding. Alignment uses the
// fixed offset table, not the marker's position.

use serde::{Deserialize, Serialize};

/// The character that flags the target word in raw sentences.
pub const TARGET_MARKER: char = '@';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub first:  String,
    pub second: String,
}

impl SentencePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first:  first.into(),
            second: second.into(),
        }
    }

    /// Both sentences, in order.
    pub fn sentences(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }
}

impl From<(String, String)> for SentencePair {
    fn from((first, second): (String, String)) -> Self {
        Self { first, second }
    }
}

/// Number of target markers in a raw sentence.
pub fn marker_count(sentence: &str) -> usize {
    sentence.chars().filter(|&c| c == TARGET_MARKER).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_count() {
        assert_eq!(marker_count("The @man runs"), 1);
        assert_eq!(marker_count("The man runs"), 0);
    }

    #[test]
    fn test_from_tuple_keeps_order() {
        let pair = SentencePair::from(("a @b".to_string(), "c @d".to_string()));
        assert_eq!(pair.sentences(), ["a @b", "c @d"]);
    }
}
