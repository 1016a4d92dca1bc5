//! Video identifiers.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::encoding::{ID_ALPHABET, ID_LENGTH};

/// Short unique identifier for an uploaded video and its artifact directory.
///
/// Ids are [`ID_LENGTH`] characters drawn from [`ID_ALPHABET`]. Uniqueness is
/// not a property of the type; callers sample candidates and check them against
/// the video catalog until one is free.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Sample a random candidate id.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let id = (0..ID_LENGTH)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the string has the shape of a generated id. Used to reject
    /// obviously bogus path parameters before touching any store.
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == ID_LENGTH && s.bytes().all(|b| ID_ALPHABET.contains(&b))
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id_shape() {
        for _ in 0..100 {
            let id = VideoId::random();
            assert!(VideoId::is_well_formed(id.as_str()));
        }
    }

    #[test]
    fn test_well_formed_rejects_bad_input() {
        assert!(!VideoId::is_well_formed(""));
        assert!(!VideoId::is_well_formed("abcd"));
        assert!(!VideoId::is_well_formed("abcdef"));
        assert!(!VideoId::is_well_formed("ab/cd"));
        assert!(!VideoId::is_well_formed("ab.cd"));
        assert!(VideoId::is_well_formed("Ab1-_"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = VideoId::from("Ab1-_");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Ab1-_\"");
        let back: VideoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
