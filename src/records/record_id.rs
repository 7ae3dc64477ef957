use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a user or an item.
///
/// Always written as a JSON number. On read, numeric strings are accepted as
/// well so that ids stored in either form compare equal once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(RecordId)
            .map_err(|e| format!("invalid record id {:?}: {}", s, e))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(RecordId(n)),
            RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_forms_match() {
        let from_number: RecordId = serde_json::from_str("1700000000000").unwrap();
        let from_text: RecordId = serde_json::from_str("\"1700000000000\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!("1700000000000".parse::<RecordId>().unwrap(), from_number);
    }

    #[test]
    fn test_written_as_number() {
        assert_eq!(serde_json::to_string(&RecordId(42)).unwrap(), "42");
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!("abc".parse::<RecordId>().is_err());
        assert!(serde_json::from_str::<RecordId>("\"12x\"").is_err());
        assert!(serde_json::from_str::<RecordId>("-5").is_err());
    }
}
