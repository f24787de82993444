//! Serde helper functions for stored source lists.
//!
//! Older snapshots of the list were written with numeric ids (creation
//! timestamps or sequence numbers). These helpers upcast them to the string
//! ids used everywhere else.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

/// Deserialize a source id that may be stored as a string or an integer.
pub fn deserialize_source_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Text(s) => Ok(s),
        RawId::Unsigned(n) => Ok(n.to_string()),
        RawId::Signed(n) => Ok(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(deserialize_with = "deserialize_source_id")]
        id: String,
    }

    #[test]
    fn test_string_id_kept() {
        let parsed: TestStruct = serde_json::from_str(r#"{"id": "abc-123"}"#).unwrap();
        assert_eq!(parsed.id, "abc-123");
    }

    #[test]
    fn test_unsigned_id_upcast() {
        let parsed: TestStruct = serde_json::from_str(r#"{"id": 17}"#).unwrap();
        assert_eq!(parsed.id, "17");
    }

    #[test]
    fn test_negative_id_upcast() {
        let parsed: TestStruct = serde_json::from_str(r#"{"id": -4}"#).unwrap();
        assert_eq!(parsed.id, "-4");
    }

    #[test]
    fn test_other_types_rejected() {
        assert!(serde_json::from_str::<TestStruct>(r#"{"id": true}"#).is_err());
        assert!(serde_json::from_str::<TestStruct>(r#"{"id": null}"#).is_err());
        assert!(serde_json::from_str::<TestStruct>(r#"{"id": 1.5}"#).is_err());
    }
}
