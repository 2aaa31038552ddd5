use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier of a stored record.
///
/// The datastore owns the id space; this type never mints ids on its own.
/// Ids arrive on the wire either as text (uuid columns) or as integers
/// (identity columns) and are always carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Integer(i64),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(text) => Self(text),
            Wire::Integer(number) => Self(number.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_text() {
        let id: RecordId = serde_json::from_str(r#""8b0c3f0e-1a2b-4c5d-9e8f-001122334455""#).unwrap();
        assert_eq!(id.as_str(), "8b0c3f0e-1a2b-4c5d-9e8f-001122334455");
    }

    #[test]
    fn test_record_id_from_integer() {
        let id: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(id, RecordId::new("42"));
    }

    #[test]
    fn test_record_id_serializes_as_text() {
        let id = RecordId::from("17");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""17""#);
    }

    #[test]
    fn test_record_id_rejects_other_shapes() {
        assert!(serde_json::from_str::<RecordId>("true").is_err());
        assert!(serde_json::from_str::<RecordId>(r#"{"id": 1}"#).is_err());
    }
}
