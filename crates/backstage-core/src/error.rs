use thiserror::Error;

/// A record or patch that the store refuses before it reaches the datastore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {collection}: {field} {reason}")]
pub struct ValidationError {
    /// Collection (table) name the record belongs to.
    pub collection: String,
    /// Offending field, or `"record"` when the whole input is unusable.
    pub field: String,
    /// Human readable reason, phrased to follow the field name.
    pub reason: String,
}

impl ValidationError {
    #[must_use]
    pub fn missing(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            reason: "is required".to_string(),
        }
    }

    #[must_use]
    pub fn unknown_field(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            reason: "is not a known field".to_string(),
        }
    }

    #[must_use]
    pub fn invalid(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            field: "record".to_string(),
            reason: reason.into(),
        }
    }
}

/// An enumerated value outside its fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::missing("contacts", "name");
        assert_eq!(err.to_string(), "invalid contacts: name is required");
    }

    #[test]
    fn test_unknown_field_display() {
        let err = ValidationError::unknown_field("gigs", "headliner");
        assert_eq!(err.to_string(), "invalid gigs: headliner is not a known field");
    }
}
