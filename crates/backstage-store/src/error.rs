//! Record store error types.

use backstage_core::ValidationError;
use thiserror::Error;

/// Errors surfaced by record store operations.
///
/// Nothing here is retried or recovered locally; every failure reaches the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The datastore could not be reached, rejected the request, or sent
    /// back something that is not a valid row.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    /// A required field is missing or blank.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with this id exists in the collection.
    #[error("not found: {collection} with id {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns `true` when the datastore could not serve the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns `true` when the referenced record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the input was refused before or by the datastore.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::unavailable(format!("malformed row: {err}"))
    }
}

/// Convenience alias for store results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        assert!(StoreError::unavailable("connection refused").is_unavailable());
        let not_found = StoreError::NotFound {
            collection: "gigs",
            id: "7".to_string(),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.to_string(), "not found: gigs with id 7");

        let invalid: StoreError = ValidationError::missing("contacts", "name").into();
        assert!(invalid.is_validation());
        assert_eq!(invalid.to_string(), "invalid contacts: name is required");
    }

    #[test]
    fn test_malformed_json_is_unavailable() {
        let err: StoreError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_unavailable());
    }
}
