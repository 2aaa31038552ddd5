use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::model::ids::RecordId;

/// Sort direction of a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Column and direction a list query is ordered by.
///
/// Ordering belongs to the query: the datastore sorts, the store does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.column, self.direction.as_str())
    }
}

/// A stored record: server-assigned identity plus the collection's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<F> {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: F,
}

/// A named collection of records sharing one schema.
///
/// Implemented by the field set of each collection (`Gig`, `Task`, ...).
pub trait Collection:
    Serialize + DeserializeOwned + Clone + Default + fmt::Debug + Send + Sync + 'static
{
    /// Table name at the datastore.
    const NAME: &'static str;

    /// Partial update type for this collection.
    type Patch: Patch<Self>;

    /// Order applied by `list` when the caller does not choose one.
    fn default_order() -> Option<OrderBy>;

    /// Required-field check run before a create reaches the datastore.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Required-field check for a patch: a required field may be left out,
    /// but not blanked.
    fn validate_patch(_patch: &Self::Patch) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A partial update: `Some` fields overwrite, `None` fields stay untouched.
pub trait Patch<F>:
    Serialize + DeserializeOwned + Clone + Default + fmt::Debug + Send + Sync + 'static
{
    /// Applies the patch to a local copy, mirroring what the datastore does.
    fn apply(&self, fields: &mut F);

    /// Whether the patch changes nothing.
    fn is_empty(&self) -> bool;
}

/// Fails with [`ValidationError::missing`] when `value` is blank.
pub fn require_text(
    collection: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(collection, field));
    }
    Ok(())
}

/// Parses a caller-supplied field bag into a closed record type.
///
/// Keys the collection does not define are rejected instead of being
/// silently dropped. Missing keys take their defaults, so required-field
/// checks still run through [`Collection::validate`].
pub fn parse_fields<C: Collection>(value: serde_json::Value) -> Result<C, ValidationError> {
    let serde_json::Value::Object(input) = value else {
        return Err(ValidationError::invalid(C::NAME, "expected a JSON object"));
    };

    let fields: C = serde_json::from_value(serde_json::Value::Object(input.clone()))
        .map_err(|e| ValidationError::invalid(C::NAME, e.to_string()))?;

    let known = serde_json::to_value(&fields)
        .map_err(|e| ValidationError::invalid(C::NAME, e.to_string()))?;
    if let Some(unknown) = input
        .keys()
        .find(|key| known.get(key.as_str()).is_none())
    {
        return Err(ValidationError::unknown_field(C::NAME, unknown.as_str()));
    }

    Ok(fields)
}

/// Parses a caller-supplied partial update.
pub fn parse_patch<C: Collection>(value: serde_json::Value) -> Result<C::Patch, ValidationError> {
    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        match message.strip_prefix("unknown field `") {
            Some(rest) => {
                let field = rest.split('`').next().unwrap_or(rest);
                ValidationError::unknown_field(C::NAME, field)
            }
            None => ValidationError::invalid(C::NAME, message),
        }
    })
}
