use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_fields! {
    /// A named free-text note, addressed by its natural key.
    ///
    /// Notes are upserted by `key` instead of updated by id.
    pub struct Note / NotePatch {
        /// Natural key, e.g. `"vision"`.
        pub key: String,
        pub content: String,
    }
}

impl Note {
    /// Conflict column for upserts.
    pub const KEY_COLUMN: &'static str = "key";

    #[must_use]
    pub fn new(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
        }
    }
}

impl Collection for Note {
    const NAME: &'static str = "notes";
    type Patch = NotePatch;

    fn default_order() -> Option<OrderBy> {
        None
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "key", &self.key)
    }

    fn validate_patch(patch: &NotePatch) -> Result<(), ValidationError> {
        match &patch.key {
            Some(key) => require_text(Self::NAME, "key", key),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_requires_key() {
        assert!(Note::new("", "draft").validate().is_err());
        assert!(Note::new("vision", "").validate().is_ok());
    }
}
