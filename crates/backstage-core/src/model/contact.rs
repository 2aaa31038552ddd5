use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_choice! {
    /// What a contact does for the artist.
    pub enum ContactRole default VenueBooker {
        VenueBooker => "Venue Booker",
        Promoter => "Promoter",
        Producer => "Producer",
        Engineer => "Engineer",
        Journalist => "Journalist",
        Photographer => "Photographer",
        Videographer => "Videographer",
        Pr => "PR",
        Manager => "Manager",
        Label => "Label",
        Sync => "Sync",
        CollabArtist => "Collab Artist",
        Other => "Other",
    }
}

define_choice! {
    /// Relationship temperature.
    pub enum ContactStatus default Active {
        Active => "Active",
        Warm => "Warm",
        Cold => "Cold",
        FollowUp => "Follow Up",
    }
}

define_fields! {
    /// An industry contact.
    pub struct Contact / ContactPatch {
        pub name: String,
        pub role: ContactRole,
        pub company: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        /// Instagram handle.
        pub instagram: Option<String>,
        pub status: ContactStatus,
        pub notes: Option<String>,
    }
}

impl Contact {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Collection for Contact {
    const NAME: &'static str = "contacts";
    type Patch = ContactPatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::asc("name"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "name", &self.name)
    }

    fn validate_patch(patch: &ContactPatch) -> Result<(), ValidationError> {
        match &patch.name {
            Some(name) => require_text(Self::NAME, "name", name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::parse_fields;
    use serde_json::json;

    #[test]
    fn test_empty_contact_fails_validation() {
        let contact: Contact = parse_fields(json!({})).unwrap();
        let err = contact.validate().unwrap_err();
        assert_eq!(err.collection, "contacts");
        assert_eq!(err.field, "name");
    }
}
