//! Core domain model for backstage.
//!
//! This crate defines the record collections a working musician keeps
//! (tasks, gigs, releases, catalog, contacts, finances, analytics, goals,
//! content posts and notes), their fixed vocabularies, required-field
//! validation, and the summaries computed over loaded records.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod summary;

pub use error::{Result, UnknownChoice, ValidationError};
pub use model::{parse_fields, parse_patch, Collection, OrderBy, Patch, Record, RecordId};

#[cfg(test)]
mod tests {
    use crate::model::Gig;
    use crate::{parse_fields, parse_patch};

    #[test]
    fn test_boundary_parsers_at_crate_root() {
        let gig: Gig = parse_fields(serde_json::json!({ "venue": "Mohawk" })).unwrap();
        assert_eq!(gig.venue, "Mohawk");
        assert!(parse_patch::<Gig>(serde_json::json!({ "headliner": true })).is_err());
    }
}
