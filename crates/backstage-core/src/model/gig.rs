use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_choice! {
    /// Billing of a performance.
    pub enum GigType default Headline {
        Headline => "Headline",
        Support => "Support",
        Opening => "Opening",
        Festival => "Festival",
        Private => "Private",
        Showcase => "Showcase",
    }
}

define_choice! {
    /// Booking state of a performance.
    pub enum GigStatus default Pending {
        Confirmed => "Confirmed",
        Pending => "Pending",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

define_fields! {
    /// A live performance booking.
    pub struct Gig / GigPatch {
        pub venue: String,
        /// City and state, free text ("Austin, TX").
        pub city: Option<String>,
        pub date: Option<NaiveDate>,
        #[serde(rename = "type")]
        pub kind: GigType,
        /// Agreed fee in dollars.
        pub pay: Option<f64>,
        pub status: GigStatus,
        /// Soundcheck time, free text ("6:00 PM").
        pub soundcheck: Option<String>,
        /// Set length, free text ("45 min").
        pub set_length: Option<String>,
        /// Promoter or booking contact.
        pub contact: Option<String>,
        pub notes: Option<String>,
    }
}

impl Gig {
    #[must_use]
    pub fn new(venue: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            ..Self::default()
        }
    }

    /// Confirmed or pending: still ahead on the calendar.
    #[must_use]
    pub fn is_upcoming(&self) -> bool {
        matches!(self.status, GigStatus::Confirmed | GigStatus::Pending)
    }
}

impl Collection for Gig {
    const NAME: &'static str = "gigs";
    type Patch = GigPatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::asc("date"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "venue", &self.venue)
    }

    fn validate_patch(patch: &GigPatch) -> Result<(), ValidationError> {
        match &patch.venue {
            Some(venue) => require_text(Self::NAME, "venue", venue),
            None => Ok(()),
        }
    }
}
