use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_fields! {
    /// A planned social media post on the content calendar.
    pub struct ContentPost / ContentPostPatch {
        pub title: String,
        /// Target platform, free text ("Instagram", "TikTok").
        pub platform: Option<String>,
        pub post_date: Option<NaiveDate>,
        /// Workflow state, free text.
        pub status: Option<String>,
        pub notes: Option<String>,
    }
}

impl ContentPost {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Collection for ContentPost {
    const NAME: &'static str = "content_posts";
    type Patch = ContentPostPatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::asc("post_date"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "title", &self.title)
    }

    fn validate_patch(patch: &ContentPostPatch) -> Result<(), ValidationError> {
        match &patch.title {
            Some(title) => require_text(Self::NAME, "title", title),
            None => Ok(()),
        }
    }
}
