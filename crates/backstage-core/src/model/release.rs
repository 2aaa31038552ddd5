use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_choice! {
    /// Format of a planned release.
    pub enum ReleaseType default Ep {
        Single => "Single",
        Ep => "EP",
        Album => "Album",
        RemixEp => "Remix EP",
        Mixtape => "Mixtape",
    }
}

define_choice! {
    /// Production stage of a release, in pipeline order.
    pub enum ReleaseStage default Concept {
        Concept => "Concept",
        Writing => "Writing",
        Recording => "Recording",
        Mixing => "Mixing",
        Mastering => "Mastering",
        Artwork => "Artwork",
        Submitted => "Submitted",
        Scheduled => "Scheduled",
        Released => "Released",
    }
}

define_choice! {
    /// Digital distribution service.
    pub enum Distributor default DistroKid {
        DistroKid => "DistroKid",
        TuneCore => "TuneCore",
        CdBaby => "CD Baby",
        Amuse => "Amuse",
        UnitedMasters => "United Masters",
        Other => "Other",
    }
}

define_fields! {
    /// A single, EP or album moving through production.
    pub struct Release / ReleasePatch {
        pub title: String,
        #[serde(rename = "type")]
        pub kind: ReleaseType,
        pub track_count: Option<u32>,
        pub target_date: Option<NaiveDate>,
        pub distributor: Distributor,
        /// Budget in dollars.
        pub budget: Option<f64>,
        pub stage: ReleaseStage,
        pub notes: Option<String>,
    }
}

impl Release {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Past the concept stage but not yet out.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        !matches!(self.stage, ReleaseStage::Concept | ReleaseStage::Released)
    }
}

impl Collection for Release {
    const NAME: &'static str = "releases";
    type Patch = ReleasePatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("created_at"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "title", &self.title)
    }

    fn validate_patch(patch: &ReleasePatch) -> Result<(), ValidationError> {
        match &patch.title {
            Some(title) => require_text(Self::NAME, "title", title),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_defaults() {
        let release = Release::new("Night Drive");
        assert_eq!(release.kind, ReleaseType::Ep);
        assert_eq!(release.distributor, Distributor::DistroKid);
        assert_eq!(release.stage, ReleaseStage::Concept);
        assert!(!release.is_in_progress());
    }

    #[test]
    fn test_release_wire_labels() {
        let release = Release {
            kind: ReleaseType::RemixEp,
            distributor: Distributor::CdBaby,
            stage: ReleaseStage::Mixing,
            ..Release::new("Night Drive (Remixes)")
        };
        let value = serde_json::to_value(&release).unwrap();
        assert_eq!(value["type"], "Remix EP");
        assert_eq!(value["distributor"], "CD Baby");
        assert!(release.is_in_progress());
    }
}
