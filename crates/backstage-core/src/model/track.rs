use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_choice! {
    /// Where a catalog track sits in the discography.
    pub enum TrackType default Single {
        Single => "Single",
        EpTrack => "EP Track",
        AlbumTrack => "Album Track",
        Demo => "Demo",
        Remix => "Remix",
        Unreleased => "Unreleased",
    }
}

define_choice! {
    /// Production stage of a single track.
    pub enum TrackStage default Idea {
        Idea => "Idea",
        Writing => "Writing",
        Recording => "Recording",
        Mixing => "Mixing",
        Mastering => "Mastering",
        Scheduled => "Scheduled",
        Released => "Released",
    }
}

define_choice! {
    /// Musical key, with both enharmonic spellings of the black keys.
    pub enum MusicalKey default AMinor {
        C => "C",
        CMinor => "Cm",
        CSharp => "C#",
        DFlat => "Db",
        D => "D",
        DMinor => "Dm",
        DSharp => "D#",
        EFlat => "Eb",
        E => "E",
        EMinor => "Em",
        F => "F",
        FMinor => "Fm",
        FSharp => "F#",
        GFlat => "Gb",
        G => "G",
        GMinor => "Gm",
        GSharp => "G#",
        AFlat => "Ab",
        A => "A",
        AMinor => "Am",
        ASharp => "A#",
        BFlat => "Bb",
        B => "B",
        BMinor => "Bm",
    }
}

define_fields! {
    /// A song in the music catalog.
    pub struct Track / TrackPatch {
        pub title: String,
        #[serde(rename = "type")]
        pub kind: TrackType,
        pub bpm: Option<u32>,
        pub key: MusicalKey,
        /// International Standard Recording Code.
        pub isrc: Option<String>,
        pub release_date: Option<NaiveDate>,
        pub stage: TrackStage,
        /// Lifetime stream count.
        pub streams: Option<u64>,
        /// Free text, unlike `Release::distributor`.
        pub distributor: Option<String>,
        pub notes: Option<String>,
    }
}

impl Track {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Collection for Track {
    const NAME: &'static str = "catalog";
    type Patch = TrackPatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("created_at"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "title", &self.title)
    }

    fn validate_patch(patch: &TrackPatch) -> Result<(), ValidationError> {
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
    fn test_musical_key_labels() {
        assert_eq!(MusicalKey::ALL.len(), 24);
        assert_eq!("c#".parse::<MusicalKey>().unwrap(), MusicalKey::CSharp);
        assert_eq!("Bb".parse::<MusicalKey>().unwrap(), MusicalKey::BFlat);
        assert_eq!(MusicalKey::default().label(), "Am");
    }

    #[test]
    fn test_track_table_is_catalog() {
        assert_eq!(Track::NAME, "catalog");
        assert!(Track::new("Slow Burn").validate().is_ok());
    }
}
