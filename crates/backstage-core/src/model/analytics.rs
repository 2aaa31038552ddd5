use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_fields! {
    /// Monthly snapshot of audience and revenue numbers.
    pub struct Analytics / AnalyticsPatch {
        /// Calendar month, `YYYY-MM`.
        pub month: String,
        /// Spotify monthly listeners.
        pub spotify: Option<u64>,
        /// Apple Music listeners.
        pub apple: Option<u64>,
        pub ig_followers: Option<u64>,
        pub tiktok: Option<u64>,
        /// YouTube subscribers.
        pub youtube: Option<u64>,
        /// Gigs played that month.
        pub gigs: Option<u64>,
        pub revenue: Option<f64>,
        pub notes: Option<String>,
    }
}

/// A numeric column of an [`Analytics`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Spotify,
    Apple,
    IgFollowers,
    TikTok,
    YouTube,
    Gigs,
    Revenue,
}

impl Metric {
    pub const ALL: &'static [Self] = &[
        Self::Spotify,
        Self::Apple,
        Self::IgFollowers,
        Self::TikTok,
        Self::YouTube,
        Self::Gigs,
        Self::Revenue,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify listeners",
            Self::Apple => "Apple Music",
            Self::IgFollowers => "Instagram followers",
            Self::TikTok => "TikTok followers",
            Self::YouTube => "YouTube subs",
            Self::Gigs => "Gigs played",
            Self::Revenue => "Revenue",
        }
    }
}

impl Analytics {
    #[must_use]
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            ..Self::default()
        }
    }

    /// Value of one metric, treating a blank column as zero.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        let count = match metric {
            Metric::Spotify => self.spotify,
            Metric::Apple => self.apple,
            Metric::IgFollowers => self.ig_followers,
            Metric::TikTok => self.tiktok,
            Metric::YouTube => self.youtube,
            Metric::Gigs => self.gigs,
            Metric::Revenue => return self.revenue.unwrap_or(0.0),
        };
        count.unwrap_or(0) as f64
    }
}

impl Collection for Analytics {
    const NAME: &'static str = "analytics";
    type Patch = AnalyticsPatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("month"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "month", &self.month)
    }

    fn validate_patch(patch: &AnalyticsPatch) -> Result<(), ValidationError> {
        match &patch.month {
            Some(month) => require_text(Self::NAME, "month", month),
            None => Ok(()),
        }
    }
}
