use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_choice! {
    /// Theme a goal serves.
    pub enum GoalCategory default Growth {
        Growth => "Growth",
        Releases => "Releases",
        Live => "Live",
        Income => "Income",
        Social => "Social",
        Brand => "Brand",
    }
}

define_fields! {
    /// A career goal with a progress percentage.
    pub struct Goal / GoalPatch {
        pub text: String,
        /// Target date, free text ("end of 2025").
        pub target: Option<String>,
        /// Percent complete, 0-100.
        pub progress: u8,
        pub category: GoalCategory,
    }
}

/// Highest value `progress` may hold.
pub const MAX_PROGRESS: u8 = 100;

fn require_percent(progress: u8) -> Result<(), ValidationError> {
    if progress > MAX_PROGRESS {
        return Err(ValidationError {
            collection: Goal::NAME.to_string(),
            field: "progress".to_string(),
            reason: format!("must be between 0 and {MAX_PROGRESS}"),
        });
    }
    Ok(())
}

impl Goal {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Collection for Goal {
    const NAME: &'static str = "goals";
    type Patch = GoalPatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::asc("created_at"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "text", &self.text)?;
        require_percent(self.progress)
    }

    fn validate_patch(patch: &GoalPatch) -> Result<(), ValidationError> {
        if let Some(text) = &patch.text {
            require_text(Self::NAME, "text", text)?;
        }
        patch.progress.map_or(Ok(()), require_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{parse_fields, parse_patch};
    use serde_json::json;

    #[test]
    fn test_goal_defaults() {
        let goal = Goal::new("Play SXSW");
        assert_eq!(goal.progress, 0);
        assert_eq!(goal.category, GoalCategory::Growth);
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_goal_requires_text() {
        let err = Goal::default().validate().unwrap_err();
        assert_eq!(err.field, "text");
        let patch = parse_patch::<Goal>(json!({ "text": "  " })).unwrap();
        assert!(Goal::validate_patch(&patch).is_err());
    }

    #[test]
    fn test_progress_capped_at_one_hundred() {
        let done = Goal {
            progress: MAX_PROGRESS,
            ..Goal::new("Release the EP")
        };
        assert!(done.validate().is_ok());

        let over = Goal {
            progress: 150,
            ..Goal::new("Release the EP")
        };
        let err = over.validate().unwrap_err();
        assert_eq!(err.field, "progress");
        assert_eq!(err.collection, "goals");

        let patch = parse_patch::<Goal>(json!({ "progress": 101 })).unwrap();
        assert_eq!(Goal::validate_patch(&patch).unwrap_err().field, "progress");
        let patch = parse_patch::<Goal>(json!({ "progress": 100 })).unwrap();
        assert!(Goal::validate_patch(&patch).is_ok());
    }

    #[test]
    fn test_progress_beyond_byte_rejected_at_parse() {
        assert!(parse_fields::<Goal>(json!({ "text": "Tour", "progress": 300 })).is_err());
        assert!(parse_fields::<Goal>(json!({ "text": "Tour", "progress": -5 })).is_err());
    }

    #[test]
    fn test_goal_category_label() {
        let goal: Goal = parse_fields(json!({ "text": "Merch line", "category": "Brand" })).unwrap();
        assert_eq!(goal.category, GoalCategory::Brand);
    }
}
