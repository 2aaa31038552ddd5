use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::record::{require_text, Collection, OrderBy};

define_choice! {
    /// Area of work a task belongs to.
    pub enum TaskCategory default Release {
        Release => "Release",
        Promo => "Promo",
        Studio => "Studio",
        Social => "Social",
        Admin => "Admin",
        Gig => "Gig",
        Merch => "Merch",
    }
}

define_choice! {
    /// How soon a task needs attention.
    pub enum TaskPriority default Medium {
        Urgent => "Urgent",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

define_choice! {
    /// Board column of a task.
    pub enum TaskStatus default ToDo {
        ToDo => "To Do",
        InProgress => "In Progress",
        Done => "Done",
        Blocked => "Blocked",
    }
}

define_fields! {
    /// A to-do item on the task board.
    pub struct Task / TaskPatch {
        pub title: String,
        pub category: TaskCategory,
        pub priority: TaskPriority,
        pub status: TaskStatus,
        pub due_date: Option<NaiveDate>,
        pub notes: Option<String>,
    }
}

impl Task {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

impl TaskPatch {
    /// Flips a task between `Done` and `To Do`.
    #[must_use]
    pub fn toggle(task: &Task) -> Self {
        let status = if task.is_done() {
            TaskStatus::ToDo
        } else {
            TaskStatus::Done
        };
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Collection for Task {
    const NAME: &'static str = "tasks";
    type Patch = TaskPatch;

    fn default_order() -> Option<OrderBy> {
        Some(OrderBy::desc("created_at"))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::NAME, "title", &self.title)
    }

    fn validate_patch(patch: &TaskPatch) -> Result<(), ValidationError> {
        match &patch.title {
            Some(title) => require_text(Self::NAME, "title", title),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{parse_fields, parse_patch, Patch};
    use serde_json::json;

    #[test]
    fn test_task_defaults_match_board() {
        let task = Task::new("Submit single to playlists");
        assert_eq!(task.category, TaskCategory::Release);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.status, TaskStatus::ToDo);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_task_requires_title() {
        let err = Task::default().validate().unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn test_task_toggle() {
        let mut task = Task::new("Book studio");
        TaskPatch::toggle(&task).apply(&mut task);
        assert!(task.is_done());
        TaskPatch::toggle(&task).apply(&mut task);
        assert_eq!(task.status, TaskStatus::ToDo);
    }

    #[test]
    fn test_task_parse_status_label() {
        let task: Task = parse_fields(json!({
            "title": "Mix EP",
            "status": "In Progress",
            "due_date": "2025-07-01"
        }))
        .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 7, 1));
    }

    #[test]
    fn test_task_patch_cannot_blank_title() {
        let patch = parse_patch::<Task>(json!({"title": ""})).unwrap();
        assert!(Task::validate_patch(&patch).is_err());
    }
}
