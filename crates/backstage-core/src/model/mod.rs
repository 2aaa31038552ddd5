#[macro_use]
mod choice;
#[macro_use]
mod fields;

pub mod analytics;
pub mod contact;
pub mod gig;
pub mod goal;
pub mod ids;
pub mod ledger;
pub mod note;
pub mod post;
pub mod record;
pub mod release;
pub mod task;
pub mod track;

pub use analytics::{Analytics, AnalyticsPatch, Metric};
pub use contact::{Contact, ContactPatch, ContactRole, ContactStatus};
pub use gig::{Gig, GigPatch, GigStatus, GigType};
pub use goal::{Goal, GoalCategory, GoalPatch};
pub use ids::RecordId;
pub use ledger::{Expense, ExpenseCategory, ExpensePatch, Income, IncomeCategory, IncomePatch};
pub use note::{Note, NotePatch};
pub use post::{ContentPost, ContentPostPatch};
pub use record::{
    parse_fields, parse_patch, require_text, Collection, Direction, OrderBy, Patch, Record,
};
pub use release::{Distributor, Release, ReleasePatch, ReleaseStage, ReleaseType};
pub use task::{Task, TaskCategory, TaskPatch, TaskPriority, TaskStatus};
pub use track::{MusicalKey, Track, TrackPatch, TrackStage, TrackType};
