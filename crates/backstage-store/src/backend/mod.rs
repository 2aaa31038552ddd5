//! The seam between the record store and the datastore it talks to.
//!
//! Backends move untyped JSON rows; typing, validation and error mapping
//! live in [`crate::store`].

use std::fmt;

use async_trait::async_trait;
use backstage_core::{OrderBy, RecordId};
use serde_json::Value;

use crate::error::StoreResult;

pub mod memory;
pub mod rest;

pub use memory::MemoryBackend;
pub use rest::RestBackend;

/// Column every table is keyed by.
pub const ID_COLUMN: &str = "id";

/// Column holding the insert timestamp.
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Row filter of a read query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column` equals `value` (compared as text).
    Eq { column: String, value: String },
}

impl Filter {
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// A read-all query: optional filter, optional order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filter: Option<Filter>,
    pub order: Option<OrderBy>,
}

impl Query {
    #[must_use]
    pub fn ordered(order: Option<OrderBy>) -> Self {
        Self {
            filter: None,
            order,
        }
    }

    #[must_use]
    pub fn by_id(id: &RecordId) -> Self {
        Self::matching(Filter::eq(ID_COLUMN, id.as_str()))
    }

    #[must_use]
    pub fn matching(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            order: None,
        }
    }
}

/// A remote (or in-process) table store speaking a minimal CRUD protocol.
///
/// Every method is a single round trip. Implementations assign `id` and
/// `created_at` on insert and never re-sort results beyond the query order.
#[async_trait]
pub trait Backend: Send + Sync + fmt::Debug {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// Reads every row of `table` matching `query`, in query order.
    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Value>>;

    /// Inserts one row and returns it as stored.
    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value>;

    /// Merges `patch` into the row with this id. `None` when no row matched.
    async fn update(&self, table: &str, id: &RecordId, patch: Value) -> StoreResult<Option<Value>>;

    /// Removes the row with this id. `false` when no row matched.
    async fn delete(&self, table: &str, id: &RecordId) -> StoreResult<bool>;

    /// Inserts `row`, or merges it into the existing row whose
    /// `conflict_column` holds the same value.
    async fn upsert(&self, table: &str, row: Value, conflict_column: &str) -> StoreResult<Value>;
}
