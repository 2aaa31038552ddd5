//! In-process datastore with the same semantics as the hosted one.
//!
//! Rows keep insertion order; ids are uuid v4 strings and `created_at`
//! timestamps are strictly increasing, so recency ordering is total even
//! for rows inserted within the same clock tick.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use backstage_core::model::Direction;
use backstage_core::{OrderBy, RecordId};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::{Backend, Filter, Query, CREATED_AT_COLUMN, ID_COLUMN};
use crate::error::{StoreError, StoreResult};

type Row = Map<String, Value>;

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, Vec<Row>>,
    last_created: Option<DateTime<Utc>>,
}

impl State {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(stamp);
        stamp
    }

    fn stamp_new_row(&mut self, mut row: Row) -> Row {
        let created_at = self.next_timestamp();
        row.insert(
            ID_COLUMN.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        row.insert(
            CREATED_AT_COLUMN.to_string(),
            Value::String(created_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        row
    }
}

/// A datastore held entirely in memory.
#[derive(Debug)]
pub struct MemoryBackend {
    state: Mutex<State>,
    available: AtomicBool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates losing (or regaining) the datastore: while unavailable every
    /// call fails with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, AtomicOrdering::SeqCst);
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(AtomicOrdering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::unavailable("memory backend is offline"))
        }
    }
}

fn into_row(table: &str, value: Value) -> StoreResult<Row> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(StoreError::unavailable(format!(
            "{table}: rejected non-object row {other}"
        ))),
    }
}

/// Text form used for equality filters, mirroring `column=eq.value`.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn row_matches(row: &Row, filter: Option<&Filter>) -> bool {
    match filter {
        None => true,
        Some(Filter::Eq { column, value }) => {
            row.get(column).and_then(as_text).as_deref() == Some(value.as_str())
        }
    }
}

fn has_id(row: &Row, id: &RecordId) -> bool {
    row_matches(row, Some(&Filter::eq(ID_COLUMN, id.as_str())))
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => {
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Orders rows the way the hosted datastore does: nulls sort as larger
/// than any value, so they come last ascending and first descending.
fn sort_rows(rows: &mut [Row], order: &OrderBy) {
    let ascending = order.direction == Direction::Ascending;
    rows.sort_by(|a, b| {
        let x = a.get(&order.column).filter(|v| !v.is_null());
        let y = b.get(&order.column).filter(|v| !v.is_null());
        let ordering = match (x, y) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => compare_present(x, y),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Value>> {
        self.ensure_available()?;
        let state = self.state.lock().await;
        let mut rows: Vec<Row> = state
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row_matches(row, query.filter.as_ref()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(order) = &query.order {
            sort_rows(&mut rows, order);
        }
        Ok(rows.into_iter().map(Value::Object).collect())
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value> {
        self.ensure_available()?;
        let row = into_row(table, row)?;
        let mut state = self.state.lock().await;
        let row = state.stamp_new_row(row);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(Value::Object(row))
    }

    async fn update(&self, table: &str, id: &RecordId, patch: Value) -> StoreResult<Option<Value>> {
        self.ensure_available()?;
        let patch = into_row(table, patch)?;
        let mut state = self.state.lock().await;
        let Some(row) = state
            .tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|row| has_id(row, id)))
        else {
            return Ok(None);
        };
        for (column, value) in patch {
            if column != ID_COLUMN && column != CREATED_AT_COLUMN {
                row.insert(column, value);
            }
        }
        Ok(Some(Value::Object(row.clone())))
    }

    async fn delete(&self, table: &str, id: &RecordId) -> StoreResult<bool> {
        self.ensure_available()?;
        let mut state = self.state.lock().await;
        let Some(rows) = state.tables.get_mut(table) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|row| !has_id(row, id));
        Ok(rows.len() < before)
    }

    async fn upsert(&self, table: &str, row: Value, conflict_column: &str) -> StoreResult<Value> {
        self.ensure_available()?;
        let row = into_row(table, row)?;
        let key = row.get(conflict_column).cloned().unwrap_or(Value::Null);
        let mut state = self.state.lock().await;

        let existing = state.tables.get_mut(table).and_then(|rows| {
            rows.iter_mut()
                .find(|existing| !key.is_null() && existing.get(conflict_column) == Some(&key))
        });
        if let Some(existing) = existing {
            for (column, value) in row {
                if column != ID_COLUMN && column != CREATED_AT_COLUMN {
                    existing.insert(column, value);
                }
            }
            return Ok(Value::Object(existing.clone()));
        }

        let row = state.stamp_new_row(row);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(Value::Object(row))
    }
}
