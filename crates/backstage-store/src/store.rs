//! Typed record stores over a [`Backend`].
//!
//! A [`RecordStore`] is bound to one collection and turns untyped rows into
//! [`Record`]s. Required fields are checked here, before any request is
//! made; everything else about a row is the datastore's business.

use std::marker::PhantomData;
use std::sync::Arc;

use backstage_core::model::Note;
use backstage_core::{Collection, OrderBy, Patch, Record, RecordId};
use serde_json::Value;

use crate::backend::{Backend, Filter, Query};
use crate::error::{StoreError, StoreResult};

/// Typed list/create/update/delete access to one collection.
#[derive(Debug)]
pub struct RecordStore<C> {
    backend: Arc<dyn Backend>,
    _collection: PhantomData<fn() -> C>,
}

impl<C> Clone for RecordStore<C> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _collection: PhantomData,
        }
    }
}

fn decode<C: Collection>(row: Value) -> StoreResult<Record<C>> {
    serde_json::from_value(row)
        .map_err(|e| StoreError::unavailable(format!("{}: malformed row: {e}", C::NAME)))
}

impl<C: Collection> RecordStore<C> {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            _collection: PhantomData,
        }
    }

    /// Every record of the collection in its default order.
    ///
    /// # Errors
    /// `Unavailable` if the datastore cannot be read or returns a row that
    /// does not decode.
    pub async fn list(&self) -> StoreResult<Vec<Record<C>>> {
        self.query(Query::ordered(C::default_order())).await
    }

    /// Every record of the collection in the given order.
    ///
    /// # Errors
    /// As for [`RecordStore::list`].
    pub async fn list_by(&self, order: OrderBy) -> StoreResult<Vec<Record<C>>> {
        self.query(Query::ordered(Some(order))).await
    }

    async fn query(&self, query: Query) -> StoreResult<Vec<Record<C>>> {
        let rows = self.backend.select(C::NAME, &query).await?;
        log::debug!(
            "{}: read {} rows from {} backend",
            C::NAME,
            rows.len(),
            self.backend.name()
        );
        rows.into_iter().map(decode).collect()
    }

    /// One record by id.
    ///
    /// # Errors
    /// `NotFound` if no record has this id.
    pub async fn get(&self, id: &RecordId) -> StoreResult<Record<C>> {
        let rows = self.backend.select(C::NAME, &Query::by_id(id)).await?;
        match rows.into_iter().next() {
            Some(row) => decode(row),
            None => Err(self.not_found(id)),
        }
    }

    /// Adds a record; the datastore assigns its id and creation time.
    ///
    /// # Errors
    /// `Validation` if a required field is blank, without contacting the
    /// datastore.
    pub async fn create(&self, fields: C) -> StoreResult<Record<C>> {
        fields.validate()?;
        let row = serde_json::to_value(&fields)?;
        let stored = decode::<C>(self.backend.insert(C::NAME, row).await?)?;
        log::info!("{}: created {}", C::NAME, stored.id);
        Ok(stored)
    }

    /// Merges a partial update into the record with this id.
    ///
    /// Fields absent from the patch keep their stored values. An empty patch
    /// writes nothing and returns the record as stored.
    ///
    /// # Errors
    /// `NotFound` if no record has this id; `Validation` if the patch blanks
    /// a required field.
    pub async fn update(&self, id: &RecordId, patch: C::Patch) -> StoreResult<Record<C>> {
        C::validate_patch(&patch)?;
        if patch.is_empty() {
            return self.get(id).await;
        }

        let body = serde_json::to_value(&patch)?;
        match self.backend.update(C::NAME, id, body).await? {
            Some(row) => {
                log::info!("{}: updated {id}", C::NAME);
                decode(row)
            }
            None => Err(self.not_found(id)),
        }
    }

    /// Removes the record with this id.
    ///
    /// # Errors
    /// `NotFound` if no record has this id.
    pub async fn delete(&self, id: &RecordId) -> StoreResult<()> {
        if self.backend.delete(C::NAME, id).await? {
            log::info!("{}: deleted {id}", C::NAME);
            Ok(())
        } else {
            Err(self.not_found(id))
        }
    }

    fn not_found(&self, id: &RecordId) -> StoreError {
        StoreError::NotFound {
            collection: C::NAME,
            id: id.to_string(),
        }
    }
}

/// Notes are addressed by key: writes upsert, reads filter on the key.
#[derive(Debug, Clone)]
pub struct NoteStore {
    records: RecordStore<Note>,
}

impl NoteStore {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            records: RecordStore::new(backend),
        }
    }

    /// The typed id-based store over the same table.
    #[must_use]
    pub fn records(&self) -> &RecordStore<Note> {
        &self.records
    }

    pub async fn list(&self) -> StoreResult<Vec<Record<Note>>> {
        self.records.list().await
    }

    /// The note stored under `key`, if any.
    ///
    /// # Errors
    /// `Unavailable` if the datastore cannot be read.
    pub async fn get(&self, key: &str) -> StoreResult<Option<Record<Note>>> {
        let query = Query::matching(Filter::eq(Note::KEY_COLUMN, key));
        let rows = self.records.backend.select(Note::NAME, &query).await?;
        rows.into_iter().next().map(decode).transpose()
    }

    /// Sets the content of the note under `key`, creating it if needed.
    ///
    /// Two calls with the same key leave one record holding the later
    /// content.
    ///
    /// # Errors
    /// `Validation` if the key is blank.
    pub async fn upsert_by_key(
        &self,
        key: &str,
        content: impl Into<String>,
    ) -> StoreResult<Record<Note>> {
        let note = Note::new(key, content);
        note.validate()?;
        let row = serde_json::to_value(&note)?;
        let stored = decode::<Note>(
            self.records
                .backend
                .upsert(Note::NAME, row, Note::KEY_COLUMN)
                .await?,
        )?;
        log::info!("{}: saved {key:?}", Note::NAME);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use backstage_core::model::{Task, TaskPatch, TaskStatus};

    fn tasks() -> (Arc<MemoryBackend>, RecordStore<Task>) {
        let backend = Arc::new(MemoryBackend::new());
        let store = RecordStore::new(backend.clone() as Arc<dyn Backend>);
        (backend, store)
    }

    #[tokio::test]
    async fn test_create_validates_before_any_request() {
        let (backend, store) = tasks();
        backend.set_available(false);

        // Offline, yet the blank title is reported as a validation failure.
        let err = store.create(Task::new("  ")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_empty_patch_returns_stored_record() {
        let (_, store) = tasks();
        let created = store.create(Task::new("Book rehearsal room")).await.unwrap();
        let same = store.update(&created.id, TaskPatch::default()).await.unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let (_, store) = tasks();
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        };
        let err = store.update(&RecordId::new("nope"), patch).await.unwrap_err();
        assert!(err.is_not_found());
        let err = store.update(&RecordId::new("nope"), TaskPatch::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_row_is_unavailable() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .insert("tasks", serde_json::json!({ "title": "x", "status": "Someday" }))
            .await
            .unwrap();
        let store: RecordStore<Task> = RecordStore::new(backend);
        assert!(store.list().await.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn test_note_get_missing_key() {
        let notes = NoteStore::new(Arc::new(MemoryBackend::new()));
        assert!(notes.get("vision").await.unwrap().is_none());
        assert!(notes.upsert_by_key("", "text").await.unwrap_err().is_validation());
    }
}
