//! Record store for backstage.
//!
//! Typed list/create/update/delete over the hosted datastore, an in-memory
//! backend with the same contract, the note upsert, the local notepad and
//! configuration loading.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod backend;
pub mod config;
pub mod error;
pub mod notepad;
pub mod store;

pub use backend::{Backend, MemoryBackend, RestBackend};
pub use config::{Config, Connection};
pub use error::{StoreError, StoreResult};
pub use notepad::{Notepad, NotepadError};
pub use store::{NoteStore, RecordStore};
