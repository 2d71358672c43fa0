//! Storage for the habit gallery.
//!
//! Two independent stores back the service:
//!
//! - a **content store** holding uploaded image files under generated,
//!   collision-free names (`<uuid>_<role>.<ext>`), and
//! - a **record store** holding the ordered list of work records as one
//!   JSON array document.
//!
//! # Storage Backends
//!
//! - [`FsContentStore`] / [`JsonRecordStore`] -- directory- and file-backed,
//!   used by the server
//! - [`InMemoryContentStore`] / [`InMemoryRecordStore`] -- for tests and embedding
//!
//! # Design Rules
//!
//! 1. Stored files are never overwritten; names come from a UUID v4.
//! 2. Lookups by name are confined to the content root. Names carrying path
//!    separators or `..` are rejected before touching the filesystem.
//! 3. The record document is replaced atomically (temp file + rename), so a
//!    reader sees either the old or the new document, never a torn one.
//! 4. A missing, empty, or unparseable record document loads as an empty
//!    collection. The cause is logged, never returned.
//! 5. Stores do not serialize read-modify-write cycles; callers that append
//!    must hold their own writer lock.

pub mod error;
pub mod fs;
pub mod json;
pub mod memory;
pub mod naming;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsContentStore;
pub use json::JsonRecordStore;
pub use memory::{InMemoryContentStore, InMemoryRecordStore};
pub use naming::{generate_filename, resolve_url, validate_filename, URL_PREFIX};
pub use traits::{ContentStore, RecordStore};
