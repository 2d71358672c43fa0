//! Foundation types for the habit gallery.
//!
//! Every other gallery crate depends on `gallery-types`. The types here
//! describe what a submission looks like on disk and on the wire; they do
//! no I/O of their own.
//!
//! # Key Types
//!
//! - [`WorkId`]: UUID v4 identifier assigned to each submission
//! - [`WorkRecord`]: one persisted submission (six camelCase JSON fields)
//! - [`RecordCollection`]: ordered list of stored entries, tolerant of malformed ones
//! - [`WorkView`]: public listing shape with resolved image URLs
//! - [`ImageRole`] / [`ImageExtension`]: the two upload slots and the allowed formats

pub mod error;
pub mod id;
pub mod image;
pub mod record;
pub mod view;

pub use error::{TypeError, TypeResult};
pub use id::WorkId;
pub use image::{raw_extension, ImageExtension, ImageRole};
pub use record::{value_text, RecordCollection, SkippedEntry, WorkRecord, REQUIRED_FIELDS};
pub use view::WorkView;
