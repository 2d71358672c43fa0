//! Write and read paths of the habit gallery.
//!
//! # Write path
//!
//! [`UploadService::submit`] turns one parsed form into a durable
//! submission:
//!
//! 1. validate the five inputs (no storage I/O until this passes),
//! 2. store the scorecard, then the comic, through the content store,
//! 3. under the writer lock, load the record collection, append a new
//!    record and save it back.
//!
//! Every completed file write is registered with a rollback guard. Any
//! failure after the first write unwinds the guard in reverse order, so a
//! failed submission leaves neither files nor a record behind.
//!
//! # Read path
//!
//! [`project_works`] maps the stored collection to the public
//! [`WorkView`](gallery_types::WorkView) list, skipping entries that are
//! missing required fields. [`audit`] additionally reports records whose
//! image files have disappeared from the content store.

pub mod audit;
pub mod error;
pub mod form;
pub mod projection;
pub mod rollback;
pub mod service;
pub mod validation;

pub use audit::{audit, AuditReport, DanglingFile};
pub use error::{UploadError, UploadResult};
pub use form::{FileUpload, UploadForm, TEXT_FIELDS};
pub use projection::{project_record, project_works, Projection};
pub use service::{UploadService, SUCCESS_MESSAGE};
pub use validation::{validate, ValidatedFile, ValidatedUpload, ValidationError};
