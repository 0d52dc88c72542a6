//! Request normalization subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → content_type.rs (pick a body kind from the Content-Type header)
//!     → normalizer.rs (read body, dispatch, collect query params)
//!         → form.rs (urlencoded bodies and query strings)
//!         → filename.rs (sanitize uploaded file names)
//!         → storage::UploadStore (write uploaded file parts)
//!     → NormalizedRequest (content-type independent)
//! ```
//!
//! # Design Decisions
//! - Parse failures degrade to empty values; they never fail the request
//! - Upload writes are the only side effect and go through `UploadStore`
//! - Every map is a `BTreeMap` so records and responses serialize stably

pub mod content_type;
pub mod filename;
pub mod form;
pub mod normalized;
pub mod normalizer;

pub use content_type::BodyKind;
pub use filename::sanitize_filename;
pub use normalized::{NormalizedRequest, RequestBody};
pub use normalizer::Normalizer;
