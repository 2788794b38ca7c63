//! The request/response surface a workflow engine calls.
//!
//! Each operation takes a serde-enabled request plus a
//! [`CancellationToken`](crate::CancellationToken) and returns a
//! serde-enabled output, so the boundary can be driven from structured
//! configuration without touching the underlying modules.

pub use crate::build::writer::build_archive;
pub use crate::build::writer::build_archive_in_memory;
pub use crate::extract::extractor::extract_archive;
