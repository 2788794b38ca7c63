//! Policy-driven ZIP archive creation and extraction.
//!
//! `zipwright-core` builds and extracts ZIP archives with deterministic
//! handling of naming conflicts (error, overwrite, rename, append),
//! folder flattening, AES-256 password protection, and Zip64 support.
//! Requests and outputs are plain serde types so the engine can be driven
//! by a workflow automation system: every operation reports exactly which
//! entries or files it produced, under their final names.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::PathBuf;
//! use zipwright_core::CancellationToken;
//! use zipwright_core::build::BuildRequest;
//! use zipwright_core::build::Destination;
//! use zipwright_core::build::SourceKind;
//! use zipwright_core::build_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = BuildRequest::new(
//!     SourceKind::Directory {
//!         root: PathBuf::from("/data/in"),
//!         file_mask: "*.txt".to_string(),
//!         include_subfolders: true,
//!     },
//!     Destination {
//!         directory: PathBuf::from("/data/out"),
//!         file_name: "backup.zip".to_string(),
//!     },
//! );
//! let output = build_archive(&request, &CancellationToken::new())?;
//! println!("archived {} files", output.file_count);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod build;
pub mod cancel;
pub mod error;
pub mod extract;
pub mod naming;

// Re-export main API types
pub use api::build_archive;
pub use api::build_archive_in_memory;
pub use api::extract_archive;
pub use build::BuildOptions;
pub use build::BuildOutput;
pub use build::BuildRequest;
pub use build::Destination;
pub use build::DestinationExistsAction;
pub use build::MemoryBuildRequest;
pub use build::MemoryOutput;
pub use build::SourceKind;
pub use build::Zip64Mode;
pub use cancel::CancellationToken;
pub use error::ArchiveError;
pub use error::Result;
pub use extract::ExtractOutput;
pub use extract::ExtractRequest;
pub use extract::FileExistsAction;
