//! Build result types.

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// What a build produced.
///
/// When a build succeeds with zero matched files (and `error_if_no_files`
/// is off) no archive is written: `file_name` and `file_path` are empty
/// and `file_count` is `0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildOutput {
    /// Final archive file name, after any destination rename.
    pub file_name: String,
    /// Full path of the written archive.
    pub file_path: PathBuf,
    /// Number of entries written by this build.
    pub file_count: usize,
    /// In-archive names in write order, after any entry renames. Always
    /// `file_count` long and free of duplicates.
    pub archived_files: Vec<String>,
}

/// What an in-memory build produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryOutput {
    /// The complete archive bytes.
    pub bytes: Vec<u8>,
    /// Number of entries written.
    pub file_count: usize,
    /// In-archive names in write order, after any entry renames.
    pub archived_files: Vec<String>,
}
