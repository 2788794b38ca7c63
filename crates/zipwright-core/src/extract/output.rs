//! Extraction result types.

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// What an extraction wrote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractOutput {
    /// Absolute paths of the files written, one per non-directory entry,
    /// in entry order. Renamed targets appear under their renamed path.
    pub extracted_files: Vec<PathBuf>,
}
