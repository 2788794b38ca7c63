//! Error types for archive build and extraction operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building or extracting an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source directory or archive file does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Destination directory does not exist and auto-creation is disabled.
    #[error("destination directory not found: {path}")]
    DestinationNotFound {
        /// The missing destination directory.
        path: PathBuf,
    },

    /// No source files matched the file mask.
    #[error("no files found in {dir} with file mask '{mask}'")]
    NoFilesMatched {
        /// The directory that was searched.
        dir: PathBuf,
        /// The file mask that matched nothing.
        mask: String,
    },

    /// An entry with the same in-archive name was already added.
    // Named `source_path` because a field called `source` would be
    // treated as the error source by the thiserror derive.
    #[error("file {source_path} already exists in archive as '{name}'")]
    DuplicateEntry {
        /// The source path of the offending file.
        source_path: PathBuf,
        /// The conflicting in-archive name.
        name: String,
    },

    /// Destination file already exists and the policy forbids replacing it.
    #[error("destination file {path} already exists")]
    DestinationExists {
        /// The existing destination path.
        path: PathBuf,
    },

    /// Decryption failed with the supplied (or absent) password.
    #[error("invalid or missing password for {path}")]
    BadPassword {
        /// The archive that could not be decrypted.
        path: PathBuf,
    },

    /// An archive entry name would escape the destination directory.
    #[error("unsafe entry name in archive: {name}")]
    UnsafeEntryName {
        /// The offending entry name.
        name: String,
    },

    /// Archive is corrupted, truncated, or otherwise unreadable.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Request failed validation before any work was done.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Why the request was rejected.
        reason: String,
    },

    /// The operation was cancelled between entries.
    #[error("operation cancelled")]
    Cancelled,
}

impl ArchiveError {
    /// Returns `true` if this error means a required input was missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::DestinationNotFound { .. }
        )
    }

    /// Returns `true` if this error is a naming conflict the caller could
    /// avoid by enabling a rename or overwrite policy.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEntry { .. } | Self::DestinationExists { .. }
        )
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        use zip::result::ZipError;
        match err {
            ZipError::Io(e) => Self::Io(e),
            ZipError::InvalidPassword => Self::BadPassword {
                path: PathBuf::new(),
            },
            // Reading an encrypted entry without a password surfaces as
            // an unsupported-archive error inside the codec.
            ZipError::UnsupportedArchive(msg) if msg == ZipError::PASSWORD_REQUIRED => {
                Self::BadPassword {
                    path: PathBuf::new(),
                }
            }
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

impl ArchiveError {
    /// Attaches the archive path to a password error produced by the codec.
    ///
    /// The codec does not know which file it is decrypting, so the caller
    /// fills the path in before surfacing the error.
    #[must_use]
    pub fn with_archive_path(self, archive: &std::path::Path) -> Self {
        match self {
            Self::BadPassword { .. } => Self::BadPassword {
                path: archive.to_path_buf(),
            },
            other => other,
        }
    }
}
