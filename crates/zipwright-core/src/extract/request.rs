//! Request types for extraction.

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ArchiveError;
use crate::error::Result;

/// What to do when an extracted file's target path already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileExistsAction {
    /// Fail with `DestinationExists`, keeping files already written.
    #[default]
    Error,
    /// Replace the existing file.
    Overwrite,
    /// Write to a numbered sibling, `logo(0).png` and so on.
    Rename,
}

/// A complete extraction request.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use zipwright_core::extract::ExtractRequest;
/// use zipwright_core::extract::FileExistsAction;
///
/// let request = ExtractRequest::new(
///     PathBuf::from("/data/backup.zip"),
///     PathBuf::from("/data/out"),
/// )
/// .with_password("secret")
/// .with_on_existing(FileExistsAction::Rename);
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// The archive to read.
    pub archive_path: PathBuf,
    /// Password for encrypted entries.
    pub password: Option<String>,
    /// Directory the entries are written under.
    pub destination_dir: PathBuf,
    /// Create the destination directory when it does not exist.
    #[serde(default)]
    pub create_destination_dir: bool,
    /// Per-file conflict policy.
    #[serde(default)]
    pub on_existing: FileExistsAction,
}

impl ExtractRequest {
    /// Creates a request with default policies.
    #[must_use]
    pub fn new(archive_path: PathBuf, destination_dir: PathBuf) -> Self {
        Self {
            archive_path,
            password: None,
            destination_dir,
            create_destination_dir: false,
            on_existing: FileExistsAction::default(),
        }
    }

    /// Sets the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets destination directory auto-creation.
    #[must_use]
    pub fn with_create_destination_dir(mut self, create: bool) -> Self {
        self.create_destination_dir = create;
        self
    }

    /// Sets the per-file conflict policy.
    #[must_use]
    pub fn with_on_existing(mut self, action: FileExistsAction) -> Self {
        self.on_existing = action;
        self
    }

    /// Checks the request for structural problems before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.archive_path.as_os_str().is_empty() {
            return Err(ArchiveError::InvalidRequest {
                reason: "archive path is empty".to_string(),
            });
        }
        if self.destination_dir.as_os_str().is_empty() {
            return Err(ArchiveError::InvalidRequest {
                reason: "destination directory is empty".to_string(),
            });
        }
        Ok(())
    }
}
