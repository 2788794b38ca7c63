//! Request types for archive builds.

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ArchiveError;
use crate::error::Result;

fn default_file_mask() -> String {
    "*".to_string()
}

/// Where the files to archive come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceKind {
    /// Files enumerated from a directory by mask.
    Directory {
        /// Directory to enumerate.
        root: PathBuf,
        /// Glob-style file mask matched against file names, e.g. `*.txt`.
        #[serde(default = "default_file_mask")]
        file_mask: String,
        /// Descend into subdirectories.
        #[serde(default)]
        include_subfolders: bool,
    },
    /// An explicit list of files, each archived at the root.
    Files {
        /// The files to archive, in order.
        paths: Vec<PathBuf>,
    },
    /// In-memory buffers with logical file names.
    Memory {
        /// The buffers to archive, in order.
        files: Vec<MemoryFile>,
    },
}

/// An in-memory source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryFile {
    /// Logical file name inside the archive.
    pub name: String,
    /// File content.
    pub content: Vec<u8>,
}

/// Where the finished archive lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Directory the archive is written into.
    pub directory: PathBuf,
    /// Archive file name, e.g. `backup.zip`.
    pub file_name: String,
}

/// What to do when the destination archive already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationExistsAction {
    /// Fail with `DestinationExists`.
    #[default]
    Error,
    /// Replace the existing archive.
    Overwrite,
    /// Write to a numbered sibling, `backup_(1).zip` and so on.
    Rename,
    /// Open the existing archive and add entries to it.
    Append,
}

/// When to emit per-entry Zip64 (64-bit size) fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zip64Mode {
    /// Every entry gets 64-bit fields.
    Always,
    /// Only entries at or above 4 GiB get 64-bit fields.
    #[default]
    AsNecessary,
    /// No entry gets 64-bit fields. Builds with oversized entries will
    /// fail inside the codec; the caller accepts that risk.
    Never,
}

/// Policy knobs for a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Place every entry at the archive root, discarding directory
    /// structure.
    pub flatten_folders: bool,
    /// When flattening produces a name collision, rename instead of
    /// failing.
    pub rename_duplicates: bool,
    /// AES-256 encrypt every entry with this password.
    pub password: Option<String>,
    /// Per-entry Zip64 policy.
    pub zip64: Zip64Mode,
    /// Treat an empty enumeration as an error rather than an empty
    /// success.
    pub error_if_no_files: bool,
    /// What to do when the destination archive already exists.
    pub on_existing: DestinationExistsAction,
    /// Create the destination directory when it does not exist.
    pub create_destination_dir: bool,
    /// Delete the archived source files after a successful build.
    pub remove_sources: bool,
    /// Compression level: `0` stores entries uncompressed, `1`-`9`
    /// deflate. `None` uses the deflate default.
    pub compression_level: Option<u8>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            flatten_folders: false,
            rename_duplicates: false,
            password: None,
            zip64: Zip64Mode::default(),
            error_if_no_files: true,
            on_existing: DestinationExistsAction::default(),
            create_destination_dir: false,
            remove_sources: false,
            compression_level: None,
        }
    }
}

impl BuildOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets folder flattening.
    #[must_use]
    pub fn with_flatten_folders(mut self, flatten: bool) -> Self {
        self.flatten_folders = flatten;
        self
    }

    /// Sets duplicate renaming.
    #[must_use]
    pub fn with_rename_duplicates(mut self, rename: bool) -> Self {
        self.rename_duplicates = rename;
        self
    }

    /// Sets the encryption password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the Zip64 policy.
    #[must_use]
    pub fn with_zip64(mut self, mode: Zip64Mode) -> Self {
        self.zip64 = mode;
        self
    }

    /// Sets whether an empty enumeration is an error.
    #[must_use]
    pub fn with_error_if_no_files(mut self, error: bool) -> Self {
        self.error_if_no_files = error;
        self
    }

    /// Sets the destination conflict policy.
    #[must_use]
    pub fn with_on_existing(mut self, action: DestinationExistsAction) -> Self {
        self.on_existing = action;
        self
    }

    /// Sets destination directory auto-creation.
    #[must_use]
    pub fn with_create_destination_dir(mut self, create: bool) -> Self {
        self.create_destination_dir = create;
        self
    }

    /// Sets source removal after a successful build.
    #[must_use]
    pub fn with_remove_sources(mut self, remove: bool) -> Self {
        self.remove_sources = remove;
        self
    }

    /// Sets the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }
}

/// A complete build request.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use zipwright_core::build::BuildOptions;
/// use zipwright_core::build::BuildRequest;
/// use zipwright_core::build::Destination;
/// use zipwright_core::build::SourceKind;
///
/// let request = BuildRequest::new(
///     SourceKind::Directory {
///         root: PathBuf::from("/data/in"),
///         file_mask: "*.txt".to_string(),
///         include_subfolders: true,
///     },
///     Destination {
///         directory: PathBuf::from("/data/out"),
///         file_name: "backup.zip".to_string(),
///     },
/// )
/// .with_options(BuildOptions::new().with_flatten_folders(true));
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Source of the files to archive.
    pub source: SourceKind,
    /// Destination directory and archive name.
    pub destination: Destination,
    /// Policy knobs.
    #[serde(default)]
    pub options: BuildOptions,
}

impl BuildRequest {
    /// Creates a request with default options.
    #[must_use]
    pub fn new(source: SourceKind, destination: Destination) -> Self {
        Self {
            source,
            destination,
            options: BuildOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Checks the request for structural problems before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.destination.file_name.is_empty() {
            return Err(ArchiveError::InvalidRequest {
                reason: "destination file name is empty".to_string(),
            });
        }
        if self
            .destination
            .file_name
            .contains(['/', '\\'])
        {
            return Err(ArchiveError::InvalidRequest {
                reason: format!(
                    "destination file name '{}' contains a path separator",
                    self.destination.file_name
                ),
            });
        }
        if let SourceKind::Directory { file_mask, .. } = &self.source
            && file_mask.is_empty()
        {
            return Err(ArchiveError::InvalidRequest {
                reason: "file mask is empty".to_string(),
            });
        }
        if let Some(level) = self.options.compression_level
            && level > 9
        {
            return Err(ArchiveError::InvalidRequest {
                reason: format!("compression level {level} is out of range (0-9)"),
            });
        }
        Ok(())
    }
}

/// A build request whose archive never touches the filesystem.
///
/// Destination and source-removal options do not apply; the conflict,
/// password, compression, and Zip64 options behave exactly as in a
/// filesystem build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryBuildRequest {
    /// The buffers to archive, in order.
    pub files: Vec<MemoryFile>,
    /// Policy knobs.
    #[serde(default)]
    pub options: BuildOptions,
}

impl MemoryBuildRequest {
    /// Creates a request with default options.
    #[must_use]
    pub fn new(files: Vec<MemoryFile>) -> Self {
        Self {
            files,
            options: BuildOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Checks the request for structural problems.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.options.compression_level
            && level > 9
        {
            return Err(ArchiveError::InvalidRequest {
                reason: format!("compression level {level} is out of range (0-9)"),
            });
        }
        Ok(())
    }
}
