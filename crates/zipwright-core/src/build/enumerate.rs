//! Source enumeration.
//!
//! Turns a [`SourceKind`](crate::build::SourceKind) into the ordered list
//! of entries a build will write. Directory enumeration is sorted
//! lexicographically so rename indices are reproducible across runs.

use std::path::Path;
use std::path::PathBuf;

use glob::Pattern;
use walkdir::WalkDir;

use crate::build::request::MemoryFile;
use crate::error::ArchiveError;
use crate::error::Result;

/// Identity of an entry's content: a file on disk or an in-memory buffer.
#[derive(Debug, Clone)]
pub enum EntrySource {
    /// Content read from this path at write time.
    Path(PathBuf),
    /// Content carried in memory.
    Bytes(Vec<u8>),
}

/// One file scheduled for archiving.
///
/// Immutable once enumerated; the in-archive name is decided later by the
/// writer, where the conflict policy applies.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Where the content comes from.
    pub source: EntrySource,
    /// In-archive directory with `/` separators, empty for the root.
    pub archive_dir: String,
    /// Bare file name.
    pub file_name: String,
}

impl ArchiveEntry {
    /// The full in-archive path this entry would take without flattening.
    #[must_use]
    pub fn archive_path(&self) -> String {
        if self.archive_dir.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", self.archive_dir, self.file_name)
        }
    }
}

fn archive_dir_for(path: &Path, root: &Path) -> String {
    let relative = crate::naming::relative_path(path, root);
    let mut dir = String::new();
    for component in relative.components() {
        if !dir.is_empty() {
            dir.push('/');
        }
        dir.push_str(&component.as_os_str().to_string_lossy());
    }
    dir
}

/// Enumerates files under `root` whose names match `file_mask`.
///
/// Only regular files are returned; directories contribute structure via
/// each entry's `archive_dir`. Results are sorted by full path.
pub fn enumerate_directory(
    root: &Path,
    file_mask: &str,
    include_subfolders: bool,
) -> Result<Vec<ArchiveEntry>> {
    if !root.is_dir() {
        return Err(ArchiveError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }
    let pattern = Pattern::new(file_mask).map_err(|e| ArchiveError::InvalidRequest {
        reason: format!("invalid file mask '{file_mask}': {e}"),
    })?;

    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if !include_subfolders {
        walker = walker.max_depth(1);
    }

    let mut entries = Vec::new();
    for dir_entry in walker {
        let dir_entry = dir_entry.map_err(|e| {
            ArchiveError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::other("directory walk failed")
            }))
        })?;
        if !dir_entry.file_type().is_file() {
            continue;
        }
        let file_name = dir_entry.file_name().to_string_lossy().to_string();
        if !pattern.matches(&file_name) {
            continue;
        }
        entries.push(ArchiveEntry {
            archive_dir: archive_dir_for(dir_entry.path(), root),
            file_name,
            source: EntrySource::Path(dir_entry.path().to_path_buf()),
        });
    }
    entries.sort_by(|a, b| a.archive_path().cmp(&b.archive_path()));
    Ok(entries)
}

/// Turns an explicit file list into entries, all at the archive root.
///
/// Every path must name an existing regular file.
pub fn enumerate_files(paths: &[PathBuf]) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_file() {
            return Err(ArchiveError::SourceNotFound { path: path.clone() });
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ArchiveError::InvalidRequest {
                reason: format!("path '{}' has no file name", path.display()),
            })?;
        entries.push(ArchiveEntry {
            source: EntrySource::Path(path.clone()),
            archive_dir: String::new(),
            file_name,
        });
    }
    Ok(entries)
}

/// Turns in-memory buffers into entries, all at the archive root.
pub fn enumerate_memory(files: &[MemoryFile]) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        if file.name.is_empty() {
            return Err(ArchiveError::InvalidRequest {
                reason: "in-memory file has an empty name".to_string(),
            });
        }
        entries.push(ArchiveEntry {
            source: EntrySource::Bytes(file.content.clone()),
            archive_dir: String::new(),
            file_name: file.name.clone(),
        });
    }
    Ok(entries)
}
