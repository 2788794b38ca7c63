//! Archive writing.
//!
//! Entries are written into a temporary file in the destination directory
//! and only persisted to the final path after the container is complete,
//! so a failed build never leaves a partial archive behind. Append mode
//! writes into the existing container directly and pre-seeds the conflict
//! set with the names already inside it.

use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use zip::AesMode;
use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::FileOptions;
use zip::write::SimpleFileOptions;

use crate::build::destination::DestinationTarget;
use crate::build::destination::resolve_destination;
use crate::build::enumerate::ArchiveEntry;
use crate::build::enumerate::EntrySource;
use crate::build::enumerate::enumerate_directory;
use crate::build::enumerate::enumerate_files;
use crate::build::enumerate::enumerate_memory;
use crate::build::output::BuildOutput;
use crate::build::output::MemoryOutput;
use crate::build::request::BuildOptions;
use crate::build::request::BuildRequest;
use crate::build::request::MemoryBuildRequest;
use crate::build::request::SourceKind;
use crate::build::request::Zip64Mode;
use crate::cancel::CancellationToken;
use crate::error::ArchiveError;
use crate::error::Result;
use crate::naming;

/// Entries at or above this size need 64-bit size fields.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Builds a ZIP archive on disk from a request.
///
/// Returns the final archive location and the exact in-archive names
/// written, in write order. With zero matched files and
/// `error_if_no_files` off, succeeds without writing anything.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use zipwright_core::CancellationToken;
/// use zipwright_core::build::BuildRequest;
/// use zipwright_core::build::Destination;
/// use zipwright_core::build::SourceKind;
/// use zipwright_core::build::build_archive;
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
/// );
/// let output = build_archive(&request, &CancellationToken::new())?;
/// println!("wrote {} entries to {}", output.file_count, output.file_path.display());
/// # Ok::<(), zipwright_core::ArchiveError>(())
/// ```
pub fn build_archive(
    request: &BuildRequest,
    token: &CancellationToken,
) -> Result<BuildOutput> {
    request.validate()?;
    token.check()?;

    let entries = match &request.source {
        SourceKind::Directory {
            root,
            file_mask,
            include_subfolders,
        } => enumerate_directory(root, file_mask, *include_subfolders)?,
        SourceKind::Files { paths } => enumerate_files(paths)?,
        SourceKind::Memory { files } => enumerate_memory(files)?,
    };

    if entries.is_empty() {
        if request.options.error_if_no_files {
            return Err(no_files_error(&request.source));
        }
        return Ok(BuildOutput::default());
    }

    let dest_dir = &request.destination.directory;
    if !dest_dir.is_dir() {
        if request.options.create_destination_dir {
            fs::create_dir_all(dest_dir)?;
        } else {
            return Err(ArchiveError::DestinationNotFound {
                path: dest_dir.clone(),
            });
        }
    }

    let requested_path = dest_dir.join(&request.destination.file_name);
    let target = resolve_destination(&requested_path, request.options.on_existing)?;
    let final_path = target.path().to_path_buf();

    let archived = match &target {
        DestinationTarget::Write(path) => {
            write_fresh(path, dest_dir, &entries, &request.options, token)?
        }
        DestinationTarget::Append(path) => {
            append_existing(path, &entries, &request.options, token)?
        }
    };

    if request.options.remove_sources {
        remove_sources(&entries)?;
    }

    Ok(BuildOutput {
        file_name: final_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        file_path: final_path,
        file_count: archived.len(),
        archived_files: archived,
    })
}

/// Builds a ZIP archive in memory.
///
/// Same conflict, password, compression, and Zip64 behavior as
/// [`build_archive`], writing into a buffer instead of a file.
pub fn build_archive_in_memory(
    request: &MemoryBuildRequest,
    token: &CancellationToken,
) -> Result<MemoryOutput> {
    request.validate()?;
    token.check()?;

    let entries = enumerate_memory(&request.files)?;
    if entries.is_empty() && request.options.error_if_no_files {
        return Err(no_files_error(&SourceKind::Memory { files: Vec::new() }));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut used = HashSet::new();
    let archived = write_entries(&mut zip, &entries, &request.options, &mut used, token)?;
    let cursor = zip.finish()?;

    Ok(MemoryOutput {
        bytes: cursor.into_inner(),
        file_count: archived.len(),
        archived_files: archived,
    })
}

fn no_files_error(source: &SourceKind) -> ArchiveError {
    match source {
        SourceKind::Directory {
            root, file_mask, ..
        } => ArchiveError::NoFilesMatched {
            dir: root.clone(),
            mask: file_mask.clone(),
        },
        SourceKind::Files { .. } | SourceKind::Memory { .. } => ArchiveError::InvalidRequest {
            reason: "no source files given".to_string(),
        },
    }
}

fn write_fresh(
    final_path: &Path,
    dest_dir: &Path,
    entries: &[ArchiveEntry],
    options: &BuildOptions,
    token: &CancellationToken,
) -> Result<Vec<String>> {
    let temp = NamedTempFile::new_in(dest_dir)?;
    let mut zip = ZipWriter::new(temp);
    let mut used = HashSet::new();

    let archived = write_entries(&mut zip, entries, options, &mut used, token)?;

    let temp = zip.finish()?;
    temp.persist(final_path)
        .map_err(|e| ArchiveError::Io(e.error))?;
    Ok(archived)
}

fn append_existing(
    path: &Path,
    entries: &[ArchiveEntry],
    options: &BuildOptions,
    token: &CancellationToken,
) -> Result<Vec<String>> {
    // Names already in the container participate in conflict resolution.
    let mut used = existing_entry_names(path)?;

    let file = OpenOptions::new().read(true).write(true).open(path)?;
    let mut zip = ZipWriter::new_append(file)?;
    let archived = write_entries(&mut zip, entries, options, &mut used, token)?;
    zip.finish()?;
    Ok(archived)
}

fn existing_entry_names(path: &Path) -> Result<HashSet<String>> {
    let archive = ZipArchive::new(File::open(path)?)?;
    Ok(archive.file_names().map(ToString::to_string).collect())
}

fn write_entries<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entries: &[ArchiveEntry],
    options: &BuildOptions,
    used: &mut HashSet<String>,
    token: &CancellationToken,
) -> Result<Vec<String>> {
    let mut archived = Vec::with_capacity(entries.len());
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for entry in entries {
        token.check()?;

        let desired = if options.flatten_folders {
            entry.file_name.clone()
        } else {
            entry.archive_path()
        };
        let name = if used.contains(&desired) {
            if !options.rename_duplicates {
                return Err(ArchiveError::DuplicateEntry {
                    source_path: entry_source_path(entry),
                    name: desired,
                });
            }
            naming::resolve_entry_name(used, &desired)
        } else {
            desired
        };

        let size = entry_size(entry)?;
        zip.start_file(&name, entry_options(options, size))?;

        match &entry.source {
            EntrySource::Path(path) => {
                let mut file = File::open(path)?;
                loop {
                    let read = file.read(&mut buffer)?;
                    if read == 0 {
                        break;
                    }
                    zip.write_all(&buffer[..read])?;
                }
            }
            EntrySource::Bytes(bytes) => {
                zip.write_all(bytes)?;
            }
        }

        used.insert(name.clone());
        archived.push(name);
    }

    Ok(archived)
}

fn entry_source_path(entry: &ArchiveEntry) -> PathBuf {
    match &entry.source {
        EntrySource::Path(path) => path.clone(),
        EntrySource::Bytes(_) => PathBuf::from(&entry.file_name),
    }
}

fn entry_size(entry: &ArchiveEntry) -> Result<u64> {
    match &entry.source {
        EntrySource::Path(path) => Ok(fs::metadata(path)?.len()),
        EntrySource::Bytes(bytes) => Ok(bytes.len() as u64),
    }
}

// The returned options borrow the password, so the lifetime is tied to
// the build options rather than `'static`.
fn entry_options(options: &BuildOptions, size: u64) -> FileOptions<'_, ()> {
    let mut file_options = if options.compression_level == Some(0) {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        match options.compression_level {
            Some(level) => base.compression_level(Some(i64::from(level))),
            None => base,
        }
    };

    file_options = match options.zip64 {
        Zip64Mode::Always => file_options.large_file(true),
        Zip64Mode::AsNecessary => file_options.large_file(size >= ZIP64_THRESHOLD),
        Zip64Mode::Never => file_options.large_file(false),
    };

    if let Some(password) = &options.password {
        file_options = file_options.with_aes_encryption(AesMode::Aes256, password);
    }

    file_options
}

fn remove_sources(entries: &[ArchiveEntry]) -> Result<()> {
    for entry in entries {
        if let EntrySource::Path(path) = &entry.source {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}
