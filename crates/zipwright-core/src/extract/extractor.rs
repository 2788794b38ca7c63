//! Archive extraction.
//!
//! Entries are processed in archive order with the per-file conflict
//! policy applied to each target path. There is no rollback: when an
//! entry fails, files already extracted stay on disk.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use zip::ZipArchive;
use zip::read::ZipFile;

use crate::cancel::CancellationToken;
use crate::error::ArchiveError;
use crate::error::Result;
use crate::extract::output::ExtractOutput;
use crate::extract::request::ExtractRequest;
use crate::extract::request::FileExistsAction;
use crate::naming;

/// Extracts a ZIP archive to a destination directory.
///
/// Returns the absolute path of every file written, in entry order.
/// Directory entries create structure but are not reported.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use zipwright_core::CancellationToken;
/// use zipwright_core::extract::ExtractRequest;
/// use zipwright_core::extract::extract_archive;
///
/// let request = ExtractRequest::new(
///     PathBuf::from("/data/backup.zip"),
///     PathBuf::from("/data/out"),
/// )
/// .with_create_destination_dir(true);
///
/// let output = extract_archive(&request, &CancellationToken::new())?;
/// println!("extracted {} files", output.extracted_files.len());
/// # Ok::<(), zipwright_core::ArchiveError>(())
/// ```
pub fn extract_archive(
    request: &ExtractRequest,
    token: &CancellationToken,
) -> Result<ExtractOutput> {
    request.validate()?;
    token.check()?;

    if !request.archive_path.is_file() {
        return Err(ArchiveError::SourceNotFound {
            path: request.archive_path.clone(),
        });
    }
    if !request.destination_dir.is_dir() {
        if request.create_destination_dir {
            fs::create_dir_all(&request.destination_dir)?;
        } else {
            return Err(ArchiveError::DestinationNotFound {
                path: request.destination_dir.clone(),
            });
        }
    }

    let file = File::open(&request.archive_path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| ArchiveError::from(e).with_archive_path(&request.archive_path))?;

    let mut extracted = Vec::new();
    for index in 0..archive.len() {
        token.check()?;

        let entry = open_entry(&mut archive, index, request.password.as_deref())
            .map_err(|e| e.with_archive_path(&request.archive_path))?;
        if let Some(path) = extract_entry(entry, &request.destination_dir, request.on_existing)? {
            extracted.push(path);
        }
    }

    Ok(ExtractOutput {
        extracted_files: extracted,
    })
}

fn open_entry<'a, R: io::Read + io::Seek>(
    archive: &'a mut ZipArchive<R>,
    index: usize,
    password: Option<&str>,
) -> Result<ZipFile<'a, R>> {
    let entry = match password {
        Some(password) => archive.by_index_decrypt(index, password.as_bytes())?,
        None => archive.by_index(index)?,
    };
    Ok(entry)
}

fn extract_entry<R: io::Read + io::Seek>(
    mut entry: ZipFile<'_, R>,
    destination: &Path,
    on_existing: FileExistsAction,
) -> Result<Option<PathBuf>> {
    let relative = entry
        .enclosed_name()
        .ok_or_else(|| ArchiveError::UnsafeEntryName {
            name: entry.name().to_string(),
        })?;
    let target = destination.join(relative);

    if entry.is_dir() {
        fs::create_dir_all(&target)?;
        return Ok(None);
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let target = if target.exists() {
        match on_existing {
            FileExistsAction::Error => {
                return Err(ArchiveError::DestinationExists { path: target });
            }
            FileExistsAction::Overwrite => target,
            FileExistsAction::Rename => naming::resolve_extracted_path(&target),
        }
    } else {
        target
    };

    let mut out = File::create(&target)?;
    io::copy(&mut entry, &mut out)?;
    Ok(Some(target))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::build::BuildOptions;
    use crate::build::MemoryBuildRequest;
    use crate::build::MemoryFile;
    use crate::build::build_archive_in_memory;
    use tempfile::TempDir;

    fn archive_with(files: &[(&str, &[u8])], options: BuildOptions) -> Vec<u8> {
        let files = files
            .iter()
            .map(|(name, content)| MemoryFile {
                name: (*name).to_string(),
                content: content.to_vec(),
            })
            .collect();
        let request = MemoryBuildRequest::new(files).with_options(options);
        build_archive_in_memory(&request, &CancellationToken::new())
            .unwrap()
            .bytes
    }

    fn write_archive(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_extract_reports_every_file() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(
            &[("a.txt", b"alpha"), ("sub/b.txt", b"beta")],
            BuildOptions::new(),
        );
        let archive = write_archive(temp.path(), "in.zip", &bytes);
        let dest = temp.path().join("out");

        let request =
            ExtractRequest::new(archive, dest.clone()).with_create_destination_dir(true);
        let output = extract_archive(&request, &CancellationToken::new()).unwrap();

        assert_eq!(output.extracted_files.len(), 2);
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(dest.join("sub/b.txt")).unwrap(), "beta");
        assert!(output.extracted_files.contains(&dest.join("sub/b.txt")));
    }

    #[test]
    fn test_missing_archive_is_source_not_found() {
        let temp = TempDir::new().unwrap();
        let request = ExtractRequest::new(
            temp.path().join("missing.zip"),
            temp.path().to_path_buf(),
        );
        let result = extract_archive(&request, &CancellationToken::new());
        assert!(matches!(result, Err(ArchiveError::SourceNotFound { .. })));
    }

    #[test]
    fn test_missing_destination_without_create() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(&[("a.txt", b"x")], BuildOptions::new());
        let archive = write_archive(temp.path(), "in.zip", &bytes);

        let request = ExtractRequest::new(archive, temp.path().join("absent"));
        let result = extract_archive(&request, &CancellationToken::new());
        assert!(matches!(
            result,
            Err(ArchiveError::DestinationNotFound { .. })
        ));
    }

    #[test]
    fn test_existing_file_error_policy_keeps_earlier_files() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(
            &[("a.txt", b"new a"), ("b.txt", b"new b")],
            BuildOptions::new(),
        );
        let archive = write_archive(temp.path(), "in.zip", &bytes);
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("b.txt"), "old b").unwrap();

        let request = ExtractRequest::new(archive, dest.clone());
        let result = extract_archive(&request, &CancellationToken::new());

        assert!(matches!(
            result,
            Err(ArchiveError::DestinationExists { .. })
        ));
        // a.txt landed before the failure and stays.
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "new a");
        assert_eq!(fs::read_to_string(dest.join("b.txt")).unwrap(), "old b");
    }

    #[test]
    fn test_existing_file_overwrite_policy() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(&[("a.txt", b"new")], BuildOptions::new());
        let archive = write_archive(temp.path(), "in.zip", &bytes);
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("a.txt"), "old").unwrap();

        let request = ExtractRequest::new(archive, dest.clone())
            .with_on_existing(FileExistsAction::Overwrite);
        extract_archive(&request, &CancellationToken::new()).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "new");
    }

    #[test]
    fn test_existing_file_rename_starts_at_zero() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(&[("logo.png", b"image")], BuildOptions::new());
        let archive = write_archive(temp.path(), "in.zip", &bytes);
        let dest = temp.path().join("out");

        let request = ExtractRequest::new(archive, dest.clone())
            .with_create_destination_dir(true)
            .with_on_existing(FileExistsAction::Rename);

        extract_archive(&request, &CancellationToken::new()).unwrap();
        let output = extract_archive(&request, &CancellationToken::new()).unwrap();

        assert_eq!(output.extracted_files, [dest.join("logo(0).png")]);
        assert!(dest.join("logo.png").exists());
        assert!(dest.join("logo(0).png").exists());
    }

    #[test]
    fn test_password_round_trip() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(
            &[("secret.txt", b"classified")],
            BuildOptions::new().with_password("hunter2"),
        );
        let archive = write_archive(temp.path(), "in.zip", &bytes);
        let dest = temp.path().join("out");

        let request = ExtractRequest::new(archive, dest.clone())
            .with_create_destination_dir(true)
            .with_password("hunter2");
        let output = extract_archive(&request, &CancellationToken::new()).unwrap();

        assert_eq!(output.extracted_files.len(), 1);
        assert_eq!(
            fs::read_to_string(dest.join("secret.txt")).unwrap(),
            "classified"
        );
    }

    #[test]
    fn test_wrong_password_fails_before_writing() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(
            &[("secret.txt", b"classified")],
            BuildOptions::new().with_password("hunter2"),
        );
        let archive = write_archive(temp.path(), "in.zip", &bytes);
        let dest = temp.path().join("out");

        let request = ExtractRequest::new(archive, dest.clone())
            .with_create_destination_dir(true)
            .with_password("wrong");
        let result = extract_archive(&request, &CancellationToken::new());

        assert!(matches!(result, Err(ArchiveError::BadPassword { .. })));
        assert!(!dest.join("secret.txt").exists());
    }

    #[test]
    fn test_absent_password_on_encrypted_archive() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(
            &[("secret.txt", b"classified")],
            BuildOptions::new().with_password("hunter2"),
        );
        let archive = write_archive(temp.path(), "in.zip", &bytes);
        let dest = temp.path().join("out");

        let request = ExtractRequest::new(archive, dest).with_create_destination_dir(true);
        let result = extract_archive(&request, &CancellationToken::new());
        assert!(matches!(result, Err(ArchiveError::BadPassword { .. })));
    }

    #[test]
    fn test_bad_password_error_names_the_archive() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(
            &[("secret.txt", b"classified")],
            BuildOptions::new().with_password("hunter2"),
        );
        let archive = write_archive(temp.path(), "locked.zip", &bytes);
        let dest = temp.path().join("out");

        let request = ExtractRequest::new(archive, dest)
            .with_create_destination_dir(true)
            .with_password("wrong");
        let err = extract_archive(&request, &CancellationToken::new()).unwrap_err();
        assert!(err.to_string().contains("locked.zip"));
    }

    #[test]
    fn test_cancelled_before_start() {
        let temp = TempDir::new().unwrap();
        let bytes = archive_with(&[("a.txt", b"x")], BuildOptions::new());
        let archive = write_archive(temp.path(), "in.zip", &bytes);

        let token = CancellationToken::new();
        token.cancel();

        let request = ExtractRequest::new(archive, temp.path().to_path_buf());
        let result = extract_archive(&request, &token);
        assert!(matches!(result, Err(ArchiveError::Cancelled)));
    }

    #[test]
    fn test_garbage_archive_is_invalid() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(temp.path(), "junk.zip", b"this is not a zip file");

        let request = ExtractRequest::new(archive, temp.path().to_path_buf());
        let result = extract_archive(&request, &CancellationToken::new());
        assert!(matches!(result, Err(ArchiveError::InvalidArchive(_))));
    }
}
