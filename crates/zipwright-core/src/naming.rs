//! Conflict-free name resolution.
//!
//! Two numbering formats coexist deliberately: archive entries and
//! destination containers get an underscore suffix (`report_(1).txt`,
//! starting at 1) while extracted output files get a plain suffix
//! (`report(0).txt`, starting at 0). Both formats are load-bearing for
//! callers that pattern-match produced names; do not unify them.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

/// Splits a file name into its stem and extension (with leading dot).
///
/// Follows `Path` semantics: dotfiles like `.gitignore` have no extension
/// and are numbered whole.
fn split_name(name: &str) -> (&str, &str) {
    let path = Path::new(name);
    match (path.file_stem().and_then(|s| s.to_str()), path.extension()) {
        (Some(stem), Some(_)) => {
            let ext_start = stem.len();
            (stem, &name[ext_start..])
        }
        _ => (name, ""),
    }
}

/// Splits an in-archive name into its directory prefix (ending in `/`,
/// or empty) and its final component. Numbering only ever touches the
/// final component.
fn split_dir(name: &str) -> (&str, &str) {
    name.rfind('/')
        .map_or(("", name), |pos| (&name[..=pos], &name[pos + 1..]))
}

/// Formats the underscore-suffixed variant of a name: `stem_(N).ext`.
///
/// Used when renaming entries inside an archive and when renaming the
/// destination container itself. A directory prefix passes through
/// untouched; only the final component is numbered.
///
/// # Examples
///
/// ```
/// use zipwright_core::naming::numbered_entry_name;
///
/// assert_eq!(numbered_entry_name("report.txt", 1), "report_(1).txt");
/// assert_eq!(numbered_entry_name("README", 2), "README_(2)");
/// assert_eq!(numbered_entry_name("sub/report.txt", 1), "sub/report_(1).txt");
/// ```
#[must_use]
pub fn numbered_entry_name(name: &str, index: usize) -> String {
    let (dir, base) = split_dir(name);
    let (stem, ext) = split_name(base);
    format!("{dir}{stem}_({index}){ext}")
}

/// Formats the plain-suffixed variant of a name: `stem(N).ext`.
///
/// Used when renaming files written to disk during extraction. Like
/// [`numbered_entry_name`], only the final component is numbered.
///
/// # Examples
///
/// ```
/// use zipwright_core::naming::numbered_output_name;
///
/// assert_eq!(numbered_output_name("logo.png", 0), "logo(0).png");
/// assert_eq!(numbered_output_name("LICENSE", 3), "LICENSE(3)");
/// ```
#[must_use]
pub fn numbered_output_name(name: &str, index: usize) -> String {
    let (dir, base) = split_dir(name);
    let (stem, ext) = split_name(base);
    format!("{dir}{stem}({index}){ext}")
}

/// Resolves `desired` against a set of names already committed to an
/// archive.
///
/// Returns `desired` unchanged when it is free; otherwise tries
/// `stem_(1).ext`, `stem_(2).ext`, ... until an unused name is found.
/// Deterministic and total: the index is unbounded, so this always
/// terminates.
#[must_use]
pub fn resolve_entry_name(used: &HashSet<String>, desired: &str) -> String {
    if !used.contains(desired) {
        return desired.to_string();
    }
    let mut index = 1;
    loop {
        let candidate = numbered_entry_name(desired, index);
        if !used.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Computes the archive-relative directory of `full_path` under `base_dir`.
///
/// Returns the containing directory of `full_path` with the `base_dir`
/// prefix removed, or an empty path when the file sits directly in
/// `base_dir` (or outside it). Trailing separators on `base_dir` do not
/// change the result because comparison is component-wise.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipwright_core::naming::relative_path;
///
/// let rel = relative_path(Path::new("/in/sub/a.txt"), Path::new("/in/"));
/// assert_eq!(rel, Path::new("sub"));
///
/// let root = relative_path(Path::new("/in/a.txt"), Path::new("/in"));
/// assert_eq!(root, Path::new(""));
/// ```
#[must_use]
pub fn relative_path(full_path: &Path, base_dir: &Path) -> PathBuf {
    full_path
        .parent()
        .and_then(|dir| dir.strip_prefix(base_dir).ok())
        .map_or_else(PathBuf::new, Path::to_path_buf)
}

/// Finds an unused sibling of `path` using the underscore format.
///
/// Filesystem variant of [`resolve_entry_name`] for the destination
/// container: `zip_test.zip` becomes `zip_test_(1).zip`, then
/// `zip_test_(2).zip`, probing real-file existence. Idempotent while no
/// file is created at the returned path, but not a lock: concurrent
/// callers probing the same directory can race, which is the caller's
/// responsibility.
#[must_use]
pub fn resolve_destination_path(path: &Path) -> PathBuf {
    resolve_on_disk(path, 1, numbered_entry_name)
}

/// Finds an unused sibling of `path` using the plain format.
///
/// Filesystem variant for extracted files: the first rename of
/// `logo.png` is `logo(0).png`. Same idempotence and race caveats as
/// [`resolve_destination_path`].
#[must_use]
pub fn resolve_extracted_path(path: &Path) -> PathBuf {
    resolve_on_disk(path, 0, numbered_output_name)
}

fn resolve_on_disk(path: &Path, first_index: usize, format: fn(&str, usize) -> String) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut index = first_index;
    loop {
        let candidate = dir.join(format(name, index));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}
