//! Destination container policy.

use std::path::Path;
use std::path::PathBuf;

use crate::build::request::DestinationExistsAction;
use crate::error::ArchiveError;
use crate::error::Result;
use crate::naming;

/// How the writer should open the destination container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationTarget {
    /// Write a fresh archive at this path.
    Write(PathBuf),
    /// Open the existing archive at this path and add entries to it.
    Append(PathBuf),
}

impl DestinationTarget {
    /// The path the finished archive will live at.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Write(path) | Self::Append(path) => path,
        }
    }
}

/// Applies the destination conflict policy to `path`.
///
/// A non-existing path is always written fresh, whatever the action.
/// For an existing path: `Error` fails, `Overwrite` reuses the path,
/// `Rename` probes for a numbered sibling (`backup_(1).zip`, then
/// `backup_(2).zip`), and `Append` opens the existing container.
pub fn resolve_destination(
    path: &Path,
    action: DestinationExistsAction,
) -> Result<DestinationTarget> {
    if !path.exists() {
        return Ok(DestinationTarget::Write(path.to_path_buf()));
    }
    match action {
        DestinationExistsAction::Error => Err(ArchiveError::DestinationExists {
            path: path.to_path_buf(),
        }),
        DestinationExistsAction::Overwrite => Ok(DestinationTarget::Write(path.to_path_buf())),
        DestinationExistsAction::Rename => Ok(DestinationTarget::Write(
            naming::resolve_destination_path(path),
        )),
        DestinationExistsAction::Append => Ok(DestinationTarget::Append(path.to_path_buf())),
    }
}
