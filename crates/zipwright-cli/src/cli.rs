//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use std::path::PathBuf;
use zipwright_core::DestinationExistsAction;
use zipwright_core::FileExistsAction;
use zipwright_core::Zip64Mode;

#[derive(Parser)]
#[command(name = "zipwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a ZIP archive from a source directory
    Create(CreateArgs),
    /// Extract a ZIP archive
    Extract(ExtractArgs),
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Source directory to archive
    #[arg(value_name = "SOURCE_DIR")]
    pub source: PathBuf,

    /// Output archive path, e.g. /backups/daily.zip
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// File mask matched against file names, e.g. '*.txt'
    #[arg(short, long, default_value = "*")]
    pub mask: String,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Place every entry at the archive root
    #[arg(long)]
    pub flatten: bool,

    /// Rename colliding entry names instead of failing
    #[arg(long)]
    pub rename_duplicates: bool,

    /// AES-256 encrypt entries with this password
    #[arg(short, long)]
    pub password: Option<String>,

    /// When to emit per-entry Zip64 fields
    #[arg(long, value_enum, default_value_t = Zip64Arg::AsNecessary)]
    pub zip64: Zip64Arg,

    /// What to do when the output archive already exists
    #[arg(long, value_enum, default_value_t = ExistingArchiveArg::Error)]
    pub on_existing: ExistingArchiveArg,

    /// Create the output directory when it does not exist
    #[arg(long)]
    pub create_dest_dir: bool,

    /// Delete the archived source files after a successful build
    #[arg(long)]
    pub remove_sources: bool,

    /// Succeed (without writing an archive) when no files match
    #[arg(long)]
    pub allow_empty: bool,

    /// Compression level: 0 stores, 1-9 deflate
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the ZIP archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to extract into
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Password for encrypted entries
    #[arg(short, long)]
    pub password: Option<String>,

    /// What to do when an extracted file already exists
    #[arg(long, value_enum, default_value_t = ExistingFileArg::Error)]
    pub on_existing: ExistingFileArg,

    /// Create the output directory when it does not exist
    #[arg(long)]
    pub create_dest_dir: bool,
}

/// Destination conflict policy flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExistingArchiveArg {
    Error,
    Overwrite,
    Rename,
    Append,
}

impl From<ExistingArchiveArg> for DestinationExistsAction {
    fn from(arg: ExistingArchiveArg) -> Self {
        match arg {
            ExistingArchiveArg::Error => Self::Error,
            ExistingArchiveArg::Overwrite => Self::Overwrite,
            ExistingArchiveArg::Rename => Self::Rename,
            ExistingArchiveArg::Append => Self::Append,
        }
    }
}

/// Extracted-file conflict policy flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExistingFileArg {
    Error,
    Overwrite,
    Rename,
}

impl From<ExistingFileArg> for FileExistsAction {
    fn from(arg: ExistingFileArg) -> Self {
        match arg {
            ExistingFileArg::Error => Self::Error,
            ExistingFileArg::Overwrite => Self::Overwrite,
            ExistingFileArg::Rename => Self::Rename,
        }
    }
}

/// Zip64 policy flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Zip64Arg {
    Always,
    AsNecessary,
    Never,
}

impl From<Zip64Arg> for Zip64Mode {
    fn from(arg: Zip64Arg) -> Self {
        match arg {
            Zip64Arg::Always => Self::Always,
            Zip64Arg::AsNecessary => Self::AsNecessary,
            Zip64Arg::Never => Self::Never,
        }
    }
}
