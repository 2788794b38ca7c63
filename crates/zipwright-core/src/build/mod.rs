//! Archive building: enumeration, conflict policy, and container writing.

pub mod destination;
pub mod enumerate;
pub mod output;
pub mod request;
pub mod writer;

pub use destination::DestinationTarget;
pub use destination::resolve_destination;
pub use enumerate::ArchiveEntry;
pub use enumerate::EntrySource;
pub use output::BuildOutput;
pub use output::MemoryOutput;
pub use request::BuildOptions;
pub use request::BuildRequest;
pub use request::Destination;
pub use request::DestinationExistsAction;
pub use request::MemoryBuildRequest;
pub use request::MemoryFile;
pub use request::SourceKind;
pub use request::Zip64Mode;
pub use writer::build_archive;
pub use writer::build_archive_in_memory;
