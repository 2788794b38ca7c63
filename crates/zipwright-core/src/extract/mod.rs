//! Archive extraction: per-file conflict policy and exact path reporting.

pub mod extractor;
pub mod output;
pub mod request;

pub use extractor::extract_archive;
pub use output::ExtractOutput;
pub use request::ExtractRequest;
pub use request::FileExistsAction;
