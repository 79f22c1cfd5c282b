pub mod archive;
pub mod batch;
pub mod config;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::archive::{archive_item, file_name_for, inject_base_href, ItemOutcome};
pub use crate::batch::{namespace_for, run_batch, BatchReport, BatchResult};
pub use crate::config::ArchiverConfig;
pub use crate::discover::{discover, extract_item_links, is_item_link};
pub use crate::error::ArchiveError;
pub use crate::fetch::{HttpFetcher, PageFetcher};
pub use crate::store::{ArchiveStore, DiskStore, MemoryStore};
