use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while fetching or saving a single page.
///
/// None of these abort a batch: the archiver turns them into a failed
/// [`ItemOutcome`](crate::archive::ItemOutcome) and the orchestrator moves on.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid item URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("filesystem error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
