use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OUTPUT_ROOT: &str = "substack_posts";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn default_user_agent() -> String {
    format!("substack-archiver/{}", env!("CARGO_PKG_VERSION"))
}

/// Knobs for one archiving run. There is no config file; the binary fills
/// this in from its command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverConfig {
    /// Parent of the per-publication directory.
    pub output_root: PathBuf,
    /// Upper bound on each HTTP request.
    pub timeout: Duration,
    pub user_agent: String,
    /// Pause between consecutive posts. Zero means back to back.
    pub delay: Duration,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            delay: Duration::ZERO,
        }
    }
}
