use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use substack_archiver::config::{default_user_agent, DEFAULT_OUTPUT_ROOT, DEFAULT_TIMEOUT_SECS};
use substack_archiver::logging::init_logging;
use substack_archiver::{run_batch, ArchiverConfig, DiskStore, HttpFetcher};

/// Download all posts from a Substack archive as HTML files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The URL of the Substack archive (e.g. https://yourname.substack.com/archive)
    url: String,

    /// Directory where HTML files are saved, one subdirectory per publication
    #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
    output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Pause between posts in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Write a JSON manifest of the run to this file
    #[arg(long)]
    manifest: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> ArchiverConfig {
        ArchiverConfig {
            output_root: self.output.clone(),
            timeout: Duration::from_secs(self.timeout),
            user_agent: default_user_agent(),
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.config();
    let fetcher = HttpFetcher::new(config.timeout, &config.user_agent)
        .context("Failed to build HTTP client")?;

    let report = run_batch(&fetcher, &DiskStore, &cli.url, &config);

    // Nothing was discovered, so there is nothing worth recording
    if report.output_dir.is_none() {
        return Ok(());
    }

    if let Some(manifest_path) = &cli.manifest {
        let json = report.to_json().context("Failed to serialize run manifest")?;
        fs::write(manifest_path, json).with_context(|| {
            format!("Failed to write run manifest: {}", manifest_path.display())
        })?;
        log::info!("Run manifest saved to {}", manifest_path.display());
    }

    Ok(())
}
