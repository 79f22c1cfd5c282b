use std::path::PathBuf;
use std::thread;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;
use url::Url;

use crate::archive::{archive_item, ItemOutcome};
use crate::config::ArchiverConfig;
use crate::discover::discover;
use crate::fetch::PageFetcher;
use crate::store::ArchiveStore;

/// Short name for a publication: the first label of the archive URL's host.
/// `https://astralcodexten.substack.com/archive` gives `astralcodexten`.
pub fn namespace_for(archive_url: &str) -> String {
    Url::parse(archive_url)
        .ok()
        .and_then(|url| {
            url.host_str()
                .and_then(|host| host.split('.').next())
                .map(str::to_string)
        })
        .unwrap_or_default()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub successes: usize,
    pub failures: usize,
}

impl BatchResult {
    pub fn record(&mut self, outcome: &ItemOutcome) {
        if outcome.is_archived() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.successes + self.failures
    }
}

/// Full account of one run, serializable as the optional JSON manifest.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub archive_url: String,
    pub namespace: String,
    /// `None` when nothing was discovered and no directory was created.
    pub output_dir: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: BatchResult,
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Archive every post linked from `archive_url`.
///
/// Posts are processed one at a time in sorted order. A failing post is
/// counted and skipped; the run itself always completes.
pub fn run_batch(
    fetcher: &dyn PageFetcher,
    store: &dyn ArchiveStore,
    archive_url: &str,
    config: &ArchiverConfig,
) -> BatchReport {
    let started_at = Utc::now();
    let namespace = namespace_for(archive_url);
    let mut report = BatchReport {
        archive_url: archive_url.to_string(),
        namespace: namespace.clone(),
        output_dir: None,
        started_at,
        finished_at: started_at,
        result: BatchResult::default(),
        items: Vec::new(),
    };

    let post_urls = discover(fetcher, archive_url);
    if post_urls.is_empty() {
        warn!("No post URLs found. Exiting.");
        report.finished_at = Utc::now();
        return report;
    }

    let output_dir = config.output_root.join(&namespace);
    // A missing directory is not fatal here: every write below will fail
    // and be counted on its own.
    if let Err(e) = store.create_dir_all(&output_dir) {
        error!("Failed to create output directory: {}", e);
    }
    info!("Saving HTML files to: {}", output_dir.display());

    let total = post_urls.len();
    for (i, url) in post_urls.iter().enumerate() {
        if i > 0 && !config.delay.is_zero() {
            thread::sleep(config.delay);
        }

        println!("{}", "-".repeat(20));
        info!("Processing post {} of {}", i + 1, total);

        let outcome = archive_item(fetcher, store, url, &output_dir);
        report.result.record(&outcome);
        report.items.push(outcome);
    }

    println!("{}", "=".repeat(20));
    info!("Download complete.");
    info!("Successful downloads: {}", report.result.successes);
    info!("Failed downloads: {}", report.result.failures);

    report.output_dir = Some(output_dir);
    report.finished_at = Utc::now();
    report
}
