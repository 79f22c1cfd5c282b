use std::path::{Path, PathBuf};

use log::{error, info};
use scraper::{Html, Node, Selector};
use serde::Serialize;
use url::Url;

use crate::error::{ArchiveError, Result};
use crate::fetch::PageFetcher;
use crate::store::ArchiveStore;

pub const DOCUMENT_EXTENSION: &str = "html";

/// What happened to one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ItemOutcome {
    Archived { url: String, path: PathBuf },
    Failed { url: String, reason: String },
}

impl ItemOutcome {
    pub fn url(&self) -> &str {
        match self {
            ItemOutcome::Archived { url, .. } | ItemOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, ItemOutcome::Archived { .. })
    }
}

/// Path of `url` exactly as written: no percent-encoding, no query or
/// fragment.
fn raw_path(url: &str) -> &str {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path_start = after_scheme
        .find(|c: char| c == '/' || c == '?' || c == '#')
        .unwrap_or(after_scheme.len());
    let path_and_rest = &after_scheme[path_start..];
    let path_end = path_and_rest
        .find(|c: char| c == '?' || c == '#')
        .unwrap_or(path_and_rest.len());
    &path_and_rest[..path_end]
}

/// Name of the file a post is saved under: the last non-empty path segment
/// plus `.html`. `https://x.substack.com/p/my-post` becomes `my-post.html`.
/// The segment is taken verbatim, so `/p/café` stays `café.html`.
pub fn file_name_for(item_url: &str) -> Result<String> {
    let invalid = |reason: String| ArchiveError::InvalidUrl {
        url: item_url.to_string(),
        reason,
    };

    Url::parse(item_url).map_err(|e| invalid(e.to_string()))?;
    let segment = raw_path(item_url)
        .trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    if segment.is_empty() {
        return Err(invalid("no path segment to name the file after".to_string()));
    }

    Ok(format!("{}.{}", segment, DOCUMENT_EXTENSION))
}

pub fn output_path_for(item_url: &str, output_dir: &Path) -> Result<PathBuf> {
    Ok(output_dir.join(file_name_for(item_url)?))
}

/// Build a detached `<base href="...">` element node.
fn base_element(href: &str) -> Option<Node> {
    let markup = format!(
        r#"<base href="{}">"#,
        html_escape::encode_double_quoted_attribute(href)
    );
    let fragment = Html::parse_fragment(&markup);
    let base_selector = Selector::parse("base").unwrap();

    let base = fragment.select(&base_selector).next()?;
    Some(Node::Element(base.value().clone()))
}

/// Make a saved page resolve its relative links against `original_url`.
///
/// A `<base>` element is inserted as the very first child of `<head>`. The
/// parser synthesizes a `<head>` for documents that lack one, so a bare
/// fragment comes back as a full document with the base in place.
pub fn inject_base_href(html: &str, original_url: &str) -> String {
    let mut document = Html::parse_document(html);
    let head_selector = Selector::parse("head").unwrap();

    let head_id = document.select(&head_selector).next().map(|head| head.id());

    if let (Some(head_id), Some(base)) = (head_id, base_element(original_url)) {
        if let Some(mut head) = document.tree.get_mut(head_id) {
            head.prepend(base);
        }
    }

    document.html()
}

fn try_archive_item(
    fetcher: &dyn PageFetcher,
    store: &dyn ArchiveStore,
    item_url: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let file_path = output_path_for(item_url, output_dir)?;

    info!("Downloading {} -> {}", item_url, file_path.display());
    let html = fetcher.fetch(item_url)?;

    let rewritten = inject_base_href(&html, item_url);

    // Nothing touches the disk until the page has been fetched and rewritten
    store.write(&file_path, &rewritten)?;

    Ok(file_path)
}

/// Fetch one post, rewrite it for offline viewing and save it under
/// `output_dir`, replacing any earlier copy.
///
/// Never fails: errors are logged and come back as [`ItemOutcome::Failed`].
pub fn archive_item(
    fetcher: &dyn PageFetcher,
    store: &dyn ArchiveStore,
    item_url: &str,
    output_dir: &Path,
) -> ItemOutcome {
    match try_archive_item(fetcher, store, item_url, output_dir) {
        Ok(path) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("Successfully saved {}", file_name);
            ItemOutcome::Archived {
                url: item_url.to_string(),
                path,
            }
        }
        Err(e) => {
            error!("Failed to download {}. Reason: {}", item_url, e);
            ItemOutcome::Failed {
                url: item_url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}
