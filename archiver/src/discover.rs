use std::collections::BTreeSet;

use log::{error, info};
use scraper::{Html, Selector};

use crate::fetch::PageFetcher;

/// Path fragment that marks a link as pointing at a post.
pub const ITEM_MARKER: &str = "/p/";

/// Only links on this scheme are archived.
pub const SECURE_PREFIX: &str = "https://";

/// Does this href point at a post we should archive?
///
/// This is a plain substring test, so comment threads such as
/// `/p/slug/comments` also qualify.
pub fn is_item_link(href: &str) -> bool {
    href.starts_with(SECURE_PREFIX) && href.contains(ITEM_MARKER)
}

/// Pull every post link out of an archive page.
///
/// Duplicates collapse to one entry and the result is sorted, so the same
/// page always yields the same sequence.
pub fn extract_item_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let links: BTreeSet<String> = document
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| is_item_link(href))
        .map(|href| href.to_string())
        .collect();

    links.into_iter().collect()
}

/// Fetch the archive page and return the post URLs it links to.
///
/// A page that cannot be fetched is logged and treated as having no posts.
pub fn discover(fetcher: &dyn PageFetcher, archive_url: &str) -> Vec<String> {
    info!("Fetching post URLs from: {}", archive_url);

    let html = match fetcher.fetch(archive_url) {
        Ok(html) => html,
        Err(e) => {
            error!("Failed to fetch archive page: {}", e);
            return Vec::new();
        }
    };

    let links = extract_item_links(&html);
    info!("Found {} post links.", links.len());
    links
}
