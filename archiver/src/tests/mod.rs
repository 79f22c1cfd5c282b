use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{ArchiveError, Result};
use crate::fetch::PageFetcher;

pub mod fixtures;


/// Fetcher that serves canned pages and remembers what it was asked for.
/// URLs it doesn't know about answer with a 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: RefCell<HashMap<String, String>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.set_page(url, body);
        self
    }

    pub fn set_page(&self, url: &str, body: &str) {
        self.pages
            .borrow_mut()
            .insert(url.to_string(), body.to_string());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl PageFetcher for ScriptedFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| ArchiveError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Minimal post page whose body mentions `marker`.
pub fn post_html(marker: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{marker}</title></head><body><p>{marker}</p></body></html>"
    )
}
