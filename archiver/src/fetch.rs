use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{ArchiveError, Result};

/// Anything that can turn a URL into a page body.
///
/// The archiver only ever needs `GET url -> body`; everything else about
/// HTTP (TLS, redirects, the timeout) belongs to the implementation.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking `reqwest` fetcher. At most one request is in flight at a time.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let request_error = |source| ArchiveError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(request_error)
    }
}
