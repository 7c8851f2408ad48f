use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FeedError;

/// User-Agent string for feed requests.
pub const USER_AGENT: &str = concat!("typehead/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can hand back the raw text of a feed document.
pub trait FeedSource: Send + 'static {
    fn fetch(&self) -> Result<String, FeedError>;

    /// Human readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Single unauthenticated GET against a remote feed.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn http_client() -> Result<reqwest::blocking::Client, FeedError> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self) -> Result<String, FeedError> {
        let res = http_client()?.get(&self.url).send()?;
        if !res.status().is_success() {
            return Err(FeedError::Status(res.status().as_u16()));
        }
        Ok(res.text()?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Feed document stored on disk, for offline use.
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FeedSource for FileFeedSource {
    fn fetch(&self) -> Result<String, FeedError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
