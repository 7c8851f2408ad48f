//! Headline feed: fetch a document, parse it, pull out the titles.

pub mod document;
pub mod source;
pub mod titles;
pub mod tree;

pub use document::{parse_document, Node};
pub use source::{FeedSource, FileFeedSource, HttpFeedSource};
pub use titles::collect_titles;
pub use tree::{walk, MarkupNode, Visitor, Walk};

use crate::error::FeedError;

pub const DEFAULT_FEED_URL: &str = "https://rss.msn.com/";

/// Title of the feed channel itself, which is not a headline.
pub const DEFAULT_EXCLUDED_TITLE: &str =
    "MSN | Outlook, Office, Skype, Bing, Breaking News, and Latest Videos";

/// Fetch the feed behind `source` and return its headlines in document order.
pub fn load_headlines<S: FeedSource + ?Sized>(
    source: &S,
    excluded_title: &str,
) -> Result<Vec<String>, FeedError> {
    let text = source.fetch()?;
    let document = parse_document(&text)?;
    let titles = collect_titles(&document, excluded_title);
    tracing::debug!(
        origin = %source.describe(),
        bytes = text.len(),
        headlines = titles.len(),
        "feed parsed"
    );
    if titles.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok(titles)
}
