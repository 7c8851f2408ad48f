use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to fetch feed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed server answered with status {0}")]
    Status(u16),

    #[error("failed to read feed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed feed document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed contained no headlines")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid share url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}
