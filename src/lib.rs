// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod feed;
pub mod history;
pub mod keys;
pub mod runtime;
pub mod score;
pub mod session;
pub mod share;
pub mod timer;
pub mod ui;

pub use app::{Action, App, AppSettings, FeedState};
pub use error::{FeedError, ShareError};
