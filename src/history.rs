use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of one stopped session, as written to the results log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResult {
    pub date: DateTime<Local>,
    pub headlines: usize,
    pub words: usize,
    pub elapsed_secs: u64,
    pub wpm: Option<u64>,
}

/// Append-only CSV log of finished sessions.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, result: &SessionResult) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        // A new or empty log still needs its header
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(result).map_err(io::Error::other)?;
        writer.flush()
    }
}
