//! Output storage for crawl results
//!
//! Writes the JSON snapshot, CSV table and HTML table of contents of a
//! channel into an output directory, and reads snapshots back.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::export::{from_snapshot, render_html, to_csv, to_snapshot};
use crate::record::ChannelRecord;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory the output files are written to
    pub base_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
        }
    }
}

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(#[from] crate::error::Error),

    #[error("Invalid channel id for storage: {0}")]
    InvalidChannel(String),
}

impl From<StorageError> for crate::error::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => crate::error::Error::Io(e),
            StorageError::Export(e) => e,
            other => crate::error::Error::Storage(other.to_string()),
        }
    }
}

type Result<T> = std::result::Result<T, StorageError>;

/// Paths of the files written for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub snapshot: PathBuf,
    pub csv: PathBuf,
    pub html: PathBuf,
}

/// Storage manager for crawl output
#[derive(Debug, Clone)]
pub struct Storage {
    config: StorageConfig,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage {
    /// Create a new storage writing to the current directory
    pub fn new() -> Self {
        Self {
            config: StorageConfig::default(),
        }
    }

    /// Create a new storage with custom configuration
    pub fn with_config(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Turn a channel id into a file stem
    fn file_stem(&self, channel_id: &str) -> Result<String> {
        let stem: String = channel_id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let stem = stem.trim_matches('.');
        if stem.is_empty() {
            return Err(StorageError::InvalidChannel(channel_id.to_string()));
        }
        Ok(stem.to_string())
    }

    /// Paths the output for `channel_id` is written to
    pub fn output_files(&self, channel_id: &str) -> Result<OutputFiles> {
        let stem = self.file_stem(channel_id)?;
        let base = &self.config.base_path;
        Ok(OutputFiles {
            snapshot: base.join(format!("{}.json", stem)),
            csv: base.join(format!("{}.csv", stem)),
            html: base.join(format!("{}.html", stem)),
        })
    }

    async fn ensure_directory(&self) -> io::Result<()> {
        fs::create_dir_all(&self.config.base_path).await
    }

    /// Write only the CSV table and HTML table of contents
    pub async fn store_reports(&self, channel: &ChannelRecord) -> Result<OutputFiles> {
        let files = self.output_files(&channel.id)?;
        self.ensure_directory().await?;

        fs::write(&files.csv, to_csv(channel)?).await?;
        fs::write(&files.html, render_html(channel)).await?;
        info!(
            "Wrote {} and {}",
            files.csv.display(),
            files.html.display()
        );
        Ok(files)
    }

    /// Write the snapshot, CSV table and HTML table of contents
    pub async fn store(&self, channel: &ChannelRecord) -> Result<OutputFiles> {
        let files = self.store_reports(channel).await?;
        fs::write(&files.snapshot, to_snapshot(channel)?).await?;
        info!("Wrote {}", files.snapshot.display());
        Ok(files)
    }

    /// Load a snapshot previously written by [`Storage::store`]
    pub async fn load(&self, channel_id: &str) -> Result<ChannelRecord> {
        let files = self.output_files(channel_id)?;
        load_snapshot(&files.snapshot).await
    }
}

/// Load a snapshot from an arbitrary path
pub async fn load_snapshot(path: &Path) -> Result<ChannelRecord> {
    let json = fs::read_to_string(path).await?;
    Ok(from_snapshot(&json)?)
}
