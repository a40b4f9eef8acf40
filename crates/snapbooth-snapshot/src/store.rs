//! Snapshot persistence
//!
//! Saved snapshots go to a private snapshot directory (the path returned to
//! the GUI shell) and, best effort, to a public gallery directory.

use snapbooth_core::{Config, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Writes encoded snapshots to disk
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshot_dir: PathBuf,
    gallery_dir: Option<PathBuf>,
}

impl SnapshotStore {
    /// Create a store with explicit directories
    pub fn new(snapshot_dir: impl Into<PathBuf>, gallery_dir: Option<PathBuf>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.into(),
            gallery_dir,
        }
    }

    /// Create a store from configuration, falling back to the platform cache
    /// and pictures directories
    pub fn from_config(config: &Config) -> Result<Self> {
        let snapshot_dir = match &config.snapshot_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or_else(|| Error::Config("no cache directory available".to_string()))?
                .join("snapbooth")
                .join("snapshots"),
        };

        let gallery_dir = config
            .gallery_dir
            .clone()
            .or_else(|| dirs::picture_dir().map(|d| d.join("PhotoBooth")));

        Ok(Self {
            snapshot_dir,
            gallery_dir,
        })
    }

    /// The private snapshot directory
    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Save an encoded JPEG and return its path.
    ///
    /// The gallery copy is best effort: a failure there is logged and does
    /// not fail the save.
    pub fn save(&self, jpeg: &[u8]) -> Result<PathBuf> {
        let timestamp = chrono::Utc::now().timestamp_millis();

        fs::create_dir_all(&self.snapshot_dir)?;
        let snapshot_path = self.snapshot_dir.join(format!("snapshot_{}.jpg", timestamp));
        fs::write(&snapshot_path, jpeg)?;
        info!("Snapshot saved: {}", snapshot_path.display());

        if let Some(gallery_dir) = &self.gallery_dir {
            let gallery_path = gallery_dir.join(format!("PhotoBooth_{}.jpg", timestamp));
            match fs::create_dir_all(gallery_dir).and_then(|_| fs::copy(&snapshot_path, &gallery_path))
            {
                Ok(_) => debug!("Gallery copy saved: {}", gallery_path.display()),
                Err(e) => warn!("Failed to save gallery copy: {}", e),
            }
        }

        Ok(snapshot_path)
    }
}
