use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// JsonConnection manages the data directory the storage files live in.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at the given directory, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn subscriptions_path(&self) -> PathBuf {
        self.base_directory.join("subscriptions.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_directory.join("config.yaml")
    }

    /// Write a file atomically: write to a sibling temp file, flush, then
    /// rename over the target so readers never observe a half-written blob.
    pub fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let tmp_path = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp_path).with_context(|| {
                format!("Failed to create temp file {}", tmp_path.display())
            })?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
