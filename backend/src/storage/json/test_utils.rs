//! Test utilities for storage tests.
//!
//! RAII-based cleanup: the temporary data directory is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;

/// Test environment providing a connection rooted in a temporary directory
/// that is cleaned up automatically.
pub struct TestEnvironment {
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // keep alive until drop
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}
