//! # Path Resolution Module
//!
//! Centralizza la logica di calcolo dei path di output e dell'archivio.

use crate::config::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Output path for a candidate: same base name, inside `destination`
    pub fn get_output_path(input_path: &Path, destination: &Path) -> Result<PathBuf> {
        let file_name = input_path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", input_path.display()))?;

        let result = destination.join(file_name);
        debug!("Resolved output path: {} -> {}", input_path.display(), result.display());
        Ok(result)
    }

    /// Archive path, always inside the configured destination directory
    pub fn get_archive_path(destination: &Path, config: &Config) -> PathBuf {
        destination.join(&config.archive_name)
    }
}
