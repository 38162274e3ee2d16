//! # Resize Task Module
//!
//! Stage per singolo file: load → resize → save → archive.
//!
//! `ResizeTask::process_candidate` non tocca console né progress bar: ritorna
//! un `ResizedFile` oppure un `ResizeError::FileProcessing` che nomina il file.
//! Il chiamante decide cosa fare (il batch si interrompe al primo errore).

use crate::{
    archive::ArchiveWriter,
    config::Config,
    error::ResizeError,
    file_manager::FileManager,
    pipeline::path_resolver::PathResolver,
    resize::ImageResizer,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of one successfully processed candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ResizedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_size: (u32, u32),
    pub resized_size: (u32, u32),
    pub bytes_written: u64,
}

impl ResizedFile {
    /// Whether the image was downscaled rather than written at its original size
    pub fn was_resized(&self) -> bool {
        self.original_size != self.resized_size
    }
}

/// Worker per singoli file
pub struct ResizeTask {
    resizer: ImageResizer,
    destination: PathBuf,
}

impl ResizeTask {
    pub fn new(config: &Config, destination: PathBuf) -> Self {
        Self {
            resizer: ImageResizer::new(config.max_width, config.max_height, config.filter),
            destination,
        }
    }

    /// Process a single candidate, appending it to `archive` when one is open
    pub fn process_candidate(
        &self,
        input_path: &Path,
        archive: Option<&mut ArchiveWriter>,
    ) -> Result<ResizedFile, ResizeError> {
        self.run_stages(input_path, archive)
            .map_err(|e| ResizeError::FileProcessing {
                file: FileManager::base_name(input_path),
                message: format!("{:#}", e),
            })
    }

    fn run_stages(&self, input_path: &Path, archive: Option<&mut ArchiveWriter>) -> Result<ResizedFile> {
        let output = PathResolver::get_output_path(input_path, &self.destination)?;

        let loaded = self.resizer.load(input_path)?;
        let original_size = loaded.dimensions();
        let format = loaded.format;

        let resized = self.resizer.resize_to_fit(loaded.image);
        let resized_size = (resized.width(), resized.height());
        let bytes = self.resizer.save(&resized, format, &output)?;

        if let Some(archive) = archive {
            let name = FileManager::base_name(&output);
            if let Err(e) = archive.add_entry(&name, &bytes) {
                // an output missing from the archive is not a processed file
                if let Err(remove_err) = std::fs::remove_file(&output) {
                    debug!("Cannot remove {}: {}", output.display(), remove_err);
                }
                return Err(e);
            }
        }

        let bytes_written = bytes.len() as u64;

        debug!(
            "{} {}x{} -> {}x{} ({})",
            input_path.display(),
            original_size.0,
            original_size.1,
            resized_size.0,
            resized_size.1,
            FileManager::format_size(bytes_written)
        );

        Ok(ResizedFile {
            source: input_path.to_path_buf(),
            output,
            original_size,
            resized_size,
            bytes_written,
        })
    }
}
