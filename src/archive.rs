//! # Archive Module
//!
//! Raccoglie gli output ridimensionati in un unico archivio zip.
//!
//! ## Responsabilità:
//! - Crea il file zip dentro la directory di destinazione configurata
//! - Aggiunge una entry per ogni file elaborato, nell'ordine di discovery
//! - Chiude l'archivio esplicitamente sul percorso di successo (`finish`)
//! - Finalizza comunque l'archivio in `Drop` se il run fallisce a metà,
//!   così le entry già scritte restano leggibili
//!
//! ## Esempio:
//! ```ignore
//! let mut archive = ArchiveWriter::create(&dest.join("archive.zip"))?;
//! archive.add_entry("a.jpg", &bytes)?;
//! archive.finish()?;
//! ```

use crate::error::ResizeError;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip archive that is finalized on every exit path
pub struct ArchiveWriter {
    path: PathBuf,
    writer: Option<ZipWriter<File>>,
    entries: usize,
}

impl ArchiveWriter {
    /// Create (or truncate) the archive at `path`
    pub fn create(path: &Path) -> Result<Self, ResizeError> {
        let file = File::create(path).map_err(|source| ResizeError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Opened archive {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(ZipWriter::new(file)),
            entries: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries appended so far
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Append `bytes` under `name`
    pub fn add_entry(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .context("archive is already closed")?;

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer
            .start_file(name, options)
            .with_context(|| format!("cannot add {} to archive", name))?;
        writer
            .write_all(bytes)
            .with_context(|| format!("cannot write {} to archive", name))?;

        self.entries += 1;
        Ok(())
    }

    /// Write the central directory and close the archive
    pub fn finish(mut self) -> Result<PathBuf, ResizeError> {
        self.close()?;
        Ok(self.path.clone())
    }

    fn close(&mut self) -> Result<(), ResizeError> {
        if let Some(writer) = self.writer.take() {
            writer.finish().map_err(|source| ResizeError::ArchiveClose {
                path: self.path.clone(),
                source,
            })?;
            debug!("Closed archive {} ({} entries)", self.path.display(), self.entries);
        }
        Ok(())
    }
}

impl Drop for ArchiveWriter {
    fn drop(&mut self) {
        if self.writer.is_some() {
            if let Err(e) = self.close() {
                warn!("Archive left incomplete: {}", e);
            }
        }
    }
}
