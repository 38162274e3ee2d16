//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di un run.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking statistiche del run (file ridimensionati, file già entro i limiti, byte scritti)
//! - Riepilogo finale con statistiche aggregate
//!
//! ## Componenti principali:
//! - `ProgressManager`: Gestisce la progress bar principale (nascosta in modalità JSON)
//! - `RunStats`: Traccia statistiche cumulative
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:04] [=======================>----------------] 12/20 (60%) photo.jpg 600x800
//! ```
//!
//! ## Esempio:
//! ```ignore
//! let progress = ProgressManager::new(total_files);
//! let mut stats = RunStats::new();
//!
//! // Per ogni file processato:
//! stats.add_resized(bytes_written);
//! progress.update("photo.jpg 600x800");
//!
//! // Alla fine:
//! progress.finish(&stats.format_summary());
//! ```

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Manages progress reporting for a batch resize
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Progress manager that tracks position without drawing anything
    pub fn hidden(total_files: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_files);
        Self { bar }
    }

    /// Advance by one file and show a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Stop drawing, leaving the bar where it stopped
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}

/// Statistics tracker for a batch resize run
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub files_processed: usize,
    /// Files that were downscaled
    pub files_resized: usize,
    /// Files already within bounds, written at their original size
    pub files_kept: usize,
    pub bytes_written: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resized(&mut self, bytes_written: u64) {
        self.files_processed += 1;
        self.files_resized += 1;
        self.bytes_written += bytes_written;
    }

    pub fn add_kept(&mut self, bytes_written: u64) {
        self.files_processed += 1;
        self.files_kept += 1;
        self.bytes_written += bytes_written;
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Resized: {} | Kept size: {} | Written: {}",
            self.files_processed,
            self.files_resized,
            self.files_kept,
            FileManager::format_size(self.bytes_written),
        )
    }
}
