//! # Progress Tracking Module
//!
//! Unifica progress bar e statistiche del run in un singolo tracker.
//! Gestisce sia output JSON che progress bar tradizionale.

use crate::{
    json_output::JsonMessage,
    pipeline::task::ResizedFile,
    progress::{ProgressManager, RunStats},
};

/// Tracker progress unificato
pub struct ProgressTracker {
    total_files: usize,
    json_output: bool,
    stats: RunStats,
    progress_manager: ProgressManager,
}

impl ProgressTracker {
    /// Crea un nuovo tracker
    pub fn new(total_files: usize, json_output: bool) -> Self {
        let progress_manager = if json_output {
            ProgressManager::hidden(total_files as u64)
        } else {
            ProgressManager::new(total_files as u64)
        };

        Self {
            total_files,
            json_output,
            stats: RunStats::new(),
            progress_manager,
        }
    }

    /// Tracker che non disegna nulla (test e uso come libreria)
    pub fn hidden(total_files: usize) -> Self {
        Self {
            total_files,
            json_output: false,
            stats: RunStats::new(),
            progress_manager: ProgressManager::hidden(total_files as u64),
        }
    }

    /// Registra un file completato e avanza la progress bar di uno
    pub fn handle_file_completion(&mut self, index: usize, file: &ResizedFile) {
        if file.was_resized() {
            self.stats.add_resized(file.bytes_written);
        } else {
            self.stats.add_kept(file.bytes_written);
        }

        if self.json_output {
            JsonMessage::file_complete(index, self.total_files, file).emit();
        }

        let message = format!(
            "{} {}x{}",
            file.output.file_name().unwrap_or_default().to_string_lossy(),
            file.resized_size.0,
            file.resized_size.1
        );
        self.progress_manager.update(&message);
    }

    pub fn processed(&self) -> u64 {
        self.progress_manager.position()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Finalizza progress bar
    pub fn finish(&self, summary: &str) {
        self.progress_manager.finish(summary);
    }

    /// Interrompe la progress bar dopo un errore
    pub fn abandon(&self, message: &str) {
        self.progress_manager.abandon(message);
    }
}
