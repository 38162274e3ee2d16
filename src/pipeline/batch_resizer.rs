//! # Batch Resizer Main Orchestrator
//!
//! Orchestratore principale che esegue un run completo:
//! discovery → preparazione destinazione → loop sequenziale → finalizzazione.
//!
//! Il loop è strettamente sequenziale e fail-fast: il primo errore interrompe
//! il run, i file già scritti restano su disco e l'archivio (se aperto) viene
//! comunque chiuso.

use crate::{
    archive::ArchiveWriter,
    config::Config,
    error::ResizeError,
    file_manager::FileManager,
    json_output::{JsonConfig, JsonMessage},
    pipeline::{path_resolver::PathResolver, progress_tracker::ProgressTracker, task::ResizeTask},
    progress::RunStats,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub files_count: usize,
    pub elapsed: Duration,
    pub destination: PathBuf,
    pub archive: Option<PathBuf>,
    pub stats: RunStats,
}

impl RunSummary {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Orchestratore principale
pub struct BatchResizer {
    config: Config,
    source_dir: PathBuf,
    show_progress: bool,
}

impl BatchResizer {
    /// Crea un nuovo batch resizer per `source_dir`
    pub fn new(source_dir: &Path, config: Config) -> Result<Self, ResizeError> {
        config.validate()?;

        Ok(Self {
            config,
            source_dir: source_dir.to_path_buf(),
            show_progress: true,
        })
    }

    /// Disable the progress bar (library use and tests)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Esegue il run
    pub fn run(&self) -> Result<RunSummary, ResizeError> {
        let start_time = Instant::now();

        FileManager::validate_source_dir(&self.source_dir)?;

        info!("Fetching data...");
        let files = FileManager::find_candidate_files(&self.source_dir, &self.config)?;
        info!("Found: {}", files.len());

        let destination = self.config.destination_path(&self.source_dir);
        self.emit_start_message(&destination, files.len());

        if files.is_empty() {
            return Ok(self.handle_empty_directory(destination, start_time));
        }

        self.check_archive_collision(&files)?;

        if FileManager::ensure_destination(&destination)? {
            debug!("Created destination directory: {}", destination.display());
        }

        let mut archive = if self.config.archive {
            let archive_path = PathResolver::get_archive_path(&destination, &self.config);
            let archive = ArchiveWriter::create(&archive_path)?;
            info!("Archive: {}", archive.path().display());
            Some(archive)
        } else {
            None
        };

        info!("Processing...");
        let mut tracker = if self.show_progress {
            ProgressTracker::new(files.len(), self.config.json_output)
        } else {
            ProgressTracker::hidden(files.len())
        };

        let task = ResizeTask::new(&self.config, destination.clone());

        for (index, file_path) in files.iter().enumerate() {
            match task.process_candidate(file_path, archive.as_mut()) {
                Ok(resized) => tracker.handle_file_completion(index, &resized),
                Err(e) => {
                    tracker.abandon(&e.to_string());
                    debug!("Aborting after {} of {} files", index, files.len());
                    // archive is finalized on drop with the entries written so far
                    return Err(e);
                }
            }
        }

        let archive = archive.map(ArchiveWriter::finish).transpose()?;

        let summary = RunSummary {
            files_count: files.len(),
            elapsed: start_time.elapsed(),
            destination,
            archive,
            stats: tracker.stats().clone(),
        };

        tracker.finish(&summary.stats.format_summary());
        self.print_final_stats(&summary);

        Ok(summary)
    }

    /// Un candidato con il nome dell'archivio finirebbe sullo stesso path dello zip
    fn check_archive_collision(&self, files: &[PathBuf]) -> Result<(), ResizeError> {
        if !self.config.archive {
            return Ok(());
        }

        let archive_name = std::ffi::OsStr::new(&self.config.archive_name);
        if files.iter().any(|file| file.file_name() == Some(archive_name)) {
            return Err(ResizeError::ArchiveCollision(self.config.archive_name.clone()));
        }
        Ok(())
    }

    /// Invia messaggio di inizio
    fn emit_start_message(&self, destination: &Path, total_files: usize) {
        if self.config.json_output {
            JsonMessage::start(
                self.source_dir.clone(),
                destination.to_path_buf(),
                total_files,
                JsonConfig::from(&self.config),
            )
            .emit();
        } else {
            debug!(
                "Resizing into {} (max {}x{}, filter {:?})",
                destination.display(),
                self.config.max_width,
                self.config.max_height,
                self.config.filter
            );
        }
    }

    /// Gestisce directory senza candidati: nessuna directory creata
    fn handle_empty_directory(&self, destination: PathBuf, start_time: Instant) -> RunSummary {
        let summary = RunSummary {
            files_count: 0,
            elapsed: start_time.elapsed(),
            destination,
            archive: None,
            stats: RunStats::new(),
        };

        if self.config.json_output {
            JsonMessage::complete(0, summary.elapsed_seconds(), None, summary.stats.clone()).emit();
        } else {
            info!("No images found to resize");
        }

        summary
    }

    /// Stampa statistiche finali
    fn print_final_stats(&self, summary: &RunSummary) {
        if self.config.json_output {
            JsonMessage::complete(
                summary.files_count,
                summary.elapsed_seconds(),
                summary.archive.clone(),
                summary.stats.clone(),
            )
            .emit();
        } else {
            info!("{}", summary.stats.format_summary());
            if let Some(ref archive) = summary.archive {
                info!("Archive written: {}", archive.display());
            }
            info!(
                "Done! Resized {} files in {:.2}s",
                summary.files_count,
                summary.elapsed_seconds()
            );
        }
    }
}
