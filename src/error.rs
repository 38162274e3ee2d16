//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ResizeError` enum per categorizzare tutti gli errori di un run
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//! - Conserva la causa originale (`source`) per gli errori di I/O e zip
//!
//! ## Categorie di errori:
//! - `InvalidDirectory`: La directory sorgente non esiste o non è una directory
//! - `DestinationCreate`: Impossibile creare la directory di destinazione
//! - `ArchiveOpen` / `ArchiveClose`: Errori di apertura/chiusura dell'archivio zip
//! - `ArchiveCollision`: Un candidato ha lo stesso nome dell'archivio
//! - `FileProcessing`: Errore durante load/resize/save/archive di un file specifico
//! - `Validation`: Parametri di configurazione non validi
//! - `Config`: File di configurazione illeggibile o malformato
//!
//! Tutti gli errori sono terminali per il run: nessun retry, nessun skip.
//!
//! ## Esempio:
//! ```ignore
//! if !source_dir.is_dir() {
//!     return Err(ResizeError::InvalidDirectory(source_dir.to_path_buf()));
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for a batch resize run
#[derive(thiserror::Error, Debug)]
pub enum ResizeError {
    #[error("Invalid path: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Cannot create destination directory {}: {}", .path.display(), .source)]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create archive {}: {}", .path.display(), .source)]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot finalize archive {}: {}", .path.display(), .source)]
    ArchiveClose {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive name {0} collides with a candidate file")]
    ArchiveCollision(String),

    #[error("File processing error {file}: {message}")]
    FileProcessing { file: String, message: String },

    #[error("Configuration error: {0}")]
    Validation(String),

    #[error("Config file error: {0}")]
    Config(String),
}

impl ResizeError {
    /// Base filename of the candidate that aborted the run, if any
    pub fn failing_file(&self) -> Option<&str> {
        match self {
            ResizeError::FileProcessing { file, .. } => Some(file),
            _ => None,
        }
    }
}
