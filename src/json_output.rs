//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON (`--json`) per l'uso da script.
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout per ogni evento del run
//! - Sostituisce la progress bar quando è attivo
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del run con directory, numero di candidati e configurazione
//! - `file_complete`: Fine elaborazione di un file
//! - `complete`: Fine del run con durata e statistiche
//! - `error`: Errore che ha interrotto il run

use crate::config::Config;
use crate::pipeline::task::ResizedFile;
use crate::progress::RunStats;
use serde::Serialize;
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    /// Inizio del run
    Start {
        input_dir: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    /// Fine elaborazione di un file specifico
    FileComplete {
        index: usize,
        total: usize,
        path: PathBuf,
        output: PathBuf,
        original_width: u32,
        original_height: u32,
        width: u32,
        height: u32,
        bytes_written: u64,
    },

    /// Run completato
    Complete {
        files_count: usize,
        duration_seconds: f64,
        archive: Option<PathBuf>,
        stats: RunStats,
    },

    /// Errore che ha interrotto il run
    Error {
        message: String,
        file: Option<String>,
    },
}

/// Configurazione per output JSON
#[derive(Debug, Serialize)]
pub struct JsonConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub destination_dir: String,
    pub archive: Option<String>,
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(input_dir: PathBuf, output_dir: PathBuf, total_files: usize, config: JsonConfig) -> Self {
        Self::Start {
            input_dir,
            output_dir,
            total_files,
            config,
        }
    }

    pub fn file_complete(index: usize, total: usize, file: &ResizedFile) -> Self {
        Self::FileComplete {
            index,
            total,
            path: file.source.clone(),
            output: file.output.clone(),
            original_width: file.original_size.0,
            original_height: file.original_size.1,
            width: file.resized_size.0,
            height: file.resized_size.1,
            bytes_written: file.bytes_written,
        }
    }

    pub fn complete(files_count: usize, duration_seconds: f64, archive: Option<PathBuf>, stats: RunStats) -> Self {
        Self::Complete {
            files_count,
            duration_seconds,
            archive,
            stats,
        }
    }

    pub fn error(message: String, file: Option<String>) -> Self {
        Self::Error { message, file }
    }
}

/// Converti Config in JsonConfig
impl From<&Config> for JsonConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_width: config.max_width,
            max_height: config.max_height,
            destination_dir: config.destination_dir.clone(),
            archive: config.archive.then(|| config.archive_name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_messages_are_tagged() {
        let message = JsonMessage::error("File processing error b.png: eof".to_string(), Some("b.png".to_string()));
        let value: Value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "error",
                "message": "File processing error b.png: eof",
                "file": "b.png",
            })
        );
    }

    #[test]
    fn test_file_complete_shape() {
        let file = ResizedFile {
            source: PathBuf::from("/photos/a.jpg"),
            output: PathBuf::from("/photos/resized/a.jpg"),
            original_size: (1200, 1600),
            resized_size: (600, 800),
            bytes_written: 4096,
        };
        let value = serde_json::to_value(JsonMessage::file_complete(1, 2, &file)).unwrap();
        assert_eq!(value["type"], "file_complete");
        assert_eq!(value["index"], 1);
        assert_eq!(value["width"], 600);
        assert_eq!(value["original_height"], 1600);
    }

    #[test]
    fn test_json_config_reports_archive_only_when_enabled() {
        let mut config = Config::default();
        assert_eq!(JsonConfig::from(&config).archive, None);

        config.archive = true;
        assert_eq!(JsonConfig::from(&config).archive.as_deref(), Some("archive.zip"));
    }
}
