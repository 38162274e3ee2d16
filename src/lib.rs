//! # Batch Resize Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per ogni fase del run
//! - `file_manager`: Discovery non ricorsiva e classificazione dei file
//! - `resize`: Calcolo best-fit e load/resize/save delle immagini
//! - `archive`: Archivio zip degli output
//! - `pipeline`: Orchestratore del run e stage per singolo file
//! - `progress`: Progress bar e statistiche
//! - `json_output`: Eventi JSON per uso da script
//!
//! ## Utilizzo:
//! ```ignore
//! use batch_resize::{BatchResizer, Config};
//!
//! let resizer = BatchResizer::new(&path, Config::default())?;
//! let summary = resizer.run()?;
//! println!("{} files in {:.2}s", summary.files_count, summary.elapsed_seconds());
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod pipeline;
pub mod progress;
pub mod resize;

#[cfg(test)]
mod test_helpers;

pub use config::Config;
pub use error::ResizeError;
pub use pipeline::{BatchResizer, RunSummary};
pub use resize::{calculate_fit_dimensions, ResizeAlgorithm};
