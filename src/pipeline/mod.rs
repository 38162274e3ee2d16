//! # Pipeline Module
//!
//! Modulo che separa le responsabilità del run in sottomoduli:
//! - `batch_resizer`: Orchestratore principale
//! - `task`: Stage per singolo file (load → resize → save → archive)
//! - `progress_tracker`: Gestione progress e statistiche unificata
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod batch_resizer;
pub mod path_resolver;
pub mod progress_tracker;
pub mod task;

pub use batch_resizer::{BatchResizer, RunSummary};
pub use path_resolver::PathResolver;
pub use progress_tracker::ProgressTracker;
pub use task::{ResizeTask, ResizedFile};
