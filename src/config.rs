//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione di un run di resize.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri del ridimensionamento
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `max_width`: Larghezza massima dell'output (default: 600)
//! - `max_height`: Altezza massima dell'output (default: 800)
//! - `destination_dir`: Sottodirectory di output dentro la sorgente (default: "resized")
//! - `archive`: Crea un archivio zip con tutti gli output (default: false)
//! - `archive_name`: Nome del file zip (default: "archive.zip")
//! - `allowed_types`: MIME type accettati (default: image/jpeg, image/png)
//! - `filter`: Kernel di interpolazione (default: Lanczos3)
//! - `json_output`: Eventi JSON su stdout invece della progress bar (default: false)
//!
//! ## Validazione:
//! - Controlla che max_width e max_height siano > 0
//! - Controlla che destination_dir sia un singolo componente di path
//! - Controlla che archive_name sia un nome di file semplice
//! - Controlla che allowed_types non sia vuoto
//!
//! ## Esempio:
//! ```ignore
//! let config = Config {
//!     max_width: 1024,
//!     archive: true,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::error::ResizeError;
use crate::resize::ResizeAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_MAX_WIDTH: u32 = 600;
pub const DEFAULT_MAX_HEIGHT: u32 = 800;
pub const DEFAULT_DESTINATION_DIR: &str = "resized";
pub const DEFAULT_ARCHIVE_NAME: &str = "archive.zip";

/// Configuration for a batch resize run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum output width in pixels
    pub max_width: u32,
    /// Maximum output height in pixels
    pub max_height: u32,
    /// Name of the output subdirectory, resolved against the source directory
    pub destination_dir: String,
    /// Bundle every resized file into a zip archive
    pub archive: bool,
    /// File name of the archive, created inside the destination directory
    pub archive_name: String,
    /// Content types eligible for resizing
    pub allowed_types: Vec<String>,
    /// Interpolation kernel used when downscaling
    pub filter: ResizeAlgorithm,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            destination_dir: DEFAULT_DESTINATION_DIR.to_string(),
            archive: false,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            allowed_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
            filter: ResizeAlgorithm::default(),
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ResizeError> {
        if self.max_width == 0 {
            return Err(ResizeError::Validation("Max width must be greater than 0".to_string()));
        }

        if self.max_height == 0 {
            return Err(ResizeError::Validation("Max height must be greater than 0".to_string()));
        }

        if !is_single_component(&self.destination_dir) {
            return Err(ResizeError::Validation(format!(
                "Destination directory must be a plain directory name: {:?}",
                self.destination_dir
            )));
        }

        if self.archive && !is_single_component(&self.archive_name) {
            return Err(ResizeError::Validation(format!(
                "Archive name must be a plain file name: {:?}",
                self.archive_name
            )));
        }

        if self.allowed_types.is_empty() {
            return Err(ResizeError::Validation("At least one allowed content type is required".to_string()));
        }

        Ok(())
    }

    /// Whether a classified content type qualifies a file as a candidate
    pub fn is_allowed(&self, content_type: &str) -> bool {
        self.allowed_types.iter().any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }

    /// Resolve the destination directory against a source directory
    pub fn destination_path(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.destination_dir)
    }

    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, ResizeError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ResizeError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ResizeError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ResizeError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ResizeError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| ResizeError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.max_width = 0;
        assert!(config.validate().is_err());

        config.max_width = 600;
        config.max_height = 0;
        assert!(config.validate().is_err());

        config.max_height = 800;
        config.destination_dir = "../escape".to_string();
        assert!(config.validate().is_err());

        config.destination_dir = "".to_string();
        assert!(config.validate().is_err());

        config.destination_dir = "out".to_string();
        config.allowed_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_archive_name_only_checked_when_enabled() {
        let mut config = Config {
            archive_name: "nested/archive.zip".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.archive = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_width, 600);
        assert_eq!(config.max_height, 800);
        assert_eq!(config.destination_dir, "resized");
        assert_eq!(config.archive_name, "archive.zip");
        assert!(!config.archive);
        assert!(config.is_allowed("image/jpeg"));
        assert!(config.is_allowed("image/png"));
        assert!(!config.is_allowed("image/webp"));
    }

    #[test]
    fn test_destination_path() {
        let config = Config {
            destination_dir: "small".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.destination_path(Path::new("/photos")),
            PathBuf::from("/photos/small")
        );
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            max_width: 1024,
            max_height: 768,
            destination_dir: "web".to_string(),
            archive: true,
            archive_name: "bundle.zip".to_string(),
            filter: ResizeAlgorithm::Triangle,
            ..Default::default()
        };

        original_config.save_to_file(&config_path).unwrap();
        let loaded_config = Config::from_file(&config_path).unwrap();

        assert_eq!(loaded_config, original_config);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "max_width": 320 }"#).unwrap();

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded.max_width, 320);
        assert_eq!(loaded.max_height, DEFAULT_MAX_HEIGHT);
        assert_eq!(loaded.destination_dir, DEFAULT_DESTINATION_DIR);
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "max_height": 0 }"#).unwrap();

        assert!(matches!(
            Config::from_file(&config_path),
            Err(ResizeError::Validation(_))
        ));

        std::fs::write(&config_path, "not json").unwrap();
        assert!(matches!(
            Config::from_file(&config_path),
            Err(ResizeError::Config(_))
        ));
    }
}
