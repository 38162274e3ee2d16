//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery dei candidati.
//!
//! ## Responsabilità:
//! - Validazione della directory sorgente
//! - Discovery NON ricorsiva dei file nella directory sorgente
//! - Classificazione del content type leggendo i magic bytes (non l'estensione)
//! - Creazione della directory di destinazione
//! - Formattazione human-readable delle dimensioni
//!
//! ## Discovery:
//! - Solo le entry direttamente dentro la sorgente (depth 1)
//! - Solo file regolari, le directory (inclusa quella di output) sono ignorate
//! - I symlink vengono seguiti: un link a un'immagine è un candidato
//! - Ordine per nome file, quindi deterministico tra un run e l'altro
//! - Un file è candidato solo se il suo MIME type è in `Config::allowed_types`
//!
//! ## Esempio:
//! ```ignore
//! FileManager::validate_source_dir(&dir)?;
//! let files = FileManager::find_candidate_files(&dir, &config)?;
//! ```

use crate::config::Config;
use crate::error::ResizeError;
use image::ImageReader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Fail with `InvalidDirectory` unless `path` is an existing directory
    pub fn validate_source_dir(path: &Path) -> Result<(), ResizeError> {
        if path.is_dir() {
            Ok(())
        } else {
            Err(ResizeError::InvalidDirectory(path.to_path_buf()))
        }
    }

    /// Classify a file by its content.
    ///
    /// Returns the MIME type of a recognised image format, `None` otherwise.
    pub fn classify_content_type(path: &Path) -> std::io::Result<Option<&'static str>> {
        // ImageReader::open would seed the format from the extension
        let file = BufReader::new(File::open(path)?);
        let reader = ImageReader::new(file).with_guessed_format()?;
        Ok(reader.format().map(|format| format.to_mime_type()))
    }

    /// Find all files directly inside `source_dir` whose content type is allowed.
    ///
    /// Fails with `InvalidDirectory` if `source_dir` itself cannot be listed.
    pub fn find_candidate_files(source_dir: &Path, config: &Config) -> Result<Vec<PathBuf>, ResizeError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(source_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    debug!("Cannot list {}: {}", source_dir.display(), e);
                    return Err(ResizeError::InvalidDirectory(source_dir.to_path_buf()));
                }
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            match Self::classify_content_type(path) {
                Ok(Some(content_type)) if config.is_allowed(content_type) => {
                    debug!("Candidate {} ({})", path.display(), content_type);
                    files.push(path.to_path_buf());
                }
                Ok(content_type) => {
                    debug!("Skipping {} ({})", path.display(), content_type.unwrap_or("unknown"));
                }
                Err(e) => {
                    debug!("Skipping unreadable {}: {}", path.display(), e);
                }
            }
        }

        Ok(files)
    }

    /// Create the destination directory if it does not exist yet.
    ///
    /// Returns `true` when the directory was created by this call.
    pub fn ensure_destination(path: &Path) -> Result<bool, ResizeError> {
        if path.is_dir() {
            return Ok(false);
        }

        std::fs::create_dir(path).map_err(|source| ResizeError::DestinationCreate {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(true)
    }

    /// Base file name of a candidate, used for outputs and archive entries
    pub fn base_name(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{write_image, write_text};
    use image::ImageFormat;
    use tempfile::TempDir;

    #[test]
    fn test_validate_source_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileManager::validate_source_dir(temp_dir.path()).is_ok());

        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            FileManager::validate_source_dir(&missing),
            Err(ResizeError::InvalidDirectory(p)) if p == missing
        ));

        let file = write_text(temp_dir.path(), "notes.txt", "hello");
        assert!(FileManager::validate_source_dir(&file).is_err());
    }

    #[test]
    fn test_classify_uses_content_not_extension() {
        let temp_dir = TempDir::new().unwrap();
        let png_named_jpg = write_image(temp_dir.path(), "photo.jpg", 10, 10, ImageFormat::Png);
        let text_named_png = write_text(temp_dir.path(), "fake.png", "not an image");

        assert_eq!(
            FileManager::classify_content_type(&png_named_jpg).unwrap(),
            Some("image/png")
        );
        assert_eq!(FileManager::classify_content_type(&text_named_png).unwrap(), None);
    }

    #[test]
    fn test_find_candidates_filters_by_content_type() {
        let temp_dir = TempDir::new().unwrap();
        write_image(temp_dir.path(), "b.png", 30, 20, ImageFormat::Png);
        write_image(temp_dir.path(), "a.jpg", 30, 40, ImageFormat::Jpeg);
        write_text(temp_dir.path(), "c.gif", "GIF89a\0\0\0\0");
        write_text(temp_dir.path(), "d.txt", "ignored");
        std::fs::create_dir(temp_dir.path().join("resized")).unwrap();
        write_image(&temp_dir.path().join("resized"), "nested.png", 5, 5, ImageFormat::Png);

        let files = FileManager::find_candidate_files(temp_dir.path(), &Config::default()).unwrap();
        let names: Vec<String> = files.iter().map(|p| FileManager::base_name(p)).collect();

        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_allowed_types_are_substitutable() {
        let temp_dir = TempDir::new().unwrap();
        write_image(temp_dir.path(), "a.jpg", 30, 40, ImageFormat::Jpeg);
        write_image(temp_dir.path(), "b.png", 30, 20, ImageFormat::Png);

        let config = Config {
            allowed_types: vec!["image/png".to_string()],
            ..Default::default()
        };
        let files = FileManager::find_candidate_files(temp_dir.path(), &config).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("b.png")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_candidates_follows_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let target = write_image(elsewhere.path(), "real.jpg", 40, 30, ImageFormat::Jpeg);
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.jpg")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("gone.png"), temp_dir.path().join("dangling.png"))
            .unwrap();
        write_image(temp_dir.path(), "plain.png", 30, 20, ImageFormat::Png);

        let files = FileManager::find_candidate_files(temp_dir.path(), &Config::default()).unwrap();
        let names: Vec<String> = files.iter().map(|p| FileManager::base_name(p)).collect();

        assert_eq!(names, vec!["link.jpg", "plain.png"]);
    }

    #[test]
    fn test_find_candidates_in_unlistable_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        assert!(matches!(
            FileManager::find_candidate_files(&missing, &Config::default()),
            Err(ResizeError::InvalidDirectory(p)) if p == missing
        ));
    }

    #[test]
    fn test_ensure_destination() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("resized");

        assert!(FileManager::ensure_destination(&dest).unwrap());
        assert!(dest.is_dir());
        assert!(!FileManager::ensure_destination(&dest).unwrap());

        let blocked = write_text(temp_dir.path(), "blocked", "a file, not a dir");
        assert!(matches!(
            FileManager::ensure_destination(&blocked),
            Err(ResizeError::DestinationCreate { .. })
        ));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
