//! # Image Resize Module
//!
//! Questo modulo gestisce il ridimensionamento delle immagini con semantica "best fit"
//! usando il crate `image` direttamente in-process.
//!
//! ## Caratteristiche
//! - **SOLO RESIZE**: Nessun crop, padding o altra manipolazione
//! - **Best fit**: L'output sta dentro `max_width × max_height` preservando l'aspect ratio
//! - **Mai upscaling**: Un'immagine già entro i limiti mantiene le dimensioni originali
//! - **Formato preservato**: L'output usa lo stesso formato rilevato sull'input
//! - **Deterministico**: Stesso input e stessa configurazione producono byte identici
//!
//! ## Pipeline
//! 1. `load()`: Rileva il formato dai magic bytes e decodifica
//! 2. `resize_to_fit()`: Calcola le dimensioni target e ridimensiona se necessario
//! 3. `encode()`: Codifica in memoria nel formato originale (JPEG qualità fissa)
//! 4. `save()`: Scrive i byte codificati, il file non viene toccato se la codifica fallisce
//!
//! ## Esempio
//! ```text
//! 1200x1600 (3:4) con limiti 600x800 -> 600x800
//! 300x200 con limiti 600x800        -> 300x200 (invariata)
//! ```

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::debug;

/// JPEG quality used for every resized JPEG
const JPEG_QUALITY: u8 = 90;

/// Algoritmi di resize disponibili
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeAlgorithm {
    /// Nearest neighbor - Il più veloce, qualità bassa
    Nearest,
    /// Triangle - Veloce, qualità accettabile per anteprime
    Triangle,
    /// Catmull-Rom - Buon bilanciamento qualità/velocità
    CatmullRom,
    /// Gaussian - Risultato morbido
    Gaussian,
    /// Lanczos3 - Migliore qualità per downscaling
    #[default]
    Lanczos3,
}

impl ResizeAlgorithm {
    /// Converte l'algoritmo nel filtro del crate `image`
    pub fn to_filter_type(self) -> FilterType {
        match self {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Triangle => FilterType::Triangle,
            ResizeAlgorithm::CatmullRom => FilterType::CatmullRom,
            ResizeAlgorithm::Gaussian => FilterType::Gaussian,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Calculate best-fit dimensions for `source` inside `bounds`.
///
/// Preserves the aspect ratio and never upscales: a source that already fits
/// is returned unchanged. Otherwise at least one edge lands on its bound.
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Image loaded from disk together with the format it was sniffed as
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl LoadedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// Processore per il ridimensionamento best-fit
#[derive(Debug, Clone)]
pub struct ImageResizer {
    max_width: u32,
    max_height: u32,
    algorithm: ResizeAlgorithm,
}

impl ImageResizer {
    /// Crea un nuovo ridimensionatore
    ///
    /// # Arguments
    /// * `max_width` - Larghezza massima dell'output
    /// * `max_height` - Altezza massima dell'output
    /// * `algorithm` - Algoritmo di resize da utilizzare
    pub fn new(max_width: u32, max_height: u32, algorithm: ResizeAlgorithm) -> Self {
        Self {
            max_width,
            max_height,
            algorithm,
        }
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }

    /// Decodifica un'immagine dal disco, rilevando il formato dal contenuto
    pub fn load(&self, path: &Path) -> Result<LoadedImage> {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let reader = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .with_context(|| format!("cannot read {}", path.display()))?;

        let format = reader
            .format()
            .with_context(|| format!("unrecognised image format: {}", path.display()))?;

        let image = reader.decode()?;
        Ok(LoadedImage { image, format })
    }

    /// Ridimensiona l'immagine per stare dentro i limiti configurati
    pub fn resize_to_fit(&self, image: DynamicImage) -> DynamicImage {
        let source = (image.width(), image.height());
        let (width, height) = calculate_fit_dimensions(source, self.bounds());

        if (width, height) == source {
            debug!("{}x{} already within {}x{}, keeping size", source.0, source.1, self.max_width, self.max_height);
            return image;
        }

        debug!(
            "Resizing {}x{} to {}x{} using {:?}",
            source.0, source.1, width, height, self.algorithm
        );
        image.resize_exact(width, height, self.algorithm.to_filter_type())
    }

    /// Codifica l'immagine in `format` in un buffer
    pub fn encode(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
                match image {
                    DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => {
                        image.write_with_encoder(encoder)?
                    }
                    // JPEG has no alpha channel and no 16-bit depth
                    other => DynamicImage::ImageRgb8(other.to_rgb8()).write_with_encoder(encoder)?,
                }
            }
            other => image.write_to(&mut buffer, other)?,
        }

        Ok(buffer.into_inner())
    }

    /// Codifica l'immagine e la scrive su `path`, sovrascrivendo.
    ///
    /// Returns the encoded bytes.
    pub fn save(&self, image: &DynamicImage, format: ImageFormat, path: &Path) -> Result<Vec<u8>> {
        let bytes = self.encode(image, format)?;
        std::fs::write(path, &bytes).with_context(|| format!("cannot write {}", path.display()))?;
        Ok(bytes)
    }
}
