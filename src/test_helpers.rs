//! Shared fixture builders for the batch-resize test suite.
//!
//! Images are generated on the fly with the `image` crate so tests need no
//! checked-in binary fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_image(tmp.path(), "a.jpg", 1200, 1600, ImageFormat::Jpeg);
//! write_corrupt_png(tmp.path(), "b.png");
//! write_text(tmp.path(), "c.txt", "not an image");
//! ```

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Write a `width`x`height` gradient encoded as `format`. Returns its path.
pub fn write_image(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    let pixels = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(pixels)
        .save_with_format(&path, format)
        .unwrap_or_else(|e| panic!("cannot write fixture {}: {e}", path.display()));
    path
}

/// Write a file that sniffs as PNG but cannot be decoded.
pub fn write_corrupt_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
    path
}

pub fn write_text(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Base names of the regular files directly inside `dir`, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
