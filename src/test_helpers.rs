//! Shared test utilities.
//!
//! Synthetic image writers (so no binary fixtures are checked in) and a
//! helper for laying out an input tree of category folders.

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;

/// Write a gradient JPEG of the given size.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a semi-transparent PNG of the given size.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, 64, (y % 256) as u8, 200])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Create `root/<category>/` and an empty placeholder file for each name.
///
/// Placeholders are enough for tests that run against the mock backend.
pub fn create_placeholder_files(root: &Path, category: &str, names: &[&str]) {
    let dir = root.join(category);
    std::fs::create_dir_all(&dir).unwrap();
    for name in names {
        std::fs::write(dir.join(name), "").unwrap();
    }
}
