//! Runtime side of the manifest: lookups and navigation for a presentation layer.
//!
//! A [`Gallery`] holds the most recently loaded [`Manifest`]. Loading goes
//! through a [`ManifestSource`] (a local file or an HTTP URL) and never
//! leaves the gallery in a broken state: a failed load keeps whatever was
//! there before, which on first load is the empty manifest. Every lookup on
//! an empty or absent category returns an empty slice.
//!
//! Navigation is plain index arithmetic with wraparound. [`Viewer`] layers
//! the modal state on top of it: which category is open, which image is
//! shown, and whether it is zoomed.

use crate::category::Category;
use crate::manifest::{ImageRecord, Manifest, ManifestError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Somewhere a manifest can be fetched from.
pub trait ManifestSource {
    /// Human-readable location, for logs and output.
    fn location(&self) -> String;

    /// Fetch the raw manifest text.
    fn fetch(&self) -> Result<String, GalleryError>;
}

/// Manifest stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ManifestSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, GalleryError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Manifest served over HTTP(S). Any non-2xx status is a failed fetch.
#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ManifestSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String, GalleryError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

/// Pick a source from a command-line style argument: `http://` and
/// `https://` URLs are fetched, anything else is read as a path.
pub fn source_for(location: &str) -> Box<dyn ManifestSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Index after `current` in a sequence of `len`, wrapping to 0.
///
/// Zero-length sequences always yield 0.
pub fn next_index(len: usize, current: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + 1) % len
}

/// Index before `current` in a sequence of `len`, wrapping to the end.
pub fn previous_index(len: usize, current: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + len - 1) % len
}

/// `"VIEW 3 PHOTOS"`, `"VIEW 1 PHOTO"`.
pub fn photo_count_label(count: usize) -> String {
    if count == 1 {
        "VIEW 1 PHOTO".to_string()
    } else {
        format!("VIEW {count} PHOTOS")
    }
}

/// Category lookups over the current manifest.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    manifest: Manifest,
}

impl Gallery {
    /// An empty gallery: every category has no images.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Fetch and parse, replacing the current manifest only on success.
    pub fn try_load(&mut self, source: &dyn ManifestSource) -> Result<(), GalleryError> {
        let text = source.fetch()?;
        self.manifest = Manifest::parse(&text)?;
        tracing::debug!(
            source = %source.location(),
            categories = self.manifest.len(),
            images = self.manifest.total_images(),
            "manifest loaded"
        );
        Ok(())
    }

    /// Like [`try_load`](Self::try_load) but never fails: errors are logged
    /// and the previous manifest stays in place. Returns whether it loaded.
    pub fn load(&mut self, source: &dyn ManifestSource) -> bool {
        match self.try_load(source) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    source = %source.location(),
                    error = %e,
                    "failed to load manifest, keeping previous"
                );
                false
            }
        }
    }

    /// Ordered images of a category; empty when absent.
    pub fn images_for(&self, category: Category) -> &[ImageRecord] {
        self.manifest.images(category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.images_for(category).len()
    }

    /// Card image for a category: its first record.
    pub fn cover(&self, category: Category) -> Option<&ImageRecord> {
        self.images_for(category).first()
    }

    pub fn next(&self, category: Category, current: usize) -> usize {
        next_index(self.count(category), current)
    }

    pub fn previous(&self, category: Category, current: usize) -> usize {
        previous_index(self.count(category), current)
    }
}

/// Modal state: one open category, a current image and a zoom flag.
///
/// The stored index is read against the gallery each time, so a reload that
/// shortens the open category clamps it to the last image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer {
    category: Option<Category>,
    index: usize,
    zoomed: bool,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a category at its first image, unzoomed.
    pub fn open(&mut self, category: Category) {
        *self = Self {
            category: Some(category),
            index: 0,
            zoomed: false,
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Index as last set; see [`position`](Self::position) for the clamped value.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current index within the open category, clamped to its length.
    /// `None` when nothing is open or the category is empty.
    pub fn position(&self, gallery: &Gallery) -> Option<usize> {
        let count = gallery.count(self.category?);
        (count > 0).then(|| self.index.min(count - 1))
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn current<'g>(&self, gallery: &'g Gallery) -> Option<&'g ImageRecord> {
        let position = self.position(gallery)?;
        self.category.and_then(|c| gallery.images_for(c).get(position))
    }

    /// Whether previous/next controls apply (more than one image).
    pub fn can_navigate(&self, gallery: &Gallery) -> bool {
        self.category.is_some_and(|c| gallery.count(c) > 1)
    }

    pub fn next(&mut self, gallery: &Gallery) {
        if let (Some(category), Some(position)) = (self.category, self.position(gallery)) {
            self.index = gallery.next(category, position);
        }
    }

    pub fn previous(&mut self, gallery: &Gallery) {
        if let (Some(category), Some(position)) = (self.category, self.position(gallery)) {
            self.index = gallery.previous(category, position);
        }
    }

    /// Jump to a thumbnail. Out-of-range indices are ignored.
    pub fn select(&mut self, gallery: &Gallery, index: usize) -> bool {
        match self.category {
            Some(c) if index < gallery.count(c) => {
                self.index = index;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_zoom(&mut self) {
        if self.category.is_some() {
            self.zoomed = !self.zoomed;
        }
    }

    /// `"Image 2 of 5"`, or `None` when nothing is open or the category is empty.
    pub fn position_label(&self, gallery: &Gallery) -> Option<String> {
        let position = self.position(gallery)?;
        let count = gallery.count(self.category?);
        Some(format!("Image {} of {}", position + 1, count))
    }
}
