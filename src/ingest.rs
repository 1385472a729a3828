//! Image ingestion: category folders in, optimized images and a manifest out.
//!
//! ## Input
//!
//! ```text
//! images-to-optimize/
//! ├── wedding/
//! │   ├── a.jpg
//! │   ├── b.png
//! │   ├── c.bmp
//! │   └── notes.txt          # not an image: ignored
//! └── newborn/               # missing or empty folders are fine
//! ```
//!
//! ## Output
//!
//! ```text
//! public/gallery/
//! ├── manifest.json
//! └── wedding/
//!     ├── wedding-1.webp     # from a.jpg
//!     ├── wedding-1.jpg
//!     ├── wedding-2.webp     # from b.png
//!     ├── wedding-2.jpg
//!     ├── wedding-3.webp     # from c.bmp
//!     └── wedding-3.jpg
//! ```
//!
//! Every run first scaffolds the input tree ([`scaffold_input_dirs`]) so a
//! fresh checkout shows where photos go.
//!
//! ## Ordering
//!
//! Files are listed sorted by file name (byte order, so `01.jpg` comes
//! before `12.jpg` but `2.jpg` comes after `12.jpg`), filtered by extension,
//! and numbered from 1. The ordinal is fixed *before* any work starts, so
//! the name a file gets never depends on which worker finishes first or on
//! whether an earlier file failed. Manifest order is the same listing order.
//!
//! ## Failures
//!
//! With [`ErrorMode::SkipAndLog`] (the default) a file that cannot be
//! identified or encoded is reported as [`IngestEvent::ImageSkipped`], logged,
//! and left out of the manifest; its ordinal is not reused. With
//! [`ErrorMode::Abort`] the first failure, in listing order, ends the run.
//!
//! ## Parallel Processing
//!
//! Files within a category are encoded in parallel using
//! [rayon](https://docs.rs/rayon). Results are collected in listing order
//! before anything is reported or recorded.

use crate::category::Category;
use crate::config::{ErrorMode, PipelineConfig};
use crate::imaging::{
    BackendError, EncodeConfig, GeneratedOutputs, ImageBackend, Quality, RustBackend,
    create_outputs, get_dimensions,
};
use crate::manifest::{self, ImageRecord, Manifest, ManifestError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Extensions accepted as source images (case-insensitive).
pub const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tiff", "bmp"];

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Failed to process {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// A source file selected for processing, with its fixed output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedImage {
    /// 1-based position in the filtered listing.
    pub ordinal: usize,
    pub source: PathBuf,
    /// Output filename without extension: `{category}-{ordinal}`.
    pub stem: String,
}

/// Progress reported while ingesting, in listing order per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    CategoryStarted {
        category: Category,
        image_count: usize,
    },
    ImageProcessed {
        category: Category,
        ordinal: usize,
        source: String,
        original: (u32, u32),
        outputs: GeneratedOutputs,
    },
    ImageSkipped {
        category: Category,
        ordinal: usize,
        source: String,
        reason: String,
    },
}

/// Per-category tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: Category,
    /// Image files found after extension filtering.
    pub found: usize,
    pub processed: usize,
    pub skipped: usize,
}

/// Outcome of a full ingestion run.
#[derive(Debug)]
pub struct IngestResult {
    pub manifest: Manifest,
    pub reports: Vec<CategoryReport>,
    /// Where the manifest was written; `None` when no image was ingested.
    pub manifest_path: Option<PathBuf>,
}

impl IngestResult {
    pub fn total_processed(&self) -> usize {
        self.reports.iter().map(|r| r.processed).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.reports.iter().map(|r| r.skipped).sum()
    }
}

/// Whether a path has one of the accepted image extensions.
pub fn is_input_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List regular files in `dir`, sorted by file name.
///
/// Raw `read_dir` order is filesystem-dependent (hash order on ext4), so
/// names are compared byte-wise. A missing or unreadable directory lists as
/// empty.
pub fn list_category(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(
                dir = %dir.display(),
                error = %e,
                "category folder not readable, treating as empty"
            );
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

/// Filter a listing to image files and assign ordinals.
///
/// Pure: the listing order in is the ordinal order out.
pub fn plan_category(category: Category, listing: &[PathBuf]) -> Vec<PlannedImage> {
    listing
        .iter()
        .filter(|p| is_input_image(p))
        .enumerate()
        .map(|(i, source)| PlannedImage {
            ordinal: i + 1,
            source: source.clone(),
            stem: format!("{}-{}", category, i + 1),
        })
        .collect()
}

/// Create the input root and one folder per configured category.
///
/// Idempotent: existing folders and their contents are left alone.
pub fn scaffold_input_dirs(config: &PipelineConfig) -> std::io::Result<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(config.categories.len());
    for category in &config.categories {
        let dir = config.input_dir.join(category.as_str());
        std::fs::create_dir_all(&dir)?;
        created.push(dir);
    }
    Ok(created)
}

/// Run the pipeline with the production backend.
pub fn ingest(
    config: &PipelineConfig,
    events: Option<Sender<IngestEvent>>,
) -> Result<IngestResult, IngestError> {
    let backend = RustBackend::new();
    ingest_with_backend(&backend, config, events)
}

/// Run the pipeline with a specific backend (allows testing with mock).
pub fn ingest_with_backend(
    backend: &impl ImageBackend,
    config: &PipelineConfig,
    events: Option<Sender<IngestEvent>>,
) -> Result<IngestResult, IngestError> {
    let emit = |event: IngestEvent| {
        if let Some(ref tx) = events {
            // A closed receiver only means nobody is printing
            tx.send(event).ok();
        }
    };

    scaffold_input_dirs(config)?;
    std::fs::create_dir_all(&config.output_dir)?;

    let encode_config = EncodeConfig {
        max_width: config.max_width,
        quality: Quality::new(config.quality),
    };

    let mut manifest = Manifest::new();
    let mut reports = Vec::with_capacity(config.categories.len());

    for &category in &config.categories {
        let listing = list_category(&config.input_dir.join(category.as_str()));
        let planned = plan_category(category, &listing);
        tracing::info!(%category, found = planned.len(), "ingesting category");
        emit(IngestEvent::CategoryStarted {
            category,
            image_count: planned.len(),
        });

        let mut report = CategoryReport {
            category,
            found: planned.len(),
            processed: 0,
            skipped: 0,
        };
        if planned.is_empty() {
            reports.push(report);
            continue;
        }

        let category_dir = config.output_dir.join(category.as_str());
        std::fs::create_dir_all(&category_dir)?;

        // Indexed parallel collect keeps listing order
        let outcomes: Vec<Result<((u32, u32), GeneratedOutputs), BackendError>> = planned
            .par_iter()
            .map(|image| process_image(backend, image, &category_dir, &encode_config))
            .collect();

        let mut records = Vec::new();
        for (image, outcome) in planned.iter().zip(outcomes) {
            let source = image.source.display().to_string();
            match outcome {
                Ok((original, outputs)) => {
                    records.push(ImageRecord {
                        src: config.public_url(category, &outputs.jpeg),
                        webp: Some(config.public_url(category, &outputs.webp)),
                        alt: manifest::alt_text(&config.alt_text, category, records.len()),
                    });
                    report.processed += 1;
                    emit(IngestEvent::ImageProcessed {
                        category,
                        ordinal: image.ordinal,
                        source,
                        original,
                        outputs,
                    });
                }
                Err(err) => {
                    if config.on_error == ErrorMode::Abort {
                        return Err(IngestError::Image {
                            path: image.source.clone(),
                            source: err,
                        });
                    }
                    tracing::warn!(%category, source = %source, error = %err, "skipping image");
                    report.skipped += 1;
                    emit(IngestEvent::ImageSkipped {
                        category,
                        ordinal: image.ordinal,
                        source,
                        reason: err.to_string(),
                    });
                }
            }
        }

        manifest.insert(category, records);
        reports.push(report);
    }

    let manifest_path = if manifest.is_empty() {
        tracing::info!("no images ingested, manifest not written");
        None
    } else {
        let path = config.manifest_path();
        manifest.write(&path)?;
        Some(path)
    };

    Ok(IngestResult {
        manifest,
        reports,
        manifest_path,
    })
}

fn process_image(
    backend: &impl ImageBackend,
    image: &PlannedImage,
    output_dir: &Path,
    config: &EncodeConfig,
) -> Result<((u32, u32), GeneratedOutputs), BackendError> {
    let dimensions = get_dimensions(backend, &image.source)?;
    tracing::debug!(
        source = %image.source.display(),
        width = dimensions.0,
        height = dimensions.1,
        "processing image"
    );
    let outputs = create_outputs(
        backend,
        &image.source,
        output_dir,
        &image.stem,
        dimensions,
        config,
    )?;
    Ok((dimensions, outputs))
}
