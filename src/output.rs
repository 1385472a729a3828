//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Optimize
//!
//! ```text
//! Optimizing gallery images
//!     Input: images-to-optimize
//!     Output: public/gallery
//!     Max width: 2000px
//!     Quality: 85
//!
//! wedding (3 photos)
//!     001 wedding-1
//!         Source: images-to-optimize/wedding/b.png
//!         Size: 4000x3000 -> 2000x1500
//!     002 skipped
//!         Source: images-to-optimize/wedding/a.jpg
//!         Error: Processing failed: ...
//!
//! Summary
//!     wedding: 2 photos (1 skipped)
//!     newborn: 0 photos
//! Total: 2 photos
//! Manifest: public/gallery/manifest.json
//! ```
//!
//! ## Show
//!
//! ```text
//! Gallery (public/gallery/manifest.json)
//! 001 1st Birthday: VIEW 1 PHOTO
//!     001 /gallery/firstbirthday/firstbirthday-1.jpg
//!         WebP: /gallery/firstbirthday/firstbirthday-1.webp
//!         Alt: Firstbirthday photo
//! 002 Music Concert: no photos
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::category::Category;
use crate::config::PipelineConfig;
use crate::gallery::{Gallery, photo_count_label};
use crate::ingest::{IngestEvent, IngestResult};
use std::path::{Path, PathBuf};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn photos(n: usize) -> String {
    if n == 1 {
        "1 photo".to_string()
    } else {
        format!("{n} photos")
    }
}

// ============================================================================
// Optimize
// ============================================================================

/// Run header: where images come from and go to, and the encode settings.
pub fn format_banner(config: &PipelineConfig) -> Vec<String> {
    vec![
        "Optimizing gallery images".to_string(),
        format!("{}Input: {}", indent(1), config.input_dir.display()),
        format!("{}Output: {}", indent(1), config.output_dir.display()),
        format!("{}Max width: {}px", indent(1), config.max_width),
        format!("{}Quality: {}", indent(1), config.quality),
    ]
}

pub fn print_banner(config: &PipelineConfig) {
    for line in format_banner(config) {
        println!("{}", line);
    }
}

/// Format a single ingest progress event.
pub fn format_ingest_event(event: &IngestEvent) -> Vec<String> {
    match event {
        IngestEvent::CategoryStarted {
            category,
            image_count,
        } => vec![
            String::new(),
            format!("{} ({})", category, photos(*image_count)),
        ],
        IngestEvent::ImageProcessed {
            ordinal,
            source,
            original,
            outputs,
            ..
        } => {
            let stem = Path::new(&outputs.jpeg)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| outputs.jpeg.clone());
            vec![
                format!("{}{} {}", indent(1), format_index(*ordinal), stem),
                format!("{}Source: {}", indent(2), source),
                format!(
                    "{}Size: {}x{} -> {}x{}",
                    indent(2),
                    original.0,
                    original.1,
                    outputs.width,
                    outputs.height
                ),
            ]
        }
        IngestEvent::ImageSkipped {
            ordinal,
            source,
            reason,
            ..
        } => vec![
            format!("{}{} skipped", indent(1), format_index(*ordinal)),
            format!("{}Source: {}", indent(2), source),
            format!("{}Error: {}", indent(2), reason),
        ],
    }
}

pub fn print_ingest_event(event: &IngestEvent) {
    for line in format_ingest_event(event) {
        println!("{}", line);
    }
}

/// Closing summary: per-category counts, total, and where the manifest went.
pub fn format_ingest_summary(result: &IngestResult) -> Vec<String> {
    let mut lines = vec![String::new()];
    if result.manifest_path.is_none() {
        lines.push("No images found to process.".to_string());
        return lines;
    }

    lines.push("Summary".to_string());
    for report in &result.reports {
        let mut line = format!("{}{}: {}", indent(1), report.category, photos(report.processed));
        if report.skipped > 0 {
            line.push_str(&format!(" ({} skipped)", report.skipped));
        }
        lines.push(line);
    }
    lines.push(format!("Total: {}", photos(result.total_processed())));
    if let Some(ref path) = result.manifest_path {
        lines.push(format!("Manifest: {}", path.display()));
    }
    lines
}

pub fn print_ingest_summary(result: &IngestResult) {
    for line in format_ingest_summary(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Init
// ============================================================================

pub fn format_init(created: &[PathBuf]) -> Vec<String> {
    let mut lines = vec!["Category folders".to_string()];
    lines.extend(
        created
            .iter()
            .map(|dir| format!("{}{}", indent(1), dir.display())),
    );
    lines.push("Add photos to these folders, then run the optimizer.".to_string());
    lines
}

pub fn print_init(created: &[PathBuf]) {
    for line in format_init(created) {
        println!("{}", line);
    }
}

// ============================================================================
// Show
// ============================================================================

/// Every category as the site would present it, with its records.
pub fn format_gallery(gallery: &Gallery, location: &str) -> Vec<String> {
    let mut lines = vec![format!("Gallery ({})", location)];
    for (i, category) in Category::ALL.into_iter().enumerate() {
        let images = gallery.images_for(category);
        if images.is_empty() {
            lines.push(format!(
                "{} {}: no photos",
                format_index(i + 1),
                category.display_name()
            ));
            continue;
        }
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            category.display_name(),
            photo_count_label(images.len())
        ));
        for (pos, record) in images.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(pos + 1), record.src));
            if let Some(ref webp) = record.webp {
                lines.push(format!("{}WebP: {}", indent(2), webp));
            }
            lines.push(format!("{}Alt: {}", indent(2), record.alt));
        }
    }
    lines
}

pub fn print_gallery(gallery: &Gallery, location: &str) {
    for line in format_gallery(gallery, location) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::GeneratedOutputs;
    use crate::ingest::CategoryReport;
    use crate::manifest::{ImageRecord, Manifest};

    fn wedding_record(n: usize) -> ImageRecord {
        ImageRecord {
            src: format!("/gallery/wedding/wedding-{n}.jpg"),
            webp: Some(format!("/gallery/wedding/wedding-{n}.webp")),
            alt: "Wedding photo".to_string(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn photos_pluralises() {
        assert_eq!(photos(0), "0 photos");
        assert_eq!(photos(1), "1 photo");
        assert_eq!(photos(2), "2 photos");
    }

    // =========================================================================
    // Optimize output
    // =========================================================================

    #[test]
    fn banner_lists_directories_and_settings() {
        let lines = format_banner(&PipelineConfig::default());
        assert_eq!(
            lines,
            vec![
                "Optimizing gallery images",
                "    Input: images-to-optimize",
                "    Output: public/gallery",
                "    Max width: 2000px",
                "    Quality: 85",
            ]
        );
    }

    #[test]
    fn category_started_line() {
        let lines = format_ingest_event(&IngestEvent::CategoryStarted {
            category: Category::Wedding,
            image_count: 3,
        });
        assert_eq!(lines, vec!["", "wedding (3 photos)"]);
    }

    #[test]
    fn image_processed_lines() {
        let lines = format_ingest_event(&IngestEvent::ImageProcessed {
            category: Category::Wedding,
            ordinal: 1,
            source: "images-to-optimize/wedding/b.png".to_string(),
            original: (4000, 3000),
            outputs: GeneratedOutputs {
                width: 2000,
                height: 1500,
                webp: "wedding-1.webp".to_string(),
                jpeg: "wedding-1.jpg".to_string(),
            },
        });
        assert_eq!(
            lines,
            vec![
                "    001 wedding-1",
                "        Source: images-to-optimize/wedding/b.png",
                "        Size: 4000x3000 -> 2000x1500",
            ]
        );
    }

    #[test]
    fn image_skipped_lines() {
        let lines = format_ingest_event(&IngestEvent::ImageSkipped {
            category: Category::Newborn,
            ordinal: 2,
            source: "in/newborn/bad.jpg".to_string(),
            reason: "Processing failed: truncated".to_string(),
        });
        assert_eq!(lines[0], "    002 skipped");
        assert_eq!(lines[2], "        Error: Processing failed: truncated");
    }

    #[test]
    fn summary_with_images() {
        let mut manifest = Manifest::new();
        manifest.insert(Category::Wedding, vec![wedding_record(1), wedding_record(3)]);
        let result = IngestResult {
            manifest,
            reports: vec![
                CategoryReport {
                    category: Category::Newborn,
                    found: 0,
                    processed: 0,
                    skipped: 0,
                },
                CategoryReport {
                    category: Category::Wedding,
                    found: 3,
                    processed: 2,
                    skipped: 1,
                },
            ],
            manifest_path: Some(PathBuf::from("public/gallery/manifest.json")),
        };

        assert_eq!(
            format_ingest_summary(&result),
            vec![
                "",
                "Summary",
                "    newborn: 0 photos",
                "    wedding: 2 photos (1 skipped)",
                "Total: 2 photos",
                "Manifest: public/gallery/manifest.json",
            ]
        );
    }

    #[test]
    fn summary_without_images() {
        let result = IngestResult {
            manifest: Manifest::new(),
            reports: vec![],
            manifest_path: None,
        };
        assert_eq!(
            format_ingest_summary(&result),
            vec!["", "No images found to process."]
        );
    }

    // =========================================================================
    // Init and show output
    // =========================================================================

    #[test]
    fn init_lists_created_folders() {
        let lines = format_init(&[PathBuf::from("images-to-optimize/wedding")]);
        assert_eq!(lines[1], "    images-to-optimize/wedding");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn gallery_lists_every_category() {
        let mut manifest = Manifest::new();
        manifest.insert(Category::Wedding, vec![wedding_record(1)]);
        let lines = format_gallery(&Gallery::from_manifest(manifest), "manifest.json");

        assert_eq!(lines[0], "Gallery (manifest.json)");
        assert_eq!(lines[1], "001 1st Birthday: no photos");
        let wedding = lines
            .iter()
            .position(|l| l.starts_with("008 "))
            .unwrap();
        assert_eq!(
            &lines[wedding..],
            &[
                "008 Wedding: VIEW 1 PHOTO",
                "    001 /gallery/wedding/wedding-1.jpg",
                "        WebP: /gallery/wedding/wedding-1.webp",
                "        Alt: Wedding photo",
            ]
        );
    }
}
