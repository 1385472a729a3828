//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::fit_to_width;
use super::params::{EncodeParams, OutputFormat, Quality};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for output generation.
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    pub max_width: u32,
    pub quality: Quality,
}

/// Files written for one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutputs {
    pub width: u32,
    pub height: u32,
    /// Filename of the WebP output, relative to the output directory.
    pub webp: String,
    /// Filename of the JPEG output, relative to the output directory.
    pub jpeg: String,
}

/// Plan both encodes for a source image without executing them.
///
/// WebP first, then JPEG, both at the same capped dimensions and quality.
pub fn plan_outputs(
    source: &Path,
    output_dir: &Path,
    filename_stem: &str,
    original_dims: (u32, u32),
    config: &EncodeConfig,
) -> Vec<EncodeParams> {
    let (width, height) = fit_to_width(original_dims, config.max_width);

    [OutputFormat::WebP, OutputFormat::Jpeg]
        .into_iter()
        .map(|format| EncodeParams {
            source: source.to_path_buf(),
            output: output_dir.join(format!("{}.{}", filename_stem, format.extension())),
            width,
            height,
            format,
            quality: config.quality,
        })
        .collect()
}

/// Create the WebP and JPEG outputs for one source image.
///
/// Stops at the first failing encode and removes whatever this call wrote
/// for the stem, so a skipped image leaves no half pair behind.
pub fn create_outputs(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    filename_stem: &str,
    original_dims: (u32, u32),
    config: &EncodeConfig,
) -> Result<GeneratedOutputs> {
    let plans = plan_outputs(source, output_dir, filename_stem, original_dims, config);
    for (i, params) in plans.iter().enumerate() {
        if let Err(e) = backend.encode(params) {
            for written in &plans[..=i] {
                // Missing files are fine: the failed encode may not have started one
                std::fs::remove_file(&written.output).ok();
            }
            return Err(e);
        }
    }

    let (width, height) = fit_to_width(original_dims, config.max_width);
    Ok(GeneratedOutputs {
        width,
        height,
        webp: format!("{}.{}", filename_stem, OutputFormat::WebP.extension()),
        jpeg: format!("{}.{}", filename_stem, OutputFormat::Jpeg.extension()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    fn config() -> EncodeConfig {
        EncodeConfig {
            max_width: 2000,
            quality: Quality::new(85),
        }
    }

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_files(&[("test.jpg", 1920, 1080)]);
        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn plan_outputs_caps_width_for_both_formats() {
        let plans = plan_outputs(
            Path::new("/in/a.jpg"),
            Path::new("/out/wedding"),
            "wedding-1",
            (4000, 3000),
            &config(),
        );

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].format, OutputFormat::WebP);
        assert_eq!(plans[0].output, Path::new("/out/wedding/wedding-1.webp"));
        assert_eq!(plans[1].format, OutputFormat::Jpeg);
        assert_eq!(plans[1].output, Path::new("/out/wedding/wedding-1.jpg"));
        for plan in &plans {
            assert_eq!((plan.width, plan.height), (2000, 1500));
            assert_eq!(plan.quality.value(), 85);
        }
    }

    #[test]
    fn plan_outputs_keeps_small_images_at_native_size() {
        let plans = plan_outputs(
            Path::new("/in/a.png"),
            Path::new("/out"),
            "newborn-3",
            (640, 480),
            &config(),
        );
        assert!(plans.iter().all(|p| (p.width, p.height) == (640, 480)));
    }

    #[test]
    fn create_outputs_encodes_webp_then_jpeg() {
        let backend = MockBackend::new();
        let outputs = create_outputs(
            &backend,
            Path::new("/in/b.png"),
            Path::new("/out/wedding"),
            "wedding-1",
            (3000, 2000),
            &config(),
        )
        .unwrap();

        assert_eq!(
            outputs,
            GeneratedOutputs {
                width: 2000,
                height: 1333,
                webp: "wedding-1.webp".to_string(),
                jpeg: "wedding-1.jpg".to_string(),
            }
        );

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode { format: OutputFormat::WebP, width: 2000, height: 1333, .. }
        ));
        assert!(matches!(
            &ops[1],
            RecordedOp::Encode { format: OutputFormat::Jpeg, width: 2000, height: 1333, .. }
        ));
    }

    #[test]
    fn create_outputs_stops_on_first_failure() {
        let backend = MockBackend::new().fail_encode("bad.jpg");
        let result = create_outputs(
            &backend,
            Path::new("/in/bad.jpg"),
            Path::new("/out"),
            "portraits-1",
            (100, 100),
            &config(),
        );
        assert!(result.is_err());
        // The WebP encode failed, so JPEG was never attempted
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn create_outputs_removes_written_half_when_second_encode_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        // Stand-in for the WebP the first encode wrote
        let webp = tmp.path().join("portraits-1.webp");
        std::fs::write(&webp, b"webp bytes").unwrap();
        let backend = MockBackend::new().fail_output("portraits-1.jpg");

        let result = create_outputs(
            &backend,
            Path::new("/in/a.jpg"),
            tmp.path(),
            "portraits-1",
            (100, 100),
            &config(),
        );

        assert!(result.is_err());
        assert_eq!(backend.get_operations().len(), 2);
        assert!(!webp.exists());
        assert!(!tmp.path().join("portraits-1.jpg").exists());
    }
}
