//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline needs:
//! identify (read intrinsic dimensions) and encode (resize + write one
//! output format).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the
//! recording `MockBackend` in this module's test section.

use super::params::EncodeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` because the ingest stage shares one backend across rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source, resize to the exact target dimensions and write
    /// the requested format.
    fn encode(&self, params: &EncodeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{OutputFormat, Quality};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// Dimensions are keyed by source file name so results stay correct when
    /// the ingest stage identifies files in parallel. Uses Mutex (not RefCell)
    /// so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: Mutex<HashMap<String, Dimensions>>,
        pub failing_encodes: Mutex<HashSet<String>>,
        pub failing_outputs: Mutex<HashSet<String>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Encode {
            source: String,
            output: String,
            width: u32,
            height: u32,
            format: OutputFormat,
            quality: u32,
        },
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Known files and their dimensions. Identifying any other file fails,
        /// which is how tests simulate corrupt or unreadable sources.
        pub fn with_files(files: &[(&str, u32, u32)]) -> Self {
            let dims = files
                .iter()
                .map(|&(name, width, height)| (name.to_string(), Dimensions { width, height }))
                .collect();
            Self {
                dimensions: Mutex::new(dims),
                ..Self::default()
            }
        }

        /// Make encoding of this source file fail (identify still succeeds).
        pub fn fail_encode(self, name: &str) -> Self {
            self.failing_encodes.lock().unwrap().insert(name.to_string());
            self
        }

        /// Make writing this output file name fail (other outputs succeed).
        pub fn fail_output(self, name: &str) -> Self {
            self.failing_outputs.lock().unwrap().insert(name.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// Recorded encodes, sorted by output path for order-independent asserts.
        pub fn encodes(&self) -> Vec<RecordedOp> {
            let mut ops: Vec<RecordedOp> = self
                .get_operations()
                .into_iter()
                .filter(|op| matches!(op, RecordedOp::Encode { .. }))
                .collect();
            ops.sort_by(|a, b| match (a, b) {
                (RecordedOp::Encode { output: a, .. }, RecordedOp::Encode { output: b, .. }) => {
                    a.cmp(b)
                }
                _ => std::cmp::Ordering::Equal,
            });
            ops
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.dimensions
                .lock()
                .unwrap()
                .get(&file_name(path))
                .copied()
                .ok_or_else(|| {
                    BackendError::ProcessingFailed(format!("Failed to decode {}", path.display()))
                })
        }

        fn encode(&self, params: &EncodeParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                format: params.format,
                quality: params.quality.value(),
            });
            let source_fails = self
                .failing_encodes
                .lock()
                .unwrap()
                .contains(&file_name(&params.source));
            let output_fails = self
                .failing_outputs
                .lock()
                .unwrap()
                .contains(&file_name(&params.output));
            if source_fails || output_fails {
                return Err(BackendError::ProcessingFailed(format!(
                    "encode failed for {}",
                    params.source.display()
                )));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_files(&[("image.jpg", 800, 600)]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_unknown_file_fails() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/test/missing.jpg")).is_err());
    }

    #[test]
    fn mock_records_encode() {
        let backend = MockBackend::new();

        backend
            .encode(&EncodeParams {
                source: "/source.jpg".into(),
                output: "/output.webp".into(),
                width: 800,
                height: 600,
                format: OutputFormat::WebP,
                quality: Quality::new(85),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                width: 800,
                height: 600,
                format: OutputFormat::WebP,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn mock_encode_failure_is_still_recorded() {
        let backend = MockBackend::new().fail_encode("bad.png");
        let result = backend.encode(&EncodeParams {
            source: "/in/bad.png".into(),
            output: "/out/x.jpg".into(),
            width: 10,
            height: 10,
            format: OutputFormat::Jpeg,
            quality: Quality::default(),
        });
        assert!(result.is_err());
        assert_eq!(backend.get_operations().len(), 1);
    }
}
