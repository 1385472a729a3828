//! Image processing: pure Rust apart from the libwebp encoder.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Resize** | `image::DynamicImage::resize_exact` (Lanczos3) |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` at a fixed quality |
//! | **Encode → WebP** | `webp::Encoder` (lossy, same quality) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::fit_to_width;
pub use operations::{EncodeConfig, GeneratedOutputs, create_outputs, get_dimensions};
pub use params::{EncodeParams, OutputFormat, Quality};
pub use rust_backend::RustBackend;
