//! Image processing — pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Cover-fit resize** | `resize_to_fill` (Lanczos3) |
//! | **Re-encode** | `image` codecs (JPEG quality, PNG best compression, lossless WebP) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and size math (unit testable)
//! - **Parameters**: Data structures describing transcode operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{kb, reduction_percent, resolve_output_dims};
pub use params::{Codec, Quality, ResizeTarget, TranscodeParams};
pub use rust_backend::{EncoderSupport, RustBackend};
