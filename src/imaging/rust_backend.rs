//! Pure Rust image processing backend — no system dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header-only, no full decode) |
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Cover-fit resize | `image::DynamicImage::resize_to_fill` (Lanczos3) |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → PNG | `PngEncoder` at best compression (PNG has no scalar quality) |
//! | Encode → WebP | `WebPEncoder::new_lossless` (the crate ships no lossy WebP) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Codec, TranscodeParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::BufWriter;
use std::path::Path;
use std::sync::LazyLock;

/// Codecs the pipeline needs an encoder for, paired with the `image` crate
/// format used to probe availability.
const REQUIRED_ENCODERS: &[(Codec, ImageFormat)] = &[
    (Codec::Jpeg, ImageFormat::Jpeg),
    (Codec::Png, ImageFormat::Png),
    (Codec::WebP, ImageFormat::WebP),
];

static AVAILABLE_ENCODERS: LazyLock<Vec<Codec>> = LazyLock::new(|| {
    REQUIRED_ENCODERS
        .iter()
        .filter(|(_, fmt)| fmt.writing_enabled())
        .map(|(codec, _)| *codec)
        .collect()
});

/// Encoder availability, resolved once at startup and threaded explicitly
/// into the transcode step. When support is incomplete the pipeline skips
/// transcoding entirely and prints manual-optimization guidance instead.
#[derive(Debug, Clone)]
pub struct EncoderSupport {
    available: Vec<Codec>,
}

impl EncoderSupport {
    /// Probe which encoders are compiled in.
    pub fn detect() -> Self {
        Self {
            available: AVAILABLE_ENCODERS.clone(),
        }
    }

    pub fn supports(&self, codec: Codec) -> bool {
        self.available.contains(&codec)
    }

    /// True when every codec the pipeline may emit has an encoder.
    pub fn complete(&self) -> bool {
        REQUIRED_ENCODERS
            .iter()
            .all(|(codec, _)| self.supports(*codec))
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            available: Vec::new(),
        }
    }
}

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode and save with the requested codec.
fn save_image(
    img: &DynamicImage,
    path: &Path,
    codec: Codec,
    quality: u8,
) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = BufWriter::new(file);

    let result = match codec {
        Codec::Jpeg => img.write_with_encoder(JpegEncoder::new_with_quality(writer, quality)),
        // PNG is lossless; the quality knob maps to maximum compression effort
        Codec::Png => img.write_with_encoder(PngEncoder::new_with_quality(
            writer,
            CompressionType::Best,
            PngFilterType::Adaptive,
        )),
        Codec::WebP => img.write_with_encoder(WebPEncoder::new_lossless(writer)),
    };

    result.map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn transcode(&self, params: &TranscodeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;

        // Cover-fit: scale to fill the box, crop overflow around the center.
        // When the target aspect matches the source (width-only targets), the
        // crop is a no-op beyond rounding.
        let resized = img.resize_to_fill(params.width, params.height, FilterType::Lanczos3);

        save_image(&resized, &params.output, params.codec, params.quality.value())
    }
}
