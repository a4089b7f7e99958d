//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`transcode`](crate::transcode) driver (which decides
//! what derivatives to create) and the [`backend`](super::backend) (which does
//! the actual pixel work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing pipeline logic.

use serde::Serialize;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Image codec, derived from a file extension.
///
/// Names both the decoder for a source asset and the encoder for its
/// derivative: the pipeline always re-encodes into the source's own format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Codec {
    Jpeg,
    Png,
    WebP,
}

/// Extensions the pipeline recognizes, matched case-insensitively.
const CODEC_EXTENSIONS: &[(&str, Codec)] = &[
    ("jpg", Codec::Jpeg),
    ("jpeg", Codec::Jpeg),
    ("png", Codec::Png),
    ("webp", Codec::WebP),
];

impl Codec {
    /// Map a file extension to its codec. Unrecognized extensions yield `None`
    /// and the file is skipped, never errored.
    pub fn from_extension(ext: &str) -> Option<Self> {
        CODEC_EXTENSIONS
            .iter()
            .find(|(e, _)| ext.eq_ignore_ascii_case(e))
            .map(|(_, codec)| *codec)
    }
}

/// Target dimensions for a resize.
///
/// When `height` is set, the output is cover-fit: scaled to fill the exact
/// box, overflow cropped symmetrically around the center. When `height` is
/// `None`, it is computed from the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: Option<u32>,
}

impl ResizeTarget {
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }

    pub fn width_only(width: u32) -> Self {
        Self {
            width,
            height: None,
        }
    }
}

/// Full specification for one transcode: source, output, resolved dimensions,
/// codec, and quality.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub codec: Codec,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_upper_bound() {
        assert_eq!(Quality::new(150).value(), 100);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(0).value(), 0);
    }

    #[test]
    fn quality_default_is_80() {
        assert_eq!(Quality::default().value(), 80);
    }

    #[test]
    fn codec_from_extension_case_insensitive() {
        assert_eq!(Codec::from_extension("JPG"), Some(Codec::Jpeg));
        assert_eq!(Codec::from_extension("jpeg"), Some(Codec::Jpeg));
        assert_eq!(Codec::from_extension("PNG"), Some(Codec::Png));
        assert_eq!(Codec::from_extension("WebP"), Some(Codec::WebP));
    }

    #[test]
    fn codec_from_unrecognized_extension() {
        assert_eq!(Codec::from_extension("gif"), None);
        assert_eq!(Codec::from_extension("tiff"), None);
        assert_eq!(Codec::from_extension(""), None);
    }
}
