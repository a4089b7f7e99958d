//! Batch transcoding of classified assets.
//!
//! Stage 2 of the pipeline. Takes the scan inventory and produces a
//! resized, recompressed derivative of each asset in the output directory,
//! keeping the source's own codec (JPEG stays JPEG, PNG stays PNG, WebP
//! stays WebP).
//!
//! ## Failure semantics
//!
//! A single bad asset must never abort the batch: each file's transcode is
//! attempted independently and a failure (corrupt input, unsupported color
//! space, disk full) is recorded as a [`TranscodeFailure`] with the filename
//! and message while the loop continues. Only environment-level errors
//! (output directory cannot be created) propagate.
//!
//! The caller is responsible for checking [`EncoderSupport`](crate::imaging::EncoderSupport)
//! before invoking the batch; with incomplete support the pipeline prints
//! guidance instead of transcoding.

use crate::imaging::{
    kb, reduction_percent, resolve_output_dims, ImageBackend, Quality, ResizeTarget,
    TranscodeParams,
};
use crate::scan::{Category, ImageAsset};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resize target and quality for one category of asset.
///
/// One spec per category, statically derived — there is no configuration
/// file; quality comes from the CLI (default 80) and applies uniformly.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TranscodeSpec {
    pub target: ResizeTarget,
    pub quality: Quality,
}

impl TranscodeSpec {
    pub fn for_category(category: Category, quality: Quality) -> Self {
        Self {
            target: category.resize_target(),
            quality,
        }
    }
}

/// Measured outcome of one successful transcode.
#[derive(Debug, Clone, Serialize)]
pub struct TranscodeResult {
    pub file_name: String,
    pub category: Category,
    pub output_path: PathBuf,
    pub original_size_bytes: u64,
    pub output_size_bytes: u64,
    /// Integer-rounded percent; negative when the output grew (surfaced,
    /// never clamped). `None` only for a zero-byte original.
    pub reduction_percent: Option<i32>,
}

/// A per-file failure that did not abort the batch.
#[derive(Debug, Clone, Serialize)]
pub struct TranscodeFailure {
    pub file_name: String,
    pub message: String,
}

/// Everything the batch produced: results in input order plus any failures.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub results: Vec<TranscodeResult>,
    pub failures: Vec<TranscodeFailure>,
}

impl BatchReport {
    /// Sum of original sizes over successfully transcoded files, in KB.
    pub fn original_total_kb(&self) -> u64 {
        kb(self.results.iter().map(|r| r.original_size_bytes).sum())
    }

    /// Sum of output sizes over successfully transcoded files, in KB.
    pub fn output_total_kb(&self) -> u64 {
        kb(self.results.iter().map(|r| r.output_size_bytes).sum())
    }
}

/// Transcode every asset sequentially, one file to completion before the
/// next. Creates the output directory (including parents) before any write.
pub fn transcode_batch(
    backend: &impl ImageBackend,
    assets: &[ImageAsset],
    source_dir: &Path,
    output_dir: &Path,
    quality: Quality,
) -> Result<BatchReport, TranscodeError> {
    std::fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    for asset in assets {
        let spec = TranscodeSpec::for_category(asset.category, quality);
        match transcode_file(backend, asset, source_dir, output_dir, spec) {
            Ok(result) => report.results.push(result),
            Err(message) => report.failures.push(TranscodeFailure {
                file_name: asset.file_name.clone(),
                message,
            }),
        }
    }

    Ok(report)
}

/// Transcode one asset. Any failure is reported as a message string — the
/// per-file taxonomy (decode error, encode error, missing output) is all
/// recoverable and must not abort the batch.
fn transcode_file(
    backend: &impl ImageBackend,
    asset: &ImageAsset,
    source_dir: &Path,
    output_dir: &Path,
    spec: TranscodeSpec,
) -> Result<TranscodeResult, String> {
    let source = source_dir.join(&asset.file_name);
    let output = output_dir.join(&asset.file_name);

    let dims = backend.identify(&source).map_err(|e| e.to_string())?;
    let (width, height) = resolve_output_dims((dims.width, dims.height), spec.target);

    backend
        .transcode(&TranscodeParams {
            source: source.clone(),
            output: output.clone(),
            width,
            height,
            codec: asset.format,
            quality: spec.quality,
        })
        .map_err(|e| e.to_string())?;

    // Sizes are read back from disk only after the encoder confirmed the
    // write; a missing output is a per-file failure, not a panic.
    let original_size_bytes = std::fs::metadata(&source)
        .map_err(|e| format!("source vanished during transcode: {e}"))?
        .len();
    let output_size_bytes = std::fs::metadata(&output)
        .map_err(|e| format!("output file missing after transcode: {e}"))?
        .len();

    Ok(TranscodeResult {
        file_name: asset.file_name.clone(),
        category: asset.category,
        output_path: output,
        original_size_bytes,
        output_size_bytes,
        reduction_percent: reduction_percent(original_size_bytes, output_size_bytes),
    })
}
