//! Before/after size audit and performance-marker checks.
//!
//! The audit is deliberately independent of the transcode stage: it re-scans
//! both directories from disk rather than reusing in-memory results, so it
//! can run on its own, after a partial optimization, or not at all.
//!
//! ## Size audit
//!
//! For every source image, the identically named file is looked up in the
//! output directory — by filename, never by content hash. Present → sizes
//! and reduction; absent → reported as "not yet optimized" without failing.
//! The optimized total sums only files that have a counterpart.
//!
//! ## Marker checks
//!
//! A fixed checklist of performance markers is tested against the raw text
//! of the site's HTML and CSS by case-sensitive substring search. This is
//! purely textual: a marker inside a comment or string literal is
//! indistinguishable from a live usage. Accepted limitation, not a bug.

use crate::imaging::{kb, reduction_percent, Codec};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-file audit row.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub file_name: String,
    pub original_bytes: u64,
    /// `None` when no optimized counterpart exists yet.
    pub optimized_bytes: Option<u64>,
    /// Only computed when both sizes are present and the original is nonzero.
    pub reduction_percent: Option<i32>,
}

/// Aggregate totals over the audit.
#[derive(Debug, Clone, Serialize)]
pub struct AuditTotals {
    pub original_bytes: u64,
    /// Sums only files that have an optimized counterpart.
    pub optimized_bytes: u64,
    /// Overall reduction from the two totals; `None` when nothing is
    /// optimized yet or the original total is zero.
    pub reduction_percent: Option<i32>,
}

/// Full size-audit report: one entry per source image, plus totals.
#[derive(Debug, Serialize)]
pub struct SizeAudit {
    pub entries: Vec<AuditEntry>,
    pub totals: AuditTotals,
}

impl SizeAudit {
    pub fn original_total_kb(&self) -> u64 {
        kb(self.totals.original_bytes)
    }

    pub fn optimized_total_kb(&self) -> u64 {
        kb(self.totals.optimized_bytes)
    }
}

/// List image files (by recognized extension) in a flat directory, sorted.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>, AuditError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .and_then(Codec::from_extension)
                    .is_some()
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Compare source images against their optimized counterparts.
///
/// Fails with [`AuditError::NotFound`] when the source directory is absent;
/// an absent output directory is fine — every entry simply reports as not
/// yet optimized.
pub fn audit_sizes(source_dir: &Path, output_dir: &Path) -> Result<SizeAudit, AuditError> {
    if !source_dir.is_dir() {
        return Err(AuditError::NotFound(source_dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    let mut original_total = 0u64;
    let mut optimized_total = 0u64;

    for path in list_images(source_dir)? {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let original_bytes = fs::metadata(&path)?.len();
        original_total += original_bytes;

        // Lookup by filename only — the audit never hashes content
        let optimized_bytes = fs::metadata(output_dir.join(&file_name)).ok().map(|m| m.len());
        if let Some(bytes) = optimized_bytes {
            optimized_total += bytes;
        }

        let reduction = optimized_bytes.and_then(|opt| reduction_percent(original_bytes, opt));
        entries.push(AuditEntry {
            file_name,
            original_bytes,
            optimized_bytes,
            reduction_percent: reduction,
        });
    }

    let overall = if optimized_total == 0 {
        None
    } else {
        reduction_percent(original_total, optimized_total)
    };

    Ok(SizeAudit {
        entries,
        totals: AuditTotals {
            original_bytes: original_total,
            optimized_bytes: optimized_total,
            reduction_percent: overall,
        },
    })
}

/// One named marker pattern in the performance checklist.
#[derive(Debug, Clone, Copy)]
pub struct MarkerCheck {
    pub label: &'static str,
    pub pattern: &'static str,
}

/// Markers expected in the site's HTML.
pub const HTML_MARKERS: &[MarkerCheck] = &[
    MarkerCheck {
        label: "Lazy loading",
        pattern: "loading=\"lazy\"",
    },
    MarkerCheck {
        label: "Preload critical images",
        pattern: "rel=\"preload\" as=\"image\"",
    },
    MarkerCheck {
        label: "Preconnect to external domains",
        pattern: "rel=\"preconnect\"",
    },
    MarkerCheck {
        label: "Responsive images (srcset)",
        pattern: "srcset=",
    },
    MarkerCheck {
        label: "Optimized image paths",
        pattern: "images/optimized/",
    },
];

/// Markers expected in the site's stylesheet.
pub const CSS_MARKERS: &[MarkerCheck] = &[
    MarkerCheck {
        label: "Will-change property",
        pattern: "will-change:",
    },
    MarkerCheck {
        label: "Image rendering optimization",
        pattern: "image-rendering:",
    },
    MarkerCheck {
        label: "Font display swap",
        pattern: "font-display: swap",
    },
    MarkerCheck {
        label: "Reduced motion support",
        pattern: "prefers-reduced-motion",
    },
    MarkerCheck {
        label: "Performance text rendering",
        pattern: "text-rendering: optimizeSpeed",
    },
];

/// Outcome of one marker check.
#[derive(Debug, Clone, Serialize)]
pub struct AuditCheck {
    pub label: String,
    pub pattern: String,
    pub found: bool,
}

/// Test each marker for presence in `content` (case-sensitive substring).
pub fn check_markers(content: &str, checks: &[MarkerCheck]) -> Vec<AuditCheck> {
    checks
        .iter()
        .map(|check| AuditCheck {
            label: check.label.to_string(),
            pattern: check.pattern.to_string(),
            found: content.contains(check.pattern),
        })
        .collect()
}
