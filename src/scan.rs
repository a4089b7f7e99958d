//! Image inventory and classification.
//!
//! Stage 1 of the pipeline. Scans a flat image directory and produces an
//! ordered list of [`ImageAsset`] records, each classified into a purpose
//! category by filename.
//!
//! ## Directory layout
//!
//! ```text
//! images/                 # Source root (flat — subdirectories are ignored)
//! ├── logo-ec.png         # → Logo
//! ├── you-are-invited.PNG # → Invitation
//! ├── EC-244.jpg          # → TimelineGallery
//! ├── L1-EC-336.jpeg      # → TimelineGallery
//! ├── venue-map.jpg       # → Other
//! └── optimized/          # Output directory — never scanned as input
//! ```
//!
//! ## Classification
//!
//! Classification is an explicit ordered rule list evaluated in sequence:
//! the first rule whose token appears in the filename wins, ties broken by
//! rule order. Filenames matching none of the rules fall back to
//! [`Category::Other`]. The token match is a plain case-sensitive substring
//! test, same as the naming convention it encodes.
//!
//! ## Exclusions
//!
//! Files whose name contains `optimized` or `webp` are treated as already
//! converted artifacts and skipped. The `webp` marker is a naming convention,
//! not format detection: a file merely named `webparty.jpg` is also skipped.

use crate::imaging::{Codec, ResizeTarget};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Purpose category of an image, driving its resize target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Logo,
    Invitation,
    TimelineGallery,
    Other,
}

impl Category {
    /// Resize target for this category.
    ///
    /// Timeline/gallery photos get a fixed 800x600 crop, logos and the
    /// invitation banner get width-only targets that preserve aspect ratio,
    /// everything else gets a generous 1200x800.
    pub fn resize_target(self) -> ResizeTarget {
        match self {
            Category::TimelineGallery => ResizeTarget::exact(800, 600),
            Category::Logo => ResizeTarget::width_only(150),
            Category::Invitation => ResizeTarget::width_only(200),
            Category::Other => ResizeTarget::exact(1200, 800),
        }
    }

    /// Display label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Logo => "logo",
            Category::Invitation => "invitation",
            Category::TimelineGallery => "timeline/gallery",
            Category::Other => "other",
        }
    }
}

/// One classification rule: a filename token mapped to a category.
struct ClassifyRule {
    token: &'static str,
    category: Category,
}

/// Ordered rule list — first match wins.
///
/// The bare `L` token is deliberately broad: gallery exports are named
/// `L1-…`, `L2-…` and so on. It also means any filename containing a capital
/// L classifies as timeline/gallery before later rules are consulted.
const CLASSIFY_RULES: &[ClassifyRule] = &[
    ClassifyRule {
        token: "EC-",
        category: Category::TimelineGallery,
    },
    ClassifyRule {
        token: "L",
        category: Category::TimelineGallery,
    },
    ClassifyRule {
        token: "logo",
        category: Category::Logo,
    },
    ClassifyRule {
        token: "you-are-invited",
        category: Category::Invitation,
    },
];

/// Classify a filename into its purpose category.
pub fn classify(file_name: &str) -> Category {
    CLASSIFY_RULES
        .iter()
        .find(|rule| file_name.contains(rule.token))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// A source image discovered by the scan.
///
/// Constructed fresh on every invocation and discarded after the run —
/// nothing about an asset is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ImageAsset {
    pub file_name: String,
    pub size_bytes: u64,
    pub category: Category,
    pub format: Codec,
}

/// Markers indicating a file is already a converted/optimized artifact.
const EXCLUDE_MARKERS: &[&str] = &["optimized", "webp"];

fn is_excluded(file_name: &str) -> bool {
    EXCLUDE_MARKERS.iter().any(|m| file_name.contains(m))
}

/// Scan a flat directory for image assets.
///
/// Returns one [`ImageAsset`] per file with a recognized extension
/// (case-insensitive jpg/jpeg/png/webp), ordered by filename. Subdirectories
/// (including the output directory) and already-converted artifacts are
/// skipped. Read-only: the scan never writes anything.
///
/// Fails with [`ScanError::NotFound`] if the directory does not exist —
/// callers gate downstream steps on this.
pub fn scan(dir: &Path) -> Result<Vec<ImageAsset>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotFound(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut assets = Vec::new();
    for path in paths {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        if is_excluded(&file_name) {
            continue;
        }
        let format = match path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Codec::from_extension)
        {
            Some(codec) => codec,
            None => continue,
        };
        let size_bytes = fs::metadata(&path)?.len();
        assets.push(ImageAsset {
            category: classify(&file_name),
            file_name,
            size_bytes,
            format,
        });
    }

    Ok(assets)
}

/// Sum of asset sizes in bytes, for the inventory report.
pub fn inventory_total(assets: &[ImageAsset]) -> u64 {
    assets.iter().map(|a| a.size_bytes).sum()
}
