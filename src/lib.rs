//! # Imgpress
//!
//! An image optimization and performance-audit pipeline for static sites.
//! Point it at a flat `images/` directory and it classifies every photo by
//! filename, re-encodes each one at a size appropriate for its role on the
//! page, and audits the results.
//!
//! # Architecture: Three Independent Stages
//!
//! Each stage reads the filesystem fresh and produces a structured result,
//! so stages can run in any combination:
//!
//! ```text
//! 1. Scan      images/           →  inventory        (classify + size up)
//! 2. Optimize  inventory         →  images/optimized/ (resize + re-encode)
//! 3. Audit     both directories  →  size + marker report
//! ```
//!
//! The audit deliberately re-scans from disk rather than trusting the
//! optimize stage's in-memory report: it must tell the truth about what is
//! actually on disk, including files optimized in a previous run or by hand.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — inventories the image directory and classifies each file by filename rules |
//! | [`transcode`] | Stage 2 — resizes and re-encodes every inventoried image into the output directory |
//! | [`audit`] | Stage 3 — size comparison between directories plus HTML/CSS performance-marker checks |
//! | [`fragment`] | Generates the `<img>` tag fragment (lazy loading, srcset) for the optimized paths |
//! | [`imaging`] | Image operations behind a backend trait: identify, resize, encode per codec |
//! | [`output`] | CLI output formatting — pure `format_*` functions over stage results |
//!
//! # Design Decisions
//!
//! ## Filename-Driven Classification
//!
//! There is no manifest and no sidecar metadata. A file's role (gallery
//! photo, logo, invitation banner) is decided by substring rules over its
//! name, checked in a fixed order with first match winning. This fits the
//! sites the tool targets: small, hand-curated image directories where
//! naming conventions already encode intent. See [`scan::classify`].
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling,
//! JPEG/PNG/WebP encoders) — no ImageMagick, no system binaries. Encoder
//! availability is detected once at startup; if any required encoder is
//! missing from the build, the tool prints manual-optimization guidance
//! instead of failing.
//!
//! ## Failure Isolation
//!
//! One corrupt image must not sink the batch. Every per-file error during
//! optimization is recorded and reported at the end; the run continues and
//! exits successfully with the partial results.
//!
//! ## Maud for the HTML Fragment
//!
//! The generated `<img>` fragment uses [Maud](https://maud.lambda.xyz/):
//! compile-time checked, auto-escaped, no template files to ship.

pub mod audit;
pub mod fragment;
pub mod imaging;
pub mod output;
pub mod scan;
pub mod transcode;
