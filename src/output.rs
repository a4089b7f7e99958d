//! CLI output formatting for all pipeline stages.
//!
//! Each stage returns a structured result object; this module is the only
//! place that turns results into text. Every stage has a `format_*` function
//! (returns `Vec<String>`, pure, no I/O) and a `print_*` wrapper that writes
//! to stdout, so tests can assert on lines without capturing output.
//!
//! ## Format
//!
//! ```text
//! Inventory (7 images, 14200KB)
//!     EC-244.jpg: 2100KB  timeline/gallery  → 800x600
//!     logo-ec.png: 180KB  logo  → 150w
//! Total: 14200KB (14MB)
//! Target: ~2840KB (80% reduction)
//!
//! Optimized
//!     EC-244.jpg: 2100KB → 140KB (93% reduction)
//!     broken.jpg: failed — Failed to decode ...
//! ```

use crate::audit::{AuditCheck, SizeAudit};
use crate::imaging::{kb, ResizeTarget};
use crate::scan::{inventory_total, ImageAsset};
use crate::transcode::BatchReport;

fn target_label(target: ResizeTarget) -> String {
    match target.height {
        Some(h) => format!("{}x{}", target.width, h),
        None => format!("{}w", target.width),
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the inventory report: per-file size, category, and resize target,
/// followed by the total and the projected 80%-reduction target.
pub fn format_scan_output(assets: &[ImageAsset]) -> Vec<String> {
    let total_kb = kb(inventory_total(assets));
    let mut lines = vec![format!("Inventory ({} images, {}KB)", assets.len(), total_kb)];

    for asset in assets {
        lines.push(format!(
            "    {}: {}KB  {}  \u{2192} {}",
            asset.file_name,
            kb(asset.size_bytes),
            asset.category.label(),
            target_label(asset.category.resize_target()),
        ));
    }

    lines.push(format!("Total: {}KB ({}MB)", total_kb, total_kb / 1024));
    lines.push(format!(
        "Target: ~{}KB (80% reduction)",
        (total_kb as f64 * 0.2).round() as u64
    ));
    lines
}

pub fn print_scan_output(assets: &[ImageAsset]) {
    for line in format_scan_output(assets) {
        println!("{}", line);
    }
}

// ============================================================================
// Transcode output
// ============================================================================

/// Format the batch report: one line per result, one per failure, totals last.
///
/// Negative reductions are surfaced as-is so a derivative that grew is
/// impossible to miss.
pub fn format_transcode_report(report: &BatchReport) -> Vec<String> {
    let mut lines = vec!["Optimized".to_string()];

    for result in &report.results {
        let reduction = match result.reduction_percent {
            Some(p) => format!("{}% reduction", p),
            None => "reduction n/a".to_string(),
        };
        lines.push(format!(
            "    {}: {}KB \u{2192} {}KB ({})",
            result.file_name,
            kb(result.original_size_bytes),
            kb(result.output_size_bytes),
            reduction,
        ));
    }

    for failure in &report.failures {
        lines.push(format!(
            "    {}: failed \u{2014} {}",
            failure.file_name, failure.message
        ));
    }

    lines.push(format!(
        "Total: {}KB \u{2192} {}KB ({} optimized, {} failed)",
        report.original_total_kb(),
        report.output_total_kb(),
        report.results.len(),
        report.failures.len(),
    ));
    lines
}

pub fn print_transcode_report(report: &BatchReport) {
    for line in format_transcode_report(report) {
        println!("{}", line);
    }
}

/// Next steps printed after a successful optimization run.
pub fn format_next_steps(fragment_path: &str) -> Vec<String> {
    vec![
        "Next steps:".to_string(),
        format!("    1. Replace image paths in the HTML with {}", fragment_path),
        "    2. Re-run the audit to verify the reductions".to_string(),
        "    3. Consider converting sources to WebP for further savings".to_string(),
    ]
}

// ============================================================================
// Guidance (encoder support unavailable)
// ============================================================================

/// Manual-optimization guidance, printed instead of transcoding when encoder
/// support is incomplete. Exits the pipeline without error.
pub fn format_guidance() -> Vec<String> {
    vec![
        "Image encoders unavailable in this build \u{2014} manual optimization steps:".to_string(),
        "    Recommended target sizes:".to_string(),
        "        Timeline and gallery photos: 800x600".to_string(),
        "        Logo: 150px width".to_string(),
        "        Invitation banner: 200px width".to_string(),
        "        Everything else: 1200x800".to_string(),
        "    Compress JPEGs to ~80% quality".to_string(),
        "    Online tools: TinyPNG, Squoosh.app".to_string(),
        "    Desktop tools: ImageOptim, FileOptimizer".to_string(),
        "    Command line: cwebp, mozjpeg, pngquant".to_string(),
    ]
}

pub fn print_guidance() {
    for line in format_guidance() {
        println!("{}", line);
    }
}

// ============================================================================
// Audit output
// ============================================================================

/// Format the size audit: per-file before/after, "not optimized yet" for
/// files without a counterpart, then the aggregate summary.
pub fn format_size_audit(audit: &SizeAudit) -> Vec<String> {
    let mut lines = vec!["Image audit".to_string()];

    for entry in &audit.entries {
        match (entry.optimized_bytes, entry.reduction_percent) {
            (Some(opt), Some(p)) => lines.push(format!(
                "    {}: {}KB \u{2192} {}KB ({}% reduction)",
                entry.file_name,
                kb(entry.original_bytes),
                kb(opt),
                p,
            )),
            (Some(opt), None) => lines.push(format!(
                "    {}: {}KB \u{2192} {}KB",
                entry.file_name,
                kb(entry.original_bytes),
                kb(opt),
            )),
            (None, _) => lines.push(format!(
                "    {}: {}KB (not optimized yet)",
                entry.file_name,
                kb(entry.original_bytes),
            )),
        }
    }

    lines.push("Summary:".to_string());
    lines.push(format!(
        "    Original total: {}KB ({}MB)",
        audit.original_total_kb(),
        audit.original_total_kb() / 1024
    ));
    lines.push(format!(
        "    Optimized total: {}KB ({}MB)",
        audit.optimized_total_kb(),
        audit.optimized_total_kb() / 1024
    ));
    match audit.totals.reduction_percent {
        Some(p) => lines.push(format!("    Total reduction: {}%", p)),
        None => lines.push("    Total reduction: n/a (nothing optimized yet)".to_string()),
    }
    lines
}

pub fn print_size_audit(audit: &SizeAudit) {
    for line in format_size_audit(audit) {
        println!("{}", line);
    }
}

/// Format one marker-check group (HTML or CSS) as found/missing lines.
pub fn format_marker_checks(heading: &str, checks: &[AuditCheck]) -> Vec<String> {
    let mut lines = vec![heading.to_string()];
    for check in checks {
        let status = if check.found { "found" } else { "missing" };
        lines.push(format!("    {}: {}", check.label, status));
    }
    lines
}

pub fn print_marker_checks(heading: &str, checks: &[AuditCheck]) {
    for line in format_marker_checks(heading, checks) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{check_markers, HTML_MARKERS};
    use crate::imaging::Codec;
    use crate::scan::{classify, Category};
    use crate::transcode::{TranscodeFailure, TranscodeResult};

    fn asset(name: &str, size_kb: u64) -> ImageAsset {
        ImageAsset {
            file_name: name.to_string(),
            size_bytes: size_kb * 1024,
            category: classify(name),
            format: Codec::Jpeg,
        }
    }

    #[test]
    fn scan_output_lists_category_and_target() {
        let lines = format_scan_output(&[asset("EC-244.jpg", 2100)]);
        assert_eq!(lines[0], "Inventory (1 images, 2100KB)");
        assert!(lines[1].contains("timeline/gallery"));
        assert!(lines[1].contains("800x600"));
    }

    #[test]
    fn scan_output_width_only_target_label() {
        let lines = format_scan_output(&[asset("logo.png", 180)]);
        assert!(lines[1].contains("150w"));
    }

    #[test]
    fn scan_output_projects_80_percent_target() {
        let lines = format_scan_output(&[asset("a.jpg", 1000)]);
        assert!(lines.contains(&"Target: ~200KB (80% reduction)".to_string()));
    }

    #[test]
    fn transcode_report_shows_reduction_and_failures() {
        let report = BatchReport {
            results: vec![TranscodeResult {
                file_name: "EC-244.jpg".to_string(),
                category: Category::TimelineGallery,
                output_path: "images/optimized/EC-244.jpg".into(),
                original_size_bytes: 1000 * 1024,
                output_size_bytes: 250 * 1024,
                reduction_percent: Some(75),
            }],
            failures: vec![TranscodeFailure {
                file_name: "broken.jpg".to_string(),
                message: "decode failed".to_string(),
            }],
        };

        let lines = format_transcode_report(&report);
        assert!(lines[1].contains("1000KB \u{2192} 250KB (75% reduction)"));
        assert!(lines[2].contains("broken.jpg: failed"));
        assert!(lines[3].contains("1 optimized, 1 failed"));
    }

    #[test]
    fn transcode_report_negative_reduction_visible() {
        let report = BatchReport {
            results: vec![TranscodeResult {
                file_name: "tiny.png".to_string(),
                category: Category::Other,
                output_path: "out/tiny.png".into(),
                original_size_bytes: 1024,
                output_size_bytes: 2048,
                reduction_percent: Some(-100),
            }],
            failures: vec![],
        };

        let lines = format_transcode_report(&report);
        assert!(lines[1].contains("(-100% reduction)"));
    }

    #[test]
    fn guidance_names_external_tools() {
        let lines = format_guidance();
        let joined = lines.join("\n");
        assert!(joined.contains("TinyPNG"));
        assert!(joined.contains("Squoosh.app"));
        assert!(joined.contains("150px width"));
    }

    #[test]
    fn marker_checks_format_found_and_missing() {
        let checks = check_markers(r#"<img loading="lazy">"#, HTML_MARKERS);
        let lines = format_marker_checks("HTML optimization check", &checks);
        assert_eq!(lines[0], "HTML optimization check");
        assert!(lines.iter().any(|l| l == "    Lazy loading: found"));
        assert!(lines
            .iter()
            .any(|l| l == "    Responsive images (srcset): missing"));
    }
}
