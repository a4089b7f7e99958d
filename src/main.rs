use clap::{Parser, Subcommand};
use imgpress::imaging::{EncoderSupport, Quality, RustBackend};
use imgpress::{audit, fragment, output, scan, transcode};
use std::path::{Path, PathBuf};

/// Shared flags for commands that re-encode images.
#[derive(clap::Args, Clone)]
struct EncodeArgs {
    /// JPEG quality for re-encoded images (0-100)
    #[arg(long, default_value_t = 80)]
    quality: u8,
}

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "imgpress")]
#[command(about = "Image optimization and performance-audit pipeline for static sites")]
#[command(long_about = "\
Image optimization and performance-audit pipeline for static sites

Point it at a flat images/ directory. Each file is classified by its name
and resized to fit its role on the page:

  Classification (first match wins, case-sensitive):
    'EC-' or 'L' in name   → timeline/gallery photo   → 800x600
    'logo' in name         → logo                     → 150px wide
    'you-are-invited'      → invitation banner        → 200px wide
    everything else        → other                    → 1200x800

Files whose names contain 'optimized' or 'webp' are skipped — they are
assumed to be prior outputs.

The audit compares the source and optimized directories byte-for-byte and
checks the site's HTML and CSS for performance markers (lazy loading,
preload hints, srcset, will-change, reduced-motion support).")]
#[command(version = version_string())]
struct Cli {
    /// Source image directory
    #[arg(long, default_value = "images", global = true)]
    images: PathBuf,

    /// Output directory for optimized images
    #[arg(long, default_value = "images/optimized", global = true)]
    output: PathBuf,

    /// Site HTML file checked by the audit
    #[arg(long, default_value = "index.html", global = true)]
    html: PathBuf,

    /// Site CSS file checked by the audit
    #[arg(long, default_value = "styles.css", global = true)]
    css: PathBuf,

    /// Path for the generated <img> tag fragment
    #[arg(long, default_value = "optimized-image-paths.html", global = true)]
    fragment: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inventory the image directory: classify, size up, project savings
    Scan {
        /// Emit the inventory as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Resize and re-encode every image into the output directory
    Optimize(EncodeArgs),
    /// Compare source and optimized sizes, check HTML/CSS performance markers
    Audit {
        /// Emit the size audit as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the full pipeline: scan → optimize → audit
    Run(EncodeArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { json } => {
            let Some(assets) = scan_or_skip(&cli.images)? else {
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&assets)?);
            } else {
                output::print_scan_output(&assets);
            }
        }
        Command::Optimize(ref encode_args) => {
            optimize(&cli, &encode_args)?;
        }
        Command::Audit { json } => {
            run_audit(&cli, json)?;
        }
        Command::Run(ref encode_args) => {
            println!("==> Stage 1: Scanning {}", cli.images.display());
            if !optimize(&cli, &encode_args)? {
                return Ok(());
            }
            println!("==> Stage 3: Auditing");
            run_audit(&cli, false)?;
        }
    }

    Ok(())
}

/// Scan the image directory, treating a missing directory as an empty,
/// successful run rather than an error.
fn scan_or_skip(images: &Path) -> Result<Option<Vec<scan::ImageAsset>>, scan::ScanError> {
    match scan::scan(images) {
        Ok(assets) => Ok(Some(assets)),
        Err(scan::ScanError::NotFound(dir)) => {
            println!("No image directory at {} — nothing to do", dir.display());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Scan + optimize + fragment. Returns false when the run ended early
/// without error (missing directory, missing encoders, empty inventory).
fn optimize(cli: &Cli, encode_args: &EncodeArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let support = EncoderSupport::detect();
    if !support.complete() {
        output::print_guidance();
        return Ok(false);
    }

    let Some(assets) = scan_or_skip(&cli.images)? else {
        return Ok(false);
    };
    output::print_scan_output(&assets);
    if assets.is_empty() {
        return Ok(false);
    }

    println!("==> Stage 2: Optimizing into {}", cli.output.display());
    let backend = RustBackend::new();
    let quality = Quality::new(encode_args.quality);
    let report = transcode::transcode_batch(&backend, &assets, &cli.images, &cli.output, quality)?;
    output::print_transcode_report(&report);

    let prefix = cli.output.display().to_string();
    fragment::write_fragment(&cli.fragment, &assets, &prefix)?;
    println!("Wrote image tag fragment to {}", cli.fragment.display());
    for line in output::format_next_steps(&cli.fragment.display().to_string()) {
        println!("{}", line);
    }
    Ok(true)
}

/// Size audit plus marker checks over whichever site files exist.
fn run_audit(cli: &Cli, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match audit::audit_sizes(&cli.images, &cli.output) {
        Ok(size_audit) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&size_audit)?);
            } else {
                output::print_size_audit(&size_audit);
            }
        }
        Err(audit::AuditError::NotFound(dir)) => {
            println!("No image directory at {} — skipping size audit", dir.display());
        }
        Err(err) => return Err(err.into()),
    }

    if json {
        return Ok(());
    }

    if let Ok(html) = std::fs::read_to_string(&cli.html) {
        let checks = audit::check_markers(&html, audit::HTML_MARKERS);
        output::print_marker_checks("HTML optimization check", &checks);
    }
    if let Ok(css) = std::fs::read_to_string(&cli.css) {
        let checks = audit::check_markers(&css, audit::CSS_MARKERS);
        output::print_marker_checks("CSS optimization check", &checks);
    }
    Ok(())
}
