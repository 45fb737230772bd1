//! CLI binary for markpdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, drives the batch pipeline with a progress bar, and
//! prints the final summary.

use anyhow::{Context, Result};
use clap::Parser;
use markpdf::{
    process_batch_pdfs_with, BatchSummary, ConversionConfig, MarkpdfError, PageSeparator,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert one PDF (output lands in <parent_dir>_format/ next to it)
  markpdf document.pdf

  # Convert a whole directory tree, mirroring its structure
  markpdf ./scans

  # Choose the output root explicitly
  markpdf ./scans -o ./converted

  # Name the per-document image folder "img" instead of "assets"
  markpdf ./scans --image-dir img

  # Insert a horizontal rule between pages
  markpdf document.pdf --separator hr

  # Encrypted documents
  markpdf secret.pdf --password hunter2

  # Machine-readable summary
  markpdf ./scans --json > summary.json

OUTPUT LAYOUT:
  Input ./scans/sub/doc.pdf becomes:
    ./scans_format/sub/doc.md
    ./scans_format/sub/assets/doc-<page>-<index>.png

  Image links in the Markdown are relative (./assets/…), so the output
  tree can be moved or published as-is.

SETUP:
  markpdf needs the pdfium shared library. Install it (e.g. from
  bblanchon/pdfium-binaries) and place libpdfium next to the executable
  or on the system library path.
"#;

/// Convert PDF files and directory trees to Markdown with extracted images.
#[derive(Parser, Debug)]
#[command(
    name = "markpdf",
    version,
    about = "Convert PDF files and directory trees to Markdown with extracted images",
    long_about = "Convert PDF documents to Markdown by extracting the text and images they \
already contain and ordering them by position on the page. A directory input is walked \
recursively; its structure is mirrored into a sibling <name>_format/ output tree.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file or directory to scan recursively for *.pdf.
    input: PathBuf,

    /// Output root directory (default: <input_parent>/<input_name>_format).
    #[arg(short, long, env = "MARKPDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Name of the per-document image directory.
    #[arg(long, env = "MARKPDF_IMAGE_DIR", default_value = "assets")]
    image_dir: String,

    /// Page separator: none, hr, comment, or a custom string.
    #[arg(long, env = "MARKPDF_SEPARATOR", default_value = "none")]
    separator: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "MARKPDF_PASSWORD")]
    password: Option<String>,

    /// Print the summary as JSON instead of text.
    #[arg(long, env = "MARKPDF_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "MARKPDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MARKPDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MARKPDF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active; the
    // bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConversionConfig::builder()
        .image_dir_name(&cli.image_dir)
        .page_separator(parse_separator(&cli.separator));
    if let Some(ref out) = cli.output {
        builder = builder.output_root(out);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run the batch ────────────────────────────────────────────────────
    let bar = if show_progress {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = process_batch_pdfs_with(&cli.input, &config, |event| {
        if let Some(ref bar) = bar {
            if bar.length().unwrap_or(0) != event.total as u64 {
                bar.set_length(event.total as u64);
            }
            let name = event
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mark = if event.succeeded { green("✓") } else { red("✗") };
            bar.println(format!(
                "  {} [{}/{}] {}",
                mark, event.index, event.total, name
            ));
            bar.inc(1);
        } else if !cli.quiet && !cli.json {
            let mark = if event.succeeded { "ok" } else { "FAILED" };
            eprintln!("[{}/{}] {} … {}", event.index, event.total, event.path.display(), mark);
        }
    });

    if let Some(ref bar) = bar {
        bar.finish_and_clear();
    }

    let summary = match result {
        Ok(summary) => summary,
        Err(e @ MarkpdfError::InputNotFound { .. }) => {
            // Missing input aborts the run before any output is created.
            eprintln!("{} {e}", red("✘"));
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    // ── Summary ──────────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!("{}", dim(&"─".repeat(50)));
    if summary.total == 0 {
        println!("No PDF files found.");
        return;
    }
    println!(
        "{}  {} total, {} succeeded, {} failed",
        if summary.failed == 0 {
            green("✔")
        } else {
            red("⚠")
        },
        bold(&summary.total.to_string()),
        green(&summary.success.to_string()),
        if summary.failed == 0 {
            summary.failed.to_string()
        } else {
            red(&summary.failed.to_string())
        },
    );
    if !summary.failed_files.is_empty() {
        println!("\nFailed files:");
        for path in &summary.failed_files {
            println!("  - {}", path.display());
        }
    }
    println!("{}", dim(&"─".repeat(50)));
}

/// Parse `--separator` string into `PageSeparator`.
fn parse_separator(s: &str) -> PageSeparator {
    match s.to_lowercase().as_str() {
        "none" => PageSeparator::None,
        "hr" | "---" => PageSeparator::HorizontalRule,
        "comment" => PageSeparator::Comment,
        custom => PageSeparator::Custom(custom.to_string()),
    }
}
