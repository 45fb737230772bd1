//! # markpdf
//!
//! Convert PDF documents to Markdown, extracting embedded raster images and
//! reconstructing reading order from geometric position.
//!
//! ## How it works
//!
//! Rather than rasterising pages or running OCR, this crate pulls the text
//! blocks and embedded images a PDF already contains (via pdfium), orders
//! them top-to-bottom / left-to-right by bounding box, and renders the
//! sequence as Markdown. Heading and emphasis markup is guessed from line
//! length and trailing punctuation — deliberately simple heuristics that
//! work well on report-style documents and make no attempt at multi-column
//! layouts.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input path
//!  │
//!  ├─ 1. Discover  walk the tree for *.pdf (sorted, hidden files excluded)
//!  ├─ 2. Plan      mirror the directory structure under <input>_format/
//!  ├─ 3. Extract   per page: text blocks + images with bounding boxes,
//!  │               image bytes written to <dir>/assets/
//!  ├─ 4. Order     sort elements by (y0, x0) — the reading-order heuristic
//!  ├─ 5. Render    line heuristics → headings / bold labels / paragraphs
//!  └─ 6. Report    per-document isolation, aggregate success/failure counts
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use markpdf::{process_batch_pdfs, ConversionConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let summary = process_batch_pdfs(Path::new("./scans"), &config)?;
//!     println!("{}/{} converted", summary.success, summary.total);
//!     for path in &summary.failed_files {
//!         eprintln!("failed: {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Output layout for an input directory `./scans`:
//!
//! ```text
//! scans_format/
//! ├── report.md
//! ├── assets/
//! │   ├── report-0-0.png
//! │   └── report-3-1.png
//! └── sub/
//!     ├── notes.md
//!     └── assets/…
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `markpdf` binary (clap + anyhow + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! markpdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod convert;
pub mod discover;
pub mod error;
pub mod paths;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{process_batch_pdfs, process_batch_pdfs_with, BatchSummary, DocumentEvent};
pub use config::{ConversionConfig, ConversionConfigBuilder, PageSeparator};
pub use convert::{convert_document, convert_document_with, DocumentReport};
pub use discover::find_all_pdfs;
pub use error::MarkpdfError;
pub use paths::{calculate_output_paths, generate_output_path, OutputPaths};
pub use pipeline::extract::{BBox, PageElement};
pub use pipeline::markdown::elements_to_markdown;
