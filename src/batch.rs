//! Batch driver: discover documents, convert each with failure isolation,
//! aggregate a summary.
//!
//! Each document's conversion is independent — it writes to a disjoint
//! output subtree — so one failing document never affects the rest of the
//! run. The driver therefore records the failure and continues; the only
//! error it propagates is a missing input path, before any output directory
//! is created. The pdfium library is bound once per run and shared across
//! all documents.

use crate::config::ConversionConfig;
use crate::convert::{bind_pdfium, convert_document_with};
use crate::discover::find_all_pdfs;
use crate::error::MarkpdfError;
use crate::paths::{calculate_output_paths, generate_output_path};
use pdfium_render::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Aggregate result of a batch run.
///
/// Invariant: `total == success + failed` and `failed_files.len() == failed`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Number of documents discovered.
    pub total: usize,
    /// Documents converted successfully.
    pub success: usize,
    /// Documents that failed.
    pub failed: usize,
    /// Source paths of the failed documents, in processing order.
    pub failed_files: Vec<PathBuf>,
}

/// Per-document progress event, fired after each conversion attempt.
#[derive(Debug)]
pub struct DocumentEvent<'a> {
    /// 1-based position in the batch.
    pub index: usize,
    /// Total documents in the batch.
    pub total: usize,
    /// Source path of the document.
    pub path: &'a Path,
    /// Whether the conversion succeeded.
    pub succeeded: bool,
}

/// Convert one document with failure isolation.
///
/// Any conversion error is logged and swallowed into a `false` return so the
/// batch loop can simply continue. Partially written outputs of a failed
/// document are left in place (no rollback).
pub fn process_single_pdf(
    pdfium: &Pdfium,
    doc_path: &Path,
    markdown_path: &Path,
    image_dir: &Path,
    config: &ConversionConfig,
) -> bool {
    match convert_document_with(pdfium, doc_path, markdown_path, image_dir, config) {
        Ok(_) => true,
        Err(e) => {
            error!("Failed to convert '{}': {}", doc_path.display(), e);
            false
        }
    }
}

/// Run the batch pipeline over `input` (a PDF file or a directory tree).
///
/// The output root is `config.output_root` when set, otherwise derived from
/// the input path (`<input_parent>/<input_name>_format`). Documents are
/// processed in discovery (sorted) order.
///
/// # Errors
/// Only a nonexistent input path is an error; an input with no PDFs under it
/// yields an all-zero summary.
pub fn process_batch_pdfs(
    input: &Path,
    config: &ConversionConfig,
) -> Result<BatchSummary, MarkpdfError> {
    process_batch_pdfs_with(input, config, |_| {})
}

/// Like [`process_batch_pdfs`], invoking `observe` after each document.
///
/// The observer is how the CLI drives its progress bar without the library
/// knowing anything about terminals.
pub fn process_batch_pdfs_with(
    input: &Path,
    config: &ConversionConfig,
    mut observe: impl FnMut(&DocumentEvent<'_>),
) -> Result<BatchSummary, MarkpdfError> {
    if !input.exists() {
        return Err(MarkpdfError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let output_root = config
        .output_root
        .clone()
        .unwrap_or_else(|| generate_output_path(input));

    let pdf_files = find_all_pdfs(input)?;
    if pdf_files.is_empty() {
        info!("No PDF files found under '{}'", input.display());
        return Ok(BatchSummary::default());
    }

    info!(
        "Found {} PDF file(s), output root '{}'",
        pdf_files.len(),
        output_root.display()
    );

    let mut summary = BatchSummary {
        total: pdf_files.len(),
        ..Default::default()
    };

    // One pdfium binding for the whole run. A binding failure fails every
    // document (each recorded in the summary), not the run itself.
    let engine = bind_pdfium();

    for (i, doc_path) in pdf_files.iter().enumerate() {
        let paths = calculate_output_paths(doc_path, input, &output_root, &config.image_dir_name);
        let succeeded = match &engine {
            Ok(pdfium) => process_single_pdf(
                pdfium,
                doc_path,
                &paths.markdown_path,
                &paths.image_dir,
                config,
            ),
            Err(e) => {
                error!("Failed to convert '{}': {}", doc_path.display(), e);
                false
            }
        };

        if succeeded {
            summary.success += 1;
        } else {
            summary.failed += 1;
            summary.failed_files.push(doc_path.clone());
        }

        observe(&DocumentEvent {
            index: i + 1,
            total: pdf_files.len(),
            path: doc_path,
            succeeded,
        });
    }

    Ok(summary)
}
