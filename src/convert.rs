//! Single-document conversion entry point.
//!
//! Orchestrates the per-page pipeline: ensure output directories exist, open
//! the document via pdfium, extract and render each page in order, then join
//! the page outputs and write the Markdown file whole (an overwrite, not an
//! append). The pdfium document handle is dropped on every exit path,
//! including early error returns, so a failing page never leaks an open
//! document.

use crate::config::{ConversionConfig, PageSeparator};
use crate::error::MarkpdfError;
use crate::pipeline::{extract, markdown};
use pdfium_render::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Counts reported after one successful document conversion.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DocumentReport {
    /// Number of pages processed.
    pub pages: usize,
    /// Number of image files written to the image directory.
    pub images_written: usize,
}

/// Bind to the pdfium library, preferring a copy next to the executable and
/// falling back to the system library path.
///
/// Binding is not free; callers converting more than one document should
/// bind once and reuse the handle via [`convert_document_with`].
pub(crate) fn bind_pdfium() -> Result<Pdfium, MarkpdfError> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| MarkpdfError::PdfiumBindingFailed(format!("{e:?}")))
}

/// Map a pdfium load failure to a specific error, distinguishing password
/// problems from structural corruption.
fn map_load_error(e: PdfiumError, path: &Path, password: Option<&str>) -> MarkpdfError {
    let detail = format!("{e:?}");
    if detail.contains("Password") || detail.contains("password") {
        if password.is_some() {
            MarkpdfError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            MarkpdfError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        MarkpdfError::CorruptPdf {
            path: path.to_path_buf(),
            detail,
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<(), MarkpdfError> {
    std::fs::create_dir_all(dir).map_err(|source| MarkpdfError::OutputWriteFailed {
        path: dir.to_path_buf(),
        source,
    })
}

/// Convert one PDF document to a Markdown file plus extracted images.
///
/// Binds pdfium, converts, and releases the binding — convenient for
/// one-off conversions. Batch runs should bind once and call
/// [`convert_document_with`] per document instead.
pub fn convert_document(
    doc_path: &Path,
    markdown_path: &Path,
    image_dir: &Path,
    config: &ConversionConfig,
) -> Result<DocumentReport, MarkpdfError> {
    let pdfium = bind_pdfium()?;
    convert_document_with(&pdfium, doc_path, markdown_path, image_dir, config)
}

/// Convert one PDF document using an existing pdfium binding.
///
/// * `markdown_path` — where the `.md` file is written (parent directories
///   are created as needed; existing content is overwritten).
/// * `image_dir` — where image files land; its base name is what the emitted
///   relative image links use, so moving the whole output tree keeps links
///   intact.
///
/// # Errors
/// Fatal per-document failures only: unreadable/corrupt PDF, wrong password,
/// text-layer extraction failure, or I/O errors writing the Markdown file.
/// Individual bad images are skipped with a warning, never an error.
pub fn convert_document_with(
    pdfium: &Pdfium,
    doc_path: &Path,
    markdown_path: &Path,
    image_dir: &Path,
    config: &ConversionConfig,
) -> Result<DocumentReport, MarkpdfError> {
    if let Some(parent) = markdown_path.parent() {
        ensure_dir(parent)?;
    }
    ensure_dir(image_dir)?;

    // Relative link base: the image folder's name, not its full path.
    let image_folder_name = image_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.image_dir_name.clone());
    let doc_stem = doc_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let document = pdfium
        .load_pdf_from_file(doc_path, config.password.as_deref())
        .map_err(|e| map_load_error(e, doc_path, config.password.as_deref()))?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    debug!("Opened '{}': {} pages", doc_path.display(), total_pages);

    let mut page_outputs = Vec::with_capacity(total_pages);
    let mut images_written = 0usize;

    for (page_index, page) in pages.iter().enumerate() {
        let elements =
            extract::collect_page_elements(&page, image_dir, page_index, &doc_stem, doc_path)?;
        images_written += elements
            .iter()
            .filter(|e| matches!(e, extract::PageElement::Image { .. }))
            .count();
        page_outputs.push(markdown::elements_to_markdown(&elements, &image_folder_name));
    }

    // Release the document handle before touching the output file.
    drop(document);

    let md_text = assemble_pages(&page_outputs, &config.page_separator);
    std::fs::write(markdown_path, md_text).map_err(|source| MarkpdfError::OutputWriteFailed {
        path: markdown_path.to_path_buf(),
        source,
    })?;

    info!(
        "Converted '{}' → '{}' ({} pages, {} images)",
        doc_path.display(),
        markdown_path.display(),
        total_pages,
        images_written
    );

    Ok(DocumentReport {
        pages: total_pages,
        images_written,
    })
}

/// Join page outputs with the configured separator (default: blank line).
fn assemble_pages(pages: &[String], separator: &PageSeparator) -> String {
    let mut text = String::new();
    for (i, page_md) in pages.iter().enumerate() {
        if i > 0 {
            text.push_str(&separator.render(i + 1));
        }
        text.push_str(page_md);
    }
    text
}
