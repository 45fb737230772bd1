//! Error types for the markpdf library.
//!
//! Only *fatal-to-document* (and fatal-to-run) conditions become an error
//! value. A single embedded image that fails to decode or write is logged
//! as a warning inside the extractor and skipped — losing one figure must
//! never abort a page, let alone a document. The batch driver in turn
//! isolates document-level errors: it records the failing path and moves on,
//! so the only error that stops a whole run is a missing input path.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the markpdf library.
#[derive(Debug, Error)]
pub enum MarkpdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The configured input path (file or directory) does not exist.
    #[error("Input path not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium returned an error extracting text from a specific page.
    #[error("Text extraction failed for page {page} of '{path}': {detail}")]
    PageTextFailed {
        path: PathBuf,
        page: usize,
        detail: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create an output directory or write the Markdown file.
    #[error("Failed to write output '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed during discovery.
    #[error("Failed to scan directory '{path}': {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install pdfium (e.g. from bblanchon/pdfium-binaries) and either place\n\
libpdfium next to the executable or make it available on the system\n\
library path."
    )]
    PdfiumBindingFailed(String),
}
