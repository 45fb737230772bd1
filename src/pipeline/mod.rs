//! Pipeline stages for PDF-to-Markdown conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! page ──▶ extract ──▶ markdown
//! (pdfium)  (elements)  (text)
//! ```
//!
//! 1. [`extract`]  — pull text blocks and embedded images out of one page,
//!    write image files, and order everything by position
//! 2. [`markdown`] — map the ordered element list to Markdown text using
//!    line-level heading/emphasis heuristics

pub mod extract;
pub mod markdown;
