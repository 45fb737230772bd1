//! Page element extraction: text blocks and embedded images with positions.
//!
//! pdfium reports geometry in a bottom-left-origin coordinate system with Y
//! increasing upward. Everything here is flipped to a top-left origin
//! (`y = page_height - pdfium_y`) so that sorting ascending by `y0` gives
//! top-to-bottom reading order, ties broken left-to-right by `x0`. That sort
//! is the sole substitute for true reading order; it is knowingly wrong for
//! multi-column layouts.
//!
//! Images are written to disk as a side effect of extraction, one file per
//! placed image object, named `<stem>-<page>-<index>.png`. A single image
//! that fails to decode or write is logged and skipped — it never aborts the
//! page.

use crate::error::MarkpdfError;
use image::ImageFormat;
use pdfium_render::prelude::*;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, warn};

/// Bounding box in top-left-origin page coordinates (points).
///
/// Used solely for ordering elements; never persisted to output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// One positioned element on a page: a text block or a saved image.
#[derive(Debug, Clone, PartialEq)]
pub enum PageElement {
    /// A block of extracted text (already trimmed, non-empty).
    Text { content: String, bbox: BBox },
    /// An embedded image, written to disk under `filename`.
    Image { filename: String, bbox: BBox },
}

impl PageElement {
    /// The element's bounding box, used for position ordering.
    pub fn bbox(&self) -> BBox {
        match self {
            PageElement::Text { bbox, .. } | PageElement::Image { bbox, .. } => *bbox,
        }
    }
}

/// Flip pdfium's bottom-up coordinates into a top-left-origin box.
fn flipped_bbox(left: f32, bottom: f32, right: f32, top: f32, page_height: f32) -> BBox {
    BBox {
        x0: left,
        y0: page_height - top,
        x1: right,
        y1: page_height - bottom,
    }
}

/// Sort elements into reading order: ascending `y0`, ties by ascending `x0`.
///
/// The sort is stable, so repeated runs over the same input yield the same
/// sequence. `partial_cmp` falls back to `Equal` for non-finite coordinates.
pub fn sort_elements(elements: &mut [PageElement]) {
    elements.sort_by(|a, b| {
        let (ba, bb) = (a.bbox(), b.bbox());
        ba.y0
            .partial_cmp(&bb.y0)
            .unwrap_or(Ordering::Equal)
            .then(ba.x0.partial_cmp(&bb.x0).unwrap_or(Ordering::Equal))
    });
}

/// Extract all elements of one page, writing embedded images to `image_dir`.
///
/// Returns the position-sorted element sequence. `doc_stem` and `page_index`
/// feed the generated image filenames
/// (`<doc_stem>-<page_index>-<image_index>.png`, `image_index` zero-based
/// within this page's image list).
///
/// # Errors
/// Only a failure to obtain the page's text layer is fatal. Per-image decode
/// or write failures are logged as warnings and skipped.
pub fn collect_page_elements(
    page: &PdfPage<'_>,
    image_dir: &Path,
    page_index: usize,
    doc_stem: &str,
    doc_path: &Path,
) -> Result<Vec<PageElement>, MarkpdfError> {
    let page_height = page.height().value;
    let mut elements = Vec::new();

    // Text blocks. Segments with empty trimmed content are dropped.
    let text = page.text().map_err(|e| MarkpdfError::PageTextFailed {
        path: doc_path.to_path_buf(),
        page: page_index,
        detail: format!("{e:?}"),
    })?;

    for segment in text.segments().iter() {
        let content = segment.text();
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        let bounds = segment.bounds();
        elements.push(PageElement::Text {
            content: content.to_string(),
            bbox: flipped_bbox(
                bounds.left().value,
                bounds.bottom().value,
                bounds.right().value,
                bounds.top().value,
                page_height,
            ),
        });
    }

    // Embedded images. `image_index` counts image objects only, matching the
    // position of the image within the page's image list.
    let mut image_index = 0usize;
    for object in page.objects().iter() {
        let Some(image) = object.as_image_object() else {
            continue;
        };
        let index = image_index;
        image_index += 1;

        // An image whose placement cannot be resolved cannot be ordered;
        // skip it without writing anything.
        let bounds = match object.bounds() {
            Ok(b) => b,
            Err(e) => {
                warn!(
                    "Skipping unplaced image (page {}, image {}) in '{}': {:?}",
                    page_index,
                    index,
                    doc_path.display(),
                    e
                );
                continue;
            }
        };

        let decoded = match image.get_raw_image() {
            Ok(img) => img,
            Err(e) => {
                warn!(
                    "Failed to decode image (page {}, image {}) in '{}': {:?}",
                    page_index,
                    index,
                    doc_path.display(),
                    e
                );
                continue;
            }
        };

        let filename = format!("{doc_stem}-{page_index}-{index}.png");
        let target = image_dir.join(&filename);
        if let Err(e) = decoded.save_with_format(&target, ImageFormat::Png) {
            warn!(
                "Failed to write image (page {}, image {}) to '{}': {}",
                page_index,
                index,
                target.display(),
                e
            );
            continue;
        }

        elements.push(PageElement::Image {
            filename,
            bbox: flipped_bbox(
                bounds.left().value,
                bounds.bottom().value,
                bounds.right().value,
                bounds.top().value,
                page_height,
            ),
        });
    }

    sort_elements(&mut elements);
    debug!(
        "Page {}: {} elements ({} images written)",
        page_index,
        elements.len(),
        elements
            .iter()
            .filter(|e| matches!(e, PageElement::Image { .. }))
            .count()
    );
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_at(y0: f32, x0: f32) -> PageElement {
        PageElement::Text {
            content: format!("t-{y0}-{x0}"),
            bbox: BBox {
                x0,
                y0,
                x1: x0 + 10.0,
                y1: y0 + 10.0,
            },
        }
    }

    fn image_at(y0: f32, x0: f32) -> PageElement {
        PageElement::Image {
            filename: format!("i-{y0}-{x0}.png"),
            bbox: BBox {
                x0,
                y0,
                x1: x0 + 10.0,
                y1: y0 + 10.0,
            },
        }
    }

    #[test]
    fn sorts_top_to_bottom() {
        let mut elements = vec![text_at(300.0, 0.0), image_at(100.0, 0.0), text_at(200.0, 0.0)];
        sort_elements(&mut elements);
        let ys: Vec<f32> = elements.iter().map(|e| e.bbox().y0).collect();
        assert_eq!(ys, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn ties_break_left_to_right() {
        let mut elements = vec![text_at(50.0, 200.0), image_at(50.0, 10.0), text_at(50.0, 100.0)];
        sort_elements(&mut elements);
        let xs: Vec<f32> = elements.iter().map(|e| e.bbox().x0).collect();
        assert_eq!(xs, vec![10.0, 100.0, 200.0]);
    }

    #[test]
    fn sort_is_deterministic() {
        let original = vec![
            text_at(10.0, 5.0),
            image_at(10.0, 5.0),
            text_at(2.0, 9.0),
            image_at(7.0, 1.0),
        ];
        let mut first = original.clone();
        let mut second = original;
        sort_elements(&mut first);
        sort_elements(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn stable_for_identical_boxes() {
        // Two elements with identical positions keep their insertion order.
        let mut elements = vec![
            PageElement::Text {
                content: "first".into(),
                bbox: BBox { x0: 0.0, y0: 0.0, x1: 1.0, y1: 1.0 },
            },
            PageElement::Text {
                content: "second".into(),
                bbox: BBox { x0: 0.0, y0: 0.0, x1: 1.0, y1: 1.0 },
            },
        ];
        sort_elements(&mut elements);
        match &elements[0] {
            PageElement::Text { content, .. } => assert_eq!(content, "first"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn coordinate_flip() {
        // A box near the top of a 800pt page (pdfium top=790, bottom=780)
        // should get a small y0 after flipping.
        let bbox = flipped_bbox(10.0, 780.0, 110.0, 790.0, 800.0);
        assert_eq!(bbox.y0, 10.0);
        assert_eq!(bbox.y1, 20.0);
        assert_eq!(bbox.x0, 10.0);
        assert_eq!(bbox.x1, 110.0);
    }
}
