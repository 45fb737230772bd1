//! Markdown rendering: map an ordered element list to Markdown text.
//!
//! The heading/emphasis markup is guessed from each line's length and
//! trailing punctuation alone — no font or layout information is consulted.
//! The thresholds (80 chars for numbered headings, 50 for bold labels) and
//! the punctuation sets are tuning constants carried over unchanged for
//! output compatibility; short ordinary sentences will be misclassified as
//! labels and long headings as body text, and that is accepted.
//!
//! Line lengths are measured in characters, not bytes, so CJK text is
//! weighted the same as Latin text.

use crate::pipeline::extract::PageElement;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading list-style number: digits followed by `.` or the ideographic
/// comma `、`.
static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.、]").unwrap());

/// Sentence-terminating punctuation (CJK and Latin) that disqualifies a
/// short line from being treated as a title/label.
const TERMINAL_PUNCT: [char; 4] = ['，', '。', ',', '.'];

/// Render one trimmed, non-empty text line.
fn render_line(line: &str) -> String {
    // Already-Markdown heading: pass through, surrounded by blank lines.
    if line.starts_with('#') {
        return format!("\n{line}\n");
    }

    let char_len = line.chars().count();

    // Numbered heading: "1. Introduction", "3、概要" and similar.
    if RE_NUMBERED.is_match(line) && char_len < 80 {
        return format!("\n### {line}\n");
    }

    // Short line without terminal punctuation: probably a title or label.
    let terminated = line
        .chars()
        .next_back()
        .map(|c| TERMINAL_PUNCT.contains(&c))
        .unwrap_or(false);
    if char_len < 50 && !terminated {
        return format!("\n**{line}**\n");
    }

    line.to_string()
}

/// Convert a page's position-ordered elements to Markdown.
///
/// `image_folder_name` is the base name of the image directory; image
/// references are emitted relative (`![](./<folder>/<file>)`) so the output
/// tree stays portable. Lines are joined with `\n`; callers join pages with
/// the configured page separator.
pub fn elements_to_markdown(elements: &[PageElement], image_folder_name: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for element in elements {
        match element {
            PageElement::Text { content, .. } => {
                for raw in content.split('\n') {
                    let line = raw.trim();
                    if line.is_empty() {
                        lines.push(String::new());
                        continue;
                    }
                    lines.push(render_line(line));
                }
            }
            PageElement::Image { filename, .. } => {
                lines.push(format!("\n![](./{image_folder_name}/{filename})\n"));
            }
        }
    }

    lines.join("\n")
}
