//! Output path planning.
//!
//! Given an input path (file or directory), derives the output root
//! (`<input_parent>/<input_name>_format`) and, per document, the mirrored
//! Markdown file path and image directory. Pure path arithmetic — the only
//! filesystem access is a read-only file-vs-directory query; nothing is
//! created here.

use std::path::{Path, PathBuf};

/// Output locations for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Full path of the Markdown file (`<mirrored_dir>/<stem>.md`).
    pub markdown_path: PathBuf,
    /// Full path of the image directory (`<mirrored_dir>/<image_dir_name>`).
    pub image_dir: PathBuf,
}

/// Normalise a path to absolute without resolving symlinks.
fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn sibling_format_dir(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match dir.parent() {
        Some(parent) => parent.join(format!("{name}_format")),
        None => PathBuf::from(format!("{name}_format")),
    }
}

/// Derive the output root for an input path.
///
/// * File input `/x/y/doc.pdf` → `/x/y_format` (sibling of the file's
///   parent directory).
/// * Directory input `/x/y` → `/x/y_format`.
///
/// Deterministic: the same input always yields the same output.
pub fn generate_output_path(input: &Path) -> PathBuf {
    let input = absolutize(input);
    let base_dir = if input.is_file() {
        input.parent().map(Path::to_path_buf).unwrap_or(input)
    } else {
        input
    };
    sibling_format_dir(&base_dir)
}

/// Compute a document's output paths, mirroring its directory nesting.
///
/// The document's path relative to `input_root` (a file input root counts as
/// its own parent directory) is replayed under `output_root`:
/// `<root>/sub/doc.pdf` → `<out>/sub/doc.md` + `<out>/sub/<image_dir_name>`.
///
/// Discovery guarantees `input_root` is an ancestor of `doc_path`; if it is
/// not, the document lands directly under `output_root`.
pub fn calculate_output_paths(
    doc_path: &Path,
    input_root: &Path,
    output_root: &Path,
    image_dir_name: &str,
) -> OutputPaths {
    let doc_path = absolutize(doc_path);
    let mut input_root = absolutize(input_root);
    if input_root.is_file() {
        if let Some(parent) = input_root.parent() {
            input_root = parent.to_path_buf();
        }
    }

    let rel_dir = doc_path
        .strip_prefix(&input_root)
        .ok()
        .and_then(|rel| rel.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let output_dir = output_root.join(rel_dir);
    let stem = doc_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    OutputPaths {
        markdown_path: output_dir.join(format!("{stem}.md")),
        image_dir: output_dir.join(image_dir_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn output_root_for_directory_input() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("scans");
        fs::create_dir(&input).unwrap();

        let out = generate_output_path(&input);
        assert_eq!(out, tmp.path().join("scans_format"));
    }

    #[test]
    fn output_root_for_file_input_uses_parent_name() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("papers");
        fs::create_dir(&dir).unwrap();
        let file = dir.join("doc.pdf");
        fs::write(&file, b"%PDF-1.4").unwrap();

        let out = generate_output_path(&file);
        assert_eq!(out, tmp.path().join("papers_format"));
    }

    #[test]
    fn output_root_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("x");
        fs::create_dir(&input).unwrap();
        assert_eq!(generate_output_path(&input), generate_output_path(&input));
    }

    #[test]
    fn mirrors_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("in");
        fs::create_dir_all(root.join("sub")).unwrap();
        let doc = root.join("sub/doc.pdf");
        fs::write(&doc, b"%PDF-1.4").unwrap();
        let out_root = tmp.path().join("out");

        let paths = calculate_output_paths(&doc, &root, &out_root, "assets");
        assert_eq!(paths.markdown_path, out_root.join("sub/doc.md"));
        assert_eq!(paths.image_dir, out_root.join("sub/assets"));
    }

    #[test]
    fn top_level_document_lands_in_output_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("in");
        fs::create_dir(&root).unwrap();
        let doc = root.join("doc.pdf");
        fs::write(&doc, b"%PDF-1.4").unwrap();
        let out_root = tmp.path().join("out");

        let paths = calculate_output_paths(&doc, &root, &out_root, "assets");
        assert_eq!(paths.markdown_path, out_root.join("doc.md"));
        assert_eq!(paths.image_dir, out_root.join("assets"));
    }

    #[test]
    fn file_input_root_counts_as_its_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("doc.pdf");
        fs::write(&doc, b"%PDF-1.4").unwrap();
        let out_root = tmp.path().join("out");

        // Input root is the file itself, as in single-file mode.
        let paths = calculate_output_paths(&doc, &doc, &out_root, "assets");
        assert_eq!(paths.markdown_path, out_root.join("doc.md"));
    }

    #[test]
    fn custom_image_dir_name() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("in");
        fs::create_dir(&root).unwrap();
        let doc = root.join("doc.pdf");
        fs::write(&doc, b"%PDF-1.4").unwrap();

        let paths = calculate_output_paths(&doc, &root, Path::new("/out"), "img");
        assert_eq!(paths.image_dir, PathBuf::from("/out/img"));
    }
}
