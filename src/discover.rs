//! PDF discovery: enumerate candidate documents under an input path.
//!
//! A file input is its own one-element candidate list; a directory is walked
//! recursively. Only files with a case-sensitive `.pdf` extension whose name
//! does not start with `.` qualify. The result is absolute paths in sorted
//! order so batch runs are reproducible — the ordering (and therefore the
//! generated image filenames) is identical run to run.

use crate::error::MarkpdfError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// True for `name.pdf`-style files, excluding hidden files.
///
/// The extension match is case-sensitive (`.PDF` does not qualify). Hidden
/// *directories* are still descended into; only file names are filtered.
fn is_candidate(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden && path.extension().map(|e| e == "pdf").unwrap_or(false)
}

/// Map a traversal I/O error, surfacing permission problems distinctly so the
/// message can suggest a fix.
fn scan_error(path: &Path, source: std::io::Error) -> MarkpdfError {
    if source.kind() == std::io::ErrorKind::PermissionDenied {
        MarkpdfError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        MarkpdfError::ScanFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), MarkpdfError> {
    let entries = std::fs::read_dir(dir).map_err(|source| scan_error(dir, source))?;

    for entry in entries {
        let entry = entry.map_err(|source| scan_error(dir, source))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if is_candidate(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// Find all PDF documents under `root`.
///
/// Returns absolute paths, lexicographically sorted, with no duplicates. A
/// file `root` yields a one-element list regardless of its extension (the
/// caller chose it explicitly).
pub fn find_all_pdfs(root: &Path) -> Result<Vec<PathBuf>, MarkpdfError> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    if root.is_file() {
        return Ok(vec![root]);
    }

    let mut files = Vec::new();
    walk(&root, &mut files)?;
    // Sort by the path's byte representation, not component-wise: a name like
    // "a b" must order before "a/…" the way a plain string sort puts it.
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files.dedup();

    debug!("Discovered {} PDF file(s) under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"%PDF-1.4").unwrap();
    }

    #[test]
    fn single_file_input_returns_itself() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("doc.pdf");
        touch(&file);

        let found = find_all_pdfs(&file).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_absolute());
        assert!(found[0].ends_with("doc.pdf"));
    }

    #[test]
    fn recursive_walk_sorted_no_hidden() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("b.pdf"));
        touch(&tmp.path().join("sub/a.pdf"));
        touch(&tmp.path().join("sub/deep/c.pdf"));
        touch(&tmp.path().join(".hidden.pdf"));
        touch(&tmp.path().join("notes.txt"));

        let found = find_all_pdfs(tmp.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("b.pdf"),
                PathBuf::from("sub/a.pdf"),
                PathBuf::from("sub/deep/c.pdf"),
            ]
        );
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("upper.PDF"));
        touch(&tmp.path().join("lower.pdf"));

        let found = find_all_pdfs(tmp.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("lower.pdf"));
    }

    #[test]
    fn hidden_directories_are_descended() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join(".stash/doc.pdf"));

        let found = find_all_pdfs(tmp.path()).unwrap();
        assert_eq!(found.len(), 1, "hidden dirs are walked, only file names filter");
    }

    #[test]
    fn no_duplicates_and_stable_order() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["z.pdf", "a.pdf", "m.pdf"] {
            touch(&tmp.path().join(name));
        }

        let first = find_all_pdfs(tmp.path()).unwrap();
        let second = find_all_pdfs(tmp.path()).unwrap();
        assert_eq!(first, second);

        let mut deduped = first.clone();
        deduped.dedup();
        assert_eq!(first, deduped);
    }

    #[test]
    fn sort_follows_plain_string_order() {
        // " " orders below "/" in byte order, so "a b/…" comes before "a/…";
        // a component-wise path sort would reverse them.
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("a/doc.pdf"));
        touch(&tmp.path().join("a b/doc.pdf"));

        let found = find_all_pdfs(tmp.path()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| {
                p.strip_prefix(tmp.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["a b/doc.pdf", "a/doc.pdf"]);
    }

    #[test]
    fn permission_errors_surface_distinctly() {
        use std::io;

        let e = scan_error(
            Path::new("/locked"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(e, MarkpdfError::PermissionDenied { .. }));

        let e = scan_error(Path::new("/gone"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(e, MarkpdfError::ScanFailed { .. }));
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_all_pdfs(tmp.path()).unwrap().is_empty());
    }
}
