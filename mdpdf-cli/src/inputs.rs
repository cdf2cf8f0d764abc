//! Validation of command-line paths before a conversion starts.

use std::fs::File;
use std::path::{Path, PathBuf};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Check every input path: it must exist, be a readable regular file and
/// carry a Markdown extension. Order is preserved.
pub fn validate_inputs(paths: &[String]) -> Result<Vec<PathBuf>, String> {
    paths.iter().map(|path| validate_input(Path::new(path))).collect()
}

fn validate_input(path: &Path) -> Result<PathBuf, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Not a file: {}", path.display()));
    }
    if !is_markdown(path) {
        return Err(format!("Not a Markdown file: {}", path.display()));
    }
    File::open(path).map_err(|e| format!("File not readable: {}: {e}", path.display()))?;
    Ok(path.to_path_buf())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Normalize the output path and make sure its directory exists.
///
/// PDF output always gets a `.pdf` extension; HTML debug output keeps the
/// path as given.
pub fn prepare_output(path: &str, html: bool) -> Result<PathBuf, String> {
    let mut output = PathBuf::from(path);
    let is_pdf = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !html && !is_pdf {
        output.set_extension("pdf");
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Cannot create output directory {}: {e}", parent.display()))?;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn accepts_markdown_files_in_order() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("b.md");
        let b = dir.path().join("a.MARKDOWN");
        fs::write(&a, "# B").unwrap();
        fs::write(&b, "# A").unwrap();

        let paths = vec![a.display().to_string(), b.display().to_string()];
        assert_eq!(validate_inputs(&paths).unwrap(), vec![a, b]);
    }

    #[test]
    fn rejects_missing_and_non_markdown_inputs() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        fs::write(&txt, "text").unwrap();

        let missing = dir.path().join("missing.md").display().to_string();
        assert!(validate_inputs(&[missing]).unwrap_err().starts_with("File not found"));
        let err = validate_inputs(&[txt.display().to_string()]).unwrap_err();
        assert!(err.starts_with("Not a Markdown file"));
        let err = validate_inputs(&[dir.path().display().to_string()]).unwrap_err();
        assert!(err.starts_with("Not a file"));
    }

    #[test]
    fn output_gets_pdf_extension() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("report.txt").display().to_string();
        assert_eq!(prepare_output(&out, false).unwrap(), dir.path().join("report.pdf"));

        let out = dir.path().join("report").display().to_string();
        assert_eq!(prepare_output(&out, false).unwrap(), dir.path().join("report.pdf"));

        let out = dir.path().join("report.PDF").display().to_string();
        assert_eq!(prepare_output(&out, false).unwrap(), dir.path().join("report.PDF"));
    }

    #[test]
    fn html_output_keeps_its_extension() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("debug.html").display().to_string();
        assert_eq!(prepare_output(&out, true).unwrap(), dir.path().join("debug.html"));
    }

    #[test]
    fn output_directory_is_created() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/deeper/out.pdf").display().to_string();
        let prepared = prepare_output(&out, false).unwrap();
        assert!(prepared.parent().unwrap().is_dir());
    }
}
