#[cfg(unix)]
mod unix {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::{tempdir, TempDir};

    fn write_stub_chrome() -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let script_path = dir.path().join("fake-chrome.sh");
        let script = r#"#!/bin/sh
OUTPUT=""
for arg in "$@"; do
  case $arg in
    --print-to-pdf=*)
      OUTPUT="${arg#*=}"
      ;;
  esac
done
if [ -z "$OUTPUT" ]; then
  echo "missing output" >&2
  exit 1
fi
printf '%%PDF-1.7\n%%%%EOF\n' > "$OUTPUT"
exit 0
"#;
        fs::write(&script_path, script).unwrap();
        let mut perms = fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).unwrap();
        (dir, script_path)
    }

    fn write_markdown(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn cli_converts_to_pdf_with_stub() {
        let (_chrome_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let input = write_markdown(work.path(), "doc.md", "# Title\n\nBody text.\n");
        let output_pdf = work.path().join("out.pdf");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path())
            .env("MDPDF_CHROME_BIN", &chrome_stub)
            .arg(&input)
            .arg("-o")
            .arg(&output_pdf);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("PDF created"));

        let pdf = fs::read(&output_pdf).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn cli_forces_pdf_extension_and_creates_directories() {
        let (_chrome_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let a = write_markdown(work.path(), "a.md", "# A\n");
        let b = write_markdown(work.path(), "b.markdown", "# B\n");
        let requested = work.path().join("build/docs/book.txt");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path())
            .env("MDPDF_CHROME_BIN", &chrome_stub)
            .arg(&a)
            .arg(&b)
            .arg("-o")
            .arg(&requested)
            .arg("--toc")
            .arg("--no-merge")
            .arg("--style")
            .arg("github");

        cmd.assert().success();
        assert!(work.path().join("build/docs/book.pdf").exists());
        assert!(!requested.exists());
    }

    #[test]
    fn cli_writes_composed_html() {
        let work = tempdir().unwrap();
        let input = write_markdown(work.path(), "doc.md", "# Heading\n\n## Part\n");
        let output = work.path().join("debug.html");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path())
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("--html")
            .arg("--toc")
            .arg("--title")
            .arg("Debug");

        cmd.assert().success();
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>Debug</title>"));
        assert!(html.contains("<a href='#toc-1'>Part</a>"));
        assert!(html.contains("size: 210mm 297mm"));
    }

    #[test]
    fn cli_rejects_invalid_page_size_without_output() {
        let (_chrome_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let input = write_markdown(work.path(), "doc.md", "# Title\n");
        let output_pdf = work.path().join("out.pdf");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path())
            .env("MDPDF_CHROME_BIN", &chrome_stub)
            .arg(&input)
            .arg("-o")
            .arg(&output_pdf)
            .arg("--page-size")
            .arg("A11");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error: Invalid page layout"))
            .stderr(predicate::str::contains("A4"));
        assert!(!output_pdf.exists());
    }

    #[test]
    fn cli_rejects_unknown_style_and_lists_alternatives() {
        let (_chrome_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let input = write_markdown(work.path(), "doc.md", "# Title\n");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path())
            .env("MDPDF_CHROME_BIN", &chrome_stub)
            .arg(&input)
            .arg("-o")
            .arg(work.path().join("out.pdf"))
            .arg("-s")
            .arg("nonexistent");

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Unknown style: nonexistent"))
            .stderr(predicate::str::contains("github"));
    }

    #[test]
    fn cli_rejects_non_markdown_input() {
        let work = tempdir().unwrap();
        let input = write_markdown(work.path(), "notes.txt", "text");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path())
            .arg(&input)
            .arg("-o")
            .arg(work.path().join("out.pdf"));

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Not a Markdown file"));
    }

    #[test]
    fn cli_requires_output_path() {
        let work = tempdir().unwrap();
        let input = write_markdown(work.path(), "doc.md", "# Title\n");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path()).arg(&input);

        cmd.assert().failure();
    }

    #[test]
    fn cli_lists_builtin_and_templated_styles() {
        let work = tempdir().unwrap();
        let styles = work.path().join("styles");
        fs::create_dir(&styles).unwrap();
        fs::write(
            styles.join("ocean.yaml"),
            "meta:\n  description: Ocean blues\nselectors: {}\n",
        )
        .unwrap();

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path()).arg("--list-styles");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Available styles"))
            .stdout(predicate::str::contains("presentation"))
            .stdout(predicate::str::contains("Ocean blues"));
    }

    #[test]
    fn cli_reads_project_config() {
        let work = tempdir().unwrap();
        fs::write(
            work.path().join("mdpdf.toml"),
            "[convert]\npage_size = \"Letter\"\nmargin = \"1in\"\n",
        )
        .unwrap();
        let input = write_markdown(work.path(), "doc.md", "# Title\n");
        let output = work.path().join("debug.html");

        let mut cmd = cargo_bin_cmd!("mdpdf");
        cmd.current_dir(work.path())
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("--html");

        cmd.assert().success();
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("size: 215.9mm 279.4mm; margin: 1in;"));
    }
}

#[cfg(not(unix))]
#[test]
fn convert_cli_tests_skipped() {
    eprintln!("Skipping convert CLI tests on non-Unix platforms");
}
