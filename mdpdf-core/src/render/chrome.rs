//! Headless Chrome/Chromium renderer
//!
//! Writes the page into a temporary directory and runs the browser with
//! `--print-to-pdf`, then reads the printed file back.

use super::{inject_page_css, PdfRenderer};
use crate::error::RenderError;
use crate::layout::PageLayout;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use url::Url;
use which::which;

pub const CHROME_ENV: &str = "MDPDF_CHROME_BIN";

#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    binary: Option<PathBuf>,
}

impl ChromeRenderer {
    /// Detect the browser binary at render time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always use `binary`, skipping detection.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: Some(binary.into()),
        }
    }

    fn binary(&self) -> Result<PathBuf, RenderError> {
        match &self.binary {
            Some(path) => Ok(path.clone()),
            None => resolve_chrome_binary(),
        }
    }
}

impl PdfRenderer for ChromeRenderer {
    fn render(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        let chrome = self.binary()?;
        let temp_dir = tempdir()?;
        let html_path = temp_dir.path().join("mdpdf-export.html");
        fs::write(&html_path, inject_page_css(html, layout))?;
        let pdf_path = temp_dir.path().join("mdpdf-export.pdf");

        log::debug!("Printing {} with {}", html_path.display(), chrome.display());
        run_chrome(&chrome, &html_path, &pdf_path)?;

        let bytes = fs::read(&pdf_path)?;
        if bytes.is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        Ok(bytes)
    }
}

fn run_chrome(chrome: &Path, html_path: &Path, pdf_path: &Path) -> Result<(), RenderError> {
    let file_url = Url::from_file_path(html_path).map_err(|_| {
        RenderError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "failed to construct file:// URL for HTML input",
        ))
    })?;

    let status = Command::new(chrome)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--no-pdf-header-footer")
        .arg("--print-to-pdf-no-header")
        .arg(format!("--print-to-pdf={}", pdf_path.display()))
        .arg(file_url.as_str())
        .status()
        .map_err(|source| RenderError::Launch {
            binary: chrome.to_path_buf(),
            source,
        })?;

    if !status.success() {
        return Err(RenderError::Failed {
            status: status.to_string(),
        });
    }
    Ok(())
}

/// One place a Chrome/Chromium binary may be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate<'a> {
    /// Environment variable holding a path.
    Env(&'a str),
    /// Executable name looked up on `PATH`.
    Command(&'a str),
    /// Fixed install location.
    Installed(&'a str),
}

impl Candidate<'_> {
    fn locate(self) -> Option<PathBuf> {
        match self {
            Candidate::Env(var) => env::var_os(var)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            Candidate::Command(name) => which(name).ok(),
            Candidate::Installed(path) => {
                let path = PathBuf::from(path);
                path.exists().then_some(path)
            }
        }
    }
}

/// Search order: environment overrides, then `PATH`, then install locations.
const CANDIDATES: &[Candidate<'static>] = &[
    Candidate::Env(CHROME_ENV),
    Candidate::Env("GOOGLE_CHROME_BIN"),
    Candidate::Env("CHROME_BIN"),
    Candidate::Command("google-chrome"),
    Candidate::Command("google-chrome-stable"),
    Candidate::Command("chromium"),
    Candidate::Command("chromium-browser"),
    Candidate::Command("chrome"),
    Candidate::Command("msedge"),
    #[cfg(target_os = "macos")]
    Candidate::Installed("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
    #[cfg(target_os = "macos")]
    Candidate::Installed("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    #[cfg(target_os = "windows")]
    Candidate::Installed(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
    #[cfg(target_os = "windows")]
    Candidate::Installed(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    #[cfg(target_os = "linux")]
    Candidate::Installed("/usr/bin/google-chrome"),
    #[cfg(target_os = "linux")]
    Candidate::Installed("/usr/bin/chromium"),
    #[cfg(target_os = "linux")]
    Candidate::Installed("/snap/bin/chromium"),
];

fn resolve_chrome_binary() -> Result<PathBuf, RenderError> {
    first_located(CANDIDATES).ok_or(RenderError::BinaryNotFound)
}

fn first_located(candidates: &[Candidate]) -> Option<PathBuf> {
    candidates.iter().find_map(|candidate| {
        let found = candidate.locate()?;
        log::debug!("Found browser via {candidate:?}: {}", found.display());
        Some(found)
    })
}
