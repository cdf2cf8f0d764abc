//! Conversion pipeline
//!
//! One [`Pipeline::run`] call is one conversion: validate the page layout,
//! read every input, assemble and sanitize the document, render it and write
//! the PDF. Any failure aborts the run and leaves no output file behind.

use crate::assemble::{AssembleOptions, Assembler, MergeMode};
use crate::error::{ConvertError, RenderError};
use crate::layout::{PageLayout, DEFAULT_MARGIN, DEFAULT_PAGE_SIZE};
use crate::render::{inject_page_css, PdfRenderer};
use crate::source::{read_source, SourceDocument};
use crate::styles::StyleResolver;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Parameters of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    style: String,
    title: Option<String>,
    margin: String,
    page_size: String,
    toc: bool,
    merge_mode: MergeMode,
}

impl ConvertRequest {
    pub fn new<I, P>(inputs: I, output: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: output.into(),
            style: String::new(),
            title: None,
            margin: DEFAULT_MARGIN.to_string(),
            page_size: DEFAULT_PAGE_SIZE.to_string(),
            toc: false,
            merge_mode: MergeMode::Merge,
        }
    }

    /// Style selector; empty selects the resolver's default style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_margin(mut self, margin: impl Into<String>) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn with_page_size(mut self, page_size: impl Into<String>) -> Self {
        self.page_size = page_size.into();
        self
    }

    pub fn with_toc(mut self, toc: bool) -> Self {
        self.toc = toc;
        self
    }

    pub fn with_merge_mode(mut self, merge_mode: MergeMode) -> Self {
        self.merge_mode = merge_mode;
        self
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            merge_mode: self.merge_mode,
            title: self.title.clone(),
            style: self.style.clone(),
            toc: self.toc,
        }
    }
}

pub struct Pipeline {
    resolver: StyleResolver,
    renderer: Box<dyn PdfRenderer>,
}

impl Pipeline {
    pub fn new(resolver: StyleResolver, renderer: impl PdfRenderer + 'static) -> Self {
        Self {
            resolver,
            renderer: Box::new(renderer),
        }
    }

    /// Pipeline printing through a detected Chrome/Chromium binary.
    #[cfg(feature = "native-export")]
    pub fn with_chrome(resolver: StyleResolver) -> Self {
        Self::new(resolver, crate::render::ChromeRenderer::new())
    }

    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    /// Convert the request's inputs and write the PDF to its output path.
    pub fn run(&self, request: &ConvertRequest) -> Result<PathBuf, ConvertError> {
        let (layout, html) = self.prepare(request)?;

        let bytes = self.renderer.render(&html, &layout)?;
        if bytes.is_empty() {
            return Err(RenderError::EmptyOutput.into());
        }

        write_atomically(request.output(), &bytes)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), request.output().display());
        Ok(request.output().to_path_buf())
    }

    /// The final HTML page, print stylesheet included, without rendering it.
    pub fn compose_html(&self, request: &ConvertRequest) -> Result<String, ConvertError> {
        let (layout, html) = self.prepare(request)?;
        Ok(inject_page_css(&html, &layout))
    }

    fn prepare(&self, request: &ConvertRequest) -> Result<(PageLayout, String), ConvertError> {
        let layout = PageLayout::parse(&request.page_size, &request.margin)?;

        log::debug!("Converting {} file(s)", request.inputs.len());
        let sources = request
            .inputs
            .iter()
            .map(|path| read_source(path))
            .collect::<Result<Vec<SourceDocument>, _>>()?;

        let document = Assembler::new(&self.resolver)
            .assemble(&sources, &request.assemble_options())?
            .sanitized()?;
        log::debug!(
            "Assembled '{}' with style '{}' ({} heading(s))",
            document.title(),
            document.styling().name,
            document.outline().len()
        );

        Ok((layout, document.to_html()?))
    }
}

/// Write through a temporary file in the target directory, then rename it
/// over `path`.
///
/// An existing target keeps its permissions; a new file gets the same mode a
/// plain `fs::write` would give it.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let output_error = |source: std::io::Error| ConvertError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|metadata| metadata.permissions());

    let mut builder = Builder::new();
    if let Some(permissions) = new_file_permissions() {
        builder.permissions(permissions);
    }
    let mut file = builder.tempfile_in(dir).map_err(output_error)?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions).map_err(output_error)?;
    }
    file.write_all(bytes).map_err(output_error)?;
    file.flush().map_err(output_error)?;
    file.persist(path).map_err(|e| output_error(e.error))?;
    Ok(())
}

/// Mode requested for a fresh output file, before the umask applies.
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
