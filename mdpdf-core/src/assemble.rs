//! Document assembly
//!
//! Turns the source documents into one [`ComposedDocument`]: each document is
//! converted on its own, the results are joined with a separator, then the
//! title, style and outline are settled for the whole.

use crate::document::ComposedDocument;
use crate::dom;
use crate::error::ConvertError;
use crate::markdown;
use crate::outline;
use crate::source::SourceDocument;
use crate::styles::StyleResolver;

pub const FILE_SEPARATOR: &str = "<div class=\"file-separator\"></div>";
pub const PAGE_BREAK: &str = "<div class=\"page-break\"></div>";

/// How consecutive source documents are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// One continuous flow with a visual separator between documents.
    #[default]
    Merge,
    /// Every document after the first starts on a new page.
    PageBreakPerFile,
}

impl MergeMode {
    pub fn separator(self) -> &'static str {
        match self {
            MergeMode::Merge => FILE_SEPARATOR,
            MergeMode::PageBreakPerFile => PAGE_BREAK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssembleOptions {
    pub merge_mode: MergeMode,
    pub title: Option<String>,
    pub style: String,
    pub toc: bool,
}

pub struct Assembler<'a> {
    resolver: &'a StyleResolver,
}

impl<'a> Assembler<'a> {
    pub fn new(resolver: &'a StyleResolver) -> Self {
        Self { resolver }
    }

    pub fn assemble(
        &self,
        documents: &[SourceDocument],
        options: &AssembleOptions,
    ) -> Result<ComposedDocument, ConvertError> {
        let first = documents.first().ok_or_else(|| ConvertError::InputInvalid {
            path: Default::default(),
            reason: "no input documents".to_string(),
        })?;

        let merged = merge(documents, options.merge_mode);

        let title = match options.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => first_heading_text(&merged)?.unwrap_or_else(|| first.stem()),
        };

        let styling = self.resolver.resolve(&options.style)?;

        let (markup, outline) = if options.toc {
            outline::index_headings(&merged)?
        } else {
            (merged, Vec::new())
        };

        Ok(ComposedDocument::new(
            title,
            markup,
            styling,
            outline,
            options.toc,
        ))
    }
}

fn merge(documents: &[SourceDocument], mode: MergeMode) -> String {
    let mut parts = Vec::with_capacity(documents.len() * 2);
    for (i, document) in documents.iter().enumerate() {
        log::debug!("Processing: {}", document.path.display());
        if i > 0 {
            parts.push(mode.separator().to_string());
        }
        parts.push(markdown::to_markup(&document.text));
    }
    parts.join("\n")
}

/// Text of the first `h1`..`h3` element, if it has any.
fn first_heading_text(markup: &str) -> Result<Option<String>, ConvertError> {
    let dom = dom::parse_fragment(markup);
    let body = dom::body(&dom)?;
    let text = dom::descendant_elements(&body)
        .iter()
        .find(|element| dom::heading_level(element).is_some_and(|level| level <= 3))
        .map(|heading| dom::text_content(heading).trim().to_string())
        .filter(|text| !text.is_empty());
    Ok(text)
}
