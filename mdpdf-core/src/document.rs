//! The composed document and its final HTML form

use crate::error::ConvertError;
use crate::outline::{render_outline, OutlineEntry};
use crate::sanitize::sanitize_markup;
use crate::styles::CompiledStyle;
use minijinja::{context, Environment};

const DOCUMENT_TEMPLATE_NAME: &str = "document.html";
const DOCUMENT_TEMPLATE: &str = include_str!("../templates/document.html");
const BASELINE_CSS: &str = include_str!("../css/baseline.css");

/// Everything needed to produce the final HTML: merged body markup, the
/// resolved stylesheet, the title and the optional outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    title: String,
    markup: String,
    styling: CompiledStyle,
    outline: Vec<OutlineEntry>,
    toc_enabled: bool,
}

impl ComposedDocument {
    pub fn new(
        title: impl Into<String>,
        markup: impl Into<String>,
        styling: CompiledStyle,
        outline: Vec<OutlineEntry>,
        toc_enabled: bool,
    ) -> Self {
        Self {
            title: title.into(),
            markup: markup.into(),
            styling,
            outline,
            toc_enabled,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn styling(&self) -> &CompiledStyle {
        &self.styling
    }

    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }

    pub fn toc_enabled(&self) -> bool {
        self.toc_enabled
    }

    /// Rendered outline list, empty when the table of contents is disabled.
    pub fn toc_markup(&self) -> String {
        if self.toc_enabled {
            render_outline(&self.outline)
        } else {
            String::new()
        }
    }

    /// Same document with active content stripped from the markup.
    pub fn sanitized(self) -> Result<Self, ConvertError> {
        let markup = sanitize_markup(&self.markup)?;
        Ok(Self { markup, ..self })
    }

    /// Render the complete HTML page handed to the PDF renderer.
    pub fn to_html(&self) -> Result<String, ConvertError> {
        let mut env = Environment::new();
        env.add_template(DOCUMENT_TEMPLATE_NAME, DOCUMENT_TEMPLATE)
            .map_err(ConvertError::Template)?;
        let template = env
            .get_template(DOCUMENT_TEMPLATE_NAME)
            .map_err(ConvertError::Template)?;

        template
            .render(context! {
                title => &self.title,
                baseline_css => BASELINE_CSS,
                css_content => &self.styling.css,
                content => &self.markup,
                toc_content => self.toc_markup(),
                toc => self.toc_enabled,
            })
            .map_err(ConvertError::Template)
    }
}
