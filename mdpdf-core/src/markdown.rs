//! Markdown to HTML conversion
//!
//! Every call runs a fresh comrak pass, so per-document state such as footnote
//! numbering never leaks from one source document into the next.
//!
//! Fenced code blocks are highlighted with syntect using CSS classes rather
//! than inline colors. The block is emitted as `<pre class="highlight">` and
//! every token becomes a span carrying its scope names (`keyword`, `comment`,
//! `string`, ...), which the preset stylesheets color.

use comrak::adapters::SyntaxHighlighterAdapter;
use comrak::plugins::syntect::{SyntectAdapter, SyntectAdapterBuilder};
use comrak::{html, markdown_to_html_with_plugins, ComrakOptions, ComrakPlugins};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::{self, Write};

pub const HIGHLIGHT_CLASS: &str = "highlight";

static HIGHLIGHTER: Lazy<ClassHighlighter> = Lazy::new(|| ClassHighlighter {
    inner: SyntectAdapterBuilder::new().css().build(),
});

/// Convert one Markdown document to an HTML body fragment.
pub fn to_markup(source: &str) -> String {
    let options = default_comrak_options();
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&*HIGHLIGHTER);
    markdown_to_html_with_plugins(source, &options, &plugins)
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    // Raw HTML passes through; the pipeline sanitizes the assembled markup.
    options.render.unsafe_ = true;
    options
}

/// Syntect's class-based output, with the `<pre>` tag carrying our class.
struct ClassHighlighter {
    inner: SyntectAdapter,
}

impl SyntaxHighlighterAdapter for ClassHighlighter {
    fn write_highlighted(
        &self,
        output: &mut dyn Write,
        lang: Option<&str>,
        code: &str,
    ) -> io::Result<()> {
        self.inner.write_highlighted(output, lang, code)
    }

    fn write_pre_tag(
        &self,
        output: &mut dyn Write,
        mut attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        let class = match attributes.remove("class") {
            Some(existing) if !existing.is_empty() => format!("{HIGHLIGHT_CLASS} {existing}"),
            _ => HIGHLIGHT_CLASS.to_string(),
        };
        attributes.insert("class".to_string(), class);
        html::write_opening_tag(output, "pre", attributes)
    }

    fn write_code_tag(
        &self,
        output: &mut dyn Write,
        attributes: HashMap<String, String>,
    ) -> io::Result<()> {
        self.inner.write_code_tag(output, attributes)
    }
}
