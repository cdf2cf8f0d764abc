//! Heading indexing and table-of-contents rendering
//!
//! Headings are numbered across the whole composed document, not per source
//! file, so anchors stay unique after merging: the i-th heading (0-based) gets
//! the id `toc-i`.

use crate::dom;
use crate::error::ConvertError;

/// One heading of the composed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

impl OutlineEntry {
    pub fn new(level: u8, text: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            anchor: anchor.into(),
        }
    }
}

pub fn anchor_for(index: usize) -> String {
    format!("toc-{index}")
}

/// Tag every heading with its anchor id and collect the outline.
///
/// Existing `id` attributes on headings are replaced.
pub fn index_headings(markup: &str) -> Result<(String, Vec<OutlineEntry>), ConvertError> {
    dom::rewrite_fragment(markup, |body| {
        let mut outline = Vec::new();
        for element in dom::descendant_elements(body) {
            let Some(level) = dom::heading_level(&element) else {
                continue;
            };
            let anchor = anchor_for(outline.len());
            dom::set_attribute(&element, "id", &anchor);
            let text = dom::text_content(&element).trim().to_string();
            outline.push(OutlineEntry::new(level, text, anchor));
        }
        outline
    })
}

/// Render the outline as a nested-by-indentation list of links.
///
/// An empty outline renders as an empty string so the template can omit the block.
pub fn render_outline(outline: &[OutlineEntry]) -> String {
    if outline.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul class='toc-list'>\n");
    for entry in outline {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
        html.push_str(&format!(
            "{indent}<li class='toc-level-{}'><a href='#{}'>{}</a></li>\n",
            entry.level,
            entry.anchor,
            dom::html_escape(&entry.text)
        ));
    }
    html.push_str("</ul>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn assigns_sequential_anchors_in_document_order() {
        let markup = "<h1>One</h1>\n<h2>Two</h2>\n<p>text</p>\n<h2>Three</h2>\n<h3>Four</h3>";
        let (tagged, outline) = index_headings(markup).unwrap();

        let anchors: Vec<&str> = outline.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["toc-0", "toc-1", "toc-2", "toc-3"]);
        let levels: Vec<u8> = outline.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 2, 3]);
        assert_eq!(outline[2].text, "Three");

        assert!(tagged.contains("<h1 id=\"toc-0\">One</h1>"));
        assert!(tagged.contains("<h3 id=\"toc-3\">Four</h3>"));
    }

    #[test]
    fn numbering_spans_separators() {
        let markup = "<h1>A</h1>\n<div class=\"page-break\"></div>\n<h1>B</h1>";
        let (tagged, outline) = index_headings(markup).unwrap();
        assert_eq!(outline[1], OutlineEntry::new(1, "B", "toc-1"));
        assert!(tagged.contains("<div class=\"page-break\"></div>"));
    }

    #[test]
    fn no_headings_yield_empty_outline() {
        let (tagged, outline) = index_headings("<p>plain</p>").unwrap();
        assert!(outline.is_empty());
        assert_eq!(tagged, "<p>plain</p>");
        assert_eq!(render_outline(&outline), "");
    }

    #[test]
    fn heading_text_is_trimmed_and_flattened() {
        let (_, outline) = index_headings("<h2>  Using <code>mdpdf</code> </h2>").unwrap();
        assert_eq!(outline[0].text, "Using mdpdf");
    }

    #[test]
    fn renders_indented_outline() {
        let outline = vec![
            OutlineEntry::new(1, "Intro", "toc-0"),
            OutlineEntry::new(2, "Setup & Use", "toc-1"),
            OutlineEntry::new(3, "Details", "toc-2"),
        ];
        assert_snapshot!(render_outline(&outline).trim_end(), @r"
        <ul class='toc-list'>
        <li class='toc-level-1'><a href='#toc-0'>Intro</a></li>
          <li class='toc-level-2'><a href='#toc-1'>Setup &amp; Use</a></li>
            <li class='toc-level-3'><a href='#toc-2'>Details</a></li>
        </ul>
        ");
    }
}
