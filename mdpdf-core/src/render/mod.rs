//! PDF rendering seam
//!
//! The pipeline only knows the [`PdfRenderer`] trait. The shipped
//! implementation prints the composed HTML through a headless Chrome/Chromium
//! binary; tests substitute their own renderer.

#[cfg(feature = "native-export")]
pub mod chrome;

#[cfg(feature = "native-export")]
pub use chrome::ChromeRenderer;

use crate::error::RenderError;
use crate::layout::PageLayout;

/// Turns a complete HTML document into PDF bytes.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, html: &str, layout: &PageLayout) -> Result<Vec<u8>, RenderError>;
}

/// Insert the print stylesheet for `layout` as the last element of `<head>`.
pub fn inject_page_css(html: &str, layout: &PageLayout) -> String {
    let style_tag = format!("<style data-mdpdf-page>\n{}</style>\n", layout.print_css());
    if let Some(idx) = html.find("</head>") {
        let mut output = String::with_capacity(html.len() + style_tag.len());
        output.push_str(&html[..idx]);
        output.push_str(&style_tag);
        output.push_str(&html[idx..]);
        output
    } else {
        format!("{style_tag}{html}")
    }
}
