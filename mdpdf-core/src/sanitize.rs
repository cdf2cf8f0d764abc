//! Basic content-safety pass over assembled markup
//!
//! Removes `<script>` elements, inline event-handler attributes (`on*`),
//! `srcdoc` documents and `javascript:` URLs. This is not a complete HTML
//! sanitizer; it only keeps the obvious active content out of the renderer.

use crate::dom;
use crate::error::ConvertError;
use html5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData};

// `xlink:href` has the local name `href`.
const URL_ATTRIBUTES: &[&str] = &[
    "href",
    "src",
    "action",
    "formaction",
    "data",
    "poster",
    "background",
];
const DROPPED_ATTRIBUTES: &[&str] = &["srcdoc"];

pub fn sanitize_markup(markup: &str) -> Result<String, ConvertError> {
    let (html, removed) = dom::rewrite_fragment(markup, strip_active_content)?;
    if removed > 0 {
        log::debug!("Sanitizer removed {removed} script element(s) or attribute(s)");
    }
    Ok(html)
}

fn strip_active_content(handle: &Handle) -> usize {
    let mut removed = 0;

    {
        let mut children = handle.children.borrow_mut();
        let before = children.len();
        children.retain(|child| dom::element_name(child) != Some("script"));
        removed += before - children.len();
    }

    for child in handle.children.borrow().iter() {
        if let NodeData::Element { ref attrs, .. } = child.data {
            let mut attrs = attrs.borrow_mut();
            let before = attrs.len();
            attrs.retain(is_safe_attribute);
            removed += before - attrs.len();
        }
        removed += strip_active_content(child);
    }

    removed
}

fn is_safe_attribute(attr: &Attribute) -> bool {
    let lowered = attr.name.local.to_ascii_lowercase();
    let name: &str = &lowered;
    if name.starts_with("on") || DROPPED_ATTRIBUTES.contains(&name) {
        return false;
    }
    if URL_ATTRIBUTES.contains(&name) {
        return !is_javascript_url(&attr.value);
    }
    true
}

/// Browsers ignore whitespace and control characters inside the scheme.
fn is_javascript_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    compact.to_ascii_lowercase().starts_with("javascript:")
}
