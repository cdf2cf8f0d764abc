//! HTML fragment parsing and serialization
//!
//! Composed markup is a body fragment, so it is wrapped in a minimal document
//! before parsing and only the body children are serialized back.

use crate::error::ConvertError;
use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, Attribute, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Parse a body fragment into a DOM tree.
pub(crate) fn parse_fragment(markup: &str) -> RcDom {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{markup}</body></html>");
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes())
}

/// The `<body>` element of a parsed fragment.
pub(crate) fn body(dom: &RcDom) -> Result<Handle, ConvertError> {
    find_first_element(&dom.document, "body")
        .ok_or_else(|| ConvertError::Markup("Parsed markup has no body".to_string()))
}

/// Serialize the children of `handle` (not the node itself).
pub(crate) fn serialize_children(handle: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in handle.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone())
            .map_err(|e| ConvertError::Markup(format!("HTML serialization failed: {e}")))?;
    }

    String::from_utf8(output)
        .map_err(|e| ConvertError::Markup(format!("UTF-8 conversion failed: {e}")))
}

/// Parse, hand the body to `edit`, and serialize the result back.
pub(crate) fn rewrite_fragment<T>(
    markup: &str,
    edit: impl FnOnce(&Handle) -> T,
) -> Result<(String, T), ConvertError> {
    let dom = parse_fragment(markup);
    let body = body(&dom)?;
    let value = edit(&body);
    Ok((serialize_children(&body)?, value))
}

pub(crate) fn element_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Heading level for `h1`..`h6` elements.
pub(crate) fn heading_level(handle: &Handle) -> Option<u8> {
    match element_name(handle)? {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// All element descendants of `handle`, in document order.
pub(crate) fn descendant_elements(handle: &Handle) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(handle, &mut found);
    found
}

fn collect_elements(handle: &Handle, found: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if element_name(child).is_some() {
            found.push(child.clone());
        }
        collect_elements(child, found);
    }
}

pub(crate) fn find_first_element(handle: &Handle, name: &str) -> Option<Handle> {
    if element_name(handle) == Some(name) {
        return Some(handle.clone());
    }

    for child in handle.children.borrow().iter() {
        if let Some(found) = find_first_element(child, name) {
            return Some(found);
        }
    }

    None
}

/// Concatenated text of every text node below `handle`.
pub(crate) fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    collect_text(handle, &mut text);
    text
}

fn collect_text(handle: &Handle, text: &mut String) {
    if let NodeData::Text { ref contents } = handle.data {
        text.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, text);
    }
}

/// Set an attribute, replacing an existing value with the same name.
pub(crate) fn set_attribute(handle: &Handle, name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        let mut attrs = attrs.borrow_mut();
        if let Some(existing) = attrs.iter_mut().find(|attr| attr.name.local.as_ref() == name) {
            existing.value = value.to_string().into();
        } else {
            attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(name)),
                value: value.to_string().into(),
            });
        }
    }
}

/// Escape HTML special characters in text
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
