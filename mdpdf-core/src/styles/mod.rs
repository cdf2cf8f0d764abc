//! Style selection and compilation
//!
//! A style selector names one of three kinds of styling:
//!
//!     - a built-in preset shipped with the crate ([`registry`]),
//!     - a templated definition read from a YAML file ([`templated`]),
//!     - a raw `.css` file on disk.
//!
//! [`resolver::StyleResolver`] decides which kind a selector refers to and
//! produces the final stylesheet text.

pub mod registry;
pub mod resolver;
pub mod templated;

pub use registry::{BuiltinStyle, StyleRegistry};
pub use resolver::{StyleResolver, StyleSelector};
pub use templated::{camel_to_kebab, StyleDefinition, StyleInfo, TemplatedStyles};

/// Name of the style used when no selector is given.
pub const DEFAULT_STYLE: &str = "default";

/// A resolved stylesheet ready to be embedded in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStyle {
    pub name: String,
    pub css: String,
}

impl CompiledStyle {
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }
}
