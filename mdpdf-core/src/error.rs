//! Error types for the conversion pipeline
//!
//! Each concern gets its own enum so callers can match on the failure they care
//! about. Every variant keeps the underlying error reachable through
//! [`std::error::Error::source`], and lookup failures carry the full list of
//! valid alternatives so the CLI can print them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or compiling a style.
#[derive(Error, Debug)]
pub enum StyleError {
    /// The selector matched neither a templated nor a built-in style.
    #[error("Unknown style: {name}. Available styles: {}", .available.join(", "))]
    NotFound {
        name: String,
        available: Vec<String>,
    },

    /// A style definition exists but could not be read into its expected shape.
    #[error("Malformed style definition '{name}': {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The raw template body of a style definition failed to render.
    #[error("Failed to render template of style '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// A raw stylesheet path could not be opened or read.
    #[error("Cannot read stylesheet {}: {source}", .path.display())]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A raw stylesheet path exists but is not usable as a stylesheet.
    #[error("Invalid stylesheet {}: {reason}", .path.display())]
    InvalidStylesheet { path: PathBuf, reason: String },

    /// Reading a style definition file failed.
    #[error("Cannot read style definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StyleError {
    /// Valid alternatives for lookup failures, empty otherwise.
    pub fn alternatives(&self) -> &[String] {
        match self {
            StyleError::NotFound { available, .. } => available,
            _ => &[],
        }
    }
}

/// Errors raised while validating page layout parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid page size: {value}. Valid sizes are: {}", .valid.join(", "))]
    InvalidPageSize { value: String, valid: Vec<String> },

    #[error(
        "Invalid margin format: {value}. Use format like '20mm', '1in'. Valid units: {}",
        .valid_units.join(", ")
    )]
    InvalidMargin {
        value: String,
        valid_units: Vec<String>,
    },
}

/// Errors raised by a [`PdfRenderer`](crate::render::PdfRenderer).
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unable to locate a Chrome/Chromium binary. Set MDPDF_CHROME_BIN to override the detection.")]
    BinaryNotFound,

    #[error("Failed to launch renderer ({}): {source}", .binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Renderer exited with status {status}")]
    Failed { status: String },

    #[error("Renderer produced an empty document")]
    EmptyOutput,

    #[error("Renderer I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors surfaced by a conversion run. All of them are terminal.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid input {}: {reason}", .path.display())]
    InputInvalid { path: PathBuf, reason: String },

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Invalid page layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Failed to render document template: {0}")]
    Template(#[source] minijinja::Error),

    #[error("Failed to process markup: {0}")]
    Markup(String),

    #[error("Failed to generate PDF: {0}")]
    Render(#[from] RenderError),

    #[error("Cannot write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn not_found_lists_alternatives() {
        let err = StyleError::NotFound {
            name: "nope".to_string(),
            available: vec!["default".to_string(), "github".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown style: nope. Available styles: default, github"
        );
        assert_eq!(err.alternatives().len(), 2);
    }

    #[test]
    fn convert_error_preserves_cause_chain() {
        let inner = StyleError::InvalidStylesheet {
            path: PathBuf::from("x.txt"),
            reason: "not a CSS file".to_string(),
        };
        let err = ConvertError::from(inner);
        let source = err.source().expect("style error as source");
        assert!(source.to_string().contains("not a CSS file"));
    }

    #[test]
    fn layout_error_lists_valid_sizes() {
        let err = LayoutError::InvalidPageSize {
            value: "A11".to_string(),
            valid: vec!["A4".to_string(), "Letter".to_string()],
        };
        assert!(err.to_string().contains("A4, Letter"));
    }
}
