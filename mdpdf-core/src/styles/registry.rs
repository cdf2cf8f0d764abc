//! Built-in style registry
//!
//! Maps preset names to the stylesheets embedded in the crate. Presets are
//! independent of each other: there is no inheritance or cascading between them.

use super::CompiledStyle;
use crate::error::StyleError;
use std::collections::HashMap;

/// A preset stylesheet and its one-line description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinStyle {
    pub name: String,
    pub description: String,
    pub css: String,
}

impl BuiltinStyle {
    pub fn compiled(&self) -> CompiledStyle {
        CompiledStyle::new(&self.name, &self.css)
    }
}

/// Registry of built-in styles
///
/// # Examples
///
/// ```ignore
/// let registry = StyleRegistry::with_defaults();
/// let style = registry.get("github")?;
/// assert!(style.css.contains("#0969da"));
/// ```
pub struct StyleRegistry {
    styles: HashMap<String, BuiltinStyle>,
}

impl StyleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        StyleRegistry {
            styles: HashMap::new(),
        }
    }

    /// Register a style
    ///
    /// If a style with the same name already exists, it will be replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        css: impl Into<String>,
    ) {
        let name = name.into();
        self.styles.insert(
            name.clone(),
            BuiltinStyle {
                name,
                description: description.into(),
                css: css.into(),
            },
        );
    }

    /// Get a style by name
    pub fn get(&self, name: &str) -> Result<&BuiltinStyle, StyleError> {
        self.styles.get(name).ok_or_else(|| StyleError::NotFound {
            name: name.to_string(),
            available: self.list_styles(),
        })
    }

    /// Check if a style exists
    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// List all available style names (sorted)
    pub fn list_styles(&self) -> Vec<String> {
        let mut names: Vec<_> = self.styles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and description of every style, sorted by name
    pub fn describe(&self) -> Vec<(String, String)> {
        self.list_styles()
            .into_iter()
            .filter_map(|name| {
                self.styles
                    .get(&name)
                    .map(|style| (name.clone(), style.description.clone()))
            })
            .collect()
    }

    /// Create a registry with the presets shipped in `css/styles`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            "default",
            "Clean, readable style with good typography",
            include_str!("../../css/styles/default.css"),
        );
        registry.register(
            "github",
            "GitHub-flavored styling with familiar appearance",
            include_str!("../../css/styles/github.css"),
        );
        registry.register(
            "minimal",
            "Minimal design with focus on content",
            include_str!("../../css/styles/minimal.css"),
        );
        registry.register(
            "academic",
            "Professional academic paper style",
            include_str!("../../css/styles/academic.css"),
        );
        registry.register(
            "modern",
            "Contemporary design with modern typography",
            include_str!("../../css/styles/modern.css"),
        );
        registry.register(
            "dark",
            "Dark mode theme for reduced eye strain",
            include_str!("../../css/styles/dark.css"),
        );
        registry.register(
            "technical",
            "Technical documentation with monospaced fonts",
            include_str!("../../css/styles/technical.css"),
        );
        registry.register(
            "book",
            "Classic book typography with elegant serif fonts",
            include_str!("../../css/styles/book.css"),
        );
        registry.register(
            "presentation",
            "Large fonts optimized for presentations",
            include_str!("../../css/styles/presentation.css"),
        );

        registry
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = StyleRegistry::new();
        assert!(registry.list_styles().is_empty());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = StyleRegistry::new();
        registry.register("plain", "Plain text", "body { color: black; }");

        assert!(registry.has("plain"));
        let style = registry.get("plain").unwrap();
        assert_eq!(style.description, "Plain text");
        assert_eq!(style.compiled(), CompiledStyle::new("plain", "body { color: black; }"));
    }

    #[test]
    fn test_registry_replace_style() {
        let mut registry = StyleRegistry::new();
        registry.register("plain", "first", "a {}");
        registry.register("plain", "second", "b {}");

        assert_eq!(registry.list_styles(), vec!["plain"]);
        assert_eq!(registry.get("plain").unwrap().css, "b {}");
    }

    #[test]
    fn test_registry_get_missing_lists_available() {
        let registry = StyleRegistry::with_defaults();
        let err = registry.get("nonexistent").unwrap_err();
        match err {
            StyleError::NotFound { name, available } => {
                assert_eq!(name, "nonexistent");
                assert_eq!(available, registry.list_styles());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = StyleRegistry::with_defaults();
        assert_eq!(
            registry.list_styles(),
            vec![
                "academic",
                "book",
                "dark",
                "default",
                "github",
                "minimal",
                "modern",
                "presentation",
                "technical"
            ]
        );
        for (name, description) in registry.describe() {
            assert!(!description.is_empty(), "{name} has no description");
            assert!(!registry.get(&name).unwrap().css.trim().is_empty());
        }
    }

    #[test]
    fn test_dark_style_colors_the_page() {
        let registry = StyleRegistry::with_defaults();
        let css = &registry.get("dark").unwrap().css;
        assert!(css.contains("@page"));
        assert!(css.contains("#0f172a"));
    }

    #[test]
    fn test_every_preset_styles_highlighted_code() {
        let registry = StyleRegistry::with_defaults();
        for name in registry.list_styles() {
            let css = &registry.get(&name).unwrap().css;
            assert!(css.contains(".highlight .comment"), "{name} lacks highlight rules");
            assert!(css.contains(".highlight .keyword"), "{name} lacks highlight rules");
        }
    }
}
