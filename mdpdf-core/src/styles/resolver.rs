//! Style selector resolution
//!
//! Precedence for a selector string:
//!
//!     1. a name ending in `.css` is a raw stylesheet path,
//!     2. a templated definition with that name,
//!     3. a built-in preset with that name.
//!
//! Anything else is an unknown style, reported together with every name that
//! would have matched.

use super::{CompiledStyle, StyleRegistry, TemplatedStyles, DEFAULT_STYLE};
use crate::error::StyleError;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a style selector refers to, decided once by [`StyleResolver::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSelector {
    BuiltIn(String),
    Templated(String),
    RawFile(PathBuf),
}

pub struct StyleResolver {
    registry: StyleRegistry,
    templated: TemplatedStyles,
    default_style: String,
}

impl StyleResolver {
    pub fn new(registry: StyleRegistry, templated: TemplatedStyles) -> Self {
        Self {
            registry,
            templated,
            default_style: DEFAULT_STYLE.to_string(),
        }
    }

    /// Built-in presets plus the definitions found in `styles_dir`.
    pub fn with_styles_dir(styles_dir: impl Into<PathBuf>) -> Self {
        Self::new(StyleRegistry::with_defaults(), TemplatedStyles::new(styles_dir))
    }

    pub fn with_default_style(mut self, name: impl Into<String>) -> Self {
        self.default_style = name.into();
        self
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn templated(&self) -> &TemplatedStyles {
        &self.templated
    }

    pub fn classify(&self, selector: &str) -> Result<StyleSelector, StyleError> {
        let selector = selector.trim();
        let selector = if selector.is_empty() {
            self.default_style.as_str()
        } else {
            selector
        };

        if selector.to_ascii_lowercase().ends_with(".css") {
            return Ok(StyleSelector::RawFile(PathBuf::from(selector)));
        }
        if self.templated.contains(selector) {
            return Ok(StyleSelector::Templated(selector.to_string()));
        }
        if self.registry.has(selector) {
            return Ok(StyleSelector::BuiltIn(selector.to_string()));
        }

        Err(StyleError::NotFound {
            name: selector.to_string(),
            available: self.available_styles(),
        })
    }

    pub fn load(&self, selector: &StyleSelector) -> Result<CompiledStyle, StyleError> {
        match selector {
            StyleSelector::BuiltIn(name) => Ok(self.registry.get(name)?.compiled()),
            StyleSelector::Templated(name) => self.templated.compile(name),
            StyleSelector::RawFile(path) => load_stylesheet(path),
        }
    }

    pub fn resolve(&self, selector: &str) -> Result<CompiledStyle, StyleError> {
        let classified = self.classify(selector)?;
        log::debug!("Style '{selector}' resolved to {classified:?}");
        self.load(&classified)
    }

    /// Sorted, de-duplicated names of every templated and built-in style.
    pub fn available_styles(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .templated
            .catalog()
            .into_iter()
            .map(|style| style.name)
            .chain(self.registry.list_styles())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Name and description of every style; templated definitions shadow presets.
    pub fn describe_styles(&self) -> Vec<(String, String)> {
        let templated: Vec<(String, String)> = self
            .templated
            .catalog()
            .into_iter()
            .map(|style| (style.name, style.description))
            .collect();
        let mut described: Vec<(String, String)> = self
            .registry
            .describe()
            .into_iter()
            .filter(|(name, _)| !templated.iter().any(|(t, _)| t == name))
            .chain(templated.iter().cloned())
            .collect();
        described.sort_by(|a, b| a.0.cmp(&b.0));
        described
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::with_styles_dir("styles")
    }
}

fn load_stylesheet(path: &Path) -> Result<CompiledStyle, StyleError> {
    let path = absolutize(path)?;

    let metadata = fs::metadata(&path).map_err(|source| StyleError::Stylesheet {
        path: path.clone(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(StyleError::InvalidStylesheet {
            path,
            reason: "not a regular file".to_string(),
        });
    }
    let is_css = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("css"));
    if !is_css {
        return Err(StyleError::InvalidStylesheet {
            path,
            reason: "expected a .css file".to_string(),
        });
    }

    let css = fs::read_to_string(&path).map_err(|source| StyleError::Stylesheet {
        path: path.clone(),
        source,
    })?;
    Ok(CompiledStyle::new(path.display().to_string(), css))
}

fn absolutize(path: &Path) -> Result<PathBuf, StyleError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|source: io::Error| StyleError::Stylesheet {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver_with(files: &[(&str, &str)]) -> (TempDir, StyleResolver) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let resolver = StyleResolver::with_styles_dir(dir.path());
        (dir, resolver)
    }

    #[test]
    fn empty_selector_uses_default_style() {
        let (_dir, resolver) = resolver_with(&[]);
        assert_eq!(
            resolver.classify("").unwrap(),
            StyleSelector::BuiltIn("default".to_string())
        );
        let style = resolver.resolve("").unwrap();
        assert_eq!(style.name, "default");
    }

    #[test]
    fn builtin_names_resolve_to_presets() {
        let (_dir, resolver) = resolver_with(&[]);
        let style = resolver.resolve("github").unwrap();
        assert_eq!(style.css, resolver.registry().get("github").unwrap().css);
    }

    #[test]
    fn templated_definitions_shadow_presets() {
        let (_dir, resolver) = resolver_with(&[(
            "github.yaml",
            "meta:\n  description: Local github\nselectors:\n  body:\n    color: green\n",
        )]);
        assert_eq!(
            resolver.classify("github").unwrap(),
            StyleSelector::Templated("github".to_string())
        );
        let css = resolver.resolve("github").unwrap().css;
        assert!(css.starts_with("/* Local github */"));

        let described = resolver.describe_styles();
        let github = described.iter().find(|(name, _)| name == "github").unwrap();
        assert_eq!(github.1, "Local github");
    }

    #[test]
    fn css_suffix_selects_raw_file() {
        let (dir, resolver) = resolver_with(&[("custom.css", "body { color: red; }")]);
        let path = dir.path().join("custom.css");
        let selector = path.to_string_lossy().into_owned();

        assert_eq!(
            resolver.classify(&selector).unwrap(),
            StyleSelector::RawFile(path.clone())
        );
        assert_eq!(resolver.resolve(&selector).unwrap().css, "body { color: red; }");
    }

    #[test]
    fn uppercase_css_suffix_is_still_a_file() {
        let (_dir, resolver) = resolver_with(&[]);
        assert!(matches!(
            resolver.classify("Theme.CSS").unwrap(),
            StyleSelector::RawFile(_)
        ));
    }

    #[test]
    fn missing_raw_file_is_a_stylesheet_error() {
        let (dir, resolver) = resolver_with(&[]);
        let selector = dir.path().join("missing.css");
        let err = resolver
            .resolve(&selector.to_string_lossy())
            .unwrap_err();
        match err {
            StyleError::Stylesheet { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn directory_with_css_suffix_is_rejected() {
        let (dir, resolver) = resolver_with(&[]);
        let css_dir = dir.path().join("folder.css");
        fs::create_dir(&css_dir).unwrap();
        let err = resolver.resolve(&css_dir.to_string_lossy()).unwrap_err();
        assert!(matches!(err, StyleError::InvalidStylesheet { .. }));
    }

    #[test]
    fn unknown_style_lists_sorted_union() {
        let (_dir, resolver) = resolver_with(&[("ocean.yaml", "meta: {}\n")]);
        let err = resolver.resolve("nonexistent").unwrap_err();
        let available = err.alternatives();
        assert!(available.contains(&"ocean".to_string()));
        assert!(available.contains(&"default".to_string()));
        let mut sorted = available.to_vec();
        sorted.sort();
        assert_eq!(available, sorted.as_slice());
        assert!(err.to_string().starts_with("Unknown style: nonexistent"));
    }
}
