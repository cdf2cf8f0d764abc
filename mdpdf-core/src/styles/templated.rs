//! Templated style definitions
//!
//! A templated style is a YAML file in the styles directory. It either carries
//! a raw `template` body, rendered with minijinja, or a `selectors` mapping that
//! is turned into CSS rule by rule:
//!
//! ```yaml
//! meta:
//!   description: Warm paper tones
//! variables:
//!   ink: "#3b2f2f"
//! selectors:
//!   page:
//!     backgroundColor: "#fdf6e3"
//!   body:
//!     fontFamily: Georgia, serif
//!     color: ${ink}
//! ```
//!
//! Compiled stylesheets are cached per name for the lifetime of the
//! [`TemplatedStyles`] instance.

use super::CompiledStyle;
use crate::error::StyleError;
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

const DEFINITION_EXTENSIONS: &[&str] = &["yaml", "yml"];
const PAGE_SELECTOR: &str = "page";
const BACKGROUND_PROPERTIES: &[&str] = &["backgroundColor", "background-color", "background"];

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern compiles"));
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel case pattern compiles"));

/// Parsed contents of a style definition file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleDefinition {
    pub meta: Mapping,
    pub variables: Mapping,
    pub selectors: Mapping,
    pub template: String,
}

impl StyleDefinition {
    pub fn from_yaml(name: &str, source: &str) -> Result<Self, StyleError> {
        serde_yaml::from_str(source).map_err(|source| StyleError::Malformed {
            name: name.to_string(),
            source,
        })
    }

    pub fn description(&self) -> Option<&str> {
        self.meta.get("description").and_then(Value::as_str)
    }
}

/// Catalog entry for one style definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleInfo {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
}

/// Compiler and cache for the style definitions found in one directory.
pub struct TemplatedStyles {
    directory: PathBuf,
    cache: Mutex<HashMap<String, CompiledStyle>>,
}

impl TemplatedStyles {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List every usable definition in the directory, sorted by name.
    ///
    /// Only files whose content is a mapping with a `meta` section count.
    /// Files that cannot be read or parsed are skipped with a warning, and a
    /// missing directory yields an empty catalog.
    pub fn catalog(&self) -> Vec<StyleInfo> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut styles: Vec<StyleInfo> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && has_definition_extension(path))
            .filter_map(|path| read_catalog_entry(&path))
            .collect();
        styles.sort_by(|a, b| a.name.cmp(&b.name));
        styles.dedup_by(|a, b| a.name == b.name);
        styles
    }

    pub fn contains(&self, name: &str) -> bool {
        self.catalog().iter().any(|style| style.name == name)
    }

    /// Compile the named definition into CSS.
    pub fn compile(&self, name: &str) -> Result<CompiledStyle, StyleError> {
        if let Some(hit) = self.lock_cache().get(name) {
            return Ok(hit.clone());
        }

        let path = self
            .definition_path(name)
            .ok_or_else(|| StyleError::NotFound {
                name: name.to_string(),
                available: self.catalog().into_iter().map(|style| style.name).collect(),
            })?;
        let source = fs::read_to_string(&path).map_err(|source| StyleError::Io {
            path: path.clone(),
            source,
        })?;
        let definition = StyleDefinition::from_yaml(name, &source)?;

        let css = if definition.template.is_empty() {
            synthesize_css(name, &definition)
        } else {
            render_template(name, &definition)?
        };
        log::debug!("Compiled templated style '{name}' from {}", path.display());

        let compiled = CompiledStyle::new(name, css);
        self.lock_cache()
            .insert(name.to_string(), compiled.clone());
        Ok(compiled)
    }

    fn definition_path(&self, name: &str) -> Option<PathBuf> {
        DEFINITION_EXTENSIONS
            .iter()
            .map(|ext| self.directory.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, CompiledStyle>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn has_definition_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DEFINITION_EXTENSIONS.contains(&ext))
}

fn read_catalog_entry(path: &Path) -> Option<StyleInfo> {
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|source| serde_yaml::from_str::<Value>(&source).map_err(|e| e.to_string()));
    let document = match parsed {
        Ok(document) => document,
        Err(reason) => {
            log::warn!("Failed to load style metadata from {}: {reason}", path.display());
            return None;
        }
    };

    let meta = document.as_mapping()?.get("meta")?;
    let name = path.file_stem()?.to_string_lossy().into_owned();
    let description = meta
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let file_name = path.file_name().unwrap_or_default().to_string_lossy();
            format!("Style from {file_name}")
        });

    Some(StyleInfo {
        name,
        description,
        path: path.to_path_buf(),
    })
}

fn render_template(name: &str, definition: &StyleDefinition) -> Result<String, StyleError> {
    let env = Environment::new();
    let rendered = env
        .render_str(
            &definition.template,
            context! {
                variables => &definition.variables,
                selectors => &definition.selectors,
                meta => &definition.meta,
                style_name => name,
            },
        )
        .map_err(|source| StyleError::Template {
            name: name.to_string(),
            source,
        })?;
    Ok(substitute(&rendered, &definition.variables))
}

fn synthesize_css(name: &str, definition: &StyleDefinition) -> String {
    let variables = &definition.variables;
    let header = definition.description().unwrap_or(name);
    let mut parts = vec![format!("/* {header} */\n")];

    if let Some(page) = definition.selectors.get(PAGE_SELECTOR) {
        if let Some(rules) = page.as_mapping() {
            parts.push(format!("@page {{\n{}\n}}\n", declarations(rules, variables)));

            let background = BACKGROUND_PROPERTIES
                .iter()
                .find_map(|property| rules.get(*property));
            if let Some(value) = background {
                let color = substitute(&stringify(value), variables);
                parts.push(format!(
                    "html, body {{\n    background-color: {color};\n}}\n"
                ));
            }
        }
    }

    for (selector, rules) in &definition.selectors {
        let selector = stringify(selector);
        if selector == PAGE_SELECTOR {
            continue;
        }
        if let Some(rules) = rules.as_mapping() {
            parts.push(format!("{selector} {{\n{}\n}}\n", declarations(rules, variables)));
        }
    }

    parts.join("\n")
}

fn declarations(rules: &Mapping, variables: &Mapping) -> String {
    rules
        .iter()
        .map(|(property, value)| {
            format!(
                "    {}: {};",
                camel_to_kebab(&stringify(property)),
                substitute(&stringify(value), variables)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace `${name}` placeholders with variable values. Unknown names are left as-is.
fn substitute(text: &str, variables: &Mapping) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            variables
                .get(&caps[1])
                .map(stringify)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items.iter().map(stringify).collect::<Vec<_>>().join(", "),
        Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
        Value::Tagged(tagged) => stringify(&tagged.value),
    }
}

/// `fontSize` -> `font-size`. Names already in kebab-case pass through.
pub fn camel_to_kebab(name: &str) -> String {
    CAMEL_BOUNDARY.replace_all(name, "$1-$2").to_lowercase()
}
