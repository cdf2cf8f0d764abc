use mdpdf_core::styles::{StyleResolver, StyleSelector, TemplatedStyles};
use std::path::PathBuf;

fn sample_styles_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../styles")
}

#[test]
fn sample_definitions_are_cataloged() {
    let styles = TemplatedStyles::new(sample_styles_dir());
    let names: Vec<String> = styles.catalog().into_iter().map(|s| s.name).collect();
    assert!(names.contains(&"ocean".to_string()));
    assert!(names.contains(&"report".to_string()));
}

#[test]
fn ocean_compiles_from_selectors() {
    let css = TemplatedStyles::new(sample_styles_dir())
        .compile("ocean")
        .unwrap()
        .css;
    assert!(css.starts_with("/* Ocean theme with calm blues */"));
    assert!(css.contains("@page {\n    background-color: #f0f8ff;\n}"));
    assert!(css.contains("html, body {\n    background-color: #f0f8ff;\n}"));
    assert!(css.contains("font-family: Georgia, 'Times New Roman', serif;"));
    assert!(css.contains("border-bottom: 2pt solid #0066cc;"));
    assert!(!css.contains("${"));
}

#[test]
fn report_compiles_from_template() {
    let css = TemplatedStyles::new(sample_styles_dir())
        .compile("report")
        .unwrap()
        .css;
    assert!(css.contains("/* Business report with numbered sections (report) */"));
    assert!(css.contains("font-size: 10.5pt;"));
    assert!(css.contains("font-size: 22pt;"));
    assert!(css.contains("border-bottom: 1pt solid #b91c1c;"));
    assert!(!css.contains("${"));
}

#[test]
fn sample_definitions_are_offered_alongside_presets() {
    let resolver = StyleResolver::with_styles_dir(sample_styles_dir());
    assert_eq!(
        resolver.classify("ocean").unwrap(),
        StyleSelector::Templated("ocean".to_string())
    );
    let available = resolver.available_styles();
    assert!(available.contains(&"report".to_string()));
    assert!(available.contains(&"book".to_string()));
}
