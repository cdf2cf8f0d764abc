//! Document assembly and styling for Markdown to PDF conversion
//!
//!     This crate turns one or more Markdown documents into a single styled HTML page and hands
//!     it to a PDF renderer. Parsing Markdown (comrak) and laying out pages (headless Chrome) are
//!     delegated; what lives here is everything in between: merging, styling, outlining.
//!
//!     This is a pure lib: it powers the mdpdf cli but makes no assumptions about a shell. The one
//!     exception is the Chrome renderer, which reads its binary location from the environment.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs            # Error enums per concern
//!     ├── source.rs           # Reading and decoding input files
//!     ├── markdown.rs         # Markdown -> HTML fragment (comrak)
//!     ├── styles
//!     │   ├── registry.rs     # Built-in presets (css/styles/*.css)
//!     │   ├── templated.rs    # YAML style definitions -> CSS
//!     │   └── resolver.rs     # Selector classification and loading
//!     ├── outline.rs          # Heading anchors and table of contents
//!     ├── sanitize.rs         # Strips active content from markup
//!     ├── assemble.rs         # Sources -> ComposedDocument
//!     ├── document.rs         # ComposedDocument -> HTML page (templates/document.html)
//!     ├── layout.rs           # Page size and margin
//!     ├── render              # PdfRenderer trait, Chrome implementation
//!     └── pipeline.rs         # One conversion run, end to end
//!
//!     The flow of a run is:
//!
//!         ConvertRequest -> PageLayout (validated first)
//!                        -> SourceDocument* -> Assembler -> ComposedDocument
//!                        -> sanitize -> HTML page -> PdfRenderer -> output file
//!
//! Styles
//!
//!     A style selector is a preset name, the name of a YAML definition in the styles directory,
//!     or a path ending in `.css`. Definitions shadow presets of the same name. See
//!     [`styles::resolver`] for the exact precedence.
//!
//! Multiple documents
//!
//!     Every source document goes through its own Markdown pass. The resulting fragments are joined
//!     with either a visual separator or a page break, and heading anchors are numbered across the
//!     whole joined document.

pub mod assemble;
pub mod document;
mod dom;
pub mod error;
pub mod layout;
pub mod markdown;
pub mod outline;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod source;
pub mod styles;

pub use assemble::{AssembleOptions, Assembler, MergeMode};
pub use document::ComposedDocument;
pub use error::{ConvertError, LayoutError, RenderError, StyleError};
pub use layout::{Margin, PageLayout, PageSize};
pub use outline::OutlineEntry;
pub use pipeline::{ConvertRequest, Pipeline};
pub use render::PdfRenderer;
pub use source::SourceDocument;
pub use styles::{CompiledStyle, StyleRegistry, StyleResolver, StyleSelector, TemplatedStyles};

#[cfg(feature = "native-export")]
pub use render::ChromeRenderer;
