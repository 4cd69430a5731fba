//! Lays text out on Chinese manuscript paper (稿纸), a grid of square cells
//! with one character per cell, and renders the pages to PDF or PNG.
//!
//! Rendering happens in two steps. The [RenderEngine] normalises and wraps
//! the text, paginates it and turns every page into a [PageDrawing], an
//! ordered list of primitive draw commands. The drawing is then replayed onto
//! the surfaces of an [OutputTarget]: a PDF [Document] or a [RasterTarget].
//!
//! ```
//! use manuscript_gen::{Document, RenderEngine, RenderOptions};
//!
//! let mut engine = RenderEngine::default();
//! let mut doc = Document::default();
//! let pages = engine.render_into("床前明月光", &RenderOptions::default(), &mut doc);
//! assert_eq!(pages.len(), 1);
//!
//! let mut pdf: Vec<u8> = Vec::new();
//! doc.write(&mut pdf).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

/// Well-known Chinese font families
pub mod catalog;

mod colour;
pub use colour::*;

mod content;
pub use content::*;

mod document;
pub use document::*;

mod draw;
pub use draw::*;

mod engine;
pub use engine::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Grid geometry, text wrapping and pagination
pub mod layout;

mod options;
pub use options::*;

pub mod pagesize;

mod raster;
pub use raster::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
