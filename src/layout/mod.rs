//! Turning text into sheets of manuscript paper.
//!
//! Everything here is pure and deterministic: text goes in, lines, pages and
//! grid coordinates come out. Nothing is drawn until the page renderer turns
//! these into draw commands.
//!
//! # Example
//!
//! ```
//! use manuscript_gen::layout::{normalize, paginate, split_lines, LayoutConstants};
//!
//! let layout = LayoutConstants::default();
//! let text = normalize("床前明月光\r\n疑是地上霜");
//! let lines = split_lines(&text, layout.cols);
//! let pages = paginate(lines, layout.rows);
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].lines[1].as_str(), "疑是地上霜");
//! ```

mod constants;
mod grid;
mod paginate;
mod text;

pub use constants::*;
pub use grid::*;
pub use paginate::*;
pub use text::*;
