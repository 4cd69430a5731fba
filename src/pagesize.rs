//! Paper sizes a rendered sheet can be printed on.
//!
//! All sizes are in portrait orientation (width, height). The manuscript
//! canvas is taller than it is wide, so portrait is the only orientation that
//! makes sense for it.
//!
//! # Example
//!
//! ```
//! use manuscript_gen::pagesize::{self, paper_size};
//!
//! assert_eq!(paper_size("a4").unwrap(), pagesize::A4);
//! assert!(paper_size("napkin").is_err());
//! ```

use crate::units::*;
use crate::ManuscriptError;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
/// ISO B5, a common size for exercise books
pub const B5: PageSize = (Pt(176.0 * 72.0 / 25.4), Pt(250.0 * 72.0 / 25.4));
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

const NAMED: [(&str, PageSize); 6] = [
    ("a3", A3),
    ("a4", A4),
    ("a5", A5),
    ("b5", B5),
    ("letter", LETTER),
    ("legal", LEGAL),
];

/// Look a paper size up by name, ignoring case
pub fn paper_size(name: &str) -> Result<PageSize, ManuscriptError> {
    let name = name.trim();
    NAMED
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, size)| size)
        .ok_or_else(|| ManuscriptError::UnknownPaperSize(name.to_string()))
}

/// Names accepted by [paper_size]
pub fn paper_names() -> impl Iterator<Item = &'static str> {
    NAMED.iter().map(|&(name, _)| name)
}

/// Paper size from a width and a height in millimetres
pub fn custom(width: Mm, height: Mm) -> PageSize {
    (width.into(), height.into())
}
