use thiserror::Error;

/// All errors that the crate can generate. The layout pipeline itself is total;
/// these come from option parsing and from the output backends.
#[derive(Error, Debug)]
pub enum ManuscriptError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to encode a page surface
    Image(#[from] image::ImageError),

    #[error("unknown text size `{0}` (expected small, medium, large, 小, 中 or 大)")]
    UnknownTextSize(String),

    #[error("unknown grid pattern `{0}` (expected plain, tian, mi, 口, 田 or 米)")]
    UnknownGridPattern(String),

    #[error("unknown paper size `{0}`")]
    UnknownPaperSize(String),

    #[error("page {0} has not been rendered")]
    PageMissing(usize),

    #[error("no font has been registered, glyphs cannot be embedded")]
    NoFont,

    #[error("could not subset `{font}`: {reason}")]
    /// [subsetter] could not cut the drawn glyphs out of a CFF font
    Subset { font: String, reason: String },
}
