//! The PDF drawing surface: canvas calls become content stream operators.

use crate::colour::{Colour, Pen};
use crate::draw::{Baseline, Canvas, FontSpec};
use crate::font::{FontBook, GlyphSubset};
use crate::pagesize::PageSize;
use crate::rect::{Point, Rect};
use crate::transform::Transform;
use crate::units::Px;
use pdf_writer::{Content, Name, Str};
use std::collections::{BTreeMap, BTreeSet};

/// One page of a PDF document, as drawn so far
pub struct PdfPage {
    /// Key of the surface this page was created for
    pub surface_id: String,
    pub paper: PageSize,
    /// How canvas pixels map onto the paper
    pub transform: Transform,
    pub(crate) content: Content,
    /// Arena indices of the fonts drawn with on this page
    pub(crate) fonts: BTreeSet<usize>,
}

impl PdfPage {
    pub(crate) fn new(surface_id: &str, canvas: (Px, Px), paper: PageSize) -> PdfPage {
        let transform = Transform::fit_canvas(canvas, paper);
        let mut content = Content::new();
        content.save_state();
        transform.write_to_content(&mut content);
        PdfPage {
            surface_id: surface_id.to_string(),
            paper,
            transform,
            content,
            fonts: BTreeSet::new(),
        }
    }

    /// Font arena indices drawn with on this page
    pub fn fonts_used(&self) -> impl Iterator<Item = usize> + '_ {
        self.fonts.iter().copied()
    }

    /// Close the page and return its raw content stream
    pub(crate) fn finish_content(mut self) -> Vec<u8> {
        self.content.restore_state();
        self.content.finish()
    }
}

/// A [`Canvas`] drawing onto one [`PdfPage`].
///
/// PDF doesn't allow changing the graphics state while a path is being
/// built, so path segments are buffered and only written out, together with
/// the colour, width and dash they are stroked with, on [`Canvas::stroke`].
pub struct PdfCanvas<'a> {
    page: &'a mut PdfPage,
    fonts: &'a FontBook,
    /// Glyphs drawn so far in the whole document, per font arena index
    subsets: &'a mut BTreeMap<usize, GlyphSubset>,
    path: Vec<Vec<Point>>,
    dash: Vec<Px>,
    written_dash: Vec<Px>,
    fill: Pen,
    stroke: Pen,
    warned_no_font: bool,
}

impl<'a> PdfCanvas<'a> {
    pub(crate) fn new(
        page: &'a mut PdfPage,
        fonts: &'a FontBook,
        subsets: &'a mut BTreeMap<usize, GlyphSubset>,
    ) -> PdfCanvas<'a> {
        PdfCanvas {
            page,
            fonts,
            subsets,
            path: Vec::new(),
            dash: Vec::new(),
            written_dash: Vec::new(),
            fill: Pen::default(),
            stroke: Pen::default(),
            warned_no_font: false,
        }
    }

    fn sync_dash(&mut self) {
        if self.dash == self.written_dash {
            return;
        }
        self.page
            .content
            .set_dash_pattern(self.dash.iter().map(|d| **d), 0.0);
        self.written_dash = self.dash.clone();
    }
}

impl Canvas for PdfCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, colour: &str) {
        let colour = self.fill.pick(colour);
        let content = &mut self.page.content;
        set_fill(content, colour);
        content
            .rect(*rect.x, *rect.y, *rect.width, *rect.height)
            .fill_nonzero();
    }

    fn stroke_rect(&mut self, rect: Rect, colour: &str, width: Px) {
        let colour = self.stroke.pick(colour);
        self.sync_dash();
        let content = &mut self.page.content;
        set_stroke(content, colour);
        content.set_line_width(*width);
        content
            .rect(*rect.x, *rect.y, *rect.width, *rect.height)
            .stroke();
    }

    fn set_line_dash(&mut self, pattern: &[Px]) {
        // an odd-length pattern repeats itself, like a canvas dash list
        self.dash = if pattern.len() % 2 == 1 {
            pattern.iter().chain(pattern.iter()).copied().collect()
        } else {
            pattern.to_vec()
        };
    }

    fn move_to(&mut self, to: Point) {
        self.path.push(vec![to]);
    }

    fn line_to(&mut self, to: Point) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push(to),
            None => self.path.push(vec![to]),
        }
    }

    fn stroke(&mut self, colour: &str, width: Px) {
        let colour = self.stroke.pick(colour);
        let path = std::mem::take(&mut self.path);
        if path.iter().all(|subpath| subpath.len() < 2) {
            return;
        }

        self.sync_dash();
        let content = &mut self.page.content;
        set_stroke(content, colour);
        content.set_line_width(*width);
        for subpath in path.iter().filter(|subpath| subpath.len() >= 2) {
            let mut points = subpath.iter();
            if let Some(start) = points.next() {
                content.move_to(*start.x, *start.y);
            }
            for point in points {
                content.line_to(*point.x, *point.y);
            }
        }
        content.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &FontSpec, colour: &str) {
        let colour = self.fill.pick(colour);
        let Some(id) = self.fonts.resolve(&font.family) else {
            if !self.warned_no_font {
                log::warn!(
                    "no font available for `{}` on {}, skipping text",
                    font.family,
                    self.page.surface_id
                );
                self.warned_no_font = true;
            }
            return;
        };
        let face = self.fonts.get(id);

        let baseline = match font.baseline {
            Baseline::Alphabetic => at.y,
            Baseline::Middle => at.y + face.middle_to_baseline(font.size),
        };

        self.page.fonts.insert(id.index());
        let subset = self.subsets.entry(id.index()).or_default();
        let mut glyphs = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            let cid = subset.add(face.glyph_id_or_fallback(ch), ch);
            glyphs.extend_from_slice(&cid.to_be_bytes());
        }

        let name = format!("F{}", id.index());
        let content = &mut self.page.content;
        set_fill(content, colour);
        content.begin_text();
        content.set_font(Name(name.as_bytes()), *font.size);
        // text space is flipped back upright inside the flipped canvas space
        content.set_text_matrix([1.0, 0.0, 0.0, -1.0, *at.x, *baseline]);
        content.show(Str(&glyphs));
        content.end_text();
    }
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    fn page() -> PdfPage {
        PdfPage::new("page-surface-1", (Px(1920.0), Px(2592.0)), pagesize::A4)
    }

    fn stream(page: PdfPage) -> String {
        String::from_utf8_lossy(&page.finish_content()).into_owned()
    }

    #[test]
    fn page_is_drawn_through_the_canvas_transform() {
        let page = page();
        let text = stream(page);
        assert!(text.starts_with("q\n"));
        assert!(text.contains(" cm\n"));
        assert!(text.trim_end().ends_with('Q'));
    }

    #[test]
    fn dash_is_written_with_the_stroke_and_reset() {
        let mut page = page();
        let fonts = FontBook::new();
        let mut subsets = BTreeMap::new();
        {
            let mut canvas = PdfCanvas::new(&mut page, &fonts, &mut subsets);
            canvas.set_line_dash(&[Px(5.0), Px(3.0)]);
            canvas.move_to(Point::from((0.0, 0.0)));
            canvas.line_to(Point::from((10.0, 0.0)));
            canvas.stroke("#3C3", Px(2.0));
            canvas.set_line_dash(&[]);
            canvas.move_to(Point::from((0.0, 5.0)));
            canvas.line_to(Point::from((10.0, 5.0)));
            canvas.stroke("#3C3", Px(2.0));
        }
        let text = stream(page);
        assert!(text.contains("[5 3] 0 d"));
        assert!(text.contains("[] 0 d"));
        assert_eq!(text.matches("\nS\n").count(), 2);
    }

    #[test]
    fn text_without_fonts_is_skipped() {
        let mut page = page();
        let fonts = FontBook::new();
        let mut subsets = BTreeMap::new();
        {
            let mut canvas = PdfCanvas::new(&mut page, &fonts, &mut subsets);
            let font = FontSpec {
                family: "KaiTi".to_string(),
                size: Px(50.0),
                baseline: Baseline::Middle,
            };
            canvas.fill_text("字", Point::from((175.0, 232.0)), &font, "#000");
        }
        assert_eq!(page.fonts_used().count(), 0);
        assert!(subsets.is_empty());
        assert!(!stream(page).contains("BT"));
    }

    #[test]
    fn text_is_shown_with_document_wide_ids() {
        let mut fonts = FontBook::new();
        fonts.add(
            crate::Font::load_file(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/tests/fixtures/DejaVuSans.ttf"
            ))
            .expect("fixture font loads"),
        );
        let font = FontSpec {
            family: "sans-serif".to_string(),
            size: Px(50.0),
            baseline: Baseline::Middle,
        };
        let mut subsets = BTreeMap::new();

        let mut first = page();
        PdfCanvas::new(&mut first, &fonts, &mut subsets).fill_text(
            "HeH",
            Point::from((175.0, 232.0)),
            &font,
            "#000",
        );
        let mut second = PdfPage::new("page-surface-2", (Px(1920.0), Px(2592.0)), pagesize::A4);
        PdfCanvas::new(&mut second, &fonts, &mut subsets).fill_text(
            "eo",
            Point::from((175.0, 232.0)),
            &font,
            "#000",
        );

        assert_eq!(first.fonts_used().collect::<Vec<_>>(), vec![0]);
        assert_eq!(second.fonts_used().collect::<Vec<_>>(), vec![0]);
        // H, e and o, shared across both pages
        assert_eq!(subsets.get(&0).map(GlyphSubset::len), Some(3));
        let text = stream(first);
        assert!(text.contains("BT\n"));
        assert!(text.contains("/F0 50 Tf"));
        assert!(text.contains("ET\n"));
    }

    #[test]
    fn empty_path_strokes_nothing() {
        let mut page = page();
        let fonts = FontBook::new();
        let mut subsets = BTreeMap::new();
        {
            let mut canvas = PdfCanvas::new(&mut page, &fonts, &mut subsets);
            canvas.move_to(Point::from((1.0, 1.0)));
            canvas.stroke("#000", Px(1.0));
        }
        assert!(!stream(page).contains("\nS\n"));
    }
}
