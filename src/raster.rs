//! Raster page surfaces: the canvas is drawn pixel for pixel into an RGBA
//! image and exported as PNG.

use crate::colour::{Colour, Pen};
use crate::draw::{Baseline, Canvas, FontSpec};
use crate::engine::OutputTarget;
use crate::font::FontBook;
use crate::rect::{Point, Rect};
use crate::units::Px;
use crate::ManuscriptError;
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder, Rgba, RgbaImage};
use owned_ttf_parser::OutlineBuilder;
use zeno::{Command, Fill, Mask, Stroke, Vector};

/// A page drawn into memory
pub struct RasterSurface {
    /// Key of the surface, `page-surface-{n}`
    pub id: String,
    pub image: RgbaImage,
}

impl RasterSurface {
    /// A fully transparent surface, the way a fresh canvas starts out
    pub fn new(id: &str, width: Px, height: Px) -> RasterSurface {
        let width = width.0.round().max(1.0) as u32;
        let height = height.0.round().max(1.0) as u32;
        RasterSurface {
            id: id.to_string(),
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The RGBA value at a pixel, [None] outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Encode the surface as a PNG image
    pub fn to_png(&self) -> Result<Vec<u8>, ManuscriptError> {
        let mut png: Vec<u8> = Vec::new();
        PngEncoder::new(&mut png).write_image(
            self.image.as_raw(),
            self.width(),
            self.height(),
            ColorType::Rgba8,
        )?;
        Ok(png)
    }

    /// Paint `colour` through an 8-bit coverage mask placed at (left, top)
    fn composite(&mut self, mask: &[u8], placement: zeno::Placement, colour: Colour) {
        let [r, g, b] = colour.to_rgb_bytes();
        let (width, height) = (self.width() as i64, self.height() as i64);
        for row in 0..placement.height as i64 {
            let y = placement.top as i64 + row;
            if y < 0 || y >= height {
                continue;
            }
            for col in 0..placement.width as i64 {
                let x = placement.left as i64 + col;
                if x < 0 || x >= width {
                    continue;
                }
                let coverage = mask[(row * placement.width as i64 + col) as usize];
                if coverage == 0 {
                    continue;
                }
                let pixel = self.image.get_pixel_mut(x as u32, y as u32);
                *pixel = blend(*pixel, [r, g, b], coverage);
            }
        }
    }

    fn fill_path(&mut self, path: &[Command], colour: Colour) {
        if path.is_empty() {
            return;
        }
        let (mask, placement) = Mask::new(path).style(Fill::NonZero).render();
        self.composite(&mask, placement, colour);
    }

    fn stroke_path(&mut self, path: &[Command], colour: Colour, width: Px, dash: &[f32]) {
        if path.is_empty() {
            return;
        }
        let mut stroke = Stroke::new(*width);
        if !dash.is_empty() {
            stroke.dash(dash, 0.0);
        }
        let (mask, placement) = Mask::new(path).style(stroke).render();
        self.composite(&mask, placement, colour);
    }
}

/// Source-over blend of an opaque colour with the given coverage
fn blend(dst: Rgba<u8>, src: [u8; 3], coverage: u8) -> Rgba<u8> {
    let a = coverage as u32;
    let inv = 255 - a;
    let [dr, dg, db, da] = dst.0;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    Rgba([
        mix(src[0], dr),
        mix(src[1], dg),
        mix(src[2], db),
        (a + (da as u32 * inv + 127) / 255) as u8,
    ])
}

fn rect_path(rect: Rect) -> Vec<Command> {
    let [tl, tr, br, bl] = rect.corners();
    vec![
        Command::MoveTo(vector(tl)),
        Command::LineTo(vector(tr)),
        Command::LineTo(vector(br)),
        Command::LineTo(vector(bl)),
        Command::Close,
    ]
}

fn vector(point: Point) -> Vector {
    Vector::new(*point.x, *point.y)
}

/// Turns a glyph outline in font units into canvas path commands
struct GlyphPath<'a> {
    commands: &'a mut Vec<Command>,
    origin_x: f32,
    baseline: f32,
    scale: f32,
}

impl GlyphPath<'_> {
    fn at(&self, x: f32, y: f32) -> Vector {
        Vector::new(self.origin_x + x * self.scale, self.baseline - y * self.scale)
    }
}

impl OutlineBuilder for GlyphPath<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let to = self.at(x, y);
        self.commands.push(Command::MoveTo(to));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.at(x, y);
        self.commands.push(Command::LineTo(to));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (control, to) = (self.at(x1, y1), self.at(x, y));
        self.commands.push(Command::QuadTo(control, to));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, to) = (self.at(x1, y1), self.at(x2, y2), self.at(x, y));
        self.commands.push(Command::CurveTo(c1, c2, to));
    }

    fn close(&mut self) {
        self.commands.push(Command::Close);
    }
}

/// A [`Canvas`] drawing onto one [`RasterSurface`]
pub struct RasterCanvas<'a> {
    surface: &'a mut RasterSurface,
    fonts: &'a FontBook,
    path: Vec<Command>,
    dash: Vec<f32>,
    fill: Pen,
    stroke: Pen,
    warned_no_font: bool,
}

impl<'a> RasterCanvas<'a> {
    pub fn new(surface: &'a mut RasterSurface, fonts: &'a FontBook) -> RasterCanvas<'a> {
        RasterCanvas {
            surface,
            fonts,
            path: Vec::new(),
            dash: Vec::new(),
            fill: Pen::default(),
            stroke: Pen::default(),
            warned_no_font: false,
        }
    }
}

impl Canvas for RasterCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, colour: &str) {
        let colour = self.fill.pick(colour);
        self.surface.fill_path(&rect_path(rect), colour);
    }

    fn stroke_rect(&mut self, rect: Rect, colour: &str, width: Px) {
        let colour = self.stroke.pick(colour);
        self.surface
            .stroke_path(&rect_path(rect), colour, width, &self.dash);
    }

    fn set_line_dash(&mut self, pattern: &[Px]) {
        let pattern = pattern.iter().map(|d| **d);
        // an odd-length pattern repeats itself
        self.dash = if pattern.len() % 2 == 1 {
            pattern.clone().chain(pattern).collect()
        } else {
            pattern.collect()
        };
    }

    fn move_to(&mut self, to: Point) {
        self.path.push(Command::MoveTo(vector(to)));
    }

    fn line_to(&mut self, to: Point) {
        if self.path.is_empty() {
            self.path.push(Command::MoveTo(vector(to)));
        } else {
            self.path.push(Command::LineTo(vector(to)));
        }
    }

    fn stroke(&mut self, colour: &str, width: Px) {
        let colour = self.stroke.pick(colour);
        let path = std::mem::take(&mut self.path);
        self.surface.stroke_path(&path, colour, width, &self.dash);
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &FontSpec, colour: &str) {
        let colour = self.fill.pick(colour);
        let Some(id) = self.fonts.resolve(&font.family) else {
            if !self.warned_no_font {
                log::warn!(
                    "no font available for `{}` on {}, skipping text",
                    font.family,
                    self.surface.id
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
        let scale = *font.size / face.units_per_em();

        let mut commands: Vec<Command> = Vec::new();
        let mut pen_x = at.x;
        for ch in text.chars() {
            let glyph = face.glyph_id_or_fallback(ch);
            let mut outline = GlyphPath {
                commands: &mut commands,
                origin_x: *pen_x,
                baseline: *baseline,
                scale,
            };
            face.outline(glyph, &mut outline);
            pen_x += face.advance(glyph, font.size);
        }
        self.surface.fill_path(&commands, colour);
    }
}

/// Renders pages into in-memory images, one per surface, each exportable as
/// `page_{n}.png`
#[derive(Default)]
pub struct RasterTarget {
    pub fonts: FontBook,
    surfaces: Vec<RasterSurface>,
}

impl RasterTarget {
    pub fn new(fonts: FontBook) -> RasterTarget {
        RasterTarget {
            fonts,
            surfaces: Vec::new(),
        }
    }

    /// Surfaces in page order
    pub fn surfaces(&self) -> &[RasterSurface] {
        &self.surfaces
    }

    /// Look a surface up by its key
    pub fn surface(&self, id: &str) -> Option<&RasterSurface> {
        self.surfaces.iter().find(|surface| surface.id == id)
    }

    /// Encode one zero-based page as PNG. Returns the file name to save it
    /// under, `page_{index + 1}.png`, and the encoded bytes.
    pub fn export_page(&self, index: usize) -> Result<(String, Vec<u8>), ManuscriptError> {
        let surface = self
            .surfaces
            .get(index)
            .ok_or(ManuscriptError::PageMissing(index + 1))?;
        let png = surface.to_png()?;
        log::debug!("encoded {} as {} bytes of PNG", surface.id, png.len());
        Ok((format!("page_{}.png", index + 1), png))
    }
}

impl OutputTarget for RasterTarget {
    type Surface<'a> = RasterCanvas<'a>;

    fn clear(&mut self) {
        self.surfaces.clear();
    }

    fn create_surface(&mut self, id: &str, width: Px, height: Px) -> RasterCanvas<'_> {
        let index = self.surfaces.len();
        self.surfaces.push(RasterSurface::new(id, width, height));
        RasterCanvas::new(&mut self.surfaces[index], &self.fonts)
    }
}
