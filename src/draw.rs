//! Draw commands and the drawing port they are replayed onto.
//!
//! The page renderer never touches pixels. It produces a [`PageDrawing`], an
//! ordered list of [`DrawCommand`]s, which a backend replays onto anything
//! that implements [`Canvas`].

use crate::rect::{Point, Rect, Segment};
use crate::units::Px;

/// Where the y coordinate of a text draw sits relative to the glyphs
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Baseline {
    /// The alphabetic baseline
    Alphabetic,
    /// Halfway down the em box
    #[default]
    Middle,
}

/// Font selection for a text draw
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: Px,
    pub baseline: Baseline,
}

/// A 2-D surface owned by the host. This is the whole of what the renderer
/// needs from it; colour and family strings are passed through unchecked.
///
/// Paths are built with [`move_to`](Canvas::move_to) and
/// [`line_to`](Canvas::line_to); [`stroke`](Canvas::stroke) draws the
/// current path and starts a new one. The dash pattern stays in effect until
/// it is changed, an empty pattern meaning solid lines.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, colour: &str);
    fn stroke_rect(&mut self, rect: Rect, colour: &str, width: Px);
    fn set_line_dash(&mut self, pattern: &[Px]);
    fn move_to(&mut self, to: Point);
    fn line_to(&mut self, to: Point);
    fn stroke(&mut self, colour: &str, width: Px);
    fn fill_text(&mut self, text: &str, at: Point, font: &FontSpec, colour: &str);
}

/// One primitive operation on a page surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        colour: String,
    },
    StrokeRect {
        rect: Rect,
        colour: String,
        width: Px,
    },
    /// Independent straight segments stroked together. A dash pattern, when
    /// present, only applies to this command.
    StrokePath {
        segments: Vec<Segment>,
        colour: String,
        width: Px,
        dash: Option<[Px; 2]>,
    },
    FillText {
        text: String,
        at: Point,
        font: FontSpec,
        colour: String,
    },
}

/// Everything drawn on one page, in order. This is the unit a render pass
/// emits per page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDrawing {
    /// Stable key of the surface this page belongs on, `page-surface-{n}`
    pub surface_id: String,
    /// Zero-based page index
    pub page_index: usize,
    pub page_count: usize,
    pub width: Px,
    pub height: Px,
    pub commands: Vec<DrawCommand>,
}

impl PageDrawing {
    /// Issue every command onto `canvas`. A dashed path is followed by a reset
    /// to solid lines, so later strokes are unaffected.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for command in self.commands.iter() {
            match command {
                DrawCommand::FillRect { rect, colour } => canvas.fill_rect(*rect, colour),
                DrawCommand::StrokeRect {
                    rect,
                    colour,
                    width,
                } => canvas.stroke_rect(*rect, colour, *width),
                DrawCommand::StrokePath {
                    segments,
                    colour,
                    width,
                    dash,
                } => {
                    if segments.is_empty() {
                        continue;
                    }
                    if let Some(dash) = dash {
                        canvas.set_line_dash(dash);
                    }
                    for segment in segments.iter() {
                        canvas.move_to(segment.from);
                        canvas.line_to(segment.to);
                    }
                    canvas.stroke(colour, *width);
                    if dash.is_some() {
                        canvas.set_line_dash(&[]);
                    }
                }
                DrawCommand::FillText {
                    text,
                    at,
                    font,
                    colour,
                } => canvas.fill_text(text, *at, font, colour),
            }
        }
    }

    /// Every text draw on the page, in order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, &FontSpec)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { text, at, font, .. } => Some((text.as_str(), *at, font)),
            _ => None,
        })
    }
}
