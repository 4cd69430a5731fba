use crate::rect::{Point, Rect};
use crate::units::Px;
use std::num::NonZeroUsize;

const TWENTY: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Every measurement that shapes a sheet of manuscript paper. Decided once,
/// before rendering starts, and shared read-only by every page.
///
/// Lengths are in canvas pixels. The ratio fields scale with the cell size so
/// that changing [`cell_width`](LayoutConstants::cell_width) keeps the paper
/// looking the same, only larger or smaller.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConstants {
    /// Blank space around the ruled grid on all four sides
    pub margin: Px,
    /// Rows of cells on one page
    pub rows: NonZeroUsize,
    /// Cells in one row, which is also the wrapping width in characters
    pub cols: NonZeroUsize,
    pub cell_width: Px,
    pub cell_height: Px,
    /// Width of the cell edges and bisectors
    pub line_stroke: Px,
    /// Width of the rectangle around the whole grid
    pub border_stroke: Px,
    /// Gap between two rows of cells, relative to the cell height
    pub spacing_ratio: f32,
    /// Dash and gap lengths of the bisectors, relative to the cell width
    pub dash_segment_ratio: f32,
    pub dash_gap_ratio: f32,
    /// Glyph size at the medium text size, relative to the cell width
    pub font_size_ratio: f32,
    /// Footer glyph size, relative to the cell width
    pub footer_font_ratio: f32,
    /// How many footer glyphs fit between the footer start and the right margin
    pub footer_width_in_glyphs: f32,
    /// Distance of the footer midline from the bottom edge, relative to the margin
    pub footer_bottom_ratio: f32,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        LayoutConstants {
            margin: Px(160.0),
            rows: TWENTY,
            cols: TWENTY,
            cell_width: Px(80.0),
            cell_height: Px(80.0),
            line_stroke: Px(2.0),
            border_stroke: Px(4.0),
            spacing_ratio: 4.0 / 10.0,
            dash_segment_ratio: 5.0 / 80.0,
            dash_gap_ratio: 3.0 / 80.0,
            font_size_ratio: 5.0 / 8.0,
            footer_font_ratio: 9.0 / 20.0,
            footer_width_in_glyphs: 7.0,
            footer_bottom_ratio: 11.0 / 16.0,
        }
    }
}

impl LayoutConstants {
    /// Change the number of rows and columns, keeping all other measurements
    pub fn with_grid(mut self, rows: NonZeroUsize, cols: NonZeroUsize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Use square cells of the given size. The strokes and the margin scale
    /// along with the cells.
    pub fn with_cell_size(mut self, size: Px) -> Self {
        let scale = size / self.cell_width;
        self.margin = self.margin * scale;
        self.line_stroke = self.line_stroke * scale;
        self.border_stroke = self.border_stroke * scale;
        self.cell_width = size;
        self.cell_height = size;
        self
    }

    /// Lines (rows of cells) per page
    pub fn rows(&self) -> usize {
        self.rows.get()
    }

    /// Characters per line
    pub fn cols(&self) -> usize {
        self.cols.get()
    }

    pub fn cell_spacing(&self) -> Px {
        self.cell_height * self.spacing_ratio
    }

    /// Vertical distance from one row band to the next: the spacing above a row
    /// plus the row of cells itself
    pub fn row_pitch(&self) -> Px {
        self.cell_height + self.cell_spacing()
    }

    /// `[segment, gap]` of the dashed bisectors
    pub fn dash_pattern(&self) -> [Px; 2] {
        [
            self.cell_width * self.dash_segment_ratio,
            self.cell_width * self.dash_gap_ratio,
        ]
    }

    /// Glyph size before the text-size multiplier is applied
    pub fn base_font_size(&self) -> Px {
        self.cell_width * self.font_size_ratio
    }

    pub fn footer_font_size(&self) -> Px {
        self.cell_width * self.footer_font_ratio
    }

    pub fn canvas_width(&self) -> Px {
        self.cell_width * self.cols() as f32 + self.margin * 2.0
    }

    pub fn canvas_height(&self) -> Px {
        self.cell_height * self.rows() as f32
            + self.cell_spacing() * (self.rows() + 1) as f32
            + self.margin * 2.0
    }

    /// The whole ruled area, which is also where the border is stroked
    pub fn grid_rect(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.canvas_width() - self.margin * 2.0,
            self.canvas_height() - self.margin * 2.0,
        )
    }

    /// The square for a zero-based row and column. The spacing band of a row
    /// lies above its cells.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let bottom = self.margin + self.row_pitch() * (row + 1) as f32;
        Rect::new(
            self.margin + self.cell_width * col as f32,
            bottom - self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }

    /// Left end of the footer text, on its vertical midline
    pub fn footer_anchor(&self) -> Point {
        Point::new(
            self.canvas_width() - self.margin - self.footer_font_size() * self.footer_width_in_glyphs,
            self.canvas_height() - self.margin * self.footer_bottom_ratio,
        )
    }
}
