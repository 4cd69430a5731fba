use super::constants::LayoutConstants;
use crate::options::GridPattern;
use crate::rect::{Point, Rect, Segment};
use crate::units::Px;

/// Whether a grid line is drawn solid or with the bisector dash pattern
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrokeKind {
    Solid,
    Dashed,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridLine {
    pub segment: Segment,
    pub kind: StrokeKind,
}

/// The ruling of one sheet: every cell edge, the optional bisectors and
/// diagonals, and the border around the whole grid. Identical for every page
/// rendered with the same layout and pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    /// Inner lines in drawing order
    pub lines: Vec<GridLine>,
    /// Stroke width of every entry in `lines`
    pub line_width: Px,
    /// `[segment, gap]` applied to the dashed lines
    pub dash: [Px; 2],
    /// Rectangle around the ruled area
    pub border: Rect,
    pub border_width: Px,
}

impl GridGeometry {
    /// Rule a sheet.
    ///
    /// Each row contributes two full-width horizontals, one at the top of its
    /// spacing band and one at the top of its cells, then the left edge of
    /// every cell. A final horizontal closes the last row. The right edge of
    /// the last column coincides with the border.
    pub fn compute(layout: &LayoutConstants, pattern: GridPattern) -> GridGeometry {
        let grid = layout.grid_rect();
        let per_cell = 1 + pattern.dashed_lines_per_cell();
        let mut lines =
            Vec::with_capacity(layout.rows() * (2 + layout.cols() * per_cell) + 1);

        let horizontal = |y: Px| GridLine {
            segment: Segment::new(Point::new(grid.left(), y), Point::new(grid.right(), y)),
            kind: StrokeKind::Solid,
        };

        for row in 0..layout.rows() {
            let band_top = layout.margin + layout.row_pitch() * row as f32;
            lines.push(horizontal(band_top));
            lines.push(horizontal(band_top + layout.cell_spacing()));

            for col in 0..layout.cols() {
                let cell = layout.cell_rect(row, col);
                let [top_left, _, _, bottom_left] = cell.corners();
                lines.push(GridLine {
                    segment: Segment::new(top_left, bottom_left),
                    kind: StrokeKind::Solid,
                });
                lines.extend(
                    cell_marks(&cell, pattern)
                        .into_iter()
                        .map(|segment| GridLine {
                            segment,
                            kind: StrokeKind::Dashed,
                        }),
                );
            }
        }
        lines.push(horizontal(
            layout.margin + layout.row_pitch() * layout.rows() as f32,
        ));

        GridGeometry {
            lines,
            line_width: layout.line_stroke,
            dash: layout.dash_pattern(),
            border: grid,
            border_width: layout.border_stroke,
        }
    }

    pub fn solid(&self) -> impl Iterator<Item = Segment> + '_ {
        self.of_kind(StrokeKind::Solid)
    }

    pub fn dashed(&self) -> impl Iterator<Item = Segment> + '_ {
        self.of_kind(StrokeKind::Dashed)
    }

    fn of_kind(&self, kind: StrokeKind) -> impl Iterator<Item = Segment> + '_ {
        self.lines
            .iter()
            .filter(move |line| line.kind == kind)
            .map(|line| line.segment)
    }
}

/// The dashed guides inside one cell: the two bisectors for 田, plus both
/// diagonals for 米
fn cell_marks(cell: &Rect, pattern: GridPattern) -> Vec<Segment> {
    let mut marks = Vec::with_capacity(pattern.dashed_lines_per_cell());
    if pattern == GridPattern::Plain {
        return marks;
    }

    let [top_left, top_right, bottom_right, bottom_left] = cell.corners();
    let mid_x = cell.left() + cell.width / 2.0;
    let mid_y = cell.bottom() - cell.height / 2.0;
    marks.push(Segment::new(
        Point::new(mid_x, cell.top()),
        Point::new(mid_x, cell.bottom()),
    ));
    marks.push(Segment::new(
        Point::new(cell.left(), mid_y),
        Point::new(cell.right(), mid_y),
    ));

    if pattern == GridPattern::CrossDiagonal {
        marks.push(Segment::new(top_left, bottom_right));
        marks.push(Segment::new(bottom_left, top_right));
    }
    marks
}
