use crate::draw::{Baseline, DrawCommand, FontSpec, PageDrawing};
use crate::layout::{GridGeometry, LayoutConstants, Page};
use crate::options::{RenderOptions, TextSize};
use crate::rect::{Point, Rect};
use crate::units::Px;

/// Footer line for the zero-based page `index` out of `count` pages
pub fn footer_text(index: usize, count: usize) -> String {
    format!("第 {} 页  共 {} 页", index + 1, count)
}

/// Key of the surface for the zero-based page `index`
pub fn surface_id(index: usize) -> String {
    format!("page-surface-{}", index + 1)
}

/// Glyph size for a text size, rounded to whole pixels
pub fn glyph_size(layout: &LayoutConstants, size: TextSize) -> Px {
    Px((*layout.base_font_size() * size.multiplier()).round())
}

/// Turns pages into draw commands. The grid is ruled once and reused for
/// every page of a render pass.
pub struct PageRenderer<'a> {
    layout: &'a LayoutConstants,
    options: &'a RenderOptions,
    grid: GridGeometry,
}

impl<'a> PageRenderer<'a> {
    pub fn new(layout: &'a LayoutConstants, options: &'a RenderOptions) -> PageRenderer<'a> {
        PageRenderer {
            layout,
            options,
            grid: GridGeometry::compute(layout, options.grid_pattern),
        }
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// Draw one page: paper, ruling, footer, then the characters row by row.
    pub fn render(&self, page: &Page) -> PageDrawing {
        let layout = self.layout;
        let options = self.options;
        let family = options.resolved_font_family();
        let width = layout.canvas_width();
        let height = layout.canvas_height();

        let glyph_count: usize = page.lines.iter().map(|line| line.char_count()).sum();
        let mut commands = Vec::with_capacity(glyph_count + 5);

        commands.push(DrawCommand::FillRect {
            rect: Rect::new(Px(0.0), Px(0.0), width, height),
            colour: options.paper_colour.clone(),
        });

        commands.push(DrawCommand::StrokePath {
            segments: self.grid.solid().collect(),
            colour: options.grid_colour.clone(),
            width: self.grid.line_width,
            dash: None,
        });
        let dashed: Vec<_> = self.grid.dashed().collect();
        if !dashed.is_empty() {
            commands.push(DrawCommand::StrokePath {
                segments: dashed,
                colour: options.grid_colour.clone(),
                width: self.grid.line_width,
                dash: Some(self.grid.dash),
            });
        }
        commands.push(DrawCommand::StrokeRect {
            rect: self.grid.border,
            colour: options.grid_colour.clone(),
            width: self.grid.border_width,
        });

        commands.push(DrawCommand::FillText {
            text: footer_text(page.index, page.count),
            at: layout.footer_anchor(),
            font: FontSpec {
                family: family.to_string(),
                size: layout.footer_font_size(),
                baseline: Baseline::Middle,
            },
            colour: options.grid_colour.clone(),
        });

        let size = glyph_size(layout, options.text_size);
        let padding = (layout.cell_width - size) / 2.0;
        let font = FontSpec {
            family: family.to_string(),
            size,
            baseline: Baseline::Middle,
        };
        for (row, line) in page.lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = layout.cell_rect(row, col);
                commands.push(DrawCommand::FillText {
                    text: ch.to_string(),
                    at: Point::new(
                        cell.left() + padding,
                        cell.bottom() - layout.cell_height / 2.0,
                    ),
                    font: font.clone(),
                    colour: options.text_colour.clone(),
                });
            }
        }

        log::debug!(
            "rendered page {} of {}: {} lines, {} glyphs, {} commands",
            page.number(),
            page.count,
            page.lines.len(),
            glyph_count,
            commands.len()
        );

        PageDrawing {
            surface_id: surface_id(page.index),
            page_index: page.index,
            page_count: page.count,
            width,
            height,
            commands,
        }
    }
}

/// Render a single page without keeping the ruling around
pub fn render_page(layout: &LayoutConstants, page: &Page, options: &RenderOptions) -> PageDrawing {
    PageRenderer::new(layout, options).render(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Line;
    use crate::options::GridPattern;

    fn page(lines: &[&str], index: usize, count: usize) -> Page {
        Page {
            index,
            count,
            lines: lines.iter().map(|&l| Line::from(l)).collect(),
        }
    }

    #[test]
    fn footer_wording() {
        assert_eq!(footer_text(0, 1), "第 1 页  共 1 页");
        assert_eq!(footer_text(2, 7), "第 3 页  共 7 页");
    }

    #[test]
    fn glyph_sizes_round_to_pixels() {
        let layout = LayoutConstants::default();
        assert_eq!(glyph_size(&layout, TextSize::Small), Px(40.0));
        assert_eq!(glyph_size(&layout, TextSize::Medium), Px(50.0));
        assert_eq!(glyph_size(&layout, TextSize::Large), Px(70.0));
    }

    #[test]
    fn commands_come_in_drawing_order() {
        let layout = LayoutConstants::default();
        let options = RenderOptions {
            grid_pattern: GridPattern::Cross,
            ..Default::default()
        };
        let drawing = render_page(&layout, &page(&["AB"], 0, 1), &options);

        assert!(matches!(&drawing.commands[0], DrawCommand::FillRect { colour, .. } if colour == "#fff"));
        assert!(matches!(&drawing.commands[1], DrawCommand::StrokePath { dash: None, .. }));
        assert!(matches!(&drawing.commands[2], DrawCommand::StrokePath { dash: Some(_), .. }));
        assert!(matches!(&drawing.commands[3], DrawCommand::StrokeRect { width, .. } if *width == Px(4.0)));
        assert!(matches!(&drawing.commands[4], DrawCommand::FillText { text, colour, .. }
            if text == "第 1 页  共 1 页" && colour == "#3C3"));
        assert_eq!(drawing.commands.len(), 7);
        assert_eq!(drawing.surface_id, "page-surface-1");
    }

    #[test]
    fn plain_pattern_has_no_dashed_command() {
        let layout = LayoutConstants::default();
        let drawing = render_page(&layout, &page(&[""], 0, 1), &RenderOptions::default());
        let dashed = drawing
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePath { dash: Some(_), .. }))
            .count();
        assert_eq!(dashed, 0);
    }

    #[test]
    fn glyphs_are_centred_in_their_cells() {
        let layout = LayoutConstants::default();
        let drawing = render_page(&layout, &page(&["AB", "", "C"], 0, 1), &RenderOptions::default());
        let glyphs: Vec<_> = drawing.texts().skip(1).collect();
        assert_eq!(glyphs.len(), 3);

        let (text, at, font) = glyphs[0];
        assert_eq!(text, "A");
        assert_eq!(at, Point::new(Px(175.0), Px(232.0)));
        assert_eq!(font.size, Px(50.0));
        assert_eq!(font.family, "sans-serif");
        assert_eq!(font.baseline, Baseline::Middle);

        assert_eq!(glyphs[1].1, Point::new(Px(255.0), Px(232.0)));
        // third line, first column
        assert_eq!(glyphs[2].0, "C");
        assert_eq!(glyphs[2].1, Point::new(Px(175.0), Px(456.0)));
    }

    #[test]
    fn large_text_overhangs_evenly() {
        let layout = LayoutConstants::default();
        let options = RenderOptions {
            text_size: TextSize::Large,
            font_family: "KaiTi".into(),
            ..Default::default()
        };
        let drawing = render_page(&layout, &page(&["字"], 0, 1), &options);
        let (_, at, font) = drawing.texts().nth(1).unwrap();
        assert_eq!(at.x, Px(165.0));
        assert_eq!(font.family, "KaiTi");
    }
}
