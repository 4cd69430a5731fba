use crate::draw::{Canvas, PageDrawing};
use crate::layout::{normalize, paginate, split_lines, LayoutConstants, Line};
use crate::options::RenderOptions;
use crate::render::{self, PageRenderer};
use crate::units::Px;

/// Somewhere pages can be drawn: a PDF document, a set of raster images, a
/// test recorder. One surface is created per page.
///
/// Clearing and creating surfaces are separate steps, so a target must only
/// be used by one render at a time; `&mut self` makes that the caller's
/// problem at compile time.
pub trait OutputTarget {
    type Surface<'a>: Canvas
    where
        Self: 'a;

    /// Drop every surface created so far
    fn clear(&mut self);

    /// Add a surface of the given size, keyed by `id`
    fn create_surface(&mut self, id: &str, width: Px, height: Px) -> Self::Surface<'_>;
}

/// Runs the whole pipeline, text to draw commands, and remembers what the
/// last render produced.
#[derive(Debug, Clone)]
pub struct RenderEngine {
    layout: LayoutConstants,
    editing: bool,
    num_pages: usize,
}

impl Default for RenderEngine {
    fn default() -> Self {
        RenderEngine::new(LayoutConstants::default())
    }
}

impl RenderEngine {
    /// A fresh engine starts out in text-entry mode with nothing rendered
    pub fn new(layout: LayoutConstants) -> RenderEngine {
        RenderEngine {
            layout,
            editing: true,
            num_pages: 0,
        }
    }

    pub fn layout(&self) -> &LayoutConstants {
        &self.layout
    }

    /// Lines exactly as they will be laid out, never empty
    pub fn lines(&self, text: &str) -> Vec<Line> {
        let mut lines = split_lines(&normalize(text), self.layout.cols);
        if lines.is_empty() {
            lines.push(Line::empty());
        }
        lines
    }

    /// Lay out `text` and produce one drawing per page. Always at least one
    /// page, even for empty text. Pure: does not touch the engine state.
    pub fn render(&self, text: &str, options: &RenderOptions) -> Vec<PageDrawing> {
        let lines = self.lines(text);
        let line_count = lines.len();
        let pages = paginate(lines, self.layout.rows);
        let renderer = PageRenderer::new(&self.layout, options);
        let drawings: Vec<PageDrawing> = pages.iter().map(|page| renderer.render(page)).collect();

        log::info!(
            "laid out {} lines on {} pages ({} grid)",
            line_count,
            drawings.len(),
            options.grid_pattern
        );
        drawings
    }

    /// Render and draw onto `target`, replacing whatever it held before.
    /// Leaves text-entry mode and records the page count.
    pub fn render_into<T: OutputTarget>(
        &mut self,
        text: &str,
        options: &RenderOptions,
        target: &mut T,
    ) -> Vec<PageDrawing> {
        let drawings = self.render(text, options);
        target.clear();
        for drawing in drawings.iter() {
            let mut surface = target.create_surface(&drawing.surface_id, drawing.width, drawing.height);
            drawing.replay(&mut surface);
        }

        self.num_pages = drawings.len();
        self.editing = false;
        drawings
    }

    /// Go back to editing the text. The last render stays in the target.
    pub fn switch_to_input(&mut self) {
        self.editing = true;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Pages produced by the last [`render_into`](RenderEngine::render_into)
    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Labels for choosing a page to export, "1" to the page count
    pub fn page_labels(&self) -> Vec<String> {
        (1..=self.num_pages).map(|n| n.to_string()).collect()
    }

    /// Surface key of a zero-based page index
    pub fn surface_id(&self, index: usize) -> String {
        render::surface_id(index)
    }
}
