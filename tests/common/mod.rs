#![allow(dead_code)]

use manuscript_gen::{Canvas, FontSpec, OutputTarget, Point, Px, Rect};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One call made on a [Canvas]
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    FillRect(Rect, String),
    StrokeRect(Rect, Px),
    Dash(Vec<Px>),
    MoveTo(Point),
    LineTo(Point),
    Stroke(String, Px),
    Text(String, Point, FontSpec),
}

/// An output target that remembers every surface and every call made on it
#[derive(Default)]
pub struct Recorder {
    pub surfaces: Vec<(String, Px, Px, Vec<Op>)>,
}

pub struct Tape<'a>(&'a mut Vec<Op>);

impl Canvas for Tape<'_> {
    fn fill_rect(&mut self, rect: Rect, colour: &str) {
        self.0.push(Op::FillRect(rect, colour.to_string()));
    }

    fn stroke_rect(&mut self, rect: Rect, _colour: &str, width: Px) {
        self.0.push(Op::StrokeRect(rect, width));
    }

    fn set_line_dash(&mut self, pattern: &[Px]) {
        self.0.push(Op::Dash(pattern.to_vec()));
    }

    fn move_to(&mut self, to: Point) {
        self.0.push(Op::MoveTo(to));
    }

    fn line_to(&mut self, to: Point) {
        self.0.push(Op::LineTo(to));
    }

    fn stroke(&mut self, colour: &str, width: Px) {
        self.0.push(Op::Stroke(colour.to_string(), width));
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &FontSpec, _colour: &str) {
        self.0.push(Op::Text(text.to_string(), at, font.clone()));
    }
}

impl OutputTarget for Recorder {
    type Surface<'a> = Tape<'a>;

    fn clear(&mut self) {
        self.surfaces.clear();
    }

    fn create_surface(&mut self, id: &str, width: Px, height: Px) -> Tape<'_> {
        self.surfaces.push((id.to_string(), width, height, Vec::new()));
        let index = self.surfaces.len() - 1;
        Tape(&mut self.surfaces[index].3)
    }
}
