use crate::units::*;

/// A position on a page surface, measured from its top-left corner
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: Px,
    pub y: Px,
}

impl Point {
    pub fn new(x: Px, y: Px) -> Point {
        Point { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x: Px(x), y: Px(y) }
    }
}

/// A straight line between two points
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Segment {
        Segment { from, to }
    }

    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }

    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }

    pub fn length(&self) -> Px {
        let dx = *self.to.x - *self.from.x;
        let dy = *self.to.y - *self.from.y;
        Px(dx.hypot(dy))
    }
}

/// An axis-aligned rectangle, specified by its top-left corner and its size
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: Px,
    pub y: Px,
    pub width: Px,
    pub height: Px,
}

impl Rect {
    pub fn new(x: Px, y: Px, width: Px, height: Px) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> Px {
        self.x
    }

    pub fn right(&self) -> Px {
        self.x + self.width
    }

    pub fn top(&self) -> Px {
        self.y
    }

    pub fn bottom(&self) -> Px {
        self.y + self.height
    }

    /// The four corners, clockwise from the top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }
}
