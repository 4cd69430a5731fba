//! Placing a pixel canvas on a sheet of paper.

use crate::pagesize::PageSize;
use crate::units::*;
use pdf_writer::Content;

/// An affine transformation matrix in PDF convention.
///
/// The matrix is represented as [a, b, c, d, e, f] corresponding to:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Canvas coordinates grow downwards from the top-left while PDF user space
/// grows upwards from the bottom-left, so pages are drawn through a transform
/// from [`Transform::fit_canvas`] that scales, flips and centres the canvas.
///
/// ```
/// use manuscript_gen::{Pt, Px, Transform};
///
/// let t = Transform::fit_canvas((Px(100.0), Px(100.0)), (Pt(200.0), Pt(300.0)));
/// // the canvas' top-left corner lands at the top of the centred square
/// assert_eq!(t.apply(0.0, 0.0), (0.0, 250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Self::identity()
        }
    }

    /// Create a scaling transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Combine this transform with another (self * other): `self` is applied
    /// first
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Scale a canvas to the largest size that fits on `paper`, keeping its
    /// aspect ratio, turn it right side up and centre it.
    pub fn fit_canvas(canvas: (Px, Px), paper: PageSize) -> Self {
        let (canvas_width, canvas_height) = canvas;
        let (paper_width, paper_height) = paper;
        let s = (*paper_width / *canvas_width).min(*paper_height / *canvas_height);
        let left = (paper_width - Pt(*canvas_width * s)) / 2.0;
        let top = (paper_height - Pt(*canvas_height * s)) / 2.0;
        Transform::scale(s, -s).then(Transform::translate(left, paper_height - top))
    }

    /// Map a point through the transform
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Uniform scale factor, the size of one canvas pixel on paper
    pub fn scale_factor(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }

    /// Write the transform to a PDF content stream
    pub fn write_to_content(&self, content: &mut Content) {
        content.transform([self.a, self.b, self.c, self.d, self.e, self.f]);
    }
}
