//! Length units used throughout the crate.
//!
//! Layout happens in canvas pixels ([`Px`]); the PDF backend maps the finished
//! canvas onto paper measured in points ([`Pt`]).

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, MulAssign, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in canvas pixels, measured from the top-left of a page surface
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    MulAssign,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
)]
#[display("{_0}px")]
pub struct Px(pub f32);

/// A length in PDF points (1/72 of an inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    MulAssign,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// A length in millimetres, only used to spell out paper sizes
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Deref, From, Into, Display)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * 72.0 / 25.4)
    }
}

macro_rules! scalar_ops {
    ($unit:ident) => {
        impl Mul<f32> for $unit {
            type Output = $unit;

            fn mul(self, rhs: f32) -> $unit {
                $unit(self.0 * rhs)
            }
        }

        impl Mul<$unit> for f32 {
            type Output = $unit;

            fn mul(self, rhs: $unit) -> $unit {
                $unit(self * rhs.0)
            }
        }

        impl Div<f32> for $unit {
            type Output = $unit;

            fn div(self, rhs: f32) -> $unit {
                $unit(self.0 / rhs)
            }
        }

        /// The ratio of two lengths
        impl Div<$unit> for $unit {
            type Output = f32;

            fn div(self, rhs: $unit) -> f32 {
                self.0 / rhs.0
            }
        }

        impl Neg for $unit {
            type Output = $unit;

            fn neg(self) -> $unit {
                $unit(-self.0)
            }
        }
    };
}

scalar_ops!(Px);
scalar_ops!(Pt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetres_convert_to_points() {
        let a4_width: Pt = Mm(210.0).into();
        assert!((*a4_width - 595.2756).abs() < 0.001);
    }

    #[test]
    fn pixel_arithmetic() {
        let cell = Px(80.0);
        assert_eq!(cell * 0.5, Px(40.0));
        assert_eq!(cell / Px(40.0), 2.0);
        assert_eq!(cell - Px(30.0) + Px(10.0), Px(60.0));
        assert_eq!([Px(1.0), Px(2.0)].into_iter().sum::<Px>(), Px(3.0));
        assert_eq!(format!("{}", Px(2.5)), "2.5px");
    }
}
