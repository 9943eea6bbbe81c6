//! The dimension unit used by Tegel, along with the arithmetic we need to lay
//! out text and pages.
//!
//! Everything in a pdf document is measured in points, so unlike a full
//! typesetting system we only need the one unit.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, Rem, Sub, SubAssign};
use std::{f64, fmt};

use serde::{Deserialize, Serialize};

/// Points.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Pt(pub f64);

impl fmt::Debug for Pt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} pt", self.0)
    }
}

macro_rules! impl_operators {
    ($the_type: ty, $constructor: expr) => {
        impl Add for $the_type {
            type Output = $the_type;

            fn add(self, other: $the_type) -> $the_type {
                $constructor(self.0 + other.0)
            }
        }

        impl AddAssign for $the_type {
            fn add_assign(&mut self, other: $the_type) {
                self.0 += other.0;
            }
        }

        impl Sub for $the_type {
            type Output = $the_type;

            fn sub(self, other: $the_type) -> $the_type {
                $constructor(self.0 - other.0)
            }
        }

        impl SubAssign for $the_type {
            fn sub_assign(&mut self, other: $the_type) {
                self.0 -= other.0;
            }
        }

        impl Div for $the_type {
            type Output = $the_type;

            fn div(self, other: $the_type) -> $the_type {
                $constructor(self.0 / other.0)
            }
        }

        impl DivAssign for $the_type {
            fn div_assign(&mut self, other: $the_type) {
                self.0 /= other.0;
            }
        }

        impl Mul for $the_type {
            type Output = $the_type;

            fn mul(self, other: $the_type) -> $the_type {
                $constructor(self.0 * other.0)
            }
        }

        impl Rem for $the_type {
            type Output = $the_type;

            fn rem(self, other: $the_type) -> $the_type {
                $constructor(self.0 % other.0)
            }
        }
    };
}

impl_operators!(Pt, Pt);

impl Mul<f64> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f64) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f64 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f64> for Pt {
    type Output = Pt;

    fn div(self, rhs: f64) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Compares two float numbers to check if they're close enough to be
/// considered equal.
///
/// Inspired by [this post](https://users.rust-lang.org/t/assert-eq-for-float-numbers/7034/3).
///
/// # Examples
///
/// ```
/// # use tegel::units::nearly_equal;
/// assert_eq!(nearly_equal(3.0, 2.99999), true);
/// assert_eq!(nearly_equal(4.0, 3.999), false);
/// ```
pub fn nearly_equal(a: f64, b: f64) -> bool {
    let abs_a = a.abs();
    let abs_b = b.abs();
    let diff = (a - b).abs();

    if a == b {
        // Handle infinities.
        true
    } else if a == 0.0 || b == 0.0 || diff < f64::MIN_POSITIVE {
        // One of a or b is zero (or both are extremely close to it,) use absolute error.
        diff < (f64::EPSILON * f64::MIN_POSITIVE)
    } else {
        // Use relative error.
        (diff / f64::min(abs_a + abs_b, f64::MAX)) < 10e-5
    }
}
