// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Strided N-dimensional arrays and two classical planar algorithms built on
//! top of them: the monotone-chain convex hull and the minimum-area enclosing
//! rectangle found by rotating calipers.
//!
//! Point sets are always `(N, 2)` arrays where each row holds one `(x, y)`
//! pair.
//!
//! ```rust
//! # use ndgeom::data::ArrayView;
//! # use ndgeom::algorithms::{convex_hull, min_area_rectangle};
//! let coords = [0., 0., 4., 0., 4., 4., 0., 4., 2., 2.];
//! let points = ArrayView::from_shape([5, 2], &coords).unwrap();
//!
//! let hull = convex_hull(&points, None);
//! assert_eq!(hull.shape(), [4, 2]);
//!
//! let rect = min_area_rectangle(&points, None);
//! assert_eq!(rect.area(), 16.);
//! ```
use num_traits::AsPrimitive;
use std::cmp::Ordering;
use std::fmt::Debug;

pub mod algorithms;
pub mod data;

#[cfg(test)]
pub mod testing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The backing slice holds fewer elements than the requested shape.
  InsufficientData,
  /// The number of elements does not match the product of the shape, or a
  /// layout is not row-major.
  ShapeMismatch,
  IndexOutOfBounds,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::InsufficientData => write!(f, "Insufficient data for shape"),
      Error::ShapeMismatch => write!(f, "Shape mismatch"),
      Error::IndexOutOfBounds => write!(f, "Index out of bounds"),
    }
  }
}

impl std::error::Error for Error {}

pub trait TotalOrd {
  fn total_cmp(&self, other: &Self) -> Ordering;

  fn total_min(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::min_by(self, other, TotalOrd::total_cmp)
  }

  fn total_max(self, other: Self) -> Self
  where
    Self: Sized,
  {
    std::cmp::max_by(self, other, TotalOrd::total_cmp)
  }
}

impl<A: TotalOrd> TotalOrd for &A {
  fn total_cmp(&self, other: &Self) -> Ordering {
    (*self).total_cmp(*other)
  }
}

impl<A: TotalOrd, B: TotalOrd> TotalOrd for (A, B) {
  fn total_cmp(&self, other: &Self) -> Ordering {
    self
      .0
      .total_cmp(&other.0)
      .then_with(|| self.1.total_cmp(&other.1))
  }
}

/// Coordinate types accepted by the geometry algorithms.
///
/// Every coordinate converts to `f64`, which is the precision all turn tests
/// and projections are carried out in.
pub trait PointScalar: Debug + Copy + PartialOrd + TotalOrd + AsPrimitive<f64> {
  /// `false` for integer types. Cross products on integer coordinates may
  /// lose precision once converted.
  const FLOATING: bool;
}

macro_rules! fixed_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          self.cmp(other)
        }
      }

      impl PointScalar for $ty {
        const FLOATING: bool = false;
      }
    )*
  };
}

// Values that compare equal (such as 0.0 and -0.0) stay equal. NaN falls back
// to the IEEE total order so sorting never sees an inconsistent comparator.
macro_rules! floating_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl TotalOrd for $ty {
        fn total_cmp(&self, other: &Self) -> Ordering {
          self
            .partial_cmp(other)
            .unwrap_or_else(|| <$ty>::total_cmp(self, other))
        }
      }

      impl PointScalar for $ty {
        const FLOATING: bool = true;
      }
    )*
  };
}

fixed_precision!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
floating_precision!(f32, f64);
