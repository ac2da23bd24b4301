// Strategies and property checks for point sets.
//
// Point sets are `(n, 2)` arrays. Checks return `Err` through `prop_assert!`
// so proptest can shrink failing inputs.
use crate::data::vector::turn;
use crate::data::{ArrayBase, Data, NdArray, RotatedRectangle};
use crate::PointScalar;

use core::ops::Range;
use num_traits::AsPrimitive;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

///////////////////////////////////////////////////////////////////////////////
// Strategies

pub fn point_set<T, C>(coord: C, rows: Range<usize>) -> impl Strategy<Value = NdArray<T, 2>>
where
  T: PointScalar,
  C: Strategy<Value = T> + Clone,
{
  vec((coord.clone(), coord), rows).prop_map(|pairs| {
    NdArray::from_shape_fn([pairs.len(), 2], |[row, col]| {
      let (x, y) = pairs[row];
      if col == 0 {
        x
      } else {
        y
      }
    })
  })
}

/// Integer points whose products stay exact in `f64`.
pub fn any_i32_points(rows: Range<usize>) -> impl Strategy<Value = NdArray<i32, 2>> {
  point_set(-1000..1000, rows)
}

/// Points on a tiny grid. Duplicates and collinear runs are common.
pub fn crowded_points(rows: Range<usize>) -> impl Strategy<Value = NdArray<i8, 2>> {
  point_set(-4_i8..=4, rows)
}

pub fn any_f64_points(rows: Range<usize>) -> impl Strategy<Value = NdArray<f64, 2>> {
  point_set(-1e3..1e3, rows)
}

///////////////////////////////////////////////////////////////////////////////
// Checks

fn same_point<S1, S2>(a: &ArrayBase<S1, 1>, b: &ArrayBase<S2, 1>) -> bool
where
  S1: Data,
  S2: Data,
  S1::Elem: PointScalar,
  S2::Elem: PointScalar,
{
  a.iter().zip(b.iter()).all(|(x, y)| {
    let (x, y): (f64, f64) = (x.as_(), y.as_());
    x == y
  })
}

/// Every hull vertex is one of the input points.
pub fn check_hull_subset<T: PointScalar>(
  points: &NdArray<T, 2>,
  hull: &NdArray<T, 2>,
) -> Result<(), TestCaseError> {
  for vertex in hull.rows() {
    prop_assert!(
      points.rows().any(|pt| same_point(&pt, &vertex)),
      "hull vertex {:?} not in input",
      vertex
    );
  }
  Ok(())
}

/// Consecutive hull triples turn counter-clockwise.
pub fn check_convex<T: PointScalar>(hull: &NdArray<T, 2>, eps: f64) -> Result<(), TestCaseError> {
  let n = hull.nrows();
  if n < 3 {
    return Ok(());
  }
  for i in 0..n {
    let t = turn(&hull.row(i), &hull.row((i + 1) % n), &hull.row((i + 2) % n));
    prop_assert!(t >= -eps, "clockwise turn {} at hull vertex {}", t, i);
  }
  Ok(())
}

/// No input point lies strictly outside the hull.
pub fn check_hull_contains<T: PointScalar>(
  hull: &NdArray<T, 2>,
  points: &NdArray<T, 2>,
  eps: f64,
) -> Result<(), TestCaseError> {
  let n = hull.nrows();
  match n {
    0 => {
      prop_assert_eq!(points.nrows(), 0);
    }
    1 => {
      for pt in points.rows() {
        prop_assert!(same_point(&pt, &hull.row(0)));
      }
    }
    2 => {
      for pt in points.rows() {
        let t = turn(&hull.row(0), &hull.row(1), &pt);
        prop_assert!(t.abs() <= eps, "{:?} off the degenerate hull", pt);
      }
    }
    _ => {
      for pt in points.rows() {
        for i in 0..n {
          let t = turn(&hull.row(i), &hull.row((i + 1) % n), &pt);
          prop_assert!(t >= -eps, "{:?} outside hull edge {}", pt, i);
        }
      }
    }
  }
  Ok(())
}

/// `b` is `a` rotated by some number of positions.
pub fn same_cycle<T: PointScalar>(a: &NdArray<T, 2>, b: &NdArray<T, 2>) -> bool {
  let n = a.nrows();
  if n != b.nrows() {
    return false;
  }
  if n == 0 {
    return true;
  }
  (0..n).any(|shift| (0..n).all(|i| same_point(&a.row(i), &b.row((i + shift) % n))))
}

pub fn check_rectangle_contains<T: PointScalar>(
  rect: &RotatedRectangle,
  points: &NdArray<T, 2>,
  eps: f64,
) -> Result<(), TestCaseError> {
  prop_assert!(rect.width() >= 0.0 && rect.height() >= 0.0);
  for pt in points.rows() {
    let (x, y): (f64, f64) = (pt[0].as_(), pt[1].as_());
    prop_assert!(
      rect.contains(x, y, eps),
      "({}, {}) outside {:?}",
      x,
      y,
      rect
    );
  }
  Ok(())
}
