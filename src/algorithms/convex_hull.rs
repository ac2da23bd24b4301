use super::point_count;
use crate::data::vector::turn;
use crate::data::{ArrayBase, Data, NdArray};
use crate::{PointScalar, TotalOrd};

// https://en.wikibooks.org/wiki/Algorithm_Implementation/Geometry/Convex_hull/Monotone_chain

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
  Ascending,
  Descending,
}

/// $O(n \log n)$ Row indices of the first `count` points sorted by x, then y.
///
/// # Panics
/// Panics if `points` does not have two columns or `count` exceeds the number
/// of rows.
pub fn arg_sort_points<S>(points: &ArrayBase<S, 2>, order: Order, count: Option<usize>) -> Vec<usize>
where
  S: Data,
  S::Elem: PointScalar,
{
  let n = point_count(points, count);
  let data = points.as_slice();
  let key = |row: usize| (data[2 * row], data[2 * row + 1]);
  let mut indices: Vec<usize> = (0..n).collect();
  indices.sort_unstable_by(|&a, &b| {
    let ord = key(a).total_cmp(&key(b));
    match order {
      Order::Ascending => ord,
      Order::Descending => ord.reverse(),
    }
  });
  indices
}

/// $O(n \log n)$ Convex hull of the first `count` rows of `points`.
///
/// [Monotone chain][wiki] algorithm. Vertices are returned counter-clockwise
/// starting from the lexicographically smallest point. Collinear points on the
/// boundary are dropped.
///
/// Sets with fewer than three points are copied unchanged. Degenerate sets are
/// not an error: all-collinear input yields the two extreme points and
/// repeated copies of one point yield two copies of it.
///
/// # Panics
/// Panics if `points` does not have two columns or `count` exceeds the number
/// of rows.
///
/// # Examples
///
/// ```rust
/// # use ndgeom::algorithms::convex_hull;
/// # use ndgeom::data::NdArray;
/// let points = NdArray::from_shape_vec([4, 2], vec![0, 0, 2, 2, 1, 1, 2, 0]).unwrap();
/// let hull = convex_hull(&points, None);
/// assert_eq!(hull.to_vec(), [0, 0, 2, 0, 2, 2]);
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Convex_hull_algorithms#Algorithms
pub fn convex_hull<S>(points: &ArrayBase<S, 2>, count: Option<usize>) -> NdArray<S::Elem, 2>
where
  S: Data,
  S::Elem: PointScalar,
{
  let n = point_count(points, count);
  if n < 3 {
    return NdArray::from_shape_fn([n, 2], |idx| points.at(idx));
  }

  let sorted = arg_sort_points(points, Order::Ascending, Some(n));
  // Non-positive turns are popped so collinear points never survive.
  let convex = |hull: &[usize], next: usize| {
    let (prev, last) = (hull[hull.len() - 2], hull[hull.len() - 1]);
    turn(&points.row(prev), &points.row(last), &points.row(next)) > 0.0
  };

  let mut hull: Vec<usize> = Vec::with_capacity(n + 1);
  for &i in &sorted {
    while hull.len() >= 2 && !convex(&hull, i) {
      hull.pop();
    }
    hull.push(i);
  }

  let lower_size = hull.len();
  for &i in sorted.iter().rev().skip(1) {
    while hull.len() > lower_size && !convex(&hull, i) {
      hull.pop();
    }
    hull.push(i);
  }
  // The upper chain ends where the lower one started.
  hull.pop();

  tracing::trace!(
    points = n,
    lower = lower_size,
    hull = hull.len(),
    "built convex hull"
  );
  NdArray::from_shape_fn([hull.len(), 2], |[row, col]| points.at([hull[row], col]))
}
