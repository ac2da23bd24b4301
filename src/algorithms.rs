pub mod convex_hull;
pub mod rotating_calipers;

use crate::data::{ArrayBase, Data};

#[doc(inline)]
pub use convex_hull::{arg_sort_points, convex_hull, Order};

#[doc(inline)]
pub use rotating_calipers::min_area_rectangle;

// Number of leading rows an algorithm should read.
fn point_count<S: Data>(points: &ArrayBase<S, 2>, count: Option<usize>) -> usize {
  assert_eq!(
    points.ncols(),
    2,
    "point sets must have exactly two columns"
  );
  match count {
    None => points.nrows(),
    Some(count) => {
      assert!(
        count <= points.nrows(),
        "count {} exceeds the {} available points",
        count,
        points.nrows()
      );
      count
    }
  }
}
