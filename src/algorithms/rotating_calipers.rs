use super::convex_hull;
use crate::data::{dot, ArrayBase, Data, NdArray, RotatedRectangle};
use crate::PointScalar;

struct Candidate {
  area: f64,
  rectangle: RotatedRectangle,
}

/// $O(n \log n + h^2)$ Smallest-area rectangle enclosing the first `count`
/// rows of `points`, where `h` is the size of their convex hull.
///
/// Every side of the optimal rectangle is parallel to some hull edge, so each
/// edge direction is tried in turn and the first rectangle of minimal area is
/// returned. Its `angle` is the direction of that edge.
///
/// An empty set yields [`RotatedRectangle::default()`]. A single point, or a
/// set of identical points, yields a zero-size rectangle centered on it.
///
/// # Panics
/// Panics if `points` does not have two columns or `count` exceeds the number
/// of rows.
///
/// # Examples
///
/// ```rust
/// # use ndgeom::algorithms::min_area_rectangle;
/// # use ndgeom::data::NdArray;
/// let coords = vec![0., 0., 3., 0., 3., 2., 0., 2., 1., 1.];
/// let points = NdArray::from_shape_vec([5, 2], coords).unwrap();
/// let rect = min_area_rectangle(&points, None);
/// assert_eq!(rect.area(), 6.);
/// assert_eq!(rect.center.to_vec(), [1.5, 1.]);
/// ```
pub fn min_area_rectangle<S>(points: &ArrayBase<S, 2>, count: Option<usize>) -> RotatedRectangle
where
  S: Data,
  S::Elem: PointScalar,
{
  let hull: NdArray<f64, 2> = convex_hull(points, count).cast();
  let h = hull.nrows();
  if h == 0 {
    return RotatedRectangle::default();
  }

  let mut best: Option<Candidate> = None;
  for i in 0..h {
    let edge = &hull.row((i + 1) % h) - &hull.row(i);
    let length = edge.norm();
    if length <= 0.0 {
      continue;
    }
    let u = &edge / length;
    let v = NdArray::from_vec(vec![-u.at([1]), u.at([0])]);

    let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
    for pt in hull.rows() {
      let (pu, pv) = (dot(&pt, &u), dot(&pt, &v));
      min_u = min_u.min(pu);
      max_u = max_u.max(pu);
      min_v = min_v.min(pv);
      max_v = max_v.max(pv);
    }

    let (width, height) = (max_u - min_u, max_v - min_v);
    let area = width * height;
    if best.as_ref().map_or(true, |best| area < best.area) {
      let (cu, cv) = ((min_u + max_u) / 2.0, (min_v + max_v) / 2.0);
      best = Some(Candidate {
        area,
        rectangle: RotatedRectangle {
          center: &(&u * cu) + &(&v * cv),
          size: NdArray::from_vec(vec![width, height]),
          angle: u.at([1]).atan2(u.at([0])),
        },
      });
    }
  }

  match best {
    Some(Candidate { area, rectangle }) => {
      tracing::debug!(
        area,
        angle = rectangle.angle,
        hull = h,
        "selected minimum-area rectangle"
      );
      rectangle
    }
    // Every edge has zero length: the hull is a single repeated point.
    None => RotatedRectangle {
      center: hull.row(0).deep_copy(),
      size: NdArray::zeros([2]),
      angle: 0.0,
    },
  }
}
