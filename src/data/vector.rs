use num_traits::{AsPrimitive, Float, Zero};
use std::ops::{AddAssign, Mul};
use std::sync::Once;

use super::{ArrayBase, Data};
use crate::PointScalar;

static IMPRECISE_CROSS: Once = Once::new();

fn warn_if_imprecise<T: PointScalar>() {
  if !T::FLOATING {
    IMPRECISE_CROSS.call_once(|| {
      tracing::warn!(
        element = std::any::type_name::<T>(),
        "cross product on non floating-point coordinates; results may be inaccurate"
      )
    });
  }
}

#[cfg(test)]
pub(crate) fn imprecise_warning_emitted() -> bool {
  IMPRECISE_CROSS.is_completed()
}

pub(crate) fn to_f64<T: PointScalar>(value: T) -> f64 {
  AsPrimitive::<f64>::as_(value)
}

fn assert_planar<S: Data>(v: &ArrayBase<S, 1>) {
  assert_eq!(
    v.size(),
    2,
    "cross product defined for 2D vectors only"
  );
}

/// Scalar 2D cross product `a.x * b.y - a.y * b.x`, computed in `f64`.
///
/// # Panics
///
/// Panics unless both vectors have exactly two elements.
///
/// ```rust
/// # use ndgeom::data::{cross, NdArray};
/// let x = NdArray::from_vec(vec![1_i32, 0]);
/// let y = NdArray::from_vec(vec![0, 1]);
/// assert_eq!(cross(&x, &y), 1.0);
/// assert_eq!(cross(&y, &x), -1.0);
/// ```
pub fn cross<S1, S2>(a: &ArrayBase<S1, 1>, b: &ArrayBase<S2, 1>) -> f64
where
  S1: Data,
  S2: Data,
  S1::Elem: PointScalar,
  S2::Elem: PointScalar,
{
  cross_as::<f64, S1, S2>(a, b)
}

/// Like [`cross`] but carried out in the float type `R`.
pub fn cross_as<R, S1, S2>(a: &ArrayBase<S1, 1>, b: &ArrayBase<S2, 1>) -> R
where
  R: Float + 'static,
  S1: Data,
  S2: Data,
  S1::Elem: PointScalar + AsPrimitive<R>,
  S2::Elem: PointScalar + AsPrimitive<R>,
{
  assert_planar(a);
  assert_planar(b);
  warn_if_imprecise::<S1::Elem>();
  warn_if_imprecise::<S2::Elem>();
  let (a, b) = (a.as_slice(), b.as_slice());
  let (ax, ay): (R, R) = (AsPrimitive::<R>::as_(a[0]), AsPrimitive::<R>::as_(a[1]));
  let (bx, by): (R, R) = (AsPrimitive::<R>::as_(b[0]), AsPrimitive::<R>::as_(b[1]));
  ax * by - ay * bx
}

/// Cross product of `a - origin` and `b - origin`.
///
/// Positive when `origin -> a -> b` turns counter-clockwise, zero when the
/// three points are collinear. Differences are taken after conversion to
/// `f64` so integer coordinates cannot overflow. Like [`cross`], warns once
/// per process when given integer coordinates.
///
/// # Panics
///
/// Panics unless all three vectors have exactly two elements.
pub fn turn<S0, S1, S2>(
  origin: &ArrayBase<S0, 1>,
  a: &ArrayBase<S1, 1>,
  b: &ArrayBase<S2, 1>,
) -> f64
where
  S0: Data,
  S1: Data,
  S2: Data,
  S0::Elem: PointScalar,
  S1::Elem: PointScalar,
  S2::Elem: PointScalar,
{
  assert_planar(origin);
  assert_planar(a);
  assert_planar(b);
  warn_if_imprecise::<S0::Elem>();
  warn_if_imprecise::<S1::Elem>();
  warn_if_imprecise::<S2::Elem>();
  let (origin, a, b) = (origin.as_slice(), a.as_slice(), b.as_slice());
  let (ox, oy) = (to_f64(origin[0]), to_f64(origin[1]));
  let (ax, ay) = (to_f64(a[0]), to_f64(a[1]));
  let (bx, by) = (to_f64(b[0]), to_f64(b[1]));
  (ax - ox) * (by - oy) - (ay - oy) * (bx - ox)
}

/// Sum of elementwise products.
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn dot<S1, S2>(
  a: &ArrayBase<S1, 1>,
  b: &ArrayBase<S2, 1>,
) -> <S1::Elem as Mul<S2::Elem>>::Output
where
  S1: Data,
  S2: Data,
  S1::Elem: Clone + Mul<S2::Elem>,
  S2::Elem: Clone,
  <S1::Elem as Mul<S2::Elem>>::Output: Zero + AddAssign,
{
  assert_eq!(a.size(), b.size(), "shape mismatch in dot product");
  let (a, b) = (a.as_slice(), b.as_slice());
  let mut total = Zero::zero();
  for (x, y) in a.iter().zip(b.iter()) {
    total += x.clone() * y.clone();
  }
  total
}

/// Euclidean length, `sqrt(dot(a, a))`.
pub fn norm<S>(a: &ArrayBase<S, 1>) -> S::Elem
where
  S: Data,
  S::Elem: Float + AddAssign,
{
  dot(a, a).sqrt()
}

impl<S: Data> ArrayBase<S, 1> {
  pub fn len(&self) -> usize {
    self.size()
  }

  pub fn is_empty(&self) -> bool {
    self.size() == 0
  }

  pub fn dot<S2>(&self, rhs: &ArrayBase<S2, 1>) -> <S::Elem as Mul<S2::Elem>>::Output
  where
    S2: Data,
    S::Elem: Clone + Mul<S2::Elem>,
    S2::Elem: Clone,
    <S::Elem as Mul<S2::Elem>>::Output: Zero + AddAssign,
  {
    dot(self, rhs)
  }

  pub fn norm(&self) -> S::Elem
  where
    S::Elem: Float + AddAssign,
  {
    norm(self)
  }
}
