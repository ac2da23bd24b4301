use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{ArrayBase, Data, DataMut, NdArray};

/// Elements that can be broadcast against every element of an array.
///
/// For an array `a` and a scalar `s` of one of these types, `&a + s`,
/// `s * &a`, `a /= s` and friends are allowed.
pub trait ScalarOperand: Copy + 'static {}

macro_rules! scalar_operand {
  ( $( $ty:ty ),* ) => {
    $( impl ScalarOperand for $ty {} )*
  };
}

scalar_operand!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

// Array-array operations require identical shapes and produce a new owned
// array whose element type is `<A as Op<B>>::Output`. Array-scalar operations
// apply the scalar to every element.
macro_rules! impl_binary_op {
  ( $trt:ident, $mth:ident, $assign_trt:ident, $assign_mth:ident ) => {
    // &array OP &array = array
    impl<'a, 'b, S, S2, const N: usize> $trt<&'b ArrayBase<S2, N>> for &'a ArrayBase<S, N>
    where
      S: Data,
      S2: Data,
      S::Elem: Clone + $trt<S2::Elem>,
      S2::Elem: Clone,
    {
      type Output = NdArray<<S::Elem as $trt<S2::Elem>>::Output, N>;

      fn $mth(self, rhs: &'b ArrayBase<S2, N>) -> Self::Output {
        self.zip_map(rhs, |a, b| $trt::$mth(a.clone(), b.clone()))
      }
    }

    // array OP array = array
    impl<S, S2, const N: usize> $trt<ArrayBase<S2, N>> for ArrayBase<S, N>
    where
      S: Data,
      S2: Data,
      S::Elem: Clone + $trt<S2::Elem>,
      S2::Elem: Clone,
    {
      type Output = NdArray<<S::Elem as $trt<S2::Elem>>::Output, N>;

      fn $mth(self, rhs: ArrayBase<S2, N>) -> Self::Output {
        $trt::$mth(&self, &rhs)
      }
    }

    // &array OP scalar = array
    impl<'a, S, B, const N: usize> $trt<B> for &'a ArrayBase<S, N>
    where
      S: Data,
      S::Elem: Clone + $trt<B>,
      B: ScalarOperand,
    {
      type Output = NdArray<<S::Elem as $trt<B>>::Output, N>;

      fn $mth(self, rhs: B) -> Self::Output {
        self.map(|a| $trt::$mth(a.clone(), rhs))
      }
    }

    // array OP scalar = array
    impl<S, B, const N: usize> $trt<B> for ArrayBase<S, N>
    where
      S: Data,
      S::Elem: Clone + $trt<B>,
      B: ScalarOperand,
    {
      type Output = NdArray<<S::Elem as $trt<B>>::Output, N>;

      fn $mth(self, rhs: B) -> Self::Output {
        $trt::$mth(&self, rhs)
      }
    }

    // array OP= &array
    impl<'b, S, S2, const N: usize> $assign_trt<&'b ArrayBase<S2, N>> for ArrayBase<S, N>
    where
      S: DataMut,
      S2: Data,
      S::Elem: $assign_trt<S2::Elem>,
      S2::Elem: Clone,
    {
      fn $assign_mth(&mut self, rhs: &'b ArrayBase<S2, N>) {
        assert_eq!(
          self.shape(),
          rhs.shape(),
          "shape mismatch in elementwise operation"
        );
        // `rhs` may share storage with `self`; read it before borrowing for writes.
        let values = rhs.to_vec();
        for (a, b) in self.as_slice_mut().iter_mut().zip(values) {
          $assign_trt::$assign_mth(a, b);
        }
      }
    }

    // array OP= scalar
    impl<S, B, const N: usize> $assign_trt<B> for ArrayBase<S, N>
    where
      S: DataMut,
      S::Elem: $assign_trt<B>,
      B: ScalarOperand,
    {
      fn $assign_mth(&mut self, rhs: B) {
        for a in self.as_slice_mut().iter_mut() {
          $assign_trt::$assign_mth(a, rhs);
        }
      }
    }
  };
}

impl_binary_op!(Add, add, AddAssign, add_assign);
impl_binary_op!(Sub, sub, SubAssign, sub_assign);
impl_binary_op!(Mul, mul, MulAssign, mul_assign);
impl_binary_op!(Div, div, DivAssign, div_assign);

// scalar OP &array = array
// Coherence rules out a blanket impl, so each scalar type gets its own.
macro_rules! impl_scalar_lhs_op {
  ( $( $scalar:ty ),* ) => {
    $(
      impl_scalar_lhs_op!(@op $scalar, Add, add);
      impl_scalar_lhs_op!(@op $scalar, Sub, sub);
      impl_scalar_lhs_op!(@op $scalar, Mul, mul);
      impl_scalar_lhs_op!(@op $scalar, Div, div);
    )*
  };
  (@op $scalar:ty, $trt:ident, $mth:ident) => {
    impl<'a, S, const N: usize> $trt<&'a ArrayBase<S, N>> for $scalar
    where
      S: Data,
      S::Elem: Clone,
      $scalar: $trt<S::Elem>,
    {
      type Output = NdArray<<$scalar as $trt<S::Elem>>::Output, N>;

      fn $mth(self, rhs: &'a ArrayBase<S, N>) -> Self::Output {
        rhs.map(|b| $trt::$mth(self, b.clone()))
      }
    }

    impl<S, const N: usize> $trt<ArrayBase<S, N>> for $scalar
    where
      S: Data,
      S::Elem: Clone,
      $scalar: $trt<S::Elem>,
    {
      type Output = NdArray<<$scalar as $trt<S::Elem>>::Output, N>;

      fn $mth(self, rhs: ArrayBase<S, N>) -> Self::Output {
        rhs.map(|b| $trt::$mth(self, b.clone()))
      }
    }
  };
}

impl_scalar_lhs_op!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<'a, S, const N: usize> Neg for &'a ArrayBase<S, N>
where
  S: Data,
  S::Elem: Clone + Neg,
{
  type Output = NdArray<<S::Elem as Neg>::Output, N>;

  fn neg(self) -> Self::Output {
    self.map(|a| a.clone().neg())
  }
}

impl<S, const N: usize> Neg for ArrayBase<S, N>
where
  S: Data,
  S::Elem: Clone + Neg,
{
  type Output = NdArray<<S::Elem as Neg>::Output, N>;

  fn neg(self) -> Self::Output {
    (&self).neg()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data::ArrayView;

  use proptest::collection::vec;
  use proptest::prelude::*;

  #[test]
  fn array_array() {
    let a = NdArray::from_shape_vec([2, 2], vec![1_f64, 2., 3., 4.]).unwrap();
    let b = NdArray::from_shape_vec([2, 2], vec![4_f64, 3., 2., 1.]).unwrap();
    assert_eq!((&a + &b).to_vec(), [5., 5., 5., 5.]);
    assert_eq!((&a - &b).to_vec(), [-3., -1., 1., 3.]);
    assert_eq!((&a * &b).to_vec(), [4., 6., 6., 4.]);
    assert_eq!((&a / &b).to_vec(), [0.25, 2. / 3., 1.5, 4.]);
    assert_eq!((a + b).shape(), [2, 2]);
  }

  #[test]
  fn mixed_storage() {
    let data = [1_i32, 2, 3];
    let view = ArrayView::from_shape([3], &data).unwrap();
    let owned = NdArray::from_vec(vec![10_i32, 20, 30]);
    assert_eq!((&owned - &view).to_vec(), [9, 18, 27]);
    assert_eq!((&view * &owned).to_vec(), [10, 40, 90]);
  }

  #[test]
  #[should_panic(expected = "shape mismatch")]
  fn shape_mismatch_panics() {
    let a = NdArray::<f64, 2>::zeros([2, 3]);
    let b = NdArray::<f64, 2>::zeros([3, 2]);
    let _ = &a + &b;
  }

  #[test]
  fn scalar_broadcast() {
    let a = NdArray::from_vec(vec![2_i32, 4, 6]);
    assert_eq!((&a + 1_i32).to_vec(), [3, 5, 7]);
    assert_eq!((&a - 1_i32).to_vec(), [1, 3, 5]);
    assert_eq!((&a * 3_i32).to_vec(), [6, 12, 18]);
    assert_eq!((&a / 2_i32).to_vec(), [1, 2, 3]);
    assert_eq!((10_i32 - &a).to_vec(), [8, 6, 4]);
    assert_eq!((12_i32 / &a).to_vec(), [6, 3, 2]);
  }

  #[test]
  fn scalar_lhs_by_value() {
    let ints = NdArray::from_vec(vec![2_i32, 4, 6]);
    assert_eq!((1_i32 + ints.clone()).to_vec(), [3, 5, 7]);
    assert_eq!((12_i32 / ints).to_vec(), [6, 3, 2]);
    let floats = NdArray::from_shape_vec([1, 2], vec![0.5_f64, 4.0]).unwrap();
    assert_eq!((2.0_f64 / floats.clone()).to_vec(), [4.0, 0.5]);
    assert_eq!((1.0_f64 - floats).to_vec(), [0.5, -3.0]);
    let bytes = NdArray::from_vec(vec![1_u8, 2]);
    assert_eq!((3_u8 * bytes).to_vec(), [3, 6]);
  }

  #[test]
  fn mixed_element_types_go_through_cast() {
    let ints = NdArray::from_vec(vec![1_i32, 2, 5]);
    let halves = &ints.cast::<f64>() / 2.5_f64;
    assert_eq!(halves.to_vec(), [0.4, 0.8, 2.0]);
    let offsets = &ints.cast::<f64>() + &NdArray::from_vec(vec![0.5_f64, 0.5, 0.5]);
    assert_eq!(offsets.to_vec(), [1.5, 2.5, 5.5]);
  }

  #[test]
  fn broadcast_over_matrix() {
    let a = NdArray::<f64, 3>::ones([2, 3, 4]);
    let b = 0.5_f64 * &a;
    assert_eq!(b.shape(), [2, 3, 4]);
    assert!(b.iter().all(|v| v == 0.5));
  }

  #[test]
  fn compound_assignment() {
    let mut a = NdArray::from_vec(vec![1.0_f64, 2.0]);
    a += 1.0_f64;
    a *= 2.0_f64;
    assert_eq!(a.to_vec(), [4.0, 6.0]);
    a -= &NdArray::from_vec(vec![1.0, 1.0]);
    a /= &NdArray::from_vec(vec![3.0, 5.0]);
    assert_eq!(a.to_vec(), [1.0, 1.0]);
  }

  #[test]
  fn compound_assignment_is_visible_through_alias() {
    let a = NdArray::from_vec(vec![1_i32, 2]);
    let mut b = a.clone();
    b += 10_i32;
    assert!(a.shares_storage(&b));
    assert_eq!(a.to_vec(), [11, 12]);
    assert_eq!(b.to_vec(), [11, 12]);
  }

  #[test]
  fn compound_assignment_with_aliased_operand() {
    let mut a = NdArray::from_vec(vec![1_i32, 2, 3]);
    let b = a.clone();
    a += &b;
    assert_eq!(b.to_vec(), [2, 4, 6]);
    let same = a.clone();
    a *= &same;
    assert_eq!(b.to_vec(), [4, 16, 36]);
  }

  #[test]
  fn negation() {
    let a = NdArray::from_vec(vec![1_i32, -2]);
    assert_eq!((-&a).to_vec(), [-1, 2]);
    assert_eq!((-a).to_vec(), [-1, 2]);
  }

  proptest! {
    #[test]
    fn elementwise_matches_slices(pairs in vec((-1000_i64..1000, -1000_i64..1000), 0..50)) {
      let (xs, ys): (Vec<i64>, Vec<i64>) = pairs.into_iter().unzip();
      let a = NdArray::from_vec(xs.clone());
      let b = NdArray::from_vec(ys.clone());
      let sum = &a + &b;
      let product = &a * &b;
      for i in 0..xs.len() {
        prop_assert_eq!(sum.at([i]), xs[i] + ys[i]);
        prop_assert_eq!(product.at([i]), xs[i] * ys[i]);
      }
    }
  }
}
