use claims::debug_assert_ok;
use num_traits::{AsPrimitive, One, Zero};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt::Debug;
use std::ops::{Deref, DerefMut, Index, IndexMut, Range};
use std::rc::Rc;

use crate::Error;

mod arith;
mod layout;

pub use arith::ScalarOperand;
pub use layout::Layout;

/// Element storage behind an [`ArrayBase`].
///
/// Storage always holds at least `layout.size()` elements in row-major order.
/// Reads borrow a contiguous range: a plain slice for views, a `Ref` guard for
/// the buffer shared by [`NdArray`] handles.
pub trait Data {
  type Elem;
  type Slice<'a>: Data<Elem = Self::Elem> + Deref<Target = [Self::Elem]>
  where
    Self: 'a;

  fn slice(&self, range: Range<usize>) -> Self::Slice<'_>;
}

/// Storage that allows element mutation.
pub trait DataMut: Data {
  type SliceMut<'a>: DataMut<Elem = Self::Elem> + DerefMut<Target = [Self::Elem]>
  where
    Self: 'a;

  fn slice_mut(&mut self, range: Range<usize>) -> Self::SliceMut<'_>;
}

// Shared buffer. Every handle reads and writes the same elements.
impl<T> Data for Rc<RefCell<Vec<T>>> {
  type Elem = T;
  type Slice<'a> = Ref<'a, [T]> where Self: 'a;

  fn slice(&self, range: Range<usize>) -> Ref<'_, [T]> {
    Ref::map(RefCell::borrow(self), |v| &v[range])
  }
}

impl<T> DataMut for Rc<RefCell<Vec<T>>> {
  type SliceMut<'a> = RefMut<'a, [T]> where Self: 'a;

  fn slice_mut(&mut self, range: Range<usize>) -> RefMut<'_, [T]> {
    RefMut::map(RefCell::borrow_mut(self), |v| &mut v[range])
  }
}

impl<'s, T> Data for &'s [T] {
  type Elem = T;
  type Slice<'a> = &'a [T] where Self: 'a;

  fn slice(&self, range: Range<usize>) -> &[T] {
    &self[range]
  }
}

impl<'s, T> Data for &'s mut [T] {
  type Elem = T;
  type Slice<'a> = &'a [T] where Self: 'a;

  fn slice(&self, range: Range<usize>) -> &[T] {
    &self[range]
  }
}

impl<'s, T> DataMut for &'s mut [T] {
  type SliceMut<'a> = &'a mut [T] where Self: 'a;

  fn slice_mut(&mut self, range: Range<usize>) -> &mut [T] {
    &mut self[range]
  }
}

impl<'s, T> Data for Ref<'s, [T]> {
  type Elem = T;
  type Slice<'a> = &'a [T] where Self: 'a;

  fn slice(&self, range: Range<usize>) -> &[T] {
    &self[range]
  }
}

impl<'s, T> Data for RefMut<'s, [T]> {
  type Elem = T;
  type Slice<'a> = &'a [T] where Self: 'a;

  fn slice(&self, range: Range<usize>) -> &[T] {
    &self[range]
  }
}

impl<'s, T> DataMut for RefMut<'s, [T]> {
  type SliceMut<'a> = &'a mut [T] where Self: 'a;

  fn slice_mut(&mut self, range: Range<usize>) -> &mut [T] {
    &mut self[range]
  }
}

/// A strided `N`-dimensional array over the storage `S`.
///
/// Use one of the aliases:
/// * [`NdArray`] owns a reference-counted buffer. `clone()` is shallow: both
///   handles see each other's writes. [`deep_copy`](ArrayBase::deep_copy)
///   allocates an independent buffer.
/// * [`ArrayView`] borrows read-only memory. Mutating methods do not exist
///   for it.
/// * [`ArrayViewMut`] borrows mutable memory.
///
/// Elements of any array are read with [`at`](ArrayBase::at) and
/// [`get`](ArrayBase::get) and written with [`set`](ArrayBase::set). Views and
/// rows also support `array[[i, j]]` and flat `array[k]` indexing. Out-of-range
/// indices panic in every build profile.
///
/// The buffer of an [`NdArray`] follows `RefCell` rules: writing through one
/// handle while a view or row of another handle is alive panics.
#[derive(Clone)]
pub struct ArrayBase<S, const N: usize> {
  data: S,
  layout: Layout<N>,
}

pub type NdArray<T, const N: usize> = ArrayBase<Rc<RefCell<Vec<T>>>, N>;
pub type ArrayView<'a, T, const N: usize> = ArrayBase<&'a [T], N>;
pub type ArrayViewMut<'a, T, const N: usize> = ArrayBase<&'a mut [T], N>;

///////////////////////////////////////////////////////////////////////////////
// Any storage

impl<S: Data, const N: usize> ArrayBase<S, N> {
  fn from_data(data: S, layout: Layout<N>) -> ArrayBase<S, N> {
    debug_assert_ok!(layout.validate());
    ArrayBase { data, layout }
  }

  pub fn ndim(&self) -> usize {
    N
  }

  pub fn size(&self) -> usize {
    self.layout.size()
  }

  pub fn shape(&self) -> [usize; N] {
    self.layout.shape()
  }

  pub fn strides(&self) -> [usize; N] {
    self.layout.strides()
  }

  pub fn layout(&self) -> &Layout<N> {
    &self.layout
  }

  /// Elements in row-major order.
  pub fn as_slice(&self) -> S::Slice<'_> {
    self.data.slice(0..self.size())
  }

  pub fn to_vec(&self) -> Vec<S::Elem>
  where
    S::Elem: Clone,
  {
    self.as_slice().to_vec()
  }

  /// Copies of the elements in row-major order.
  pub fn iter(&self) -> impl Iterator<Item = S::Elem> + '_
  where
    S::Elem: Clone,
  {
    (0..self.size()).map(move |offset| self.as_slice()[offset].clone())
  }

  pub fn valid_index(&self, idx: [usize; N]) -> bool {
    self.layout.valid_index(&idx)
  }

  /// Linear offset of `idx`.
  ///
  /// # Panics
  ///
  /// Panics if `idx` is out of bounds.
  pub fn ravel(&self, idx: [usize; N]) -> usize {
    self.layout.ravel(&idx)
  }

  /// Element at `idx`.
  ///
  /// # Panics
  ///
  /// Panics if `idx` is out of bounds.
  pub fn at(&self, idx: [usize; N]) -> S::Elem
  where
    S::Elem: Clone,
  {
    let offset = self.layout.ravel(&idx);
    self.as_slice()[offset].clone()
  }

  pub fn get(&self, idx: [usize; N]) -> Option<S::Elem>
  where
    S::Elem: Clone,
  {
    let offset = self.layout.try_ravel(&idx).ok()?;
    Some(self.as_slice()[offset].clone())
  }

  pub fn get_flat(&self, idx: usize) -> Option<S::Elem>
  where
    S::Elem: Clone,
  {
    self.as_slice().get(idx).cloned()
  }

  /// $O(1)$ Borrow as a read-only view.
  pub fn view(&self) -> ArrayBase<S::Slice<'_>, N> {
    ArrayBase::from_data(self.as_slice(), self.layout)
  }

  /// $O(n)$ Copy the elements into a new, unshared buffer.
  pub fn deep_copy(&self) -> NdArray<S::Elem, N>
  where
    S::Elem: Clone,
  {
    NdArray::owned(self.to_vec(), self.layout)
  }

  /// $O(n)$ New array with `f` applied to every element.
  pub fn map<U, F>(&self, f: F) -> NdArray<U, N>
  where
    F: FnMut(&S::Elem) -> U,
  {
    let elements = self.as_slice().iter().map(f).collect();
    NdArray::owned(elements, self.layout)
  }

  /// Convert every element with an `as` cast.
  pub fn cast<U>(&self) -> NdArray<U, N>
  where
    S::Elem: AsPrimitive<U>,
    U: Copy + 'static,
  {
    self.map(|&a| a.as_())
  }

  /// # Panics
  ///
  /// Panics if the shapes differ.
  pub(crate) fn zip_map<S2, U, F>(&self, rhs: &ArrayBase<S2, N>, mut f: F) -> NdArray<U, N>
  where
    S2: Data,
    F: FnMut(&S::Elem, &S2::Elem) -> U,
  {
    assert_eq!(
      self.shape(),
      rhs.shape(),
      "shape mismatch in elementwise operation"
    );
    let (lhs, other) = (self.as_slice(), rhs.as_slice());
    let elements = lhs
      .iter()
      .zip(other.iter())
      .map(|(a, b)| f(a, b))
      .collect();
    NdArray::owned(elements, self.layout)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Mutable storage

impl<S: DataMut, const N: usize> ArrayBase<S, N> {
  pub fn as_slice_mut(&mut self) -> S::SliceMut<'_> {
    let size = self.size();
    self.data.slice_mut(0..size)
  }

  /// Overwrite the element at `idx`.
  ///
  /// # Panics
  ///
  /// Panics if `idx` is out of bounds.
  pub fn set(&mut self, idx: [usize; N], value: S::Elem) {
    let offset = self.layout.ravel(&idx);
    self.as_slice_mut()[offset] = value;
  }

  /// # Panics
  ///
  /// Panics if `idx >= size()`.
  pub fn set_flat(&mut self, idx: usize, value: S::Elem) {
    assert!(
      idx < self.size(),
      "flat index {} out of bounds for size {}",
      idx,
      self.size()
    );
    self.as_slice_mut()[idx] = value;
  }

  /// Apply `f` to every element in place.
  pub fn map_inplace<F>(&mut self, f: F)
  where
    F: FnMut(&mut S::Elem),
  {
    self.as_slice_mut().iter_mut().for_each(f)
  }

  pub fn view_mut(&mut self) -> ArrayBase<S::SliceMut<'_>, N> {
    let layout = self.layout;
    ArrayBase::from_data(self.as_slice_mut(), layout)
  }

  pub fn fill(&mut self, value: S::Elem)
  where
    S::Elem: Clone,
  {
    self.as_slice_mut().fill(value)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Matrices

impl<S: Data> ArrayBase<S, 2> {
  pub fn nrows(&self) -> usize {
    self.shape()[0]
  }

  pub fn ncols(&self) -> usize {
    self.shape()[1]
  }

  fn row_range(&self, i: usize) -> Range<usize> {
    assert!(
      i < self.nrows(),
      "row {} out of bounds for {} rows",
      i,
      self.nrows()
    );
    let ncols = self.ncols();
    i * ncols..(i + 1) * ncols
  }

  /// $O(1)$ Row `i` as a 1-dimensional view.
  ///
  /// # Panics
  ///
  /// Panics if `i >= nrows()`.
  pub fn row(&self, i: usize) -> ArrayBase<S::Slice<'_>, 1> {
    let range = self.row_range(i);
    ArrayBase::from_data(self.data.slice(range), Layout::row_major([self.ncols()]))
  }

  pub fn rows(&self) -> impl Iterator<Item = ArrayBase<S::Slice<'_>, 1>> + '_ {
    (0..self.nrows()).map(move |i| self.row(i))
  }
}

impl<S: DataMut> ArrayBase<S, 2> {
  /// # Panics
  ///
  /// Panics if `i >= nrows()`.
  pub fn row_mut(&mut self, i: usize) -> ArrayBase<S::SliceMut<'_>, 1> {
    let range = self.row_range(i);
    let layout = Layout::row_major([self.ncols()]);
    ArrayBase::from_data(self.data.slice_mut(range), layout)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Owned arrays

impl<T, const N: usize> NdArray<T, N> {
  fn owned(elements: Vec<T>, layout: Layout<N>) -> NdArray<T, N> {
    debug_assert_eq!(elements.len(), layout.size());
    ArrayBase::from_data(Rc::new(RefCell::new(elements)), layout)
  }

  /// Take ownership of `elements`, laid out row-major in `shape`.
  ///
  /// # Errors
  /// Will return [`Error::ShapeMismatch`] iff `elements.len()` differs from
  /// the product of `shape`.
  pub fn from_shape_vec(shape: [usize; N], elements: Vec<T>) -> Result<NdArray<T, N>, Error> {
    let layout = Layout::row_major(shape);
    if elements.len() != layout.size() {
      return Err(Error::ShapeMismatch);
    }
    Ok(NdArray::owned(elements, layout))
  }

  /// $O(n)$ Build an array by calling `f` with every multi-index in
  /// row-major order.
  pub fn from_shape_fn<F>(shape: [usize; N], mut f: F) -> NdArray<T, N>
  where
    F: FnMut([usize; N]) -> T,
  {
    let layout = Layout::row_major(shape);
    let elements = (0..layout.size())
      .map(|offset| f(layout.unravel(offset)))
      .collect();
    NdArray::owned(elements, layout)
  }

  /// Owned array with every element set to `T::default()`.
  pub fn empty(shape: [usize; N]) -> NdArray<T, N>
  where
    T: Default,
  {
    NdArray::from_shape_fn(shape, |_| T::default())
  }

  pub fn full(shape: [usize; N], value: T) -> NdArray<T, N>
  where
    T: Clone,
  {
    let layout = Layout::row_major(shape);
    NdArray::owned(vec![value; layout.size()], layout)
  }

  pub fn zeros(shape: [usize; N]) -> NdArray<T, N>
  where
    T: Zero + Clone,
  {
    NdArray::full(shape, T::zero())
  }

  pub fn ones(shape: [usize; N]) -> NdArray<T, N>
  where
    T: One + Clone,
  {
    NdArray::full(shape, T::one())
  }

  /// True iff both handles point at the same buffer.
  pub fn shares_storage(&self, other: &NdArray<T, N>) -> bool {
    Rc::ptr_eq(&self.data, &other.data)
  }

  /// Unwrap the buffer, copying it only if another handle still shares it.
  pub fn into_vec(self) -> Vec<T>
  where
    T: Clone,
  {
    match Rc::try_unwrap(self.data) {
      Ok(cell) => cell.into_inner(),
      Err(shared) => Vec::clone(&RefCell::borrow(&shared)),
    }
  }
}

impl<T> NdArray<T, 1> {
  pub fn from_vec(elements: Vec<T>) -> NdArray<T, 1> {
    let layout = Layout::row_major([elements.len()]);
    NdArray::owned(elements, layout)
  }
}

impl<T> From<Vec<T>> for NdArray<T, 1> {
  fn from(elements: Vec<T>) -> NdArray<T, 1> {
    NdArray::from_vec(elements)
  }
}

impl<T> FromIterator<T> for NdArray<T, 1> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> NdArray<T, 1> {
    NdArray::from_vec(iter.into_iter().collect())
  }
}

///////////////////////////////////////////////////////////////////////////////
// Views

impl<'a, T, const N: usize> ArrayView<'a, T, N> {
  /// Read-only view of the first `product(shape)` elements of `data`.
  ///
  /// # Errors
  /// Will return [`Error::InsufficientData`] iff `data` is too short.
  pub fn from_shape(shape: [usize; N], data: &'a [T]) -> Result<ArrayView<'a, T, N>, Error> {
    let layout = Layout::row_major(shape);
    let data = data.get(..layout.size()).ok_or(Error::InsufficientData)?;
    Ok(ArrayBase::from_data(data, layout))
  }
}

impl<'a, T, const N: usize> ArrayViewMut<'a, T, N> {
  /// Mutable view of the first `product(shape)` elements of `data`.
  ///
  /// # Errors
  /// Will return [`Error::InsufficientData`] iff `data` is too short.
  pub fn from_shape(
    shape: [usize; N],
    data: &'a mut [T],
  ) -> Result<ArrayViewMut<'a, T, N>, Error> {
    let layout = Layout::row_major(shape);
    let data = data
      .get_mut(..layout.size())
      .ok_or(Error::InsufficientData)?;
    Ok(ArrayBase::from_data(data, layout))
  }
}

///////////////////////////////////////////////////////////////////////////////
// Trait Implementations

impl<S, const N: usize> Index<[usize; N]> for ArrayBase<S, N>
where
  S: Data + Deref<Target = [<S as Data>::Elem]>,
{
  type Output = S::Elem;
  fn index(&self, idx: [usize; N]) -> &S::Elem {
    let offset = self.layout.ravel(&idx);
    &self.data[offset]
  }
}

impl<S, const N: usize> IndexMut<[usize; N]> for ArrayBase<S, N>
where
  S: DataMut + DerefMut<Target = [<S as Data>::Elem]>,
{
  fn index_mut(&mut self, idx: [usize; N]) -> &mut S::Elem {
    let offset = self.layout.ravel(&idx);
    &mut self.data[offset]
  }
}

impl<S, const N: usize> Index<usize> for ArrayBase<S, N>
where
  S: Data + Deref<Target = [<S as Data>::Elem]>,
{
  type Output = S::Elem;
  fn index(&self, idx: usize) -> &S::Elem {
    assert!(
      idx < self.size(),
      "flat index {} out of bounds for size {}",
      idx,
      self.size()
    );
    &self.data[idx]
  }
}

impl<S, const N: usize> IndexMut<usize> for ArrayBase<S, N>
where
  S: DataMut + DerefMut<Target = [<S as Data>::Elem]>,
{
  fn index_mut(&mut self, idx: usize) -> &mut S::Elem {
    assert!(
      idx < self.size(),
      "flat index {} out of bounds for size {}",
      idx,
      self.size()
    );
    &mut self.data[idx]
  }
}

impl<S, S2, const N: usize> PartialEq<ArrayBase<S2, N>> for ArrayBase<S, N>
where
  S: Data,
  S2: Data,
  S::Elem: PartialEq<S2::Elem>,
{
  fn eq(&self, other: &ArrayBase<S2, N>) -> bool {
    self.shape() == other.shape() && *self.as_slice() == *other.as_slice()
  }
}

impl<S, const N: usize> Debug for ArrayBase<S, N>
where
  S: Data,
  S::Elem: Debug,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ArrayBase")
      .field("shape", &self.shape())
      .field("data", &&*self.as_slice())
      .finish()
  }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
