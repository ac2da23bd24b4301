use array_init::array_init;

use crate::Error;

/// Row-major shape and strides of an `N`-dimensional array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout<const N: usize> {
  shape: [usize; N],
  strides: [usize; N],
  size: usize,
}

impl<const N: usize> Layout<N> {
  /// $O(N^2)$ Row-major layout: the last dimension is contiguous and each
  /// stride is the product of all following extents.
  pub fn row_major(shape: [usize; N]) -> Layout<N> {
    let strides: [usize; N] = array_init(|i| shape[i + 1..].iter().product());
    Layout {
      shape,
      strides,
      size: shape.iter().product(),
    }
  }

  pub fn shape(&self) -> [usize; N] {
    self.shape
  }

  pub fn strides(&self) -> [usize; N] {
    self.strides
  }

  /// Number of elements, the product of the shape.
  pub fn size(&self) -> usize {
    self.size
  }

  pub fn valid_index(&self, idx: &[usize; N]) -> bool {
    idx.iter().zip(self.shape.iter()).all(|(i, extent)| i < extent)
  }

  /// Linear offset of a multi-index, or `IndexOutOfBounds` if any component
  /// exceeds its extent.
  pub fn try_ravel(&self, idx: &[usize; N]) -> Result<usize, Error> {
    if !self.valid_index(idx) {
      return Err(Error::IndexOutOfBounds);
    }
    Ok(
      idx
        .iter()
        .zip(self.strides.iter())
        .map(|(i, stride)| i * stride)
        .sum(),
    )
  }

  /// # Panics
  ///
  /// Panics if `idx` is outside the shape.
  pub fn ravel(&self, idx: &[usize; N]) -> usize {
    match self.try_ravel(idx) {
      Ok(offset) => offset,
      Err(_) => panic!(
        "index {:?} out of bounds for shape {:?}",
        idx, self.shape
      ),
    }
  }

  /// Inverse of [`ravel`](Self::ravel) for offsets below `size`.
  pub fn unravel(&self, mut offset: usize) -> [usize; N] {
    debug_assert!(offset < self.size);
    array_init(|i| {
      let stride = self.strides[i];
      let component = offset / stride;
      offset %= stride;
      component
    })
  }

  /// $O(N)$ Check the row-major invariants.
  pub(crate) fn validate(&self) -> Result<(), Error> {
    if self.size != self.shape.iter().product::<usize>() {
      return Err(Error::ShapeMismatch);
    }
    if matches!(self.strides.last(), Some(&stride) if stride != 1) {
      return Err(Error::ShapeMismatch);
    }
    for i in 1..N {
      if self.strides[i - 1] != self.strides[i] * self.shape[i] {
        return Err(Error::ShapeMismatch);
      }
    }
    Ok(())
  }
}
