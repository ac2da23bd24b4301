pub mod ndarray;
mod rotated_rectangle;
pub mod vector;

#[doc(inline)]
pub use ndarray::{
  ArrayBase, ArrayView, ArrayViewMut, Data, DataMut, Layout, NdArray, ScalarOperand,
};
pub use rotated_rectangle::RotatedRectangle;
pub use vector::{cross, cross_as, dot, norm};
