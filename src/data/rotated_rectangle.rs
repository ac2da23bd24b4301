use super::NdArray;

/// A rectangle of `size` (width, height) centered at `center`, with its width
/// axis rotated `angle` radians counter-clockwise from the x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedRectangle {
  pub center: NdArray<f64, 1>,
  pub size: NdArray<f64, 1>,
  /// Radians, as returned by `atan2`. Not normalized.
  pub angle: f64,
}

impl Default for RotatedRectangle {
  fn default() -> Self {
    RotatedRectangle {
      center: NdArray::zeros([2]),
      size: NdArray::zeros([2]),
      angle: 0.0,
    }
  }
}

impl RotatedRectangle {
  pub fn width(&self) -> f64 {
    self.size.at([0])
  }

  pub fn height(&self) -> f64 {
    self.size.at([1])
  }

  pub fn angle_degrees(&self) -> f64 {
    self.angle.to_degrees()
  }

  pub fn area(&self) -> f64 {
    self.width() * self.height()
  }

  /// The four corners as a `(4, 2)` array in counter-clockwise order,
  /// starting from the corner at `-width/2, -height/2` in the rectangle's own
  /// frame.
  pub fn corners(&self) -> NdArray<f64, 2> {
    let (sin, cos) = self.angle.sin_cos();
    let (hw, hh) = (self.width() / 2.0, self.height() / 2.0);
    let offsets = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)];
    NdArray::from_shape_fn([4, 2], |[corner, axis]| {
      let (du, dv) = offsets[corner];
      let delta = if axis == 0 {
        du * cos - dv * sin
      } else {
        du * sin + dv * cos
      };
      self.center.at([axis]) + delta
    })
  }

  /// Express `(x, y)` in the rectangle's frame: translated to the center and
  /// rotated by `-angle`.
  pub fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
    let (sin, cos) = self.angle.sin_cos();
    let (dx, dy) = (x - self.center.at([0]), y - self.center.at([1]));
    (dx * cos + dy * sin, -dx * sin + dy * cos)
  }

  /// True if `(x, y)` lies inside or within `eps` of the boundary.
  pub fn contains(&self, x: f64, y: f64, eps: f64) -> bool {
    let (lx, ly) = self.to_local(x, y);
    lx.abs() <= self.width() / 2.0 + eps && ly.abs() <= self.height() / 2.0 + eps
  }
}
