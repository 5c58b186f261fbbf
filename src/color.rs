use nalgebra as na;
use crate::globals::CHANNEL_MAX;

/// A point or direction in RGB space. Channels are kept fractional; only the
/// renderer rounds them.
pub type ColorVector = na::Vector3<f32>;

pub trait ColorVectorExt {
	/// Unit vector in the same direction, or zero for the zero vector.
	fn normalize_or_zero(&self) -> ColorVector;
	/// Rescales to `max` if longer than `max`.
	fn limit(&self, max: f32) -> ColorVector;
	fn to_rgb8(&self) -> [u8; 3];
}

impl ColorVectorExt for ColorVector {
	fn normalize_or_zero(&self) -> ColorVector {
		let mag = self.norm();
		if mag > 0.0 {
			self / mag
		} else {
			ColorVector::zeros()
		}
	}

	fn limit(&self, max: f32) -> ColorVector {
		if self.dot(self) > max * max {
			self.normalize_or_zero() * max
		} else {
			*self
		}
	}

	fn to_rgb8(&self) -> [u8; 3] {
		let channel = |v: f32| v.max(0.0).min(CHANNEL_MAX).round() as u8;
		[channel(self.x), channel(self.y), channel(self.z)]
	}
}
