//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use smallvec::SmallVec;

use super::error::{InvalidLayoutError, ShapeRankMismatchError};
use crate::cold_path;

//--------------------------------------------------------------------------------------------------
// Almost all tensors we slice have rank <= 5, so shapes and per-axis vectors use inline storage.

pub const INLINE_DIMS: usize = 5;

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct TensorShape {
	dims: SmallVec<[usize; INLINE_DIMS]>,
}

impl TensorShape {
	pub fn new(dims: &[usize]) -> Self {
		Self { dims: SmallVec::from_slice(dims) }
	}

	pub fn ndim(&self) -> usize {
		self.dims.len()
	}

	pub fn dims(&self) -> &[usize] {
		&self.dims
	}

	pub fn dim(&self, axis: usize) -> Result<usize, ShapeRankMismatchError> {
		if let Some(&dim) = self.dims.get(axis) {
			Ok(dim)
		} else {
			cold_path();
			Err(ShapeRankMismatchError { got: axis, ndim: self.ndim() })
		}
	}

	pub fn elems(&self) -> usize {
		self.dims.iter().product()
	}
}

impl From<&[usize]> for TensorShape {
	fn from(dims: &[usize]) -> Self {
		Self::new(dims)
	}
}

impl<const N: usize> From<&[usize; N]> for TensorShape {
	fn from(dims: &[usize; N]) -> Self {
		Self::new(dims)
	}
}

impl std::fmt::Display for TensorShape {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "[")?;
		for (i, dim) in self.dims.iter().enumerate() {
			if i != 0 {
				write!(f, ", ")?;
			}
			write!(f, "{dim}")?;
		}
		write!(f, "]")
	}
}

//--------------------------------------------------------------------------------------------------

/// One label per axis, e.g. `"HWC"`. Labels are unique within a layout.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Layout {
	labels: SmallVec<[char; INLINE_DIMS]>,
}

impl Layout {
	pub fn new(labels: &str) -> Result<Self, InvalidLayoutError> {
		let mut result = SmallVec::<[char; INLINE_DIMS]>::new();
		for label in labels.chars() {
			if result.contains(&label) {
				cold_path();
				return Err(InvalidLayoutError { duplicate: label });
			}
			result.push(label);
		}
		Ok(Self { labels: result })
	}

	pub fn ndim(&self) -> usize {
		self.labels.len()
	}

	pub fn labels(&self) -> &[char] {
		&self.labels
	}

	pub fn position(&self, label: char) -> Option<usize> {
		self.labels.iter().position(|&l| l == label)
	}

	pub fn check_rank(&self, ndim: usize) -> Result<(), ShapeRankMismatchError> {
		if self.ndim() == ndim {
			Ok(())
		} else {
			cold_path();
			Err(ShapeRankMismatchError { got: self.ndim(), ndim })
		}
	}
}

impl std::fmt::Display for Layout {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		for label in &self.labels {
			write!(f, "{label}")?;
		}
		Ok(())
	}
}

/// The axis fill values are spread over: the one labeled `C` if the layout has it,
/// otherwise the innermost axis.
pub fn channel_axis(layout: Option<&Layout>, ndim: usize) -> Option<usize> {
	layout.and_then(|layout| layout.position('C')).or_else(|| ndim.checked_sub(1))
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layout_rejects_duplicate_labels() {
		assert_eq!(Layout::new("HWH"), Err(InvalidLayoutError { duplicate: 'H' }));
	}

	#[test]
	fn test_layout_position() {
		let layout = Layout::new("DHWC").unwrap();
		assert_eq!(layout.position('D'), Some(0));
		assert_eq!(layout.position('C'), Some(3));
		assert_eq!(layout.position('X'), None);
		assert!(layout.check_rank(4).is_ok());
		assert_eq!(layout.check_rank(3), Err(ShapeRankMismatchError { got: 4, ndim: 3 }));
	}

	#[test]
	fn test_channel_axis() {
		let chw = Layout::new("CHW").unwrap();
		assert_eq!(channel_axis(Some(&chw), 3), Some(0));
		let hw = Layout::new("HW").unwrap();
		assert_eq!(channel_axis(Some(&hw), 2), Some(1));
		assert_eq!(channel_axis(None, 3), Some(2));
		assert_eq!(channel_axis(None, 0), None);
	}

	#[test]
	fn test_shape_dim() {
		let shape = TensorShape::new(&[200, 400, 3]);
		assert_eq!(shape.dim(1), Ok(400));
		assert_eq!(shape.dim(3), Err(ShapeRankMismatchError { got: 3, ndim: 3 }));
		assert_eq!(shape.elems(), 240_000);
		assert_eq!(shape.to_string(), "[200, 400, 3]");
	}
}
