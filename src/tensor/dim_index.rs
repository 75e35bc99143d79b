//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use smallvec::SmallVec;

use super::error::{
	EmptyAxisSelectorError, InvalidAxisLabelError, ShapeRankMismatchError, SliceError,
};
use super::shape::{INLINE_DIMS, Layout};
use crate::{ErrPack, cold_path};

//--------------------------------------------------------------------------------------------------

pub type AxisList = SmallVec<[usize; INLINE_DIMS]>;

/// Which axes a slice applies to. Either explicit indices or labels looked up in the layout.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AxisSelector {
	Indices(AxisList),
	Labels(String),
}

impl Default for AxisSelector {
	fn default() -> Self {
		Self::Labels("WH".to_string())
	}
}

impl AxisSelector {
	pub fn len(&self) -> usize {
		match self {
			Self::Indices(indices) => indices.len(),
			Self::Labels(labels) => labels.chars().count(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl From<&[usize]> for AxisSelector {
	fn from(indices: &[usize]) -> Self {
		Self::Indices(SmallVec::from_slice(indices))
	}
}

impl<const N: usize> From<&[usize; N]> for AxisSelector {
	fn from(indices: &[usize; N]) -> Self {
		Self::Indices(SmallVec::from_slice(indices))
	}
}

impl From<&str> for AxisSelector {
	fn from(labels: &str) -> Self {
		Self::Labels(labels.to_string())
	}
}

//--------------------------------------------------------------------------------------------------

/// Allowed indexes are `0 ..< ndim`.
pub fn resolve_index(axis: usize, ndim: usize) -> Result<usize, ShapeRankMismatchError> {
	if axis < ndim {
		Ok(axis)
	} else {
		cold_path();
		Err(ShapeRankMismatchError { got: axis, ndim })
	}
}

pub fn resolve_label(label: char, layout: Option<&Layout>) -> Result<usize, InvalidAxisLabelError> {
	if let Some(axis) = layout.and_then(|layout| layout.position(label)) {
		Ok(axis)
	} else {
		cold_path();
		Err(InvalidAxisLabelError { label })
	}
}

/// Turns the selector into axis indices of a tensor with `ndim` dimensions.
///
/// Indices keep their order and duplicates. Labels are resolved one by one, in order.
pub fn resolve_axes(
	selector: &AxisSelector,
	layout: Option<&Layout>,
	ndim: usize,
) -> Result<AxisList, ErrPack<SliceError>> {
	let mut axes = AxisList::new();
	match selector {
		AxisSelector::Indices(indices) => {
			for &axis in indices {
				axes.push(resolve_index(axis, ndim)?);
			}
		},
		AxisSelector::Labels(labels) => {
			for label in labels.chars() {
				let axis = resolve_label(label, layout)?;
				axes.push(resolve_index(axis, ndim)?);
			}
		},
	}
	if axes.is_empty() {
		cold_path();
		return Err(EmptyAxisSelectorError.into());
	}
	Ok(axes)
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	fn hwc() -> Layout {
		Layout::new("HWC").unwrap()
	}

	#[test]
	fn test_indices_pass_through() {
		let axes = resolve_axes(&AxisSelector::from(&[2_usize, 1, 0]), None, 4).unwrap();
		assert_eq!(axes.as_slice(), &[2, 1, 0]);

		let axes = resolve_axes(&AxisSelector::from(&[1_usize, 1]), None, 2).unwrap();
		assert_eq!(axes.as_slice(), &[1, 1]);
	}

	#[test]
	fn test_labels_follow_layout() {
		let layout = Layout::new("DHWC").unwrap();
		let axes = resolve_axes(&AxisSelector::from("WHD"), Some(&layout), 4).unwrap();
		assert_eq!(axes.as_slice(), &[2, 1, 0]);
	}

	#[test]
	fn test_default_selector_is_width_then_height() {
		let axes = resolve_axes(&AxisSelector::default(), Some(&hwc()), 3).unwrap();
		assert_eq!(axes.as_slice(), &[1, 0]);
	}

	#[test]
	fn test_unknown_label() {
		let err = resolve_axes(&AxisSelector::from("X"), Some(&hwc()), 3).unwrap_err();
		assert_eq!(err.code, SliceError::InvalidAxisLabel);

		let err = resolve_axes(&AxisSelector::from("H"), None, 3).unwrap_err();
		assert_eq!(err.code, SliceError::InvalidAxisLabel);
	}

	#[test]
	fn test_empty_selector() {
		let err = resolve_axes(&AxisSelector::from(""), Some(&hwc()), 3).unwrap_err();
		assert_eq!(err.code, SliceError::EmptyAxisSelector);

		let err = resolve_axes(&AxisSelector::Indices(AxisList::new()), None, 3).unwrap_err();
		assert_eq!(err.code, SliceError::EmptyAxisSelector);
	}

	#[test]
	fn test_axis_beyond_rank() {
		let err = resolve_axes(&AxisSelector::from(&[0_usize, 3]), None, 3).unwrap_err();
		assert_eq!(err.code, SliceError::ShapeRankMismatch);
	}
}
