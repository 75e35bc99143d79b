//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use smallvec::SmallVec;

use super::round::{round_int, round_scaled};
use crate::tensor::dim_index::resolve_index;
use crate::tensor::error::{ArgumentCountMismatchError, ElementsOverflowError, SliceError};
use crate::tensor::{INLINE_DIMS, TensorShape};
use crate::{ErrPack, cold_path};

//--------------------------------------------------------------------------------------------------

/// Anchor and extent for each selected axis.
///
/// `anchor[i]` and `extent[i]` belong to the `i`-th selected axis. When normalized, a value is a
/// fraction of that axis' extent. Otherwise it is an absolute coordinate stored as a float.
#[derive(Clone, Copy, Debug)]
pub struct SliceRequest<'a> {
	pub anchor: &'a [f32],
	pub extent: &'a [f32],
	pub anchor_normalized: bool,
	pub extent_normalized: bool,
}

/// Absolute `[start, end)` for every axis of the tensor.
///
/// Coordinates may lie outside `0 ..= dim`. What happens then is decided by the
/// out-of-bounds policy.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResolvedRegion {
	pub start: SmallVec<[i64; INLINE_DIMS]>,
	pub end: SmallVec<[i64; INLINE_DIMS]>,
	pub out_shape: SmallVec<[i64; INLINE_DIMS]>,
}

impl ResolvedRegion {
	/// The whole tensor.
	pub fn full(shape: &TensorShape) -> Self {
		let ndim = shape.ndim();
		let mut start = SmallVec::with_capacity(ndim);
		let mut end = SmallVec::with_capacity(ndim);
		for &dim in shape.dims() {
			start.push(0);
			end.push(i64_from(dim));
		}
		let out_shape = end.clone();
		Self { start, end, out_shape }
	}

	pub fn ndim(&self) -> usize {
		self.start.len()
	}
}

#[allow(clippy::cast_possible_wrap)]
pub(crate) fn i64_from(dim: usize) -> i64 {
	dim as i64
}

//--------------------------------------------------------------------------------------------------

/// Computes absolute start and end coordinates for all axes.
///
/// When both anchor and extent are normalized, `end` is rounded from `anchor + extent` directly
/// instead of `start + round(extent)`. The two can differ by one.
///
/// If an axis is selected more than once, the first occurrence wins and the later ones are
/// ignored.
pub fn resolve_start_end(
	shape: &TensorShape,
	axes: &[usize],
	request: &SliceRequest,
) -> Result<ResolvedRegion, ErrPack<SliceError>> {
	check_count(axes.len(), request.anchor.len())?;
	check_count(axes.len(), request.extent.len())?;

	let mut region = ResolvedRegion::full(shape);
	let mut assigned = SmallVec::<[bool; INLINE_DIMS]>::from_elem(false, shape.ndim());
	let params = axes.iter().zip(request.anchor.iter().zip(request.extent.iter()));
	for (&axis, (&anchor, &extent)) in params {
		let axis = resolve_index(axis, shape.ndim())?;
		match assigned.get_mut(axis) {
			Some(done) if !*done => *done = true,
			_ => continue,
		}
		if !anchor.is_finite() || !extent.is_finite() {
			cold_path();
			log::warn!("resolve_start_end(): non-finite slice argument on axis {axis}");
			return Err(ErrPack::with_message(
				SliceError::InvalidValue,
				format!("Slice arguments must be finite, got anchor={anchor}, extent={extent}"),
			));
		}
		let dim = shape.dim(axis)?;

		let start = if request.anchor_normalized {
			round_scaled(dim, anchor)
		} else {
			round_int(anchor)
		};
		let end = if request.anchor_normalized && request.extent_normalized {
			Some(round_scaled(dim, anchor + extent))
		} else if request.extent_normalized {
			start.checked_add(round_scaled(dim, extent))
		} else {
			start.checked_add(round_int(extent))
		};
		let Some((end, len)) = end.and_then(|end| Some((end, end.checked_sub(start)?))) else {
			cold_path();
			log::warn!("resolve_start_end(): coordinates overflow on axis {axis}");
			return Err(ElementsOverflowError.into());
		};

		// `axis` was checked against the rank above
		if let (Some(s), Some(e), Some(o)) = (
			region.start.get_mut(axis),
			region.end.get_mut(axis),
			region.out_shape.get_mut(axis),
		) {
			*s = start;
			*e = end;
			*o = len;
		}
	}
	log::debug!(
		"resolve_start_end(): shape={shape}, start={:?}, end={:?}",
		region.start.as_slice(),
		region.end.as_slice()
	);
	Ok(region)
}

fn check_count(expected: usize, got: usize) -> Result<(), ArgumentCountMismatchError> {
	if expected == got {
		Ok(())
	} else {
		cold_path();
		Err(ArgumentCountMismatchError { expected, got })
	}
}

//--------------------------------------------------------------------------------------------------
