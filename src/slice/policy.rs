//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use std::ops::Range;
use std::str::FromStr;

use smallvec::{SmallVec, smallvec};

use super::region::{ResolvedRegion, i64_from};
use crate::tensor::error::{
	ElementsOverflowError, FillValueChannelMismatchError, OutOfBoundsError, ShapeRankMismatchError,
	SliceError,
};
use crate::tensor::{INLINE_DIMS, TensorShape};
use crate::{ErrPack, cold_path};

//--------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutOfBoundsPolicy {
	/// Keep the requested extent and fill whatever lies outside the input.
	Pad,
	/// Clamp the region to the input.
	TrimToShape,
	#[default]
	Error,
}

impl FromStr for OutOfBoundsPolicy {
	type Err = ErrPack<SliceError>;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pad" => Ok(Self::Pad),
			"trim_to_shape" => Ok(Self::TrimToShape),
			"error" => Ok(Self::Error),
			_ => {
				cold_path();
				Err(ErrPack::with_message(
					SliceError::InvalidValue,
					format!("Unknown out of bounds policy: {s:?}"),
				))
			},
		}
	}
}

impl std::fmt::Display for OutOfBoundsPolicy {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let name = match self {
			Self::Pad => "pad",
			Self::TrimToShape => "trim_to_shape",
			Self::Error => "error",
		};
		write!(f, "{name}")
	}
}

//--------------------------------------------------------------------------------------------------

/// Values written to padded coordinates. Either one value for all channels or one per channel.
#[derive(Clone, PartialEq, Debug)]
pub struct FillValues {
	values: SmallVec<[f32; 4]>,
}

impl Default for FillValues {
	fn default() -> Self {
		Self { values: smallvec![0.0] }
	}
}

impl FillValues {
	/// An empty slice gives the default fill value of zero.
	pub fn new(values: &[f32]) -> Self {
		if values.is_empty() {
			Self::default()
		} else {
			Self { values: SmallVec::from_slice(values) }
		}
	}

	pub fn scalar(value: f32) -> Self {
		Self { values: smallvec![value] }
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn is_scalar(&self) -> bool {
		self.values.len() == 1
	}

	pub fn values(&self) -> &[f32] {
		&self.values
	}

	pub fn check_channels(&self, channels: usize) -> Result<(), FillValueChannelMismatchError> {
		if self.values.len() <= 1 || self.values.len() == channels {
			Ok(())
		} else {
			cold_path();
			Err(FillValueChannelMismatchError { fill_values: self.values.len(), channels })
		}
	}

	/// Fill value for the given channel coordinate of the input.
	///
	/// The coordinate may be outside the input when the channel axis itself is padded.
	/// In that case it wraps around.
	pub fn for_channel(&self, channel: i64) -> f32 {
		let len = i64_from(self.values.len());
		#[allow(clippy::cast_possible_truncation)]
		#[allow(clippy::cast_sign_loss)]
		let index = channel.rem_euclid(len.max(1)) as usize;
		self.values.get(index).copied().unwrap_or(0.0)
	}
}

//--------------------------------------------------------------------------------------------------

/// Region after the out-of-bounds policy was applied.
///
/// Along each axis, the output consists of `pad_before` fill elements, then
/// `out_shape - pad_before - pad_after` elements copied from the input starting at
/// `max(start, 0)`, then `pad_after` fill elements.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EffectiveRegion {
	pub start: SmallVec<[i64; INLINE_DIMS]>,
	pub end: SmallVec<[i64; INLINE_DIMS]>,
	pub out_shape: SmallVec<[usize; INLINE_DIMS]>,
	pub pad_before: SmallVec<[usize; INLINE_DIMS]>,
	pub pad_after: SmallVec<[usize; INLINE_DIMS]>,
}

impl EffectiveRegion {
	pub fn ndim(&self) -> usize {
		self.out_shape.len()
	}

	/// Saturates instead of overflowing.
	pub fn out_elems(&self) -> usize {
		if self.out_shape.contains(&0) {
			return 0;
		}
		self.out_shape.iter().fold(1_usize, |acc, &len| acc.saturating_mul(len))
	}

	pub fn needs_fill(&self) -> bool {
		self.pad_before.iter().chain(self.pad_after.iter()).any(|&p| p > 0)
	}

	/// Length of the part copied from the input along `axis`.
	pub fn copy_len(&self, axis: usize) -> usize {
		let out = self.out_shape.get(axis).copied().unwrap_or(0);
		let before = self.pad_before.get(axis).copied().unwrap_or(0);
		let after = self.pad_after.get(axis).copied().unwrap_or(0);
		out.saturating_sub(before + after)
	}

	/// For each axis, the input range that is copied and the output range it lands in.
	///
	/// Returns `None` when nothing is copied, i.e. the output is all fill (or empty).
	#[allow(clippy::type_complexity)]
	pub fn copy_ranges(
		&self,
	) -> Option<(SmallVec<[Range<usize>; INLINE_DIMS]>, SmallVec<[Range<usize>; INLINE_DIMS]>)> {
		let mut src = SmallVec::with_capacity(self.ndim());
		let mut dst = SmallVec::with_capacity(self.ndim());
		for (axis, (&start, &before)) in self.start.iter().zip(self.pad_before.iter()).enumerate() {
			let len = self.copy_len(axis);
			if len == 0 {
				return None;
			}
			#[allow(clippy::cast_sign_loss)]
			#[allow(clippy::cast_possible_truncation)]
			let src_start = start.max(0) as usize;
			src.push(src_start..src_start + len);
			dst.push(before..before + len);
		}
		Some((src, dst))
	}

	/// Whether the output coordinate is filled rather than copied from the input.
	pub fn is_fill(&self, out_index: &[usize]) -> bool {
		out_index.iter().enumerate().any(|(axis, &i)| {
			let before = self.pad_before.get(axis).copied().unwrap_or(0);
			i < before || i >= before + self.copy_len(axis)
		})
	}

	/// The input coordinate an output coordinate is copied from, or `None` for fill.
	pub fn source_index(&self, out_index: &[usize]) -> Option<SmallVec<[usize; INLINE_DIMS]>> {
		if out_index.len() != self.ndim() || self.is_fill(out_index) {
			return None;
		}
		let src = out_index.iter().zip(self.start.iter()).map(|(&i, &start)| {
			#[allow(clippy::cast_possible_truncation)]
			#[allow(clippy::cast_sign_loss)]
			let coord = (i64_from(i) + start) as usize;
			coord
		});
		Some(src.collect())
	}
}

//--------------------------------------------------------------------------------------------------

/// Applies `policy` to a resolved region.
///
/// Only the selected `axes` can be out of bounds, the other ones span the whole input.
/// `channel_axis` is where multi-valued fill values are spread. When it is `None`,
/// only a single fill value is accepted.
pub fn apply_out_of_bounds_policy(
	shape: &TensorShape,
	axes: &[usize],
	region: ResolvedRegion,
	policy: OutOfBoundsPolicy,
	fill_values: &FillValues,
	channel_axis: Option<usize>,
) -> Result<EffectiveRegion, ErrPack<SliceError>> {
	if region.ndim() != shape.ndim() {
		cold_path();
		return Err(ShapeRankMismatchError { got: region.ndim(), ndim: shape.ndim() }.into());
	}
	let channels = match channel_axis {
		Some(axis) => shape.dim(axis)?,
		None => 1,
	};
	fill_values.check_channels(channels)?;

	let ResolvedRegion { mut start, mut end, .. } = region;
	match policy {
		OutOfBoundsPolicy::Pad => {},
		OutOfBoundsPolicy::TrimToShape => {
			for ((s, e), &dim) in start.iter_mut().zip(end.iter_mut()).zip(shape.dims()) {
				let dim = i64_from(dim);
				*s = (*s).clamp(0, dim);
				*e = (*e).clamp(*s, dim);
			}
		},
		OutOfBoundsPolicy::Error => {
			for &axis in axes {
				let dim = shape.dim(axis)?;
				let (Some(&s), Some(&e)) = (start.get(axis), end.get(axis)) else {
					continue;
				};
				if s < 0 || e > i64_from(dim) {
					cold_path();
					return Err(OutOfBoundsError { axis, start: s, end: e, dim }.into());
				}
			}
		},
	}

	let ndim = shape.ndim();
	let mut out_shape = SmallVec::with_capacity(ndim);
	let mut pad_before = SmallVec::with_capacity(ndim);
	let mut pad_after = SmallVec::with_capacity(ndim);
	for ((&s, &e), &dim) in start.iter().zip(end.iter()).zip(shape.dims()) {
		let (Some(len), Some(neg_start)) = (e.checked_sub(s), s.checked_neg()) else {
			cold_path();
			return Err(ElementsOverflowError.into());
		};
		// a negative requested extent gives an empty slice
		let out = len.max(0);
		let before = neg_start.clamp(0, out);
		let after = e.saturating_sub(i64_from(dim)).clamp(0, out - before);
		out_shape.push(usize_from(out));
		pad_before.push(usize_from(before));
		pad_after.push(usize_from(after));
	}
	check_elems(&out_shape)?;

	Ok(EffectiveRegion { start, end, out_shape, pad_before, pad_after })
}

/// The product of the non-zero extents must fit in `isize`, so the output can be allocated.
fn check_elems(out_shape: &[usize]) -> Result<(), ElementsOverflowError> {
	let mut elems: usize = 1;
	for &len in out_shape.iter().filter(|&&len| len != 0) {
		match elems.checked_mul(len) {
			Some(e) if isize::try_from(e).is_ok() => elems = e,
			_ => {
				cold_path();
				return Err(ElementsOverflowError);
			},
		}
	}
	Ok(())
}

/// Only called on values that are known to be non-negative.
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_truncation)]
fn usize_from(v: i64) -> usize {
	v as usize
}

//--------------------------------------------------------------------------------------------------
