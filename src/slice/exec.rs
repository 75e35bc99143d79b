//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Slice};

use super::policy::{EffectiveRegion, FillValues};
use crate::tensor::error::{ElementsOverflowError, ShapeRankMismatchError, SliceError};
use crate::util::FromF32;
use crate::{ErrPack, cold_path};

//--------------------------------------------------------------------------------------------------

/// Copies `region` out of `input`, synthesizing fill for padded coordinates.
///
/// Multi-valued fill is indexed by the input coordinate along `channel_axis`.
pub fn slice_array<T: FromF32>(
	input: ArrayViewD<'_, T>,
	region: &EffectiveRegion,
	fill_values: &FillValues,
	channel_axis: Option<usize>,
) -> Result<ArrayD<T>, ErrPack<SliceError>> {
	if input.ndim() != region.ndim() {
		cold_path();
		return Err(ShapeRankMismatchError { got: input.ndim(), ndim: region.ndim() }.into());
	}
	let bytes = region.out_elems().checked_mul(std::mem::size_of::<T>());
	if !bytes.is_some_and(|b| isize::try_from(b).is_ok()) {
		cold_path();
		log::warn!("slice_array(): output of shape {:?} is too large", region.out_shape.as_slice());
		return Err(ElementsOverflowError.into());
	}

	let copy = region.copy_ranges();
	if !region.needs_fill() {
		// `copy` is `None` here only if the output is empty
		let Some((src, _)) = copy else {
			return Ok(ArrayD::from_elem(IxDyn(&region.out_shape), T::from_f32(0.0)));
		};
		let view = input.slice_each_axis(|ax| {
			src.get(ax.axis.index()).map_or_else(|| Slice::from(..), |r| Slice::from(r.clone()))
		});
		return Ok(view.to_owned());
	}

	let first = fill_values.for_channel(0);
	let mut out = ArrayD::from_elem(IxDyn(&region.out_shape), T::from_f32(first));
	let channel_axis = channel_axis.filter(|&c| c < out.ndim() && !fill_values.is_scalar());
	if let Some(c) = channel_axis {
		let offset = region.start.get(c).copied().unwrap_or(0);
		for (i, mut lane) in out.axis_iter_mut(Axis(c)).enumerate() {
			#[allow(clippy::cast_possible_wrap)]
			let channel = offset + i as i64;
			lane.fill(T::from_f32(fill_values.for_channel(channel)));
		}
	}

	if let Some((src, dst)) = copy {
		let src_view = input.slice_each_axis(|ax| {
			src.get(ax.axis.index()).map_or_else(|| Slice::from(..), |r| Slice::from(r.clone()))
		});
		let mut dst_view = out.slice_each_axis_mut(|ax| {
			dst.get(ax.axis.index()).map_or_else(|| Slice::from(..), |r| Slice::from(r.clone()))
		});
		dst_view.assign(&src_view);
	}

	Ok(out)
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use ndarray::{Array, ArrayD, IxDyn};

	use super::*;
	use crate::slice::policy::{OutOfBoundsPolicy, apply_out_of_bounds_policy};
	use crate::slice::region::{SliceRequest, resolve_start_end};
	use crate::tensor::TensorShape;

	fn iota(shape: &[usize]) -> ArrayD<i32> {
		let n: usize = shape.iter().product();
		#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
		let data = (0..n).map(|i| i as i32).collect::<Vec<_>>();
		Array::from_shape_vec(IxDyn(shape), data).unwrap()
	}

	fn run(
		input: &ArrayD<i32>,
		axes: &[usize],
		anchor: &[f32],
		extent: &[f32],
		policy: OutOfBoundsPolicy,
		fill: &FillValues,
	) -> ArrayD<i32> {
		let shape = TensorShape::new(input.shape());
		let req = SliceRequest {
			anchor,
			extent,
			anchor_normalized: false,
			extent_normalized: false,
		};
		let channel_axis = Some(input.ndim() - 1);
		let region = resolve_start_end(&shape, axes, &req).unwrap();
		let region =
			apply_out_of_bounds_policy(&shape, axes, region, policy, fill, channel_axis).unwrap();
		slice_array(input.view(), &region, fill, channel_axis).unwrap()
	}

	#[test]
	fn test_pad_embeds_source() {
		let input = Array::from_shape_vec(IxDyn(&[2, 2, 1]), vec![1, 2, 3, 4]).unwrap();
		let fill = FillValues::scalar(9.0);
		let out = run(&input, &[0, 1], &[-1.0, -1.0], &[3.0, 3.0], OutOfBoundsPolicy::Pad, &fill);
		assert_eq!(out.shape(), &[3, 3, 1]);
		#[rustfmt::skip]
		let expected = vec![
			9, 9, 9,
			9, 1, 2,
			9, 3, 4,
		];
		assert_eq!(out.iter().copied().collect::<Vec<_>>(), expected);
		assert_eq!(out.iter().filter(|&&v| v == 9).count(), 5);
	}

	#[test]
	fn test_pad_per_channel_fill() {
		let input = iota(&[2, 2, 3]);
		let fill = FillValues::new(&[118.0, 185.0, 0.0]);
		let out = run(&input, &[0, 1], &[0.0, 1.0], &[3.0, 2.0], OutOfBoundsPolicy::Pad, &fill);
		assert_eq!(out.shape(), &[3, 2, 3]);
		// in bounds
		assert_eq!(out[[0, 0, 0]], input[[0, 1, 0]]);
		assert_eq!(out[[1, 0, 2]], input[[1, 1, 2]]);
		// past the right edge
		assert_eq!(out[[0, 1, 0]], 118);
		assert_eq!(out[[0, 1, 1]], 185);
		assert_eq!(out[[0, 1, 2]], 0);
		// past the bottom edge
		assert_eq!(out[[2, 0, 1]], 185);
	}

	#[test]
	fn test_trim_matches_pad_inside_bounds() {
		let input = iota(&[6, 8, 3]);
		let fill = FillValues::scalar(-1.0);
		let anchor = [1.0, 2.0];
		let extent = [4.0, 5.0];
		let padded = run(&input, &[0, 1], &anchor, &extent, OutOfBoundsPolicy::Pad, &fill);
		let trimmed = run(&input, &[0, 1], &anchor, &extent, OutOfBoundsPolicy::TrimToShape, &fill);
		assert_eq!(padded, trimmed);
		assert_eq!(padded.shape(), &[4, 5, 3]);
		assert!(!padded.iter().any(|&v| v == -1));
	}

	#[test]
	fn test_trim_out_of_bounds() {
		let input = iota(&[4, 5, 1]);
		let fill = FillValues::default();
		let policy = OutOfBoundsPolicy::TrimToShape;
		let out = run(&input, &[1, 0], &[3.0, -2.0], &[4.0, 3.0], policy, &fill);
		assert_eq!(out.shape(), &[1, 2, 1]);
		assert_eq!(out[[0, 0, 0]], input[[0, 3, 0]]);
		assert_eq!(out[[0, 1, 0]], input[[0, 4, 0]]);
	}

	#[test]
	fn test_slice_channel_axis() {
		let input = iota(&[2, 2, 3]);
		let fill = FillValues::default();
		let out = run(&input, &[2], &[1.0], &[2.0], OutOfBoundsPolicy::Error, &fill);
		assert_eq!(out.shape(), &[2, 2, 2]);
		assert_eq!(out[[1, 1, 0]], input[[1, 1, 1]]);
		assert_eq!(out[[1, 1, 1]], input[[1, 1, 2]]);
	}

	#[test]
	fn test_empty_output() {
		let input = iota(&[4, 4, 1]);
		let fill = FillValues::default();
		let out = run(&input, &[0], &[5.0], &[2.0], OutOfBoundsPolicy::TrimToShape, &fill);
		assert_eq!(out.shape(), &[0, 4, 1]);
	}

	#[test]
	fn test_rank_mismatch() {
		let input = iota(&[4, 4]);
		let region = EffectiveRegion {
			start: [0, 0, 0].into_iter().collect(),
			end: [4, 4, 1].into_iter().collect(),
			out_shape: [4, 4, 1].into_iter().collect(),
			pad_before: [0, 0, 0].into_iter().collect(),
			pad_after: [0, 0, 0].into_iter().collect(),
		};
		let err = slice_array(input.view(), &region, &FillValues::default(), None).unwrap_err();
		assert_eq!(err.code, SliceError::ShapeRankMismatch);
	}
}
