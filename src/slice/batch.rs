//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use log::warn;
use ndarray::{ArrayD, ArrayViewD};

use super::args::SliceArgs;
use super::exec::slice_array;
use super::op::SliceOp;
use crate::tensor::error::{ArgumentCountMismatchError, SliceError};
use crate::tensor::shape::{Layout, TensorShape, channel_axis};
use crate::util::FromF32;
use crate::{ErrPack, cold_path};

//--------------------------------------------------------------------------------------------------

impl SliceOp {
	/// Slices every sample with its own arguments. A failure affects only its own sample.
	///
	/// `result[i]` always belongs to `samples[i]`.
	pub fn run_batch_per_sample<T: FromF32>(
		&self,
		samples: &[ArrayViewD<'_, T>],
		layout: Option<&Layout>,
		args: &[SliceArgs],
	) -> Result<Vec<Result<ArrayD<T>, ErrPack<SliceError>>>, ErrPack<SliceError>> {
		check_batch_size(samples.len(), args.len())?;
		let results = samples.iter().zip(args).enumerate().map(|(i, (sample, args))| {
			let result = self.run(sample.view(), layout, &args.anchor, &args.extent);
			if let Err(err) = &result {
				warn!("SliceOp::run_batch_per_sample(): sample {i} failed: {err}");
			}
			result
		});
		Ok(results.collect())
	}

	/// Slices every sample with its own arguments. The first failing sample fails the whole
	/// batch and no output is returned.
	pub fn run_batch<T: FromF32>(
		&self,
		samples: &[ArrayViewD<'_, T>],
		layout: Option<&Layout>,
		args: &[SliceArgs],
	) -> Result<Vec<ArrayD<T>>, ErrPack<SliceError>> {
		check_batch_size(samples.len(), args.len())?;

		// Plan the whole batch before copying anything
		let mut regions = Vec::with_capacity(samples.len());
		for (i, (sample, args)) in samples.iter().zip(args).enumerate() {
			let shape = TensorShape::new(sample.shape());
			match self.plan(&shape, layout, &args.anchor, &args.extent) {
				Ok(region) => regions.push(region),
				Err(err) => {
					cold_path();
					warn!("SliceOp::run_batch(): sample {i} failed, aborting the batch: {err}");
					return Err(err);
				},
			}
		}

		let fill_values = &self.config().fill_values;
		let mut outputs = Vec::with_capacity(samples.len());
		for (sample, region) in samples.iter().zip(&regions) {
			let channel_axis = channel_axis(layout, sample.ndim());
			outputs.push(slice_array(sample.view(), region, fill_values, channel_axis)?);
		}
		Ok(outputs)
	}
}

fn check_batch_size(samples: usize, args: usize) -> Result<(), ArgumentCountMismatchError> {
	if samples == args {
		Ok(())
	} else {
		cold_path();
		Err(ArgumentCountMismatchError { expected: samples, got: args })
	}
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use ndarray::{Array, IxDyn};

	use super::*;
	use crate::slice::op::SliceConfig;
	use crate::slice::policy::OutOfBoundsPolicy;

	#[allow(clippy::cast_possible_truncation)]
	fn batch(n: usize) -> Vec<ArrayD<u8>> {
		(0..n).map(|i| Array::from_elem(IxDyn(&[4, 6, 3]), i as u8)).collect()
	}

	fn op(policy: OutOfBoundsPolicy) -> SliceOp {
		let config = SliceConfig::default()
			.with_axis_names("HW")
			.with_normalized_anchor(false)
			.with_normalized_shape(false)
			.with_out_of_bounds_policy(policy);
		SliceOp::new(config).unwrap()
	}

	#[test]
	fn test_outputs_keep_sample_order() {
		let layout = Layout::new("HWC").unwrap();
		let samples = batch(3);
		let views = samples.iter().map(|s| s.view()).collect::<Vec<_>>();
		let args = vec![
			SliceArgs::new(&[0.0, 0.0], &[1.0, 1.0]),
			SliceArgs::new(&[1.0, 1.0], &[2.0, 3.0]),
			SliceArgs::new(&[2.0, 2.0], &[2.0, 4.0]),
		];
		let out = op(OutOfBoundsPolicy::Error).run_batch(&views, Some(&layout), &args).unwrap();
		assert_eq!(out.len(), 3);
		for (i, out) in out.iter().enumerate() {
			assert!(out.iter().all(|&v| usize::from(v) == i));
		}
		assert_eq!(out[0].shape(), &[1, 1, 3]);
		assert_eq!(out[1].shape(), &[2, 3, 3]);
		assert_eq!(out[2].shape(), &[2, 4, 3]);
	}

	#[test]
	fn test_batch_atomic_failure() {
		let layout = Layout::new("HWC").unwrap();
		let samples = batch(3);
		let views = samples.iter().map(|s| s.view()).collect::<Vec<_>>();
		let args = vec![
			SliceArgs::new(&[0.0, 0.0], &[1.0, 1.0]),
			SliceArgs::new(&[-1.0, 0.0], &[2.0, 3.0]),
			SliceArgs::new(&[0.0, 0.0], &[1.0, 1.0]),
		];
		let err = op(OutOfBoundsPolicy::Error).run_batch(&views, Some(&layout), &args).unwrap_err();
		assert_eq!(err.code, SliceError::OutOfBounds);
	}

	#[test]
	fn test_per_sample_failure() {
		let layout = Layout::new("HWC").unwrap();
		let samples = batch(3);
		let views = samples.iter().map(|s| s.view()).collect::<Vec<_>>();
		let args = vec![
			SliceArgs::new(&[0.0, 0.0], &[1.0, 1.0]),
			SliceArgs::new(&[0.0, 5.0], &[2.0, 3.0]),
			SliceArgs::new(&[0.0, 0.0], &[1.0, 1.0]),
		];
		let out = op(OutOfBoundsPolicy::Error)
			.run_batch_per_sample(&views, Some(&layout), &args)
			.unwrap();
		assert!(out[0].is_ok());
		assert_eq!(out[1].as_ref().unwrap_err().code, SliceError::OutOfBounds);
		assert!(out[2].is_ok());

		// the same arguments never fail with the other policies
		for policy in [OutOfBoundsPolicy::Pad, OutOfBoundsPolicy::TrimToShape] {
			let out = op(policy).run_batch_per_sample(&views, Some(&layout), &args).unwrap();
			assert!(out.iter().all(Result::is_ok));
		}
	}

	#[test]
	fn test_batch_size_mismatch() {
		let samples = batch(2);
		let views = samples.iter().map(|s| s.view()).collect::<Vec<_>>();
		let args = vec![SliceArgs::new(&[0.0, 0.0], &[1.0, 1.0])];
		let err = op(OutOfBoundsPolicy::Pad).run_batch(&views, None, &args).unwrap_err();
		assert_eq!(err.code, SliceError::ArgumentCountMismatch);
	}
}
