//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use ndarray::{ArrayD, ArrayViewD};

use super::exec::slice_array;
use super::policy::{EffectiveRegion, FillValues, OutOfBoundsPolicy, apply_out_of_bounds_policy};
use super::region::{SliceRequest, resolve_start_end};
use crate::tensor::dim_index::{AxisSelector, resolve_axes};
use crate::tensor::error::{EmptyAxisSelectorError, SliceError};
use crate::tensor::shape::{Layout, TensorShape, channel_axis};
use crate::util::FromF32;
use crate::{ErrPack, cold_path};

//--------------------------------------------------------------------------------------------------

/// Arguments of the slice operator.
#[derive(Clone, Debug)]
pub struct SliceConfig {
	pub axes: AxisSelector,
	pub normalized_anchor: bool,
	pub normalized_shape: bool,
	pub out_of_bounds_policy: OutOfBoundsPolicy,
	pub fill_values: FillValues,
}

impl Default for SliceConfig {
	fn default() -> Self {
		Self {
			axes: AxisSelector::default(),
			normalized_anchor: true,
			normalized_shape: true,
			out_of_bounds_policy: OutOfBoundsPolicy::default(),
			fill_values: FillValues::default(),
		}
	}
}

impl SliceConfig {
	pub fn with_axes(mut self, axes: impl Into<AxisSelector>) -> Self {
		self.axes = axes.into();
		self
	}

	pub fn with_axis_names(mut self, names: &str) -> Self {
		self.axes = AxisSelector::Labels(names.to_string());
		self
	}

	pub fn with_normalized_anchor(mut self, normalized: bool) -> Self {
		self.normalized_anchor = normalized;
		self
	}

	pub fn with_normalized_shape(mut self, normalized: bool) -> Self {
		self.normalized_shape = normalized;
		self
	}

	pub fn with_out_of_bounds_policy(mut self, policy: OutOfBoundsPolicy) -> Self {
		self.out_of_bounds_policy = policy;
		self
	}

	pub fn with_fill_values(mut self, values: &[f32]) -> Self {
		self.fill_values = FillValues::new(values);
		self
	}
}

//--------------------------------------------------------------------------------------------------

/// A configured slice operator. Immutable, so it can be shared between threads.
#[derive(Clone, Debug)]
pub struct SliceOp {
	config: SliceConfig,
}

impl SliceOp {
	pub fn new(config: SliceConfig) -> Result<Self, ErrPack<SliceError>> {
		if config.axes.is_empty() {
			cold_path();
			return Err(EmptyAxisSelectorError.into());
		}
		Ok(Self { config })
	}

	pub fn config(&self) -> &SliceConfig {
		&self.config
	}

	/// Resolves the region one sample is sliced to.
	pub fn plan(
		&self,
		shape: &TensorShape,
		layout: Option<&Layout>,
		anchor: &[f32],
		extent: &[f32],
	) -> Result<EffectiveRegion, ErrPack<SliceError>> {
		let ndim = shape.ndim();
		if let Some(layout) = layout {
			layout.check_rank(ndim)?;
		}
		let axes = resolve_axes(&self.config.axes, layout, ndim)?;
		let request = SliceRequest {
			anchor,
			extent,
			anchor_normalized: self.config.normalized_anchor,
			extent_normalized: self.config.normalized_shape,
		};
		let region = resolve_start_end(shape, &axes, &request)?;
		apply_out_of_bounds_policy(
			shape,
			&axes,
			region,
			self.config.out_of_bounds_policy,
			&self.config.fill_values,
			channel_axis(layout, ndim),
		)
	}

	/// Slices one sample.
	pub fn run<T: FromF32>(
		&self,
		input: ArrayViewD<'_, T>,
		layout: Option<&Layout>,
		anchor: &[f32],
		extent: &[f32],
	) -> Result<ArrayD<T>, ErrPack<SliceError>> {
		let shape = TensorShape::new(input.shape());
		let region = self.plan(&shape, layout, anchor, extent)?;
		let channel_axis = channel_axis(layout, shape.ndim());
		slice_array(input, &region, &self.config.fill_values, channel_axis)
	}
}

//--------------------------------------------------------------------------------------------------
