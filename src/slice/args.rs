//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use smallvec::SmallVec;

use crate::rng::Rng;
use crate::tensor::dim_index::AxisList;
use crate::tensor::error::SliceError;
use crate::tensor::{INLINE_DIMS, TensorShape};
use crate::util::LossyInto;
use crate::{ErrPack, cold_path};

//--------------------------------------------------------------------------------------------------

/// Anchor and extent for one sample, one value per selected axis.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SliceArgs {
	pub anchor: SmallVec<[f32; INLINE_DIMS]>,
	pub extent: SmallVec<[f32; INLINE_DIMS]>,
}

impl SliceArgs {
	pub fn new(anchor: &[f32], extent: &[f32]) -> Self {
		Self {
			anchor: SmallVec::from_slice(anchor),
			extent: SmallVec::from_slice(extent),
		}
	}
}

#[derive(Clone, Debug)]
pub struct SliceArgsConfig {
	pub normalized_anchor: bool,
	pub normalized_shape: bool,
	pub min_norm_anchor: f64,
	pub max_norm_anchor: f64,
	pub min_norm_shape: f64,
	pub max_norm_shape: f64,
	pub seed: u64,
}

impl Default for SliceArgsConfig {
	fn default() -> Self {
		Self {
			normalized_anchor: true,
			normalized_shape: true,
			min_norm_anchor: 0.0,
			max_norm_anchor: 0.2,
			min_norm_shape: 0.4,
			max_norm_shape: 0.75,
			seed: 54_643_613,
		}
	}
}

impl SliceArgsConfig {
	pub fn with_normalized(mut self, anchor: bool, shape: bool) -> Self {
		self.normalized_anchor = anchor;
		self.normalized_shape = shape;
		self
	}

	pub fn with_anchor_range(mut self, min: f64, max: f64) -> Self {
		self.min_norm_anchor = min;
		self.max_norm_anchor = max;
		self
	}

	pub fn with_shape_range(mut self, min: f64, max: f64) -> Self {
		self.min_norm_shape = min;
		self.max_norm_shape = max;
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}
}

//--------------------------------------------------------------------------------------------------

/// Draws random slice arguments for a batch.
///
/// Anchors and extents are drawn as fractions in the configured ranges. Absolute arguments are
/// `floor(fraction * dim)` along the selected axis of the reference shape.
///
/// `generate()` restarts from the seed every time, so each batch is the same.
pub struct SliceArgsGenerator {
	config: SliceArgsConfig,
	axes: AxisList,
	dims: SmallVec<[usize; INLINE_DIMS]>,
}

impl SliceArgsGenerator {
	/// `shape` is needed only when anchor or extent is absolute.
	pub fn new(
		config: SliceArgsConfig,
		axes: &[usize],
		shape: Option<&TensorShape>,
	) -> Result<Self, ErrPack<SliceError>> {
		let needs_shape = !config.normalized_anchor || !config.normalized_shape;
		let mut dims = SmallVec::new();
		match shape {
			Some(shape) => {
				for &axis in axes {
					dims.push(shape.dim(axis)?);
				}
			},
			None if needs_shape => {
				cold_path();
				return Err(ErrPack::with_message(
					SliceError::InvalidValue,
					"Absolute slice arguments need a reference shape",
				));
			},
			None => {},
		}
		if !(config.min_norm_anchor <= config.max_norm_anchor)
			|| !(config.min_norm_shape <= config.max_norm_shape)
		{
			cold_path();
			return Err(ErrPack::with_message(
				SliceError::InvalidValue,
				format!("Invalid argument ranges in {config:?}"),
			));
		}
		Ok(Self { config, axes: SmallVec::from_slice(axes), dims })
	}

	pub fn axes(&self) -> &[usize] {
		&self.axes
	}

	pub fn generate(&self, batch_size: usize) -> Vec<SliceArgs> {
		let c = &self.config;
		let anchor_amplitude = c.max_norm_anchor - c.min_norm_anchor;
		let shape_amplitude = c.max_norm_shape - c.min_norm_shape;
		let naxes = self.axes.len();

		let mut rng = Rng::from_seed(c.seed);
		let mut draws = vec![0.0; naxes];
		let mut batch = Vec::with_capacity(batch_size);
		for _ in 0..batch_size {
			let mut args = SliceArgs::default();

			rng.rand(&mut draws);
			for (i, &u) in draws.iter().enumerate() {
				let norm = anchor_amplitude * u + c.min_norm_anchor;
				args.anchor.push(self.to_arg(i, norm, c.normalized_anchor));
			}

			rng.rand(&mut draws);
			for (i, &u) in draws.iter().enumerate() {
				let norm = shape_amplitude * u + c.min_norm_shape;
				args.extent.push(self.to_arg(i, norm, c.normalized_shape));
			}

			batch.push(args);
		}
		batch
	}

	fn to_arg(&self, i: usize, norm: f64, normalized: bool) -> f32 {
		let value = if normalized {
			norm
		} else {
			let dim: f64 = self.dims.get(i).copied().unwrap_or(0).lossy_into();
			(norm * dim).floor()
		};
		#[allow(clippy::cast_possible_truncation)]
		let value = value as f32;
		value
	}
}

//--------------------------------------------------------------------------------------------------
