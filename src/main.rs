// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.

use log::info;
use ndarray::{Array, IxDyn};

use slice_region::tensor::resolve_axes;
use slice_region::{
	ErrPack, Layout, OutOfBoundsPolicy, SliceArgsConfig, SliceArgsGenerator, SliceConfig,
	SliceError, SliceOp, TensorShape,
};

const BATCH_SIZE: usize = 3;

fn init_logging() {
	let verbosity = std::env::var("SLICE_DEMO_VERBOSITY")
		.ok()
		.and_then(|v| v.parse::<usize>().ok())
		.unwrap_or(2);
	let result = stderrlog::new()
		.module(module_path!())
		.module("slice_region")
		.verbosity(verbosity)
		.timestamp(stderrlog::Timestamp::Off)
		.init();
	if let Err(err) = result {
		eprintln!("cannot initialize logging: {err}");
	}
}

fn main() -> Result<(), ErrPack<SliceError>> {
	init_logging();

	let layout = Layout::new("HWC")?;
	let shape = TensorShape::new(&[40, 80, 3]);

	// slice arguments reaching past the image on both ends, so padding kicks in
	let config = SliceConfig::default()
		.with_axis_names("HW")
		.with_normalized_anchor(false)
		.with_normalized_shape(false)
		.with_out_of_bounds_policy(OutOfBoundsPolicy::Pad)
		.with_fill_values(&[118.0, 185.0, 0.0]);
	let axes = resolve_axes(&config.axes, Some(&layout), shape.ndim())?;
	let op = SliceOp::new(config)?;

	let args_config = SliceArgsConfig::default()
		.with_normalized(false, false)
		.with_anchor_range(-0.5, -0.1)
		.with_shape_range(1.1, 3.6);
	let generator = SliceArgsGenerator::new(args_config, &axes, Some(&shape))?;
	let args = generator.generate(BATCH_SIZE);

	#[allow(clippy::cast_possible_truncation)]
	let samples = (0..BATCH_SIZE)
		.map(|i| Array::from_shape_fn(IxDyn(shape.dims()), |ix| (ix[0] + ix[1] + i) as u8))
		.collect::<Vec<_>>();
	let views = samples.iter().map(|s| s.view()).collect::<Vec<_>>();

	let outputs = op.run_batch(&views, Some(&layout), &args)?;
	for (i, (out, args)) in outputs.iter().zip(&args).enumerate() {
		info!(
			"sample {i}: anchor={:?} extent={:?} -> output shape {:?}",
			args.anchor.as_slice(),
			args.extent.as_slice(),
			out.shape()
		);
	}

	for policy in [OutOfBoundsPolicy::TrimToShape, OutOfBoundsPolicy::Error] {
		let op = SliceOp::new(op.config().clone().with_out_of_bounds_policy(policy))?;
		match op.run_batch(&views, Some(&layout), &args) {
			Ok(outputs) => {
				let shapes = outputs.iter().map(|o| o.shape().to_vec()).collect::<Vec<_>>();
				info!("policy {policy}: output shapes {shapes:?}");
			},
			Err(err) => info!("policy {policy}: batch rejected: {err}"),
		}
	}

	Ok(())
}
