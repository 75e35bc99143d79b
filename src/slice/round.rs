//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use crate::util::LossyInto;

/// Largest coordinate magnitude `round_int()` returns.
///
/// Sums and differences of two such coordinates fit in `i64`.
pub const MAX_COORD: i64 = i64::MAX / 4;

/// Adds `0.5` away from zero in `f32` and truncates toward zero.
///
/// This is close to rounding half away from zero but not the same thing. The addition itself
/// rounds in `f32`, so `0.49999997 + 0.5` becomes `1.0` and the result is 1, while a true
/// rounding (`f32::round()`) gives 0. Slice coordinates rely on this exact behavior.
///
/// The result is clamped to `-MAX_COORD ..= MAX_COORD`.
pub fn round_int(value: f32) -> i64 {
	let offset = if value >= 0.0 { 0.5 } else { -0.5 };
	#[allow(clippy::cast_possible_truncation)]
	let result = (value + offset) as i64;
	result.clamp(-MAX_COORD, MAX_COORD)
}

/// `round(dim * fraction)`, with the product computed in `f32`.
pub fn round_scaled(dim: usize, fraction: f32) -> i64 {
	let dim: f32 = dim.lossy_into();
	round_int(dim * fraction)
}

//--------------------------------------------------------------------------------------------------
