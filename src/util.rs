//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

pub trait LossyInto<T> {
	fn lossy_into(self) -> T;
}

#[allow(clippy::cast_precision_loss)]
impl LossyInto<f32> for usize {
	fn lossy_into(self) -> f32 {
		self as f32
	}
}

#[allow(clippy::cast_precision_loss)]
impl LossyInto<f64> for usize {
	fn lossy_into(self) -> f64 {
		self as f64
	}
}

//--------------------------------------------------------------------------------------------------

/// Element types that can be produced from a fill value.
///
/// Integer conversions saturate, so a fill value of `300.0` becomes `255` for `u8`.
pub trait FromF32: Copy {
	fn from_f32(val: f32) -> Self;
}

impl FromF32 for f32 {
	fn from_f32(val: f32) -> Self {
		val
	}
}

impl FromF32 for f64 {
	fn from_f32(val: f32) -> Self {
		Self::from(val)
	}
}

macro_rules! impl_from_f32_for_int {
	($($t:ty),*) => {
		$(
			impl FromF32 for $t {
				#[allow(clippy::cast_possible_truncation)]
				#[allow(clippy::cast_sign_loss)]
				fn from_f32(val: f32) -> Self {
					val as $t
				}
			}
		)*
	};
}

impl_from_f32_for_int!(u8, i8, u16, i16, u32, i32, i64);

//--------------------------------------------------------------------------------------------------
