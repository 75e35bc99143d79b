//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

use std::borrow::Cow;

use crate::{ErrExtra, ErrPack};

//--------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SliceError {
	InvalidAxisLabel,
	EmptyAxisSelector,
	ShapeRankMismatch,
	FillValueChannelMismatch,
	OutOfBounds,
	InvalidLayout,
	ArgumentCountMismatch,
	ElementsOverflow,
	InvalidValue,
}

//--------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct InvalidAxisLabelError {
	pub label: char,
}

impl std::error::Error for InvalidAxisLabelError {}

impl std::fmt::Display for InvalidAxisLabelError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Axis label '{}' is not present in the layout.", self.label)
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct EmptyAxisSelectorError;

impl std::error::Error for EmptyAxisSelectorError {}

impl std::fmt::Display for EmptyAxisSelectorError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "At least one axis must be selected.")
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ShapeRankMismatchError {
	/// The offending axis index, or the layout length.
	pub got: usize,
	pub ndim: usize,
}

impl std::error::Error for ShapeRankMismatchError {}

impl std::fmt::Display for ShapeRankMismatchError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Rank mismatch: got {} for a tensor with {} dimensions.", self.got, self.ndim)
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FillValueChannelMismatchError {
	pub fill_values: usize,
	pub channels: usize,
}

impl std::error::Error for FillValueChannelMismatchError {}

impl std::fmt::Display for FillValueChannelMismatchError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"Got {} fill values for {} channels. Provide one value or one per channel.",
			self.fill_values, self.channels
		)
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct OutOfBoundsError {
	pub axis: usize,
	pub start: i64,
	pub end: i64,
	pub dim: usize,
}

impl std::error::Error for OutOfBoundsError {}

impl std::fmt::Display for OutOfBoundsError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"Slice [{}, {}) on axis {} is out of bounds 0 ..< {}.",
			self.start, self.end, self.axis, self.dim
		)
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct InvalidLayoutError {
	pub duplicate: char,
}

impl std::error::Error for InvalidLayoutError {}

impl std::fmt::Display for InvalidLayoutError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Axis label '{}' appears more than once in the layout.", self.duplicate)
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ArgumentCountMismatchError {
	pub expected: usize,
	pub got: usize,
}

impl std::error::Error for ArgumentCountMismatchError {}

impl std::fmt::Display for ArgumentCountMismatchError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Expected {} arguments, got {}.", self.expected, self.got)
	}
}

/// Coordinates or the element count of the region do not fit the index types.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ElementsOverflowError;

impl std::error::Error for ElementsOverflowError {}

impl std::fmt::Display for ElementsOverflowError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "The slice region is too large.")
	}
}

//--------------------------------------------------------------------------------------------------

#[cold]
#[inline(never)]
fn pack<E: std::error::Error + Send + Sync + 'static>(
	code: SliceError,
	err: E,
) -> ErrPack<SliceError> {
	ErrPack {
		code,
		extra: Some(Box::new(ErrExtra {
			message: Cow::from(err.to_string()),
			nested: Some(Box::new(err)),
		})),
	}
}

impl From<InvalidAxisLabelError> for ErrPack<SliceError> {
	fn from(err: InvalidAxisLabelError) -> Self {
		pack(SliceError::InvalidAxisLabel, err)
	}
}

impl From<EmptyAxisSelectorError> for ErrPack<SliceError> {
	fn from(_: EmptyAxisSelectorError) -> Self {
		Self {
			code: SliceError::EmptyAxisSelector,
			extra: None,
		}
	}
}

impl From<ShapeRankMismatchError> for ErrPack<SliceError> {
	fn from(err: ShapeRankMismatchError) -> Self {
		pack(SliceError::ShapeRankMismatch, err)
	}
}

impl From<FillValueChannelMismatchError> for ErrPack<SliceError> {
	fn from(err: FillValueChannelMismatchError) -> Self {
		pack(SliceError::FillValueChannelMismatch, err)
	}
}

impl From<OutOfBoundsError> for ErrPack<SliceError> {
	fn from(err: OutOfBoundsError) -> Self {
		pack(SliceError::OutOfBounds, err)
	}
}

impl From<InvalidLayoutError> for ErrPack<SliceError> {
	fn from(err: InvalidLayoutError) -> Self {
		pack(SliceError::InvalidLayout, err)
	}
}

impl From<ArgumentCountMismatchError> for ErrPack<SliceError> {
	fn from(err: ArgumentCountMismatchError) -> Self {
		pack(SliceError::ArgumentCountMismatch, err)
	}
}

impl From<ElementsOverflowError> for ErrPack<SliceError> {
	fn from(_: ElementsOverflowError) -> Self {
		Self {
			code: SliceError::ElementsOverflow,
			extra: None,
		}
	}
}

//--------------------------------------------------------------------------------------------------
