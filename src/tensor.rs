//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

pub mod dim_index;
pub mod error;
pub mod shape;

pub use dim_index::{AxisList, AxisSelector, resolve_axes};
pub use error::SliceError;
pub use shape::{INLINE_DIMS, Layout, TensorShape};
