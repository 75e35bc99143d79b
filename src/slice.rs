//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

pub mod args;
pub mod batch;
pub mod exec;
pub mod op;
pub mod policy;
pub mod region;
pub mod round;

pub use args::{SliceArgs, SliceArgsConfig, SliceArgsGenerator};
pub use op::{SliceConfig, SliceOp};
pub use policy::{EffectiveRegion, FillValues, OutOfBoundsPolicy, apply_out_of_bounds_policy};
pub use region::{ResolvedRegion, SliceRequest, resolve_start_end};
pub use round::round_int;
