// crates/slimarray-core/src/lib.rs

//! Compressed, read-mostly random-access array of trending `u32` values.
//!
//! The input is split into fixed 1024-element segments; each segment is
//! partitioned into spans of 16*k elements sharing one low-degree
//! polynomial fit, with a per-element integer residual bit-packed at a
//! power-of-two width. `get(i)` recomputes the polynomial and unpacks the
//! residual in O(1) with no allocation. See [`array::SlimArray32`] for the
//! entry point and [`snapshot::Snapshot`] for the (de)serializable field
//! list an external wire format would sit behind.

pub mod array;
pub mod bitpack;
pub mod encoder;
pub mod error;
pub mod fitter;
pub mod math;
pub mod planner;
pub mod snapshot;
pub mod types;

pub use crate::array::SlimArray32;
pub use crate::error::{Result, SlimError};
pub use crate::snapshot::Snapshot;
