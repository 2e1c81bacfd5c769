// crates/slimarray-core/src/snapshot.rs
//
// A plain-data mirror of `SlimArray32`'s fields, serializable when the
// `serde` feature is enabled. The wire encoding (bytes on disk, a
// particular JSON shape, ...) is deliberately left to whatever
// serializer the caller plugs in; this module only owns the logical
// field layout.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::array::SlimArray32;
use crate::error::{Result, SlimError};
use crate::types::{Poly, SegmentDescriptor};

/// Logical snapshot of a [`SlimArray32`]: every field needed to
/// reconstruct it exactly, with no packing beyond what the array already
/// does internally (`configs` stays packed as `i64`, `residuals` stays
/// packed as `u64` words).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    pub n: i64,
    pub rank: Vec<u64>,
    pub bitmap: Vec<u64>,
    pub polynomials: Vec<(f64, f64, f64)>,
    pub configs: Vec<i64>,
    pub residuals: Vec<u64>,
}

impl SlimArray32 {
    /// Captures every field needed to reconstruct this array exactly.
    pub fn to_snapshot(&self) -> Snapshot {
        let mut bitmap = Vec::with_capacity(self.segments().len());
        let mut rank = Vec::with_capacity(self.segments().len());
        for seg in self.segments() {
            bitmap.push(seg.spans_bitmap);
            rank.push(seg.ones_count);
        }
        let polynomials = self.polynomials().iter().map(|p| (p.a, p.b, p.c)).collect();

        Snapshot {
            n: self.len(),
            rank,
            bitmap,
            polynomials,
            configs: self.configs().to_vec(),
            residuals: self.residuals().to_vec(),
        }
    }
}

impl Snapshot {
    /// Reconstructs the array this snapshot was taken from. Fails only on
    /// structurally inconsistent input (mismatched segment/rank/bitmap
    /// lengths, or a span count that does not match `polynomials`/`configs`).
    pub fn into_array(self) -> Result<SlimArray32> {
        if self.bitmap.len() != self.rank.len() {
            return Err(SlimError::Validation(format!(
                "bitmap has {} segments but rank has {}",
                self.bitmap.len(),
                self.rank.len()
            )));
        }
        if self.polynomials.len() != self.configs.len() {
            return Err(SlimError::Validation(format!(
                "{} polynomials but {} configs",
                self.polynomials.len(),
                self.configs.len()
            )));
        }

        let expected_segments = if self.n == 0 { 0 } else { (self.n as usize).div_ceil(crate::array::SEGMENT_LEN) };
        if self.bitmap.len() != expected_segments {
            return Err(SlimError::Validation(format!(
                "n={} implies {expected_segments} segments, got {}",
                self.n,
                self.bitmap.len()
            )));
        }

        let segments = self
            .bitmap
            .iter()
            .zip(self.rank.iter())
            .map(|(&spans_bitmap, &ones_count)| SegmentDescriptor { spans_bitmap, ones_count })
            .collect();

        let polynomials = self.polynomials.iter().map(|&(a, b, c)| Poly { a, b, c }).collect();

        Ok(SlimArray32::from_parts(self.n as usize, segments, polynomials, self.configs, self.residuals))
    }
}
