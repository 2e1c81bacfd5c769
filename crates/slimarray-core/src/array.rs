// crates/slimarray-core/src/array.rs
//
// The public compressed array: construction (segmentation -> planning
// -> per-span fitting -> bit-packing) and O(1) random access.

use std::collections::BTreeMap;

use crate::bitpack::{extract_bits, BitWriter};
use crate::encoder::fit_span;
use crate::error::{Result, SlimError};
use crate::math::round_half_away_from_zero;
use crate::planner::plan_segment;
use crate::types::{Poly, SegmentDescriptor, SpanConfig};

/// Elements per segment; spans never cross this boundary.
pub const SEGMENT_LEN: usize = 1024;

/// A compressed, immutable, read-mostly array of trending `u32` values.
///
/// Built once via [`SlimArray32::new_from_u32`]; `get` is O(1) and
/// allocates nothing. See the crate root for the format this
/// represents.
#[derive(Clone, Debug)]
pub struct SlimArray32 {
    len: usize,
    segments: Vec<SegmentDescriptor>,
    polynomials: Vec<Poly>,
    configs: Vec<i64>,
    residuals: Vec<u64>,
}

const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SlimArray32>();
};

impl SlimArray32 {
    /// Builds a compressed array from `nums`. Infallible: an empty input
    /// produces an instance with `len() == 0` and empty backing arrays.
    pub fn new_from_u32(nums: &[u32]) -> SlimArray32 {
        let mut segments = Vec::with_capacity(nums.len() / SEGMENT_LEN + 1);
        let mut polynomials = Vec::new();
        let mut configs = Vec::new();
        let mut writer = BitWriter::new();

        let mut running_ones: u64 = 0;

        for (seg_idx, segment_values) in nums.chunks(SEGMENT_LEN).enumerate() {
            let segment_start = seg_idx * SEGMENT_LEN;
            let spans = plan_segment(segment_values);

            let mut spans_bitmap: u64 = 0;
            for span in &spans {
                let block = span.start / 16;
                spans_bitmap |= 1u64 << block;

                let fitted = fit_span(segment_values, *span);
                let global_span_start = (segment_start + span.start) as i64;
                let width_bits = fitted.width.bits();

                let bit_cursor = writer.bit_len() as i64;
                let offset = bit_cursor - global_span_start * width_bits as i64;

                polynomials.push(fitted.poly);
                configs.push(SpanConfig { offset, width: fitted.width }.pack());

                for &r in &fitted.residuals {
                    writer.push_bits(r, width_bits);
                }
            }

            segments.push(SegmentDescriptor { spans_bitmap, ones_count: running_ones });
            running_ones += spans_bitmap.count_ones() as u64;
        }

        SlimArray32 { len: nums.len(), segments, polynomials, configs, residuals: writer.into_words() }
    }

    /// Random access in O(1) with no allocation. `i` outside `[0, len())`
    /// returns [`SlimError::OutOfBounds`].
    pub fn get(&self, i: i64) -> Result<u32> {
        if i < 0 || i >= self.len as i64 {
            return Err(SlimError::OutOfBounds { index: i, len: self.len as i64 });
        }
        let idx = i as usize;
        let seg = idx / SEGMENT_LEN;
        let local = idx % SEGMENT_LEN;
        let block = local / 16;

        let desc = self.segments[seg];
        let mask_below = if block + 1 >= 64 { u64::MAX } else { (1u64 << (block + 1)) - 1 };
        let masked = desc.spans_bitmap & mask_below;

        let within_seg_idx = masked.count_ones() as u64 - 1;
        let span_idx = (desc.ones_count + within_seg_idx) as usize;
        let first_block = 63 - masked.leading_zeros();

        let poly = self.polynomials[span_idx];
        let cfg = SpanConfig::unpack(self.configs[span_idx]);

        let x_local = (local - (first_block as usize) * 16) as f64;
        let y_hat = poly.eval(x_local);
        let y = round_half_away_from_zero(y_hat).max(0) as u64;

        let width_bits = cfg.width.bits();
        let bit_pos = cfg.offset + i * width_bits as i64;
        let r = extract_bits(&self.residuals, bit_pos, width_bits);

        Ok((y + r) as u32)
    }

    /// Element count.
    pub fn len(&self) -> i64 {
        self.len as i64
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-field memory footprint and density metrics, byte counts unless noted.
    pub fn stat(&self) -> BTreeMap<String, i64> {
        let mem_bitmap = (self.segments.len() * std::mem::size_of::<SegmentDescriptor>()) as i64;
        let mem_polynomials = (self.polynomials.len() * 3 * 8) as i64;
        let mem_configs = (self.configs.len() * 8) as i64;
        let mem_residuals = (self.residuals.len() * 8) as i64;
        let mem_total = mem_bitmap + mem_polynomials + mem_configs + mem_residuals;

        let elt_width = self
            .configs
            .iter()
            .map(|&w| SpanConfig::unpack(w).width.bits())
            .max()
            .unwrap_or(0) as i64;

        let bits_per_elt = if self.len == 0 {
            0
        } else {
            round_half_away_from_zero(8.0 * mem_total as f64 / self.len as f64)
        };

        let mut m = BTreeMap::new();
        m.insert("n".to_string(), self.len as i64);
        m.insert("mem_total".to_string(), mem_total);
        m.insert("mem_bitmap".to_string(), mem_bitmap);
        m.insert("mem_polynomials".to_string(), mem_polynomials);
        m.insert("mem_configs".to_string(), mem_configs);
        m.insert("mem_residuals".to_string(), mem_residuals);
        m.insert("elt_width".to_string(), elt_width);
        m.insert("bits/elt".to_string(), bits_per_elt);
        m
    }

    pub(crate) fn segments(&self) -> &[SegmentDescriptor] {
        &self.segments
    }

    pub(crate) fn polynomials(&self) -> &[Poly] {
        &self.polynomials
    }

    pub(crate) fn configs(&self) -> &[i64] {
        &self.configs
    }

    pub(crate) fn residuals(&self) -> &[u64] {
        &self.residuals
    }

    pub(crate) fn from_parts(
        len: usize,
        segments: Vec<SegmentDescriptor>,
        polynomials: Vec<Poly>,
        configs: Vec<i64>,
        residuals: Vec<u64>,
    ) -> SlimArray32 {
        SlimArray32 { len, segments, polynomials, configs, residuals }
    }
}
