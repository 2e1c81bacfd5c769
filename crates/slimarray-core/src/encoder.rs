// crates/slimarray-core/src/encoder.rs
//
// Per-span fitting: given a chosen span, produce its final polynomial
// (shifted so every residual is non-negative), the residual width, and
// the raw unsigned residual values ready for bit-packing.

use crate::fitter::Fitter;
use crate::math::round_half_away_from_zero;
use crate::planner::{degree_for_span_len, SpanPlan};
use crate::types::{Poly, ResidualWidth};

pub struct FittedSpan {
    pub poly: Poly,
    pub width: ResidualWidth,
    pub residuals: Vec<u64>,
}

/// Fits `segment_values[span.start .. span.start+span.len]` and returns
/// the span's final (post-shift) polynomial, residual width, and
/// non-negative residuals. Implements spec.md's fallback chain: a
/// non-finite fit collapses to degree 0 with the span mean; a residual
/// range that would not fit in 32 bits (`ResidualOverflow`) widens to 32
/// bits with the polynomial zeroed, storing raw values as residuals.
pub fn fit_span(segment_values: &[u32], span: SpanPlan) -> FittedSpan {
    let local = &segment_values[span.start..span.start + span.len];
    let degree = degree_for_span_len(span.len);

    let mut fitter = Fitter::create(degree);
    for (idx, &v) in local.iter().enumerate() {
        fitter.add(idx as f64, v as f64);
    }
    let beta = fitter.solve();
    let mut poly = Poly { a: beta[0], b: beta[1], c: beta[2] };

    if !poly.a.is_finite() || !poly.b.is_finite() || !poly.c.is_finite() {
        let mean = local.iter().map(|&v| v as f64).sum::<f64>() / local.len() as f64;
        poly = Poly { a: mean, b: 0.0, c: 0.0 };
    }

    let mut raw = Vec::with_capacity(local.len());
    let mut min_r = i64::MAX;
    let mut max_r = i64::MIN;
    for (idx, &v) in local.iter().enumerate() {
        let y_hat = poly.eval(idx as f64);
        let r = v as i64 - round_half_away_from_zero(y_hat);
        min_r = min_r.min(r);
        max_r = max_r.max(r);
        raw.push(r);
    }

    let delta = min_r;
    let shifted_max = max_r.saturating_sub(delta).max(0);

    if shifted_max > u32::MAX as i64 {
        // ResidualOverflow: fall back to width 32 with a zeroed
        // polynomial; since residuals are u32 to begin with, storing
        // the raw values themselves always fits.
        let residuals = local.iter().map(|&v| v as u64).collect();
        return FittedSpan { poly: Poly::ZERO, width: ResidualWidth::from_exponent(6).unwrap(), residuals };
    }

    let width = ResidualWidth::smallest_for(shifted_max as u64);
    let final_poly = Poly { a: poly.a + delta as f64, b: poly.b, c: poly.c };
    let residuals = raw.iter().map(|&r| (r - delta) as u64).collect();

    FittedSpan { poly: final_poly, width, residuals }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_span_has_zero_width() {
        let values = vec![7u32; 16];
        let span = SpanPlan { start: 0, len: 16 };
        let fitted = fit_span(&values, span);
        assert_eq!(fitted.width.bits(), 0);
        assert!(fitted.residuals.iter().all(|&r| r == 0));
    }

    #[test]
    fn linear_span_recovers_exactly() {
        let values: Vec<u32> = (0..16u32).map(|i| 16 * i).collect();
        let span = SpanPlan { start: 0, len: 16 };
        let fitted = fit_span(&values, span);
        for (idx, &v) in values.iter().enumerate() {
            let y_hat = fitted.poly.eval(idx as f64);
            let y = round_half_away_from_zero(y_hat);
            let got = y + fitted.residuals[idx] as i64;
            assert_eq!(got as u32, v);
        }
    }
}
