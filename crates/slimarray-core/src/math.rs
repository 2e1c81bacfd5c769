// crates/slimarray-core/src/math.rs
//
// Deterministic rounding shared by the planner, encoder, and decoder.
// Polynomial evaluation must use the same order (Horner's method) and
// the same rounding rule everywhere, or the residual width chosen at
// encode time could disagree with what the decoder recomputes.

/// Rounds to the nearest integer, ties away from zero: `floor(v + 0.5)`
/// for `v >= 0`, mirrored for negative `v`.
#[inline]
pub fn round_half_away_from_zero(v: f64) -> i64 {
    if v >= 0.0 {
        (v + 0.5).floor() as i64
    } else {
        -((-v + 0.5).floor() as i64)
    }
}
