// crates/slimarray-core/src/types.rs
//
// Plain data types shared by the planner, encoder, and decoder.

/// A degree-<=2 polynomial `y(x) = a + b*x + c*x^2`, evaluated with
/// Horner's method for cross-platform determinism.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Poly {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Poly {
    pub const ZERO: Poly = Poly { a: 0.0, b: 0.0, c: 0.0 };

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        (self.c * x + self.b) * x + self.a
    }
}

/// One of the seven legal residual bit widths. Power-of-two widths keep
/// bit extraction to a shift-and-mask that never straddles more than two
/// 64-bit words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResidualWidth(u8);

const WIDTHS: [u32; 7] = [0, 1, 2, 4, 8, 16, 32];

impl ResidualWidth {
    /// The smallest legal width such that `max_value < 2^width`.
    pub fn smallest_for(max_value: u64) -> ResidualWidth {
        for (exp, &w) in WIDTHS.iter().enumerate() {
            let fits = if w == 0 { max_value == 0 } else { w == 64 || max_value < (1u64 << w) };
            if fits {
                return ResidualWidth(exp as u8);
            }
        }
        // Max residual exceeds 32 bits: fall back to the widest legal
        // width (spec.md's ResidualOverflow handling is performed by the
        // encoder, which widens and zeroes the polynomial before this is
        // ever reached with an out-of-range value).
        ResidualWidth(6)
    }

    pub fn from_exponent(exp: u8) -> Option<ResidualWidth> {
        if (exp as usize) < WIDTHS.len() {
            Some(ResidualWidth(exp))
        } else {
            None
        }
    }

    #[inline]
    pub fn exponent(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn bits(self) -> u32 {
        WIDTHS[self.0 as usize]
    }
}

/// Unpacked per-span configuration: where this span's residuals start in
/// the global bit-packed buffer, and how wide each one is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanConfig {
    pub offset: i64,
    pub width: ResidualWidth,
}

const WIDTH_EXP_BITS: u32 = 3;

impl SpanConfig {
    pub fn pack(self) -> i64 {
        (self.offset << WIDTH_EXP_BITS) | self.width.exponent() as i64
    }

    pub fn unpack(word: i64) -> SpanConfig {
        let exponent = (word & ((1 << WIDTH_EXP_BITS) - 1)) as u8;
        let offset = word >> WIDTH_EXP_BITS;
        SpanConfig {
            offset,
            width: ResidualWidth::from_exponent(exponent).expect("config exponent is always 3 bits wide"),
        }
    }
}

/// Two 64-bit words per segment: which blocks start a span, and how many
/// spans precede this segment (the index into `polynomials`/`configs` of
/// this segment's first span).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentDescriptor {
    pub spans_bitmap: u64,
    pub ones_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residual_width_smallest_for_covers_all_legal_widths() {
        assert_eq!(ResidualWidth::smallest_for(0).bits(), 0);
        assert_eq!(ResidualWidth::smallest_for(1).bits(), 1);
        assert_eq!(ResidualWidth::smallest_for(2).bits(), 2);
        assert_eq!(ResidualWidth::smallest_for(3).bits(), 4);
        assert_eq!(ResidualWidth::smallest_for(15).bits(), 4);
        assert_eq!(ResidualWidth::smallest_for(16).bits(), 8);
        assert_eq!(ResidualWidth::smallest_for(255).bits(), 8);
        assert_eq!(ResidualWidth::smallest_for(256).bits(), 16);
        assert_eq!(ResidualWidth::smallest_for(u32::MAX as u64).bits(), 32);
    }

    #[test]
    fn span_config_round_trips_through_pack() {
        for offset in [-1_000_000i64, -1, 0, 1, 1_000_000] {
            for exp in 0..7u8 {
                let cfg = SpanConfig { offset, width: ResidualWidth::from_exponent(exp).unwrap() };
                let word = cfg.pack();
                assert_eq!(SpanConfig::unpack(word), cfg);
            }
        }
    }

    #[test]
    fn poly_eval_matches_horner() {
        let p = Poly { a: 1.0, b: 2.0, c: 3.0 };
        assert_eq!(p.eval(2.0), (3.0 * 2.0 + 2.0) * 2.0 + 1.0);
    }
}
