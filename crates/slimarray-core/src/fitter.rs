// crates/slimarray-core/src/fitter.rs
//
// Sufficient statistics for ordinary least-squares fits of
// y ~= b0 + b1*x + b2*x^2, degree in {0,1,2}.

use crate::error::{Result, SlimError};

/// Accumulates the normal-equation matrix `XtX` and vector `XtY` for a
/// degree-<=2 polynomial fit. `add`, `merge`, and `copy` are O(1) and
/// allocation-free; only `solve` does any real arithmetic.
#[derive(Clone, Debug)]
pub struct Fitter {
    degree: u8,
    n: u64,
    xtx: [[f64; 3]; 3],
    xty: [f64; 3],
}

impl Fitter {
    pub fn create(degree: u8) -> Fitter {
        debug_assert!(degree <= 2);
        Fitter { degree, n: 0, xtx: [[0.0; 3]; 3], xty: [0.0; 3] }
    }

    pub fn degree(&self) -> u8 {
        self.degree
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    pub fn add(&mut self, x: f64, y: f64) {
        let d = self.degree as usize;
        let mut powers = [0.0f64; 3];
        powers[0] = 1.0;
        for k in 1..=d {
            powers[k] = powers[k - 1] * x;
        }
        for i in 0..=d {
            for j in 0..=d {
                self.xtx[i][j] += powers[i] * powers[j];
            }
            self.xty[i] += powers[i] * y;
        }
        self.n += 1;
    }

    /// Merges `other` into `self`. Requires equal degree: stacked design
    /// matrices give `[X1;X2]^T[X1;X2] = X1^T X1 + X2^T X2`, so merging is
    /// just element-wise matrix addition.
    pub fn merge(&mut self, other: &Fitter) -> Result<()> {
        if self.degree != other.degree {
            return Err(SlimError::DegreeMismatch { lhs: self.degree, rhs: other.degree });
        }
        for i in 0..3 {
            for j in 0..3 {
                self.xtx[i][j] += other.xtx[i][j];
            }
            self.xty[i] += other.xty[i];
        }
        self.n += other.n;
        Ok(())
    }

    /// Deep, independent clone.
    pub fn copy(&self) -> Fitter {
        self.clone()
    }

    /// Coefficients `[b0, b1, b2]` minimizing `||X*b - Y||^2`. Unused
    /// trailing slots (for degree < 2) are zero. When fewer than
    /// `degree+1` points were added, the system collapses to an
    /// `n x n` fit over the leading `n` coefficients and the remaining
    /// trailing coefficients are zeroed. Near-singular systems are not
    /// rejected here; whatever the closed-form solver produces (including
    /// NaN/inf) is returned, and callers are expected to validate the fit
    /// a posteriori.
    pub fn solve(&self) -> [f64; 3] {
        let d = self.degree as usize;
        let size = if (self.n as usize) < d + 1 { (self.n as usize).max(1) } else { d + 1 };
        let beta = solve_system(&self.xtx, &self.xty, size);
        let mut out = [0.0; 3];
        out[..size].copy_from_slice(&beta[..size]);
        out
    }
}

/// Closed-form Cramer's-rule solve of the leading `size x size` block of
/// `xtx * beta = xty`, `size` in 1..=3.
fn solve_system(xtx: &[[f64; 3]; 3], xty: &[f64; 3], size: usize) -> [f64; 3] {
    let mut out = [0.0; 3];
    match size {
        1 => {
            let a00 = xtx[0][0];
            out[0] = safe_div(xty[0], a00);
        }
        2 => {
            let (a, b, c, d) = (xtx[0][0], xtx[0][1], xtx[1][0], xtx[1][1]);
            let det = a * d - b * c;
            let (y0, y1) = (xty[0], xty[1]);
            out[0] = safe_div(y0 * d - b * y1, det);
            out[1] = safe_div(a * y1 - c * y0, det);
        }
        3 => {
            let m = xtx;
            let det = det3(m);
            let y = xty;

            let mut m0 = *m;
            m0[0][0] = y[0];
            m0[1][0] = y[1];
            m0[2][0] = y[2];
            out[0] = safe_div(det3(&m0), det);

            let mut m1 = *m;
            m1[0][1] = y[0];
            m1[1][1] = y[1];
            m1[2][1] = y[2];
            out[1] = safe_div(det3(&m1), det);

            let mut m2 = *m;
            m2[0][2] = y[0];
            m2[1][2] = y[1];
            m2[2][2] = y[2];
            out[2] = safe_div(det3(&m2), det);
        }
        _ => unreachable!("fitter degree is always <= 2"),
    }
    out
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[inline]
fn safe_div(num: f64, den: f64) -> f64 {
    // Division by (near-)zero yields inf/NaN on purpose: the encoder's
    // residual-width step is the safety net, not this function.
    num / den
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree0_fits_mean() {
        let mut f = Fitter::create(0);
        for &y in &[1.0, 2.0, 3.0, 4.0] {
            f.add(0.0, y);
        }
        let beta = f.solve();
        assert!((beta[0] - 2.5).abs() < 1e-9);
    }

    #[test]
    fn degree1_fits_line() {
        let mut f = Fitter::create(1);
        for x in 0..10 {
            f.add(x as f64, 3.0 + 2.0 * x as f64);
        }
        let beta = f.solve();
        assert!((beta[0] - 3.0).abs() < 1e-6);
        assert!((beta[1] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn degree2_fits_parabola() {
        let mut f = Fitter::create(2);
        for x in 0..10 {
            let xf = x as f64;
            f.add(xf, 1.0 + 2.0 * xf + 0.5 * xf * xf);
        }
        let beta = f.solve();
        assert!((beta[0] - 1.0).abs() < 1e-6);
        assert!((beta[1] - 2.0).abs() < 1e-6);
        assert!((beta[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn merge_matches_combined_add() {
        let mut combined = Fitter::create(1);
        let mut a = Fitter::create(1);
        let mut b = Fitter::create(1);

        let pts_a = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let pts_b = [(3.0, 7.0), (4.0, 9.0), (5.0, 11.0)];

        for &(x, y) in pts_a.iter().chain(pts_b.iter()) {
            combined.add(x, y);
        }
        for &(x, y) in &pts_a {
            a.add(x, y);
        }
        for &(x, y) in &pts_b {
            b.add(x, y);
        }
        a.merge(&b).unwrap();

        let beta_combined = combined.solve();
        let beta_merged = a.solve();
        for k in 0..2 {
            assert!((beta_combined[k] - beta_merged[k]).abs() < 1e-9);
        }
    }

    #[test]
    fn merge_rejects_degree_mismatch() {
        let mut a = Fitter::create(1);
        let b = Fitter::create(2);
        a.add(0.0, 0.0);
        let err = a.merge(&b).unwrap_err();
        assert_eq!(err, SlimError::DegreeMismatch { lhs: 1, rhs: 2 });
    }

    #[test]
    fn copy_is_independent() {
        let mut a = Fitter::create(1);
        a.add(0.0, 1.0);
        a.add(1.0, 2.0);
        let mut b = a.copy();
        b.add(2.0, 3.0);
        assert_ne!(a.count(), b.count());
        assert_eq!(a.count(), 2);
        assert_eq!(b.count(), 3);
    }

    #[test]
    fn under_determined_collapses_and_zeros_trailing() {
        let mut f = Fitter::create(2);
        f.add(0.0, 5.0);
        let beta = f.solve();
        assert!((beta[0] - 5.0).abs() < 1e-9);
        assert_eq!(beta[1], 0.0);
        assert_eq!(beta[2], 0.0);
    }
}
