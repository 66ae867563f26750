//! Banded matrices for linearized column operators.
//!
//! A first-order finite-difference operator between staggerings is bidiagonal:
//! each output couples to two neighbouring inputs. Composing an operator
//! center→face with one face→center (or the reverse) yields a tridiagonal
//! center→center (face→face) operator, which is what implicit vertical
//! solvers need.
//!
//! Only products whose result is guaranteed to fit a tridiagonal band are
//! supported. Upper×upper or lower×lower products would need a wider band
//! and are rejected rather than silently widened.

use crate::error::{Result, SemError};

/// Rectangular bidiagonal matrix.
///
/// Upper: `A[i][i] = diag[i]`, `A[i][i+1] = off[i]`.
/// Lower: `A[i][i] = diag[i]`, `A[i][i-1] = off[i-1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralBidiagonal {
    nrows: usize,
    ncols: usize,
    upper: bool,
    diag: Vec<f64>,
    off: Vec<f64>,
}

impl GeneralBidiagonal {
    /// Zero upper-bidiagonal `nrows × ncols` matrix.
    pub fn upper(nrows: usize, ncols: usize) -> Self {
        Self::zeros(nrows, ncols, true)
    }

    /// Zero lower-bidiagonal `nrows × ncols` matrix.
    pub fn lower(nrows: usize, ncols: usize) -> Self {
        Self::zeros(nrows, ncols, false)
    }

    fn zeros(nrows: usize, ncols: usize, upper: bool) -> Self {
        let n_diag = nrows.min(ncols);
        let n_off = if upper {
            nrows.min(ncols.saturating_sub(1))
        } else {
            ncols.min(nrows.saturating_sub(1))
        };
        Self {
            nrows,
            ncols,
            upper,
            diag: vec![0.0; n_diag],
            off: vec![0.0; n_off],
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_upper(&self) -> bool {
        self.upper
    }

    /// Column of the off-diagonal entry in row `i`, if any.
    #[inline]
    fn off_col(&self, i: usize) -> Option<usize> {
        if self.upper {
            (i + 1 < self.ncols && i < self.off.len()).then_some(i + 1)
        } else {
            (i >= 1 && i - 1 < self.off.len()).then(|| i - 1)
        }
    }

    /// Entry `(i, j)`; zero outside the band.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i >= self.nrows || j >= self.ncols {
            return 0.0;
        }
        if i == j && i < self.diag.len() {
            return self.diag[i];
        }
        match self.off_col(i) {
            Some(c) if c == j => {
                if self.upper {
                    self.off[i]
                } else {
                    self.off[i - 1]
                }
            }
            _ => 0.0,
        }
    }

    /// Set entry `(i, j)`, which must lie in the band.
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        if i >= self.nrows || j >= self.ncols {
            return Err(SemError::StructuralMismatch(format!(
                "entry ({}, {}) outside {} x {} matrix",
                i, j, self.nrows, self.ncols
            )));
        }
        if i == j && i < self.diag.len() {
            self.diag[i] = value;
            return Ok(());
        }
        match self.off_col(i) {
            Some(c) if c == j => {
                let k = if self.upper { i } else { i - 1 };
                self.off[k] = value;
                Ok(())
            }
            _ => Err(SemError::StructuralMismatch(format!(
                "entry ({}, {}) outside the {} bidiagonal band",
                i,
                j,
                if self.upper { "upper" } else { "lower" }
            ))),
        }
    }

    /// Multiply every row `i` by `s[i]`.
    pub fn scale_rows(&mut self, s: &[f64]) -> Result<()> {
        SemError::check_len(self.nrows, s.len())?;
        for (i, d) in self.diag.iter_mut().enumerate() {
            *d *= s[i];
        }
        for (k, o) in self.off.iter_mut().enumerate() {
            let row = if self.upper { k } else { k + 1 };
            *o *= s[row];
        }
        Ok(())
    }

    /// `y = A x`.
    pub fn mul_vec(&self, x: &[f64]) -> Result<Vec<f64>> {
        SemError::check_len(self.ncols, x.len())?;
        Ok((0..self.nrows)
            .map(|i| {
                let d = if i < self.diag.len() { self.diag[i] * x[i] } else { 0.0 };
                let o = match self.off_col(i) {
                    Some(j) => self.get(i, j) * x[j],
                    None => 0.0,
                };
                d + o
            })
            .collect())
    }

    /// Product `self · rhs`, which must be square and tridiagonal.
    ///
    /// Upper×lower and lower×upper products are supported; upper×upper and
    /// lower×lower would widen the band and fail with `StructuralMismatch`.
    pub fn matmul(&self, rhs: &GeneralBidiagonal) -> Result<Tridiagonal> {
        SemError::check_len(self.ncols, rhs.nrows)?;
        if self.upper == rhs.upper {
            let kind = if self.upper { "upper x upper" } else { "lower x lower" };
            return Err(SemError::StructuralMismatch(format!(
                "{} bidiagonal product does not fit a tridiagonal band",
                kind
            )));
        }
        if self.nrows != rhs.ncols {
            return Err(SemError::StructuralMismatch(format!(
                "bidiagonal product is {} x {}, not square",
                self.nrows, rhs.ncols
            )));
        }

        let n = self.nrows;
        let entry = |i: usize, j: usize| -> f64 {
            let lo = i.saturating_sub(1);
            let hi = (i + 1).min(self.ncols.saturating_sub(1));
            (lo..=hi).map(|k| self.get(i, k) * rhs.get(k, j)).sum()
        };

        let mut out = Tridiagonal::zeros(n);
        for i in 0..n {
            out.diag[i] = entry(i, i);
            if i + 1 < n {
                out.upper[i] = entry(i, i + 1);
                out.lower[i] = entry(i + 1, i);
            }
        }
        Ok(out)
    }
}

/// Square tridiagonal matrix.
///
/// `lower[i] = A[i+1][i]`, `diag[i] = A[i][i]`, `upper[i] = A[i][i+1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    pub lower: Vec<f64>,
    pub diag: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Tridiagonal {
    pub fn zeros(n: usize) -> Self {
        Self {
            lower: vec![0.0; n.saturating_sub(1)],
            diag: vec![0.0; n],
            upper: vec![0.0; n.saturating_sub(1)],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut t = Self::zeros(n);
        t.diag.iter_mut().for_each(|d| *d = 1.0);
        t
    }

    pub fn n(&self) -> usize {
        self.diag.len()
    }

    /// `y = A x`.
    pub fn mul_vec(&self, x: &[f64]) -> Result<Vec<f64>> {
        let n = self.n();
        SemError::check_len(n, x.len())?;
        Ok((0..n)
            .map(|i| {
                let mut y = self.diag[i] * x[i];
                if i > 0 {
                    y += self.lower[i - 1] * x[i - 1];
                }
                if i + 1 < n {
                    y += self.upper[i] * x[i + 1];
                }
                y
            })
            .collect())
    }

    /// `self = a·I + b·self`, the usual shape of an implicit step matrix.
    pub fn shift_scale(&mut self, a: f64, b: f64) {
        for d in self.diag.iter_mut() {
            *d = a + b * *d;
        }
        for v in self.lower.iter_mut().chain(self.upper.iter_mut()) {
            *v *= b;
        }
    }

    /// Solve `A x = rhs` by the Thomas algorithm.
    pub fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>> {
        let n = self.n();
        SemError::check_len(n, rhs.len())?;
        if n == 0 {
            return Ok(Vec::new());
        }
        let mut c = vec![0.0; n];
        let mut x = vec![0.0; n];

        let mut pivot = self.diag[0];
        if pivot == 0.0 {
            return Err(SemError::StructuralMismatch("zero pivot in row 0".into()));
        }
        if n > 1 {
            c[0] = self.upper[0] / pivot;
        }
        x[0] = rhs[0] / pivot;
        for i in 1..n {
            pivot = self.diag[i] - self.lower[i - 1] * c[i - 1];
            if pivot == 0.0 {
                return Err(SemError::StructuralMismatch(format!("zero pivot in row {}", i)));
            }
            if i + 1 < n {
                c[i] = self.upper[i] / pivot;
            }
            x[i] = (rhs[i] - self.lower[i - 1] * x[i - 1]) / pivot;
        }
        for i in (0..n - 1).rev() {
            x[i] -= c[i] * x[i + 1];
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 x 2 lower: rows (1), (-1, 1), (-1)
    fn difference_c2f() -> GeneralBidiagonal {
        let mut m = GeneralBidiagonal::lower(3, 2);
        m.set(0, 0, 1.0).unwrap();
        m.set(1, 0, -1.0).unwrap();
        m.set(1, 1, 1.0).unwrap();
        m.set(2, 1, -1.0).unwrap();
        m
    }

    /// 2 x 3 upper: rows (-1, 1, 0), (0, -1, 1)
    fn difference_f2c() -> GeneralBidiagonal {
        let mut m = GeneralBidiagonal::upper(2, 3);
        for i in 0..2 {
            m.set(i, i, -1.0).unwrap();
            m.set(i, i + 1, 1.0).unwrap();
        }
        m
    }

    #[test]
    fn test_band_entries() {
        let m = difference_c2f();
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(2, 1), -1.0);
        assert!(matches!(m.clone().set(0, 1, 1.0), Err(SemError::StructuralMismatch(_))));
        assert_eq!(m.mul_vec(&[2.0, 5.0]).unwrap(), vec![2.0, 3.0, -5.0]);
    }

    #[test]
    fn test_upper_times_lower() {
        let lap = difference_f2c().matmul(&difference_c2f()).unwrap();
        assert_eq!(lap.diag, vec![-2.0, -2.0]);
        assert_eq!(lap.upper, vec![1.0]);
        assert_eq!(lap.lower, vec![1.0]);
    }

    #[test]
    fn test_lower_times_upper() {
        let t = difference_c2f().matmul(&difference_f2c()).unwrap();
        assert_eq!(t.n(), 3);
        assert_eq!(t.diag, vec![-1.0, -2.0, -1.0]);
        assert_eq!(t.upper, vec![1.0, 1.0]);
        assert_eq!(t.lower, vec![1.0, 1.0]);
    }

    #[test]
    fn test_rejected_products() {
        let u = GeneralBidiagonal::upper(3, 3);
        let l = GeneralBidiagonal::lower(3, 3);
        assert!(matches!(u.matmul(&u), Err(SemError::StructuralMismatch(_))));
        assert!(matches!(l.matmul(&l), Err(SemError::StructuralMismatch(_))));
        let tall = GeneralBidiagonal::lower(3, 2);
        let wide = GeneralBidiagonal::upper(2, 4);
        assert!(matches!(tall.matmul(&wide), Err(SemError::StructuralMismatch(_))));
        assert!(matches!(
            u.matmul(&GeneralBidiagonal::lower(2, 2)),
            Err(SemError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_thomas_solve() {
        let mut t = Tridiagonal::zeros(5);
        t.diag = vec![4.0; 5];
        t.lower = vec![-1.0; 4];
        t.upper = vec![-1.0; 4];
        let x = vec![1.0, -2.0, 0.5, 3.0, 1.5];
        let b = t.mul_vec(&x).unwrap();
        let solved = t.solve(&b).unwrap();
        for (a, e) in solved.iter().zip(&x) {
            assert!((a - e).abs() < 1e-13);
        }
        assert!(t.solve(&[0.0; 4]).is_err());
    }

    #[test]
    fn test_shift_scale() {
        let mut t = difference_f2c().matmul(&difference_c2f()).unwrap();
        t.shift_scale(1.0, -0.5);
        assert_eq!(t.diag, vec![2.0, 2.0]);
        assert_eq!(t.upper, vec![-0.5]);
    }
}
