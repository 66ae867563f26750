//! Face distributions for one-dimensional meshes.
//!
//! A stretching maps the uniform reference coordinate ζ ∈ [0, 1] onto the
//! normalized physical coordinate η ∈ [0, 1]. Every variant preserves the
//! endpoints and is strictly increasing, so the resulting faces never cross.
//!
//! # Available stretchings
//!
//! - [`Stretching::Uniform`]: η = ζ
//! - [`Stretching::Exponential`]: faces clustered near the lower end with an
//!   e-folding scale height `H`

use crate::error::{Result, SemError};

/// Face distribution of an interval mesh.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stretching {
    /// Equal spacing.
    #[default]
    Uniform,

    /// Exponential stretching with scale height `H` (same units as the domain).
    ///
    /// η(ζ) = -h · ln(1 - (1 - e^{-1/h}) ζ), with h = H / R and R the domain length.
    ///
    /// Small `H` packs faces near the lower boundary; large `H` approaches uniform
    /// spacing.
    Exponential { scale_height: f64 },
}

impl Stretching {
    /// Exponential stretching; fails for non-positive or non-finite scale heights.
    pub fn exponential(scale_height: f64) -> Result<Self> {
        let s = Stretching::Exponential { scale_height };
        s.validate()?;
        Ok(s)
    }

    /// Reject unusable parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Stretching::Uniform => Ok(()),
            Stretching::Exponential { scale_height } => {
                if scale_height.is_finite() && scale_height > 0.0 {
                    Ok(())
                } else {
                    Err(SemError::InvalidStretching(scale_height))
                }
            }
        }
    }

    /// Normalized face position η(ζ) for a domain of length `length`.
    pub fn eta(&self, zeta: f64, length: f64) -> f64 {
        match *self {
            Stretching::Uniform => zeta,
            Stretching::Exponential { scale_height } => {
                let h = scale_height / length;
                // 1 - e^{-1/h}, written to stay accurate for large h
                let a = -(-1.0 / h).exp_m1();
                if !h.is_finite() || a < f64::MIN_POSITIVE {
                    // indistinguishable from uniform at this scale height
                    return zeta;
                }
                -h * (-a * zeta).ln_1p()
            }
        }
    }

    /// Face coordinates of `n_elements` cells on `[min, max]`.
    ///
    /// The first and last entries are exactly `min` and `max`.
    pub fn face_coordinates(&self, min: f64, max: f64, n_elements: usize) -> Result<Vec<f64>> {
        self.validate()?;
        if n_elements < 1 {
            return Err(SemError::InvalidElementCount {
                axis: "z",
                count: n_elements,
            });
        }

        let length = max - min;
        let mut faces: Vec<f64> = (0..=n_elements)
            .map(|i| {
                let zeta = i as f64 / n_elements as f64;
                min + length * self.eta(zeta, length)
            })
            .collect();

        faces[0] = min;
        faces[n_elements] = max;
        Ok(faces)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stretching::Uniform => "uniform",
            Stretching::Exponential { .. } => "exponential",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_faces() {
        let faces = Stretching::Uniform.face_coordinates(0.0, 1.0, 4).unwrap();
        assert_eq!(faces.len(), 5);
        for (i, z) in faces.iter().enumerate() {
            assert!((z - 0.25 * i as f64).abs() < 1e-15);
        }
    }

    #[test]
    fn test_exponential_endpoints_and_monotonic() {
        for &h in &[1.0, 7e3, 1e5, 1e9] {
            for n in 1..=40 {
                let s = Stretching::exponential(h).unwrap();
                let faces = s.face_coordinates(0.0, 30e3, n).unwrap();
                assert_eq!(faces[0], 0.0);
                assert_eq!(faces[n], 30e3);
                for w in faces.windows(2) {
                    assert!(w[1] > w[0], "faces must increase (H = {}, n = {})", h, n);
                }
            }
        }
    }

    #[test]
    fn test_exponential_clusters_low() {
        let s = Stretching::exponential(2e3).unwrap();
        let faces = s.face_coordinates(0.0, 30e3, 10).unwrap();
        let first = faces[1] - faces[0];
        let last = faces[10] - faces[9];
        assert!(first < last, "bottom cell {} should be thinner than top cell {}", first, last);
    }

    #[test]
    fn test_large_scale_height_is_nearly_uniform() {
        let s = Stretching::exponential(1e12).unwrap();
        let faces = s.face_coordinates(0.0, 1.0, 8).unwrap();
        for (i, z) in faces.iter().enumerate() {
            assert!((z - i as f64 / 8.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_overflowing_scale_height_falls_back_to_uniform() {
        // H / R overflows to infinity
        let s = Stretching::exponential(1e300).unwrap();
        assert_eq!(s.eta(0.5, 1e-10), 0.5);
        let faces = s.face_coordinates(0.0, 1e-10, 4).unwrap();
        for (i, z) in faces.iter().enumerate() {
            assert!(z.is_finite());
            assert!((z - 0.25e-10 * i as f64).abs() < 1e-24);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            Stretching::exponential(0.0),
            Err(SemError::InvalidStretching(0.0))
        );
        assert!(Stretching::exponential(-3.0).is_err());
        assert!(Stretching::exponential(f64::INFINITY).is_err());
        assert!(matches!(
            Stretching::Uniform.face_coordinates(0.0, 1.0, 0),
            Err(SemError::InvalidElementCount { count: 0, .. })
        ));
    }
}
