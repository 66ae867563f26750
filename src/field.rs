//! Values attached to the nodes of a space.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Result, SemError};
use crate::space::Space;

/// Anything that can be stored per node and combined linearly.
///
/// Implemented for `f64` and every vector type in [`crate::geometry`].
pub trait FieldValue:
    Copy
    + Default
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
{
}

impl<T> FieldValue for T where
    T: Copy
        + Default
        + Debug
        + Send
        + Sync
        + Add<Output = T>
        + Sub<Output = T>
        + Neg<Output = T>
        + Mul<f64, Output = T>
{
}

/// One value of type `T` per node of space `S`.
#[derive(Clone, Debug)]
pub struct Field<S: Space, T> {
    space: S,
    values: Vec<T>,
}

impl<S: Space, T> Field<S, T> {
    /// Wrap `values`, which must have one entry per node.
    pub fn new(space: S, values: Vec<T>) -> Result<Self> {
        SemError::check_len(space.n_nodes(), values.len())?;
        Ok(Self { space, values })
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// The space and the values, the latter mutable.
    pub fn parts_mut(&mut self) -> (&S, &mut [T]) {
        (&self.space, &mut self.values)
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply `f` to every value, producing a field on the same space.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Field<S, U> {
        Field {
            space: self.space.clone(),
            values: self.values.iter().map(f).collect(),
        }
    }

    /// Error unless `other` lives on a space compatible with this one.
    pub fn check_space<U>(&self, other: &Field<S, U>) -> Result<()> {
        if self.space.is_compatible(&other.space) {
            Ok(())
        } else {
            Err(SemError::SpaceMismatch(format!(
                "{} vs {}",
                self.space.describe(),
                other.space.describe()
            )))
        }
    }
}

impl<S: Space, T: FieldValue> Field<S, T> {
    pub fn zeros(space: S) -> Self {
        let values = vec![T::default(); space.n_nodes()];
        Self { space, values }
    }

    /// Evaluate `f` at every node index.
    pub fn from_fn<F: FnMut(usize) -> T>(space: S, f: F) -> Self {
        let values = (0..space.n_nodes()).map(f).collect();
        Self { space, values }
    }

    /// `self += c * other`.
    ///
    /// # Returns
    /// `SpaceMismatch` or `DimensionMismatch` if `other` does not match this
    /// field; `self` is untouched in that case.
    pub fn axpy(&mut self, c: f64, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        for (a, &b) in self.values.iter_mut().zip(other.values.iter()) {
            *a = *a + b * c;
        }
        Ok(())
    }

    /// `self *= c`.
    pub fn scale(&mut self, c: f64) {
        for a in self.values.iter_mut() {
            *a = *a * c;
        }
    }

    /// Overwrite with the values of `other`, which must match this field.
    pub fn copy_from(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.values.copy_from_slice(&other.values);
        Ok(())
    }

    fn check_same_shape(&self, other: &Self) -> Result<()> {
        self.check_space(other)?;
        SemError::check_len(self.values.len(), other.values.len())
    }
}

impl<S: Space> Field<S, f64> {
    /// ∫ f dV = Σ WJ·f
    pub fn integrate(&self) -> f64 {
        self.values
            .iter()
            .enumerate()
            .map(|(n, &f)| self.space.wj(n) * f)
            .sum()
    }

    /// Largest absolute value.
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0, |m, v| m.max(v.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Axis, IntervalDomain};
    use crate::geometry::Covariant3;
    use crate::mesh::IntervalMesh;
    use crate::space::{FiniteDifferenceSpace, Staggering};

    fn centers(n: usize) -> FiniteDifferenceSpace {
        let z = IntervalDomain::new(0.0, 2.0, Axis::Z, ("bottom", "top")).unwrap();
        FiniteDifferenceSpace::new(IntervalMesh::uniform(z, n).unwrap(), Staggering::CellCenter)
            .unwrap()
    }

    #[test]
    fn test_new_checks_length() {
        let space = centers(4);
        assert!(Field::new(space.clone(), vec![0.0; 4]).is_ok());
        assert_eq!(
            Field::new(space, vec![0.0; 5]).unwrap_err(),
            SemError::dimension_mismatch(4, 5)
        );
    }

    #[test]
    fn test_axpy_scale() {
        let space = centers(3);
        let mut a = Field::from_fn(space.clone(), |k| k as f64);
        let b = Field::from_fn(space, |_| 1.0);
        a.axpy(2.0, &b).unwrap();
        assert_eq!(a.values(), &[2.0, 3.0, 4.0]);
        a.scale(0.5);
        assert_eq!(a.values(), &[1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_axpy_and_copy_reject_other_spaces() {
        let mut a = Field::from_fn(centers(3), |k| k as f64);
        let longer = Field::from_fn(centers(4), |_| 1.0);
        let faces = Field::from_fn(centers(3).face_space(), |_| 1.0);

        assert!(matches!(a.axpy(1.0, &longer), Err(SemError::SpaceMismatch(_))));
        assert!(matches!(a.axpy(1.0, &faces), Err(SemError::SpaceMismatch(_))));
        assert!(matches!(a.copy_from(&faces), Err(SemError::SpaceMismatch(_))));
        assert_eq!(a.values(), &[0.0, 1.0, 2.0]);

        let b = Field::from_fn(a.space().clone(), |_| 5.0);
        a.copy_from(&b).unwrap();
        assert_eq!(a.values(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_vector_field() {
        let mut f: Field<_, Covariant3> = Field::zeros(centers(2));
        f.values_mut()[1] = Covariant3::new(2.0);
        let g = f.map(|v| v.u3);
        assert_eq!(g.values(), &[0.0, 2.0]);
    }

    #[test]
    fn test_integrate_linear_profile() {
        let space = centers(8);
        let z: Vec<f64> = space.coordinates().collect();
        let f = Field::new(space, z).unwrap();
        // midpoint rule is exact for linear functions: ∫_0^2 z dz = 2
        assert!((f.integrate() - 2.0).abs() < 1e-13);
    }

    #[test]
    fn test_space_check() {
        let c = centers(4);
        let a = Field::<_, f64>::zeros(c.clone());
        let b = Field::<_, f64>::zeros(c.face_space());
        assert!(a.check_space(&a.clone()).is_ok());
        assert!(matches!(a.check_space(&b), Err(SemError::SpaceMismatch(_))));
    }
}
