//! Element-local operators on spectral-element spaces.
//!
//! Every operator works one element at a time on its `Nq × Nq` nodes, using
//! the GLL differentiation matrix along each reference direction. Strong
//! operators give pointwise values. Weak operators give the Galerkin
//! projection divided by the lumped mass `WJ`, and only become the global
//! operator after [`weighted_dss`](super::weighted_dss).
//!
//! With the `parallel` feature, elements are processed concurrently.

use crate::error::{Result, SemError};
use crate::field::{Field, FieldValue};
use crate::geometry::{
    Contravariant12, Contravariant3, Covariant12, Covariant3, HorizontalVector, LocalGeometry2D,
};
use crate::space::{Space, SpectralElementSpace2D};

type SpectralField<T> = Field<SpectralElementSpace2D, T>;

/// Per-element view of the reference operators.
struct Element<'a> {
    nq: usize,
    /// Row-major differentiation matrix, `d[i * nq + j] = D[i, j]`.
    d: &'a [f64],
    w: &'a [f64],
    geometry: &'a [LocalGeometry2D],
}

impl Element<'_> {
    #[inline]
    fn d(&self, i: usize, j: usize) -> f64 {
        self.d[i * self.nq + j]
    }

    #[inline]
    fn node(&self, i: usize, j: usize) -> usize {
        j * self.nq + i
    }

    /// Σ_k D[a, k] f[k, b]
    #[inline]
    fn d1(&self, f: &[f64], a: usize, b: usize) -> f64 {
        (0..self.nq).map(|k| self.d(a, k) * f[self.node(k, b)]).sum()
    }

    /// Σ_l D[b, l] f[a, l]
    #[inline]
    fn d2(&self, f: &[f64], a: usize, b: usize) -> f64 {
        (0..self.nq).map(|l| self.d(b, l) * f[self.node(a, l)]).sum()
    }

    /// Σ_k D[k, a] f[k, b], the transpose applied along ξ1.
    #[inline]
    fn d1t(&self, f: &[f64], a: usize, b: usize) -> f64 {
        (0..self.nq).map(|k| self.d(k, a) * f[self.node(k, b)]).sum()
    }

    /// Σ_l D[l, b] f[a, l]
    #[inline]
    fn d2t(&self, f: &[f64], a: usize, b: usize) -> f64 {
        (0..self.nq).map(|l| self.d(l, b) * f[self.node(a, l)]).sum()
    }

    /// Quadrature weight without Jacobian at `(a, b)`.
    #[inline]
    fn w2(&self, a: usize, b: usize) -> f64 {
        self.w[a] * self.w[b]
    }
}

/// Flattened derivative matrix of a space's quadrature.
fn derivative_rows(space: &SpectralElementSpace2D) -> Vec<f64> {
    let q = space.quadrature();
    let n = q.n_points();
    let mut d = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            d.push(q.d(i, j));
        }
    }
    d
}

/// Run `kernel(element, input_slice, output_slice)` over every element.
fn for_each_element<I, O, F>(space: &SpectralElementSpace2D, input: &[I], out: &mut [O], kernel: F)
where
    I: Sync,
    O: Send,
    F: Fn(&Element<'_>, &[I], &mut [O]) + Sync,
{
    let d = derivative_rows(space);
    let nq = space.nq();
    let npe = space.nodes_per_element();
    let w = space.quadrature().weights();
    let geometry = space.local_geometry();
    let run = |e: usize, out_e: &mut [O]| {
        let element = Element {
            nq,
            d: &d,
            w,
            geometry: &geometry[e * npe..(e + 1) * npe],
        };
        kernel(&element, &input[e * npe..(e + 1) * npe], out_e);
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_mut(npe)
            .enumerate()
            .for_each(|(e, out_e)| run(e, out_e));
    }
    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(npe)
        .enumerate()
        .for_each(|(e, out_e)| run(e, out_e));
}

fn check_pair<A, B>(
    operator: &str,
    input: &SpectralField<A>,
    out: &SpectralField<B>,
) -> Result<()> {
    input.check_space(out).map_err(|e| match e {
        SemError::SpaceMismatch(msg) => SemError::SpaceMismatch(format!("{}: {}", operator, msg)),
        other => other,
    })
}

/// Covariant gradient of a scalar: `(∂f/∂ξ1, ∂f/∂ξ2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gradient;

impl Gradient {
    /// # Arguments
    /// * `f` - scalar field
    /// * `out` - covariant field on a compatible space
    ///
    /// # Returns
    /// `SpaceMismatch` if the spaces differ; nothing is written then.
    pub fn apply(&self, f: &SpectralField<f64>, out: &mut SpectralField<Covariant12>) -> Result<()> {
        check_pair("Gradient", f, out)?;
        for_each_element(f.space(), f.values(), out.values_mut(), |el, f, out| {
            for b in 0..el.nq {
                for a in 0..el.nq {
                    out[el.node(a, b)] = Covariant12::new(el.d1(f, a, b), el.d2(f, a, b));
                }
            }
        });
        Ok(())
    }

    pub fn evaluate(&self, f: &SpectralField<f64>) -> Result<SpectralField<Covariant12>> {
        let mut out = Field::zeros(f.space().clone());
        self.apply(f, &mut out)?;
        Ok(out)
    }
}

/// Divergence `(1/J) Σ_i ∂(J u^i)/∂ξ^i` of any horizontal vector.
#[derive(Clone, Copy, Debug, Default)]
pub struct Divergence;

impl Divergence {
    pub fn apply<V>(&self, u: &SpectralField<V>, out: &mut SpectralField<f64>) -> Result<()>
    where
        V: HorizontalVector + FieldValue,
    {
        check_pair("Divergence", u, out)?;
        for_each_element(u.space(), u.values(), out.values_mut(), |el, u, out| {
            let (ju1, ju2) = scaled_contravariant(el, u, |g| g.j);
            for b in 0..el.nq {
                for a in 0..el.nq {
                    let n = el.node(a, b);
                    out[n] = (el.d1(&ju1, a, b) + el.d2(&ju2, a, b)) / el.geometry[n].j;
                }
            }
        });
        Ok(())
    }

    pub fn evaluate<V>(&self, u: &SpectralField<V>) -> Result<SpectralField<f64>>
    where
        V: HorizontalVector + FieldValue,
    {
        let mut out = Field::zeros(u.space().clone());
        self.apply(u, &mut out)?;
        Ok(out)
    }
}

/// Weak-form divergence, finalized by weighted DSS.
///
/// out = -(1/WJ) (D1ᵀ (WJ u¹) + D2ᵀ (WJ u²))
#[derive(Clone, Copy, Debug, Default)]
pub struct WeakDivergence;

impl WeakDivergence {
    /// Element-local weak divergence of `u` into `out`.
    ///
    /// Values at shared nodes are partial until [`weighted_dss`](super::weighted_dss)
    /// has run on `out`.
    ///
    /// # Returns
    /// `SpaceMismatch` if `u` and `out` live on incompatible spaces.
    pub fn apply<V>(&self, u: &SpectralField<V>, out: &mut SpectralField<f64>) -> Result<()>
    where
        V: HorizontalVector + FieldValue,
    {
        check_pair("WeakDivergence", u, out)?;
        for_each_element(u.space(), u.values(), out.values_mut(), |el, u, out| {
            let (wu1, wu2) = scaled_contravariant(el, u, |g| g.wj);
            for b in 0..el.nq {
                for a in 0..el.nq {
                    let n = el.node(a, b);
                    out[n] = -(el.d1t(&wu1, a, b) + el.d2t(&wu2, a, b)) / el.geometry[n].wj;
                }
            }
        });
        Ok(())
    }

    pub fn evaluate<V>(&self, u: &SpectralField<V>) -> Result<SpectralField<f64>>
    where
        V: HorizontalVector + FieldValue,
    {
        let mut out = Field::zeros(u.space().clone());
        self.apply(u, &mut out)?;
        Ok(out)
    }
}

/// Weak-form covariant gradient, finalized by weighted DSS.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeakGradient;

impl WeakGradient {
    pub fn apply(&self, f: &SpectralField<f64>, out: &mut SpectralField<Covariant12>) -> Result<()> {
        check_pair("WeakGradient", f, out)?;
        for_each_element(f.space(), f.values(), out.values_mut(), |el, f, out| {
            let wf: Vec<f64> = f.iter().zip(el.geometry).map(|(v, g)| v * g.wj).collect();
            for b in 0..el.nq {
                for a in 0..el.nq {
                    let n = el.node(a, b);
                    let wj = el.geometry[n].wj;
                    out[n] = Covariant12::new(-el.d1t(&wf, a, b) / wj, -el.d2t(&wf, a, b) / wj);
                }
            }
        });
        Ok(())
    }

    pub fn evaluate(&self, f: &SpectralField<f64>) -> Result<SpectralField<Covariant12>> {
        let mut out = Field::zeros(f.space().clone());
        self.apply(f, &mut out)?;
        Ok(out)
    }
}

/// Inputs accepted by [`Curl`] and [`WeakCurl`].
///
/// In the horizontal plane, the curl of a horizontal covariant vector points
/// along the third axis, and the curl of a third-axis covariant component lies
/// in the plane.
pub trait CurlInput: FieldValue {
    type Curl: FieldValue;

    fn curl(el: &ElementRef<'_>, u: &[Self], out: &mut [Self::Curl]);

    fn weak_curl(el: &ElementRef<'_>, u: &[Self], out: &mut [Self::Curl]);
}

/// Opaque element handle passed to [`CurlInput`] kernels.
pub struct ElementRef<'a>(&'a Element<'a>);

impl CurlInput for Covariant12 {
    type Curl = Contravariant3;

    fn curl(el: &ElementRef<'_>, u: &[Self], out: &mut [Contravariant3]) {
        let el = el.0;
        let u1: Vec<f64> = u.iter().map(|v| v.u1).collect();
        let u2: Vec<f64> = u.iter().map(|v| v.u2).collect();
        for b in 0..el.nq {
            for a in 0..el.nq {
                let n = el.node(a, b);
                out[n] = Contravariant3::new((el.d1(&u2, a, b) - el.d2(&u1, a, b)) / el.geometry[n].j);
            }
        }
    }

    fn weak_curl(el: &ElementRef<'_>, u: &[Self], out: &mut [Contravariant3]) {
        let el = el.0;
        let mut wu1 = vec![0.0; u.len()];
        let mut wu2 = vec![0.0; u.len()];
        for b in 0..el.nq {
            for a in 0..el.nq {
                let n = el.node(a, b);
                wu1[n] = el.w2(a, b) * u[n].u1;
                wu2[n] = el.w2(a, b) * u[n].u2;
            }
        }
        for b in 0..el.nq {
            for a in 0..el.nq {
                let n = el.node(a, b);
                out[n] = Contravariant3::new(
                    (el.d2t(&wu1, a, b) - el.d1t(&wu2, a, b)) / el.geometry[n].wj,
                );
            }
        }
    }
}

impl CurlInput for Covariant3 {
    type Curl = Contravariant12;

    fn curl(el: &ElementRef<'_>, u: &[Self], out: &mut [Contravariant12]) {
        let el = el.0;
        let u3: Vec<f64> = u.iter().map(|v| v.u3).collect();
        for b in 0..el.nq {
            for a in 0..el.nq {
                let n = el.node(a, b);
                let j = el.geometry[n].j;
                out[n] = Contravariant12::new(el.d2(&u3, a, b) / j, -el.d1(&u3, a, b) / j);
            }
        }
    }

    fn weak_curl(el: &ElementRef<'_>, u: &[Self], out: &mut [Contravariant12]) {
        let el = el.0;
        let mut wu3 = vec![0.0; u.len()];
        for b in 0..el.nq {
            for a in 0..el.nq {
                let n = el.node(a, b);
                wu3[n] = el.w2(a, b) * u[n].u3;
            }
        }
        for b in 0..el.nq {
            for a in 0..el.nq {
                let n = el.node(a, b);
                let wj = el.geometry[n].wj;
                out[n] = Contravariant12::new(-el.d2t(&wu3, a, b) / wj, el.d1t(&wu3, a, b) / wj);
            }
        }
    }
}

/// Strong curl.
#[derive(Clone, Copy, Debug, Default)]
pub struct Curl;

impl Curl {
    pub fn apply<V: CurlInput>(
        &self,
        u: &SpectralField<V>,
        out: &mut SpectralField<V::Curl>,
    ) -> Result<()> {
        check_pair("Curl", u, out)?;
        for_each_element(u.space(), u.values(), out.values_mut(), |el, u, out| {
            V::curl(&ElementRef(el), u, out)
        });
        Ok(())
    }

    pub fn evaluate<V: CurlInput>(&self, u: &SpectralField<V>) -> Result<SpectralField<V::Curl>> {
        let mut out = Field::zeros(u.space().clone());
        self.apply(u, &mut out)?;
        Ok(out)
    }
}

/// Weak-form curl, finalized by weighted DSS.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeakCurl;

impl WeakCurl {
    pub fn apply<V: CurlInput>(
        &self,
        u: &SpectralField<V>,
        out: &mut SpectralField<V::Curl>,
    ) -> Result<()> {
        check_pair("WeakCurl", u, out)?;
        for_each_element(u.space(), u.values(), out.values_mut(), |el, u, out| {
            V::weak_curl(&ElementRef(el), u, out)
        });
        Ok(())
    }

    pub fn evaluate<V: CurlInput>(&self, u: &SpectralField<V>) -> Result<SpectralField<V::Curl>> {
        let mut out = Field::zeros(u.space().clone());
        self.apply(u, &mut out)?;
        Ok(out)
    }
}

/// `(s J u¹, s J u²)`-style products: contravariant components scaled per node.
fn scaled_contravariant<V, F>(el: &Element<'_>, u: &[V], scale: F) -> (Vec<f64>, Vec<f64>)
where
    V: HorizontalVector,
    F: Fn(&LocalGeometry2D) -> f64,
{
    u.iter()
        .zip(el.geometry)
        .map(|(v, g)| {
            let c = v.to_contravariant(g);
            let s = scale(g);
            (s * c.u1, s * c.u2)
        })
        .unzip()
}

/// Pointwise evaluation of a field at the nodes of another order on the same
/// topology.
#[derive(Clone, Debug)]
pub struct Interpolate {
    source: SpectralElementSpace2D,
    target: SpectralElementSpace2D,
    /// `matrix[t * nq_s + s] = ℓ_s(x_t)`
    matrix: Vec<f64>,
}

impl Interpolate {
    /// # Arguments
    /// * `source` - space of the input fields
    /// * `target` - space of the output; any order, same topology
    ///
    /// # Returns
    /// `SpaceMismatch` when the topologies differ.
    pub fn new(source: SpectralElementSpace2D, target: SpectralElementSpace2D) -> Result<Self> {
        if !source.same_topology(&target) {
            return Err(SemError::SpaceMismatch(
                "Interpolate: source and target topologies differ".into(),
            ));
        }
        let m = source
            .quadrature()
            .interpolation_matrix(target.quadrature().nodes());
        let matrix = (0..m.nrows())
            .flat_map(|t| (0..m.ncols()).map(move |s| (t, s)))
            .map(|(t, s)| m[(t, s)])
            .collect();
        Ok(Self {
            source,
            target,
            matrix,
        })
    }

    pub fn target(&self) -> &SpectralElementSpace2D {
        &self.target
    }

    pub fn apply<T: FieldValue>(
        &self,
        input: &SpectralField<T>,
        out: &mut SpectralField<T>,
    ) -> Result<()> {
        check_spaces("Interpolate", &self.source, input.space(), &self.target, out.space())?;
        let (ns, nt) = (self.source.nq(), self.target.nq());
        tensor_apply(
            input.values(),
            out.values_mut(),
            ns,
            nt,
            |t, s| self.matrix[t * ns + s],
            |_, _| 1.0,
            |_| 1.0,
        );
        Ok(())
    }

    pub fn evaluate<T: FieldValue>(&self, input: &SpectralField<T>) -> Result<SpectralField<T>> {
        let mut out = Field::zeros(self.target.clone());
        self.apply(input, &mut out)?;
        Ok(out)
    }
}

/// Projection of a scalar onto a lower order on the same topology.
///
/// out = (1/WJ_t) Σ ℓ_a(x_k) ℓ_b(x_l) WJ_s[k, l] f[k, l], the adjoint of
/// [`Interpolate`] with respect to the lumped mass. Finalize with weighted
/// DSS.
#[derive(Clone, Debug)]
pub struct Restrict {
    source: SpectralElementSpace2D,
    target: SpectralElementSpace2D,
    /// `matrix[t * nq_s + s] = ℓ^target_t(x^source_s)`
    matrix: Vec<f64>,
}

impl Restrict {
    pub fn new(source: SpectralElementSpace2D, target: SpectralElementSpace2D) -> Result<Self> {
        if !source.same_topology(&target) {
            return Err(SemError::SpaceMismatch(
                "Restrict: source and target topologies differ".into(),
            ));
        }
        // rows: source nodes, columns: target basis functions
        let m = target
            .quadrature()
            .interpolation_matrix(source.quadrature().nodes());
        let (ns, nt) = (source.nq(), target.nq());
        let mut matrix = vec![0.0; nt * ns];
        for s in 0..ns {
            for t in 0..nt {
                matrix[t * ns + s] = m[(s, t)];
            }
        }
        Ok(Self {
            source,
            target,
            matrix,
        })
    }

    pub fn target(&self) -> &SpectralElementSpace2D {
        &self.target
    }

    pub fn apply(&self, input: &SpectralField<f64>, out: &mut SpectralField<f64>) -> Result<()> {
        check_spaces("Restrict", &self.source, input.space(), &self.target, out.space())?;
        let (ns, nt) = (self.source.nq(), self.target.nq());
        let src = self.source.local_geometry();
        let tgt = self.target.local_geometry();
        tensor_apply(
            input.values(),
            out.values_mut(),
            ns,
            nt,
            |t, s| self.matrix[t * ns + s],
            |e, n| src[e * ns * ns + n].wj,
            |n| 1.0 / tgt[n].wj,
        );
        Ok(())
    }

    pub fn evaluate(&self, input: &SpectralField<f64>) -> Result<SpectralField<f64>> {
        let mut out = Field::zeros(self.target.clone());
        self.apply(input, &mut out)?;
        Ok(out)
    }
}

fn check_spaces(
    operator: &str,
    source: &SpectralElementSpace2D,
    input: &SpectralElementSpace2D,
    target: &SpectralElementSpace2D,
    out: &SpectralElementSpace2D,
) -> Result<()> {
    if !source.is_compatible(input) {
        return Err(SemError::SpaceMismatch(format!(
            "{}: input is on {}, expected {}",
            operator,
            input.describe(),
            source.describe()
        )));
    }
    if !target.is_compatible(out) {
        return Err(SemError::SpaceMismatch(format!(
            "{}: output is on {}, expected {}",
            operator,
            out.describe(),
            target.describe()
        )));
    }
    Ok(())
}

/// Per element: `out[a, b] = post(a, b) Σ_{k,l} M[a,k] M[b,l] pre(k, l) f[k, l]`.
fn tensor_apply<T, M, P, Q>(
    input: &[T],
    out: &mut [T],
    ns: usize,
    nt: usize,
    m: M,
    pre: P,
    post: Q,
) where
    T: FieldValue,
    M: Fn(usize, usize) -> f64,
    P: Fn(usize, usize) -> f64,
    Q: Fn(usize) -> f64,
{
    let (npe_s, npe_t) = (ns * ns, nt * nt);
    let mut scaled = vec![T::default(); npe_s];
    // contracted along ξ1: tmp[l * nt + a]
    let mut tmp = vec![T::default(); ns * nt];
    for (e, (f, o)) in input.chunks(npe_s).zip(out.chunks_mut(npe_t)).enumerate() {
        for (n, v) in f.iter().enumerate() {
            scaled[n] = *v * pre(e, n);
        }
        for l in 0..ns {
            for a in 0..nt {
                tmp[l * nt + a] = (0..ns).fold(T::default(), |acc, k| acc + scaled[l * ns + k] * m(a, k));
            }
        }
        for b in 0..nt {
            for a in 0..nt {
                let v = (0..ns).fold(T::default(), |acc, l| acc + tmp[l * nt + a] * m(b, l));
                o[b * nt + a] = v * post(e * npe_t + b * nt + a);
            }
        }
    }
}
