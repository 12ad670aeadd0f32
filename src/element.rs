// src/element.rs
// Elements of a Cayley-Dickson algebra and the arithmetic API.
//
// An element is a flat coefficient vector tagged with its descriptor. Binary
// operations first check that both operands belong to the same algebra and
// then run either the derived structure table (dimensions 4 and 8) or the
// recursive nested-pair rule.

use std::sync::Arc;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use crate::descriptor::{Algebra, AlgebraDescriptor};
use crate::error::{AlgebraError, Result};
use crate::nested::CdNumber;

#[derive(Clone, Debug)]
pub struct AlgebraElement {
    descriptor: Algebra,
    coeffs: Vec<f64>,
}

/// Product of two flat coefficient vectors of `desc`, picking the fast path when configured.
pub(crate) fn product_coeffs(desc: &AlgebraDescriptor, a: &[f64], b: &[f64]) -> Vec<f64> {
    if desc.config().fast_path_for(desc.dim()) {
        desc.table().multiply(a, b)
    } else {
        recursive_product(desc, a, b)
    }
}

pub(crate) fn recursive_product(desc: &AlgebraDescriptor, a: &[f64], b: &[f64]) -> Vec<f64> {
    CdNumber::nest(a)
        .mul(&CdNumber::nest(b), desc.gammas())
        .flatten()
}

pub(crate) fn conjugate_coeffs(coeffs: &[f64]) -> Vec<f64> {
    coeffs
        .iter()
        .enumerate()
        .map(|(i, &c)| if i == 0 { c } else { -c })
        .collect()
}

pub(crate) fn quadratic_form(desc: &AlgebraDescriptor, coeffs: &[f64]) -> f64 {
    desc.signature()
        .iter()
        .zip(coeffs)
        .map(|(s, c)| s * c * c)
        .sum()
}

impl AlgebraElement {
    // --- CONSTRUCTION ---

    /// Fails with `DimensionMismatch` unless `coeffs.len() == dim`.
    pub fn new(descriptor: &Algebra, coeffs: Vec<f64>) -> Result<Self> {
        descriptor.check_len(coeffs.len())?;
        Ok(AlgebraElement {
            descriptor: Arc::clone(descriptor),
            coeffs,
        })
    }

    pub fn from_slice(descriptor: &Algebra, coeffs: &[f64]) -> Result<Self> {
        Self::new(descriptor, coeffs.to_vec())
    }

    fn from_parts(descriptor: &Algebra, coeffs: Vec<f64>) -> Self {
        AlgebraElement {
            descriptor: Arc::clone(descriptor),
            coeffs,
        }
    }

    pub fn zero(descriptor: &Algebra) -> Self {
        Self::from_parts(descriptor, vec![0.0; descriptor.dim()])
    }

    pub fn scalar(descriptor: &Algebra, value: f64) -> Self {
        let mut coeffs = vec![0.0; descriptor.dim()];
        coeffs[0] = value;
        Self::from_parts(descriptor, coeffs)
    }

    /// Multiplicative identity [1, 0, 0, ...].
    pub fn one(descriptor: &Algebra) -> Self {
        Self::scalar(descriptor, 1.0)
    }

    /// Basis element e_index (e_0 = 1).
    pub fn basis(descriptor: &Algebra, index: usize) -> Result<Self> {
        if index >= descriptor.dim() {
            return Err(AlgebraError::dimension_mismatch(descriptor.dim(), index + 1));
        }
        let mut coeffs = vec![0.0; descriptor.dim()];
        coeffs[index] = 1.0;
        Ok(Self::from_parts(descriptor, coeffs))
    }

    /// Embed a vector in the imaginary subspace (scalar part zero).
    pub fn pure(descriptor: &Algebra, vector: &[f64]) -> Result<Self> {
        let dim = descriptor.dim();
        if vector.len() + 1 != dim {
            return Err(AlgebraError::dimension_mismatch(dim - 1, vector.len()));
        }
        let mut coeffs = Vec::with_capacity(dim);
        coeffs.push(0.0);
        coeffs.extend_from_slice(vector);
        Ok(Self::from_parts(descriptor, coeffs))
    }

    /// Coefficients drawn uniformly from [-range, range].
    pub fn random<R: Rng + ?Sized>(descriptor: &Algebra, rng: &mut R, range: f64) -> Self {
        let range = range.abs();
        let coeffs: Vec<f64> = (0..descriptor.dim())
            .map(|_| if range > 0.0 { rng.gen_range(-range..=range) } else { 0.0 })
            .collect();
        Self::from_parts(descriptor, coeffs)
    }

    /// Gaussian direction scaled to |norm_sq| = 1.
    pub fn random_unit<R: Rng + ?Sized>(descriptor: &Algebra, rng: &mut R) -> Result<Self> {
        let coeffs: Vec<f64> = (0..descriptor.dim())
            .map(|_| StandardNormal.sample(&mut *rng))
            .collect();
        Self::from_parts(descriptor, coeffs).normalize()
    }

    /// Flat view back into nested pairs.
    pub fn to_nested(&self) -> CdNumber {
        CdNumber::nest(&self.coeffs)
    }

    pub fn from_nested(descriptor: &Algebra, nested: &CdNumber) -> Result<Self> {
        Self::new(descriptor, nested.flatten())
    }

    // --- ACCESSORS ---

    pub fn descriptor(&self) -> &Algebra {
        &self.descriptor
    }

    pub fn dim(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<f64> {
        self.coeffs
    }

    pub fn scalar_part(&self) -> f64 {
        self.coeffs[0]
    }

    /// Imaginary coefficients 1..dim.
    pub fn vector_part(&self) -> &[f64] {
        &self.coeffs[1..]
    }

    /// Scalar part negligible next to the zero-element threshold.
    pub fn is_pure(&self) -> bool {
        self.scalar_part().abs() <= self.descriptor.config().zero_element_epsilon.sqrt()
    }

    /// Additive identity, judged on the Euclidean sum of squares. Independent of
    /// the norm_sq epsilon, so small non-zero elements stay non-zero.
    pub fn is_zero(&self) -> bool {
        self.euclidean_norm_sq() <= self.descriptor.config().zero_element_epsilon
    }

    fn check_same(&self, other: &AlgebraElement) -> Result<()> {
        self.descriptor.check_same(&other.descriptor)
    }

    // --- ADDITIVE STRUCTURE ---

    pub fn try_add(&self, other: &AlgebraElement) -> Result<Self> {
        self.check_same(other)?;
        let coeffs = self.coeffs.iter().zip(&other.coeffs).map(|(a, b)| a + b).collect();
        Ok(Self::from_parts(&self.descriptor, coeffs))
    }

    pub fn try_sub(&self, other: &AlgebraElement) -> Result<Self> {
        self.check_same(other)?;
        let coeffs = self.coeffs.iter().zip(&other.coeffs).map(|(a, b)| a - b).collect();
        Ok(Self::from_parts(&self.descriptor, coeffs))
    }

    pub fn scale(&self, factor: f64) -> Self {
        let coeffs = self.coeffs.iter().map(|c| c * factor).collect();
        Self::from_parts(&self.descriptor, coeffs)
    }

    // --- MULTIPLICATIVE STRUCTURE ---

    pub fn multiply(&self, other: &AlgebraElement) -> Result<Self> {
        self.check_same(other)?;
        let coeffs = product_coeffs(&self.descriptor, &self.coeffs, &other.coeffs);
        Ok(Self::from_parts(&self.descriptor, coeffs))
    }

    /// Product through the nested-pair recursion, bypassing any table.
    pub fn multiply_recursive(&self, other: &AlgebraElement) -> Result<Self> {
        self.check_same(other)?;
        let coeffs = recursive_product(&self.descriptor, &self.coeffs, &other.coeffs);
        Ok(Self::from_parts(&self.descriptor, coeffs))
    }

    /// Product through the derived structure table, whatever the dimension.
    pub fn multiply_table(&self, other: &AlgebraElement) -> Result<Self> {
        self.check_same(other)?;
        let coeffs = self.descriptor.table().multiply(&self.coeffs, &other.coeffs);
        Ok(Self::from_parts(&self.descriptor, coeffs))
    }

    /// x^n by repeated multiplication (the tower is power-associative). x^0 = 1.
    pub fn powi(&self, n: u32) -> Self {
        let mut acc = Self::one(&self.descriptor);
        for _ in 0..n {
            acc.coeffs = product_coeffs(&self.descriptor, &acc.coeffs, &self.coeffs);
        }
        acc
    }

    /// Negates every coefficient except the scalar.
    pub fn conjugate(&self) -> Self {
        Self::from_parts(&self.descriptor, conjugate_coeffs(&self.coeffs))
    }

    // --- NORM ---

    /// Quadratic form with the signature derived from the γ-sequence.
    pub fn norm_sq(&self) -> f64 {
        quadratic_form(&self.descriptor, &self.coeffs)
    }

    /// norm_sq(p) − γ·norm_sq(q), evaluated level by level.
    pub fn norm_sq_recursive(&self) -> f64 {
        self.to_nested().norm_sq(self.descriptor.gammas())
    }

    /// Plain sum of squares, independent of the signature.
    pub fn euclidean_norm_sq(&self) -> f64 {
        self.coeffs.iter().map(|c| c * c).sum()
    }

    /// sqrt(norm_sq); `NegativeNormSqrt` when the form is negative here.
    pub fn norm(&self) -> Result<f64> {
        let n = self.norm_sq();
        if n < 0.0 {
            return Err(AlgebraError::NegativeNormSqrt { norm_sq: n });
        }
        Ok(n.sqrt())
    }

    /// Polar form of the norm: Σ signature[i]·x[i]·y[i].
    pub fn dot(&self, other: &AlgebraElement) -> Result<f64> {
        self.check_same(other)?;
        Ok(self
            .descriptor
            .signature()
            .iter()
            .zip(self.coeffs.iter().zip(&other.coeffs))
            .map(|(s, (a, b))| s * a * b)
            .sum())
    }

    /// Non-zero element whose norm_sq lies within epsilon of zero.
    pub fn is_zero_divisor(&self) -> bool {
        !self.is_zero() && self.norm_sq().abs() <= self.descriptor.config().zero_epsilon
    }

    /// Both operands non-zero while their product vanishes.
    pub fn annihilates(&self, other: &AlgebraElement) -> Result<bool> {
        let product = self.multiply(other)?;
        Ok(!self.is_zero() && !other.is_zero() && product.is_zero())
    }

    pub(crate) fn check_invertible(&self) -> Result<f64> {
        if self.is_zero() {
            debug!(algebra = %self.descriptor, "zero element is not invertible");
            return Err(AlgebraError::ZeroElement);
        }
        let n = self.norm_sq();
        if n.abs() <= self.descriptor.config().zero_epsilon {
            debug!(algebra = %self.descriptor, norm_sq = n, "zero divisor is not invertible");
            return Err(AlgebraError::ZeroDivisor { norm_sq: n });
        }
        Ok(n)
    }

    /// conj(x) / norm_sq(x).
    pub fn inverse(&self) -> Result<Self> {
        let n = self.check_invertible()?;
        Ok(self.conjugate().scale(1.0 / n))
    }

    /// self · other⁻¹
    pub fn divide(&self, other: &AlgebraElement) -> Result<Self> {
        self.check_same(other)?;
        self.multiply(&other.inverse()?)
    }

    /// Scale to |norm_sq| = 1; fails for the zero element and for zero divisors.
    pub fn normalize(&self) -> Result<Self> {
        let n = self.check_invertible()?;
        Ok(self.scale(1.0 / n.abs().sqrt()))
    }

    // --- ASSOCIATOR AND COMMUTATOR ---

    /// (ab)c − a(bc)
    pub fn associator(a: &AlgebraElement, b: &AlgebraElement, c: &AlgebraElement) -> Result<Self> {
        let ab_c = a.multiply(b)?.multiply(c)?;
        let a_bc = a.multiply(&b.multiply(c)?)?;
        ab_c.try_sub(&a_bc)
    }

    /// ab − ba
    pub fn commutator(a: &AlgebraElement, b: &AlgebraElement) -> Result<Self> {
        a.multiply(b)?.try_sub(&b.multiply(a)?)
    }

    /// Same algebra and every coefficient within the configured relative tolerance.
    pub fn approx_eq(&self, other: &AlgebraElement) -> bool {
        let cfg = self.descriptor.config();
        self.descriptor.same_algebra(&other.descriptor)
            && self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .all(|(&a, &b)| cfg.approx_eq(a, b))
    }
}

impl PartialEq for AlgebraElement {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.same_algebra(&other.descriptor) && self.coeffs == other.coeffs
    }
}

impl std::ops::Neg for &AlgebraElement {
    type Output = AlgebraElement;
    fn neg(self) -> AlgebraElement {
        self.scale(-1.0)
    }
}

impl std::ops::Mul<f64> for &AlgebraElement {
    type Output = AlgebraElement;
    fn mul(self, factor: f64) -> AlgebraElement {
        self.scale(factor)
    }
}
