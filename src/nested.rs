// src/nested.rs
// The Cayley-Dickson tower as nested pairs.
//
// A number is either a real (the scalar algebra, the base of the recursion) or
// a pair (p, q) of numbers one level down. Every operation recurses on the
// pair structure, consuming one γ per level from the top of the sequence.

use std::ops::{Add, Neg, Sub};

use crate::error::{AlgebraError, Result};
use crate::gamma::Gamma;

#[derive(Clone, Debug, PartialEq)]
pub enum CdNumber {
    Real(f64),
    Pair(Box<CdNumber>, Box<CdNumber>),
}

// Right half of a real promoted one level up: r ≅ (r, 0).
static ZERO: CdNumber = CdNumber::Real(0.0);

impl CdNumber {
    pub fn pair(p: CdNumber, q: CdNumber) -> Self {
        CdNumber::Pair(Box::new(p), Box::new(q))
    }

    /// Nest a flat coefficient vector: left half is p, right half is q.
    pub fn build_nested(coeffs: &[f64]) -> Result<Self> {
        if !coeffs.len().is_power_of_two() {
            return Err(AlgebraError::NotPowerOfTwo(coeffs.len()));
        }
        Ok(Self::nest(coeffs))
    }

    // Caller guarantees a power-of-two length.
    pub(crate) fn nest(coeffs: &[f64]) -> Self {
        match coeffs.len() {
            0 => CdNumber::Real(0.0),
            1 => CdNumber::Real(coeffs[0]),
            n => {
                let (p, q) = coeffs.split_at(n / 2);
                CdNumber::pair(Self::nest(p), Self::nest(q))
            }
        }
    }

    /// Basis element e_i of the algebra of dimension `dim`.
    pub(crate) fn basis(dim: usize, i: usize) -> Self {
        let mut coeffs = vec![0.0; dim];
        if i < dim {
            coeffs[i] = 1.0;
        }
        Self::nest(&coeffs)
    }

    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.dim());
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<f64>) {
        match self {
            CdNumber::Real(r) => out.push(*r),
            CdNumber::Pair(p, q) => {
                p.flatten_into(out);
                q.flatten_into(out);
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            CdNumber::Real(_) => 0,
            CdNumber::Pair(p, q) => 1 + p.depth().max(q.depth()),
        }
    }

    pub fn dim(&self) -> usize {
        1 << self.depth()
    }

    pub fn real_part(&self) -> f64 {
        match self {
            CdNumber::Real(r) => *r,
            CdNumber::Pair(p, _) => p.real_part(),
        }
    }

    fn halves(&self) -> (&CdNumber, &CdNumber) {
        match self {
            CdNumber::Real(_) => (self, &ZERO),
            CdNumber::Pair(p, q) => (&**p, &**q),
        }
    }

    /// conj(p, q) = (conj(p), −q); the identity on reals.
    pub fn conj(&self) -> Self {
        match self {
            CdNumber::Real(r) => CdNumber::Real(*r),
            CdNumber::Pair(p, q) => CdNumber::pair(p.conj(), -&**q),
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        match self {
            CdNumber::Real(r) => CdNumber::Real(r * factor),
            CdNumber::Pair(p, q) => CdNumber::pair(p.scale(factor), q.scale(factor)),
        }
    }

    /// (p,q)·(r,s) = (p·r + γ·conj(s)·q, s·p + q·conj(r)), γ = last of `gammas`.
    pub fn mul(&self, other: &CdNumber, gammas: &[Gamma]) -> Self {
        match gammas.split_last() {
            // Scalar algebra
            None => CdNumber::Real(self.real_part() * other.real_part()),
            Some((&gamma, lower)) => {
                let (p, q) = self.halves();
                let (r, s) = other.halves();

                let pr = p.mul(r, lower);
                let sq = s.conj().mul(q, lower).scale(gamma.as_f64());
                let sp = s.mul(p, lower);
                let qr = q.mul(&r.conj(), lower);

                CdNumber::pair(&pr + &sq, &sp + &qr)
            }
        }
    }

    /// norm_sq(p, q) = norm_sq(p) − γ·norm_sq(q); a² on reals.
    pub fn norm_sq(&self, gammas: &[Gamma]) -> f64 {
        match gammas.split_last() {
            None => {
                let r = self.real_part();
                r * r
            }
            Some((&gamma, lower)) => {
                let (p, q) = self.halves();
                p.norm_sq(lower) + gamma.norm_weight() * q.norm_sq(lower)
            }
        }
    }
}

// --- ADDITIVE STRUCTURE ---
// Mixed depths add by promoting the shallower side: r + (p, q) = (r + p, q).

impl<'a, 'b> Add<&'b CdNumber> for &'a CdNumber {
    type Output = CdNumber;
    fn add(self, other: &'b CdNumber) -> CdNumber {
        match (self, other) {
            (CdNumber::Real(a), CdNumber::Real(b)) => CdNumber::Real(a + b),
            _ => {
                let (p, q) = self.halves();
                let (r, s) = other.halves();
                CdNumber::pair(p + r, q + s)
            }
        }
    }
}

impl<'a> Neg for &'a CdNumber {
    type Output = CdNumber;
    fn neg(self) -> CdNumber {
        self.scale(-1.0)
    }
}

impl<'a, 'b> Sub<&'b CdNumber> for &'a CdNumber {
    type Output = CdNumber;
    fn sub(self, other: &'b CdNumber) -> CdNumber {
        self + &(-other)
    }
}
