// src/descriptor.rs
// Algebra descriptors: which algebra of the tower an element lives in.
//
// A descriptor is the γ-sequence plus everything derived from it: the
// dimension, the diagonal signature of the norm form, and (lazily) the
// structure-constant table used by the flat fast path. Descriptors for all
// sequences up to the sedenions are memoized in a registry that is built once
// and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::config::{AlgebraConfig, MAX_LEVELS, MEMOIZED_LEVELS};
use crate::error::{AlgebraError, Result};
use crate::gamma::Gamma;
use crate::table::StructureTable;

/// Shared handle to an immutable descriptor.
pub type Algebra = Arc<AlgebraDescriptor>;

#[derive(Debug)]
pub struct AlgebraDescriptor {
    gammas: Vec<Gamma>,
    dim: usize,
    /// Diagonal of the norm form: norm_sq(x) = Σ signature[i]·x[i]².
    signature: Vec<f64>,
    config: AlgebraConfig,
    table: OnceLock<StructureTable>,
}

impl AlgebraDescriptor {
    fn new(gammas: Vec<Gamma>, config: AlgebraConfig) -> Self {
        let dim = 1usize << gammas.len();
        let signature = derive_signature(&gammas);
        debug!(dim, gammas = %gammas.iter().join(","), "built algebra descriptor");
        AlgebraDescriptor {
            gammas,
            dim,
            signature,
            config,
            table: OnceLock::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of doublings applied to the reals.
    pub fn levels(&self) -> usize {
        self.gammas.len()
    }

    /// γ per level, first doubling first.
    pub fn gammas(&self) -> &[Gamma] {
        &self.gammas
    }

    pub fn config(&self) -> &AlgebraConfig {
        &self.config
    }

    pub fn signature(&self) -> &[f64] {
        &self.signature
    }

    /// (positive, negative) entries of the norm form, e.g. (4, 4) for split-octonions.
    pub fn signature_counts(&self) -> (usize, usize) {
        let positive = self.signature.iter().filter(|&&s| s > 0.0).count();
        (positive, self.dim - positive)
    }

    /// Same algebra: identical γ-sequence. Configs may differ.
    pub fn same_algebra(&self, other: &AlgebraDescriptor) -> bool {
        std::ptr::eq(self, other) || self.gammas == other.gammas
    }

    /// All γ = −1: the norm form is positive definite.
    pub fn is_definite(&self) -> bool {
        self.gammas.iter().all(|g| !g.is_split())
    }

    pub fn is_commutative(&self) -> bool {
        self.dim <= 2
    }

    pub fn is_associative(&self) -> bool {
        self.dim <= 4
    }

    /// norm_sq(xy) = norm_sq(x)·norm_sq(y) holds identically (dimension ≤ 8).
    pub fn is_composition(&self) -> bool {
        self.dim <= 8
    }

    /// Division branch: definite composition algebra (R, C, H, O).
    pub fn is_division(&self) -> bool {
        self.is_composition() && self.is_definite()
    }

    /// Conventional name, when the algebra has one.
    pub fn name(&self) -> Option<&'static str> {
        let split = !self.is_definite();
        match (self.dim, split) {
            (1, _) => Some("real"),
            (2, false) => Some("complex"),
            (2, true) => Some("split-complex"),
            (4, false) => Some("quaternion"),
            (4, true) => Some("split-quaternion"),
            (8, false) => Some("octonion"),
            (8, true) => Some("split-octonion"),
            (16, false) => Some("sedenion"),
            _ => None,
        }
    }

    /// Structure constants, derived from the recursive rule on first use.
    pub fn table(&self) -> &StructureTable {
        self.table
            .get_or_init(|| StructureTable::derive(&self.gammas))
    }

    pub(crate) fn check_same(&self, other: &AlgebraDescriptor) -> Result<()> {
        if self.same_algebra(other) {
            return Ok(());
        }
        if self.dim != other.dim {
            return Err(AlgebraError::dimension_mismatch(self.dim, other.dim));
        }
        Err(AlgebraError::descriptor_mismatch(self, other))
    }

    pub(crate) fn check_len(&self, len: usize) -> Result<()> {
        if len != self.dim {
            return Err(AlgebraError::dimension_mismatch(self.dim, len));
        }
        Ok(())
    }
}

impl PartialEq for AlgebraDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.same_algebra(other)
    }
}

impl fmt::Display for AlgebraDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gammas = self.gammas.iter().join(",");
        match self.name() {
            Some(name) => write!(f, "{} [{}]", name, gammas),
            None => write!(f, "CD{} [{}]", self.dim, gammas),
        }
    }
}

// Index i picks the right half at level l whenever bit l is set, and each
// right half contributes a factor −γ_l to the norm form.
fn derive_signature(gammas: &[Gamma]) -> Vec<f64> {
    let dim = 1usize << gammas.len();
    (0..dim)
        .map(|i| {
            gammas
                .iter()
                .enumerate()
                .filter(|(level, _)| (i >> level) & 1 == 1)
                .map(|(_, g)| g.norm_weight())
                .product()
        })
        .collect()
}

// --- REGISTRY ---

static REGISTRY: OnceLock<HashMap<Vec<Gamma>, Algebra>> = OnceLock::new();

fn registry() -> &'static HashMap<Vec<Gamma>, Algebra> {
    REGISTRY.get_or_init(|| {
        let mut sequences: Vec<Vec<Gamma>> = vec![Vec::new()];
        let mut frontier = sequences.clone();
        for _ in 0..MEMOIZED_LEVELS {
            frontier = frontier
                .iter()
                .flat_map(|seq| {
                    [Gamma::Minus, Gamma::Plus].into_iter().map(move |g| {
                        let mut next = seq.clone();
                        next.push(g);
                        next
                    })
                })
                .collect();
            sequences.extend(frontier.iter().cloned());
        }
        trace!(count = sequences.len(), "initialising descriptor registry");
        sequences
            .into_iter()
            .map(|seq| {
                let desc = Arc::new(AlgebraDescriptor::new(seq.clone(), AlgebraConfig::default()));
                (seq, desc)
            })
            .collect()
    })
}

fn shared(gammas: &[Gamma]) -> Algebra {
    match registry().get(gammas) {
        Some(desc) => Arc::clone(desc),
        None => Arc::new(AlgebraDescriptor::new(gammas.to_vec(), AlgebraConfig::default())),
    }
}

/// Build (or fetch the memoized) algebra for a γ-sequence; dimension is 2^len.
pub fn build_algebra(gammas: &[Gamma]) -> Result<Algebra> {
    if gammas.len() > MAX_LEVELS {
        return Err(AlgebraError::TooManyLevels {
            levels: gammas.len(),
            max: MAX_LEVELS,
        });
    }
    Ok(shared(gammas))
}

/// Same as [`build_algebra`] with explicit tolerances; never memoized.
pub fn build_algebra_with(gammas: &[Gamma], config: AlgebraConfig) -> Result<Algebra> {
    if gammas.len() > MAX_LEVELS {
        return Err(AlgebraError::TooManyLevels {
            levels: gammas.len(),
            max: MAX_LEVELS,
        });
    }
    Ok(Arc::new(AlgebraDescriptor::new(gammas.to_vec(), config)))
}

/// Build from integer signs, e.g. `&[-1, -1, 1]` for the split-octonions.
pub fn build_algebra_from_signs(signs: &[i64]) -> Result<Algebra> {
    build_algebra(&Gamma::sequence(signs)?)
}

use Gamma::{Minus, Plus};

pub fn real() -> Algebra {
    shared(&[])
}

pub fn complex() -> Algebra {
    shared(&[Minus])
}

pub fn split_complex() -> Algebra {
    shared(&[Plus])
}

pub fn quaternion() -> Algebra {
    shared(&[Minus, Minus])
}

pub fn split_quaternion() -> Algebra {
    shared(&[Plus, Plus])
}

pub fn octonion() -> Algebra {
    shared(&[Minus, Minus, Minus])
}

pub fn split_octonion() -> Algebra {
    shared(&[Minus, Minus, Plus])
}

pub fn sedenion() -> Algebra {
    shared(&[Minus, Minus, Minus, Minus])
}
