// src/bridge.rs
// Bridge between flat numeric arrays and algebra arithmetic.
//
// Tensors arrive as contiguous `f64` buffers whose innermost axis has length
// `dim`. Each chunk is one element; chunks are independent, so the batch
// operations fan out over `p3_maybe_rayon` (serial unless the `parallel`
// feature is on).

use p3_maybe_rayon::prelude::*;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use crate::descriptor::{Algebra, AlgebraDescriptor};
use crate::element::{conjugate_coeffs, product_coeffs, quadratic_form};
use crate::error::{AlgebraError, Result};

/// Standard deviation of freshly initialised layer weights.
pub const WEIGHT_INIT_STD: f64 = 0.01;

fn check_batch(desc: &AlgebraDescriptor, data: &[f64]) -> Result<usize> {
    let dim = desc.dim();
    if data.len() % dim != 0 {
        return Err(AlgebraError::dimension_mismatch(
            data.len().div_ceil(dim) * dim,
            data.len(),
        ));
    }
    Ok(data.len() / dim)
}

/// Element-wise product of two batches of equal length.
pub fn batch_multiply(desc: &AlgebraDescriptor, a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    let count = check_batch(desc, a)?;
    if a.len() != b.len() {
        return Err(AlgebraError::dimension_mismatch(a.len(), b.len()));
    }
    let dim = desc.dim();
    // Warm the table before the workers race for it.
    if desc.config().fast_path_for(dim) {
        desc.table();
    }

    let mut out = vec![0.0; a.len()];
    out.par_chunks_mut(dim).enumerate().for_each(|(n, chunk)| {
        let span = n * dim..(n + 1) * dim;
        chunk.copy_from_slice(&product_coeffs(desc, &a[span.clone()], &b[span]));
    });
    debug!(count, dim, "batch multiply");
    Ok(out)
}

pub fn batch_conjugate(desc: &AlgebraDescriptor, a: &[f64]) -> Result<Vec<f64>> {
    check_batch(desc, a)?;
    let dim = desc.dim();
    let mut out = vec![0.0; a.len()];
    out.par_chunks_mut(dim).enumerate().for_each(|(n, chunk)| {
        chunk.copy_from_slice(&conjugate_coeffs(&a[n * dim..(n + 1) * dim]));
    });
    Ok(out)
}

/// One norm_sq per element.
pub fn batch_norm_sq(desc: &AlgebraDescriptor, a: &[f64]) -> Result<Vec<f64>> {
    let count = check_batch(desc, a)?;
    let dim = desc.dim();
    Ok((0..count)
        .into_par_iter()
        .map(|n| quadratic_form(desc, &a[n * dim..(n + 1) * dim]))
        .collect())
}

/// Linear layer whose weights and activations are algebra elements.
///
/// `forward` maps `[batch, in_features, dim]` to `[batch, out_features, dim]`
/// with out[b][o] = Σ_i x[b][i] · W[o][i] + bias[o]. A quaternion layer holds
/// 4·in·out real weights where a dense real layer of the same width needs 16·in·out.
#[derive(Clone, Debug)]
pub struct HypercomplexLinear {
    descriptor: Algebra,
    in_features: usize,
    out_features: usize,
    weight: Vec<f64>, // [out, in, dim]
    bias: Vec<f64>,   // [out, dim]
}

impl HypercomplexLinear {
    /// Gaussian weights (std 0.01), zero bias.
    pub fn new<R: Rng + ?Sized>(
        descriptor: &Algebra,
        in_features: usize,
        out_features: usize,
        rng: &mut R,
    ) -> Self {
        let dim = descriptor.dim();
        let weight = (0..out_features * in_features * dim)
            .map(|_| {
                let z: f64 = StandardNormal.sample(&mut *rng);
                z * WEIGHT_INIT_STD
            })
            .collect();
        HypercomplexLinear {
            descriptor: descriptor.clone(),
            in_features,
            out_features,
            weight,
            bias: vec![0.0; out_features * dim],
        }
    }

    pub fn from_parts(
        descriptor: &Algebra,
        in_features: usize,
        out_features: usize,
        weight: Vec<f64>,
        bias: Vec<f64>,
    ) -> Result<Self> {
        let dim = descriptor.dim();
        if weight.len() != out_features * in_features * dim {
            return Err(AlgebraError::dimension_mismatch(
                out_features * in_features * dim,
                weight.len(),
            ));
        }
        if bias.len() != out_features * dim {
            return Err(AlgebraError::dimension_mismatch(out_features * dim, bias.len()));
        }
        Ok(HypercomplexLinear {
            descriptor: descriptor.clone(),
            in_features,
            out_features,
            weight,
            bias,
        })
    }

    pub fn descriptor(&self) -> &Algebra {
        &self.descriptor
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn weight(&self) -> &[f64] {
        &self.weight
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    /// Real parameters held by the layer, bias included.
    pub fn parameter_count(&self) -> usize {
        self.weight.len() + self.bias.len()
    }

    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        let dim = self.descriptor.dim();
        let row = self.in_features * dim;
        if row == 0 || input.len() % row != 0 {
            return Err(AlgebraError::dimension_mismatch(row, input.len()));
        }
        let batch = input.len() / row;
        let desc: &AlgebraDescriptor = &self.descriptor;

        let mut out = vec![0.0; batch * self.out_features * dim];
        out.par_chunks_mut(dim).enumerate().for_each(|(n, acc)| {
            let (b, o) = (n / self.out_features, n % self.out_features);
            acc.copy_from_slice(&self.bias[o * dim..(o + 1) * dim]);
            for i in 0..self.in_features {
                let x = &input[b * row + i * dim..b * row + (i + 1) * dim];
                let w_start = (o * self.in_features + i) * dim;
                let w = &self.weight[w_start..w_start + dim];
                for (slot, v) in acc.iter_mut().zip(product_coeffs(desc, x, w)) {
                    *slot += v;
                }
            }
        });
        debug!(batch, out_features = self.out_features, dim, "hypercomplex linear forward");
        Ok(out)
    }
}
