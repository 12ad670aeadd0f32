// src/error.rs
// Error types for algebra construction and arithmetic.

use thiserror::Error;

/// Errors surfaced by the Cayley-Dickson engine.
///
/// Degenerate inputs always map to one of these variants; no operation
/// substitutes a default value or returns NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgebraError {
    /// Coefficient vector or operand length disagrees with the algebra dimension.
    #[error("Dimension mismatch: expected {expected}, actual {actual}")]
    DimensionMismatch {
        /// Dimension required by the descriptor
        expected: usize,
        /// Dimension actually supplied
        actual: usize,
    },

    /// Operands belong to algebras with different gamma sequences.
    #[error("Descriptor mismatch: {left} vs {right}")]
    DescriptorMismatch {
        /// Descriptor of the left operand
        left: String,
        /// Descriptor of the right operand
        right: String,
    },

    /// Non-zero element whose norm_sq is within epsilon of zero.
    #[error("Zero divisor: norm_sq {norm_sq:e} is within epsilon of zero")]
    ZeroDivisor {
        /// The offending norm_sq
        norm_sq: f64,
    },

    /// Inverse or normalization of the additive identity.
    #[error("Zero element has no inverse")]
    ZeroElement,

    /// Real square root requested of a negative norm_sq (indefinite algebra).
    #[error("Negative norm_sq {norm_sq}: use norm_sq for indefinite algebras")]
    NegativeNormSqrt {
        /// The negative norm_sq
        norm_sq: f64,
    },

    /// Sandwich operand with a non-zero scalar part.
    #[error("Expected a pure element, scalar part is {scalar}")]
    NotPure {
        /// The offending scalar coefficient
        scalar: f64,
    },

    /// norm_sq overflowed or was poisoned by a NaN coefficient.
    #[error("Non-finite norm_sq {norm_sq}")]
    NonFiniteNorm {
        /// The non-finite value
        norm_sq: f64,
    },

    /// Gamma sign other than +1 or -1.
    #[error("Invalid gamma {0}: expected +1 or -1")]
    InvalidGamma(i64),

    /// Length that cannot be the dimension of a Cayley-Dickson algebra.
    #[error("Length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// More doubling levels than the engine supports.
    #[error("Too many doubling levels: {levels} (max {max})")]
    TooManyLevels {
        /// Requested number of levels
        levels: usize,
        /// Supported maximum
        max: usize,
    },
}

impl AlgebraError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a DescriptorMismatch error from anything printable.
    pub fn descriptor_mismatch(left: impl ToString, right: impl ToString) -> Self {
        Self::DescriptorMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// True for the variants a caller may check for and recover from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ZeroDivisor { .. } | Self::NegativeNormSqrt { .. })
    }
}

pub type Result<T> = std::result::Result<T, AlgebraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let errors = vec![
            AlgebraError::dimension_mismatch(8, 7),
            AlgebraError::descriptor_mismatch("quaternion", "split-quaternion"),
            AlgebraError::ZeroDivisor { norm_sq: 0.0 },
            AlgebraError::ZeroElement,
            AlgebraError::NegativeNormSqrt { norm_sq: -2.0 },
            AlgebraError::NotPure { scalar: 0.5 },
            AlgebraError::NonFiniteNorm { norm_sq: f64::INFINITY },
            AlgebraError::InvalidGamma(3),
            AlgebraError::NotPowerOfTwo(6),
            AlgebraError::TooManyLevels { levels: 40, max: 16 },
        ];
        for err in &errors {
            assert!(!err.to_string().is_empty(), "empty message for {:?}", err);
        }
        assert_eq!(
            errors[0].to_string(),
            "Dimension mismatch: expected 8, actual 7"
        );
        assert!(errors[4].to_string().contains("-2"));
        assert_eq!(errors[6].to_string(), "Non-finite norm_sq inf");
    }

    #[test]
    fn test_recoverable_variants() {
        assert!(AlgebraError::ZeroDivisor { norm_sq: 1e-30 }.is_recoverable());
        assert!(AlgebraError::NegativeNormSqrt { norm_sq: -1.0 }.is_recoverable());
        assert!(!AlgebraError::ZeroElement.is_recoverable());
        assert!(!AlgebraError::dimension_mismatch(4, 2).is_recoverable());
    }
}
