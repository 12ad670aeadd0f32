// src/gamma.rs
// The doubling sign γ.

use std::fmt;

use crate::error::{AlgebraError, Result};

/// Sign chosen at one doubling level.
///
/// `Minus` (γ = −1) is the classical division branch, `Plus` (γ = +1) the
/// split branch whose new imaginary unit squares to +1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gamma {
    Minus,
    Plus,
}

impl Gamma {
    pub fn as_f64(self) -> f64 {
        match self {
            Gamma::Minus => -1.0,
            Gamma::Plus => 1.0,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Gamma::Minus => -1,
            Gamma::Plus => 1,
        }
    }

    /// Weight of the right half in norm_sq(p, q) = norm_sq(p) − γ·norm_sq(q).
    pub fn norm_weight(self) -> f64 {
        -self.as_f64()
    }

    pub fn is_split(self) -> bool {
        self == Gamma::Plus
    }

    /// Parse a whole sign sequence such as `[-1, -1, 1]`.
    pub fn sequence(signs: &[i64]) -> Result<Vec<Gamma>> {
        signs.iter().map(|&s| Gamma::try_from(s)).collect()
    }
}

impl TryFrom<i64> for Gamma {
    type Error = AlgebraError;

    fn try_from(sign: i64) -> Result<Self> {
        match sign {
            -1 => Ok(Gamma::Minus),
            1 => Ok(Gamma::Plus),
            other => Err(AlgebraError::InvalidGamma(other)),
        }
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.as_i64())
    }
}
