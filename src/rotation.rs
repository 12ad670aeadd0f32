// src/rotation.rs
// Sandwich products u·v·u⁻¹ and the rotor helpers built on them.
//
// In the division branch (R, C, H, O) a unit u acts on pure elements as a
// norm-preserving rotation. Outside it the same product is still computed, but
// the norm is only reported, never promised.

use tracing::{debug, warn};

use crate::descriptor::{Algebra, AlgebraDescriptor};
use crate::element::AlgebraElement;
use crate::error::{AlgebraError, Result};

/// Result of a sandwich product together with its norm bookkeeping.
#[derive(Clone, Debug)]
pub struct SandwichOutcome {
    pub result: AlgebraElement,
    pub norm_before: f64,
    pub norm_after: f64,
    /// True when the algebra promises norm preservation (division branch).
    pub guaranteed: bool,
}

impl SandwichOutcome {
    pub fn drift(&self) -> f64 {
        (self.norm_after - self.norm_before).abs()
    }

    /// Drift within `tol`, relative to max(1, |norm_before|).
    pub fn preserved(&self, tol: f64) -> bool {
        self.drift() <= tol * self.norm_before.abs().max(1.0)
    }
}

/// Division-branch algebras: every sandwich by a unit is an isometry.
pub fn preservation_guaranteed(descriptor: &AlgebraDescriptor) -> bool {
    descriptor.is_division()
}

/// (û·v)·û⁻¹ where û = normalize(u), for pure `v`.
///
/// Fails if `u` is zero or a zero divisor, if `v` has a scalar part, if the
/// operands come from different algebras, or if norm_sq is not finite on
/// either side of the product.
pub fn sandwich(u: &AlgebraElement, v: &AlgebraElement) -> Result<SandwichOutcome> {
    let desc = u.descriptor();
    if !v.is_pure() {
        return Err(AlgebraError::NotPure { scalar: v.scalar_part() });
    }
    let norm_before = finite_norm_sq(v)?;
    let unit = u.normalize()?;
    let result = unit.multiply(v)?.multiply(&unit.inverse()?)?;
    let norm_after = finite_norm_sq(&result)?;

    let outcome = SandwichOutcome {
        result,
        norm_before,
        norm_after,
        guaranteed: preservation_guaranteed(desc),
    };

    if !outcome.preserved(desc.config().relative_tolerance) {
        if outcome.guaranteed {
            warn!(algebra = %desc, drift = outcome.drift(), "norm drift in division algebra");
        } else {
            debug!(algebra = %desc, drift = outcome.drift(), "sandwich changed the norm");
        }
    }
    Ok(outcome)
}

fn finite_norm_sq(x: &AlgebraElement) -> Result<f64> {
    let n = x.norm_sq();
    if !n.is_finite() {
        debug!(algebra = %x.descriptor(), norm_sq = n, "non-finite norm in sandwich");
        return Err(AlgebraError::NonFiniteNorm { norm_sq: n });
    }
    Ok(n)
}

/// cos(θ/2) + sin(θ/2)·â for an imaginary axis of length dim − 1.
pub fn rotor_from_axis_angle(descriptor: &Algebra, axis: &[f64], angle: f64) -> Result<AlgebraElement> {
    let axis = AlgebraElement::pure(descriptor, axis)?;
    let len_sq = axis.euclidean_norm_sq();
    if len_sq <= descriptor.config().zero_element_epsilon {
        return Err(AlgebraError::ZeroElement);
    }
    let half = angle / 2.0;
    let direction = axis.scale(half.sin() / len_sq.sqrt());
    direction.try_add(&AlgebraElement::scalar(descriptor, half.cos()))
}

/// Rotate an imaginary vector (length dim − 1) by the sandwich with `u`.
pub fn rotate_vector(u: &AlgebraElement, v: &[f64]) -> Result<Vec<f64>> {
    let pure = AlgebraElement::pure(u.descriptor(), v)?;
    let outcome = sandwich(u, &pure)?;
    Ok(outcome.result.vector_part().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{octonion, quaternion, sedenion, split_quaternion};
    use std::f64::consts::FRAC_PI_2;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn test_quarter_turn_about_k() {
        let q = quaternion();
        let rotor = rotor_from_axis_angle(&q, &[0.0, 0.0, 1.0], FRAC_PI_2).unwrap();
        let half = FRAC_PI_2 / 2.0;
        assert!(close(rotor.coeffs(), &[half.cos(), 0.0, 0.0, half.sin()]));

        let rotated = rotate_vector(&rotor, &[1.0, 0.0, 0.0]).unwrap();
        assert!(close(&rotated, &[0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_axis_is_fixed() {
        let q = quaternion();
        let rotor = rotor_from_axis_angle(&q, &[2.0, 0.0, 0.0], FRAC_PI_2).unwrap();
        let rotated = rotate_vector(&rotor, &[1.0, 0.0, 0.0]).unwrap();
        assert!(close(&rotated, &[1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_sandwich_normalizes_rotor() {
        let q = quaternion();
        let u = AlgebraElement::from_slice(&q, &[3.0, 0.0, 0.0, 3.0]).unwrap();
        let v = AlgebraElement::pure(&q, &[1.0, 0.0, 0.0]).unwrap();
        let outcome = sandwich(&u, &v).unwrap();
        assert!(outcome.guaranteed);
        assert!(outcome.preserved(1e-12));
        assert!(close(outcome.result.coeffs(), &[0.0, 0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_octonion_rotation_preserves_norm() {
        let o = octonion();
        let axis = [1.0, -2.0, 0.5, 0.0, 1.0, 3.0, -1.0];
        let rotor = rotor_from_axis_angle(&o, &axis, 0.7).unwrap();
        let v = [0.3, 0.1, -2.0, 4.0, 0.0, 1.5, -0.25];
        let rotated = rotate_vector(&rotor, &v).unwrap();
        let before: f64 = v.iter().map(|c| c * c).sum();
        let after: f64 = rotated.iter().map(|c| c * c).sum();
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn test_not_guaranteed_outside_division() {
        assert!(!preservation_guaranteed(&split_quaternion()));
        assert!(!preservation_guaranteed(&sedenion()));
        assert!(preservation_guaranteed(&octonion()));
    }

    #[test]
    fn test_degenerate_inputs() {
        let q = quaternion();
        assert_eq!(
            rotor_from_axis_angle(&q, &[0.0, 0.0, 0.0], 1.0).unwrap_err(),
            AlgebraError::ZeroElement
        );
        assert!(rotor_from_axis_angle(&q, &[1.0, 0.0], 1.0).is_err());

        let sq = split_quaternion();
        let light = AlgebraElement::from_slice(&sq, &[1.0, 1.0, 0.0, 0.0]).unwrap();
        let v = AlgebraElement::basis(&sq, 2).unwrap();
        assert!(matches!(sandwich(&light, &v), Err(AlgebraError::ZeroDivisor { .. })));
    }

    #[test]
    fn test_rejects_non_pure_operand() {
        let q = quaternion();
        let u = AlgebraElement::basis(&q, 3).unwrap();
        let v = AlgebraElement::from_slice(&q, &[0.5, 1.0, 0.0, 0.0]).unwrap();
        assert_eq!(sandwich(&u, &v).unwrap_err(), AlgebraError::NotPure { scalar: 0.5 });
    }

    #[test]
    fn test_overflow_is_an_error() {
        let o = octonion();
        let mut u = vec![0.0; 8];
        u[0] = 1.0;
        u[1] = 1.0;
        let u = AlgebraElement::new(&o, u).unwrap();
        let huge = AlgebraElement::basis(&o, 2).unwrap().scale(1e160);
        assert!(matches!(
            sandwich(&u, &huge),
            Err(AlgebraError::NonFiniteNorm { .. })
        ));

        // Large but representable norms still go through
        let large = AlgebraElement::basis(&o, 2).unwrap().scale(1e150);
        let outcome = sandwich(&u, &large).unwrap();
        assert!(outcome.norm_after.is_finite());
        assert!(outcome.preserved(1e-9));
    }

    #[test]
    fn test_nan_coefficient_is_an_error() {
        let q = quaternion();
        let u = AlgebraElement::one(&q);
        let v = AlgebraElement::from_slice(&q, &[0.0, f64::NAN, 0.0, 0.0]).unwrap();
        assert!(matches!(sandwich(&u, &v), Err(AlgebraError::NonFiniteNorm { .. })));
    }
}
