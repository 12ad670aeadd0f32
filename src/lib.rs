// src/lib.rs
// Cayley-Dickson algebras over f64: the tower R → C → H → O → S → ... built by
// repeated doubling with a sign γ = ±1 at every level.

pub mod bracket;
pub mod bridge;
pub mod config;
pub mod descriptor;
pub mod display;
pub mod element;
pub mod error;
pub mod gamma;
pub mod nested;
pub mod rotation;
pub mod table;

pub use bracket::{bracketing_spread, BracketTree};
pub use bridge::{batch_conjugate, batch_multiply, batch_norm_sq, HypercomplexLinear};
pub use config::AlgebraConfig;
pub use descriptor::{
    build_algebra, build_algebra_from_signs, build_algebra_with, complex, octonion, quaternion,
    real, sedenion, split_complex, split_octonion, split_quaternion, Algebra, AlgebraDescriptor,
};
pub use display::format_expansion;
pub use element::AlgebraElement;
pub use error::{AlgebraError, Result};
pub use gamma::Gamma;
pub use nested::CdNumber;
pub use rotation::{rotate_vector, rotor_from_axis_angle, sandwich, SandwichOutcome};
pub use table::StructureTable;

/// Element of `descriptor` with the given coefficients.
pub fn element(descriptor: &Algebra, coeffs: &[f64]) -> Result<AlgebraElement> {
    AlgebraElement::from_slice(descriptor, coeffs)
}
