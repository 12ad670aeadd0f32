// src/display.rs
// Human-readable basis expansions, e.g. `1 - 2·e1 + 0.5·e3`.

use std::fmt;

use crate::element::AlgebraElement;

/// Label of basis element `index`: `1` for the scalar unit, `e<index>` otherwise.
pub fn basis_label(index: usize) -> String {
    if index == 0 {
        "1".to_string()
    } else {
        format!("e{}", index)
    }
}

/// Expansion over the basis, skipping coefficients with |c| < `threshold`.
/// An element with no surviving terms prints as `0`.
pub fn format_expansion(x: &AlgebraElement, threshold: f64) -> String {
    let mut out = String::new();
    for (index, &c) in x.coeffs().iter().enumerate() {
        if c.abs() < threshold {
            continue;
        }
        let magnitude = c.abs();
        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }
        match (index, magnitude == 1.0) {
            (0, _) => out.push_str(&magnitude.to_string()),
            (_, true) => out.push_str(&basis_label(index)),
            (_, false) => out.push_str(&format!("{}·{}", magnitude, basis_label(index))),
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

impl fmt::Display for AlgebraElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let threshold = self.descriptor().config().display_threshold;
        write!(f, "{}", format_expansion(self, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{octonion, quaternion};

    #[test]
    fn test_expansion() {
        let q = quaternion();
        let x = AlgebraElement::from_slice(&q, &[1.0, -2.0, 0.0, 0.5]).unwrap();
        assert_eq!(x.to_string(), "1 - 2·e1 + 0.5·e3");
    }

    #[test]
    fn test_unit_coefficients_and_leading_sign() {
        let o = octonion();
        let x = AlgebraElement::from_slice(&o, &[0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(x.to_string(), "-e3 + e7");
    }

    #[test]
    fn test_threshold() {
        let q = quaternion();
        let x = AlgebraElement::from_slice(&q, &[1e-12, 0.0, 3.0, -1e-11]).unwrap();
        assert_eq!(x.to_string(), "3·e2");
        assert_eq!(AlgebraElement::zero(&q).to_string(), "0");
        let y = AlgebraElement::from_slice(&q, &[0.25, 1.0, -0.75, 0.0]).unwrap();
        assert_eq!(format_expansion(&y, 0.5), "e1 - 0.75·e2");
    }
}
