// src/table.rs
// Structure-constant tables derived from the doubling rule.
//
// In every Cayley-Dickson algebra with γ = ±1 the product of two basis
// elements is ± another basis element, so the whole multiplication fits in a
// `dim × dim` table of signed indices. The table is never written by hand:
// each entry is obtained by multiplying two basis elements through
// `CdNumber::mul`.

use itertools::iproduct;
use tracing::debug;

use crate::gamma::Gamma;
use crate::nested::CdNumber;

/// Entry in the multiplication table: e_i · e_j = sign · e_index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableEntry {
    pub index: usize,
    pub sign: f64,
}

#[derive(Debug, Clone)]
pub struct StructureTable {
    dim: usize,
    /// Row-major: entries[i * dim + j] = e_i · e_j.
    entries: Vec<TableEntry>,
}

impl StructureTable {
    /// Unroll the recursive rule over all basis pairs.
    pub fn derive(gammas: &[Gamma]) -> Self {
        let dim = 1usize << gammas.len();
        let basis: Vec<CdNumber> = (0..dim).map(|i| CdNumber::basis(dim, i)).collect();

        let entries = iproduct!(0..dim, 0..dim)
            .map(|(i, j)| {
                let product = basis[i].mul(&basis[j], gammas).flatten();
                match product.iter().position(|&c| c != 0.0) {
                    Some(index) => TableEntry { index, sign: product[index] },
                    None => TableEntry { index: 0, sign: 0.0 },
                }
            })
            .collect();

        debug!(dim, "derived structure table");
        StructureTable { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// e_i · e_j
    pub fn entry(&self, i: usize, j: usize) -> TableEntry {
        self.entries[i * self.dim + j]
    }

    /// Flat product through the table. Both slices must have length `dim`.
    pub fn multiply(&self, a: &[f64], b: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        for (i, &ai) in a.iter().enumerate() {
            if ai == 0.0 {
                continue;
            }
            let row = &self.entries[i * self.dim..(i + 1) * self.dim];
            for (entry, &bj) in row.iter().zip(b) {
                out[entry.index] += entry.sign * ai * bj;
            }
        }
        out
    }

    /// Square of each basis element: −1 for imaginary units, +1 for split units.
    pub fn squares(&self) -> Vec<f64> {
        (0..self.dim)
            .map(|i| {
                let e = self.entry(i, i);
                if e.index == 0 { e.sign } else { 0.0 }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Gamma::{Minus, Plus};

    #[test]
    fn test_quaternion_table() {
        let t = StructureTable::derive(&[Minus, Minus]);
        assert_eq!(t.dim(), 4);
        // i·j = k, j·i = −k
        assert_eq!(t.entry(1, 2), TableEntry { index: 3, sign: 1.0 });
        assert_eq!(t.entry(2, 1), TableEntry { index: 3, sign: -1.0 });
        // j·k = i, k·i = j
        assert_eq!(t.entry(2, 3), TableEntry { index: 1, sign: 1.0 });
        assert_eq!(t.entry(3, 1), TableEntry { index: 2, sign: 1.0 });
        assert_eq!(t.squares(), vec![1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_split_complex_table() {
        let t = StructureTable::derive(&[Plus]);
        assert_eq!(t.squares(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_split_octonion_squares() {
        let t = StructureTable::derive(&[Minus, Minus, Plus]);
        // e1..e3 square to −1, e4..e7 to +1
        assert_eq!(t.squares(), vec![1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_rows_are_signed_permutations() {
        // Every basis element is invertible, so each row hits every index once.
        for gammas in [vec![Minus; 3], vec![Minus, Plus, Minus], vec![Minus; 4]] {
            let t = StructureTable::derive(&gammas);
            for i in 0..t.dim() {
                let mut seen = vec![false; t.dim()];
                for j in 0..t.dim() {
                    let e = t.entry(i, j);
                    assert!(e.sign == 1.0 || e.sign == -1.0);
                    assert!(!seen[e.index], "row {} repeats index {}", i, e.index);
                    seen[e.index] = true;
                }
            }
        }
    }

    #[test]
    fn test_table_matches_recursion() {
        let gammas = [Minus, Plus, Minus];
        let t = StructureTable::derive(&gammas);
        let a = [0.3, -1.2, 0.7, 2.0, -0.4, 0.9, 1.1, -0.6];
        let b = [1.5, 0.2, -0.8, 0.1, 0.6, -1.3, 0.4, 0.05];
        let fast = t.multiply(&a, &b);
        let slow = CdNumber::nest(&a).mul(&CdNumber::nest(&b), &gammas).flatten();
        for (x, y) in fast.iter().zip(&slow) {
            assert!((x - y).abs() < 1e-12, "{} vs {}", x, y);
        }
    }
}
