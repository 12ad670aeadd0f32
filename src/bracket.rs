// src/bracket.rs
// Explicit parenthesizations of a product x_0 · x_1 · ... · x_{n-1}.
//
// Above dimension 4 the product depends on the bracketing, so a tree picks
// one. The number of trees over n leaves is the Catalan number C_{n-1}.

use std::fmt;

use rand::Rng;

use crate::element::AlgebraElement;
use crate::error::{AlgebraError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum BracketTree {
    Leaf(usize), // Index into the input sequence
    Node(Box<BracketTree>, Box<BracketTree>), // (left · right)
}

impl BracketTree {
    fn node(left: BracketTree, right: BracketTree) -> Self {
        BracketTree::Node(Box::new(left), Box::new(right))
    }

    // Sample a bracketing of n inputs by splitting at a random pivot
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        Self::random_range(0, n.max(1), rng)
    }

    fn random_range<R: Rng + ?Sized>(start: usize, end: usize, rng: &mut R) -> Self {
        if end - start == 1 {
            return BracketTree::Leaf(start);
        }
        let split = rng.gen_range(start + 1..end);
        Self::node(
            Self::random_range(start, split, rng),
            Self::random_range(split, end, rng),
        )
    }

    /// ((x0·x1)·x2)·...
    pub fn left_associated(n: usize) -> Self {
        (1..n.max(1)).fold(BracketTree::Leaf(0), |acc, i| Self::node(acc, BracketTree::Leaf(i)))
    }

    /// x0·(x1·(x2·...))
    pub fn right_associated(n: usize) -> Self {
        let last = n.max(1) - 1;
        (0..last)
            .rev()
            .fold(BracketTree::Leaf(last), |acc, i| Self::node(BracketTree::Leaf(i), acc))
    }

    /// Every bracketing of n inputs (Catalan many).
    pub fn all_bracketings(n: usize) -> Vec<Self> {
        Self::all_range(0, n.max(1))
    }

    fn all_range(start: usize, end: usize) -> Vec<Self> {
        if end - start == 1 {
            return vec![BracketTree::Leaf(start)];
        }
        let mut trees = Vec::new();
        for split in start + 1..end {
            let lefts = Self::all_range(start, split);
            let rights = Self::all_range(split, end);
            for l in &lefts {
                for r in &rights {
                    trees.push(Self::node(l.clone(), r.clone()));
                }
            }
        }
        trees
    }

    pub fn leaves(&self) -> usize {
        match self {
            BracketTree::Leaf(_) => 1,
            BracketTree::Node(l, r) => l.leaves() + r.leaves(),
        }
    }

    // Execute the bracketing with an arbitrary binary operation
    pub fn evaluate<T, F>(&self, inputs: &[T], op: &F) -> T
    where
        T: Clone,
        F: Fn(T, T) -> T,
    {
        match self {
            BracketTree::Leaf(idx) => inputs[*idx].clone(),
            BracketTree::Node(left, right) => {
                let l_val = left.evaluate(inputs, op);
                let r_val = right.evaluate(inputs, op);
                op(l_val, r_val)
            }
        }
    }

    /// Algebra product under this bracketing.
    pub fn try_evaluate(&self, inputs: &[AlgebraElement]) -> Result<AlgebraElement> {
        match self {
            BracketTree::Leaf(idx) => inputs
                .get(*idx)
                .cloned()
                .ok_or_else(|| AlgebraError::dimension_mismatch(*idx + 1, inputs.len())),
            BracketTree::Node(left, right) => {
                let l_val = left.try_evaluate(inputs)?;
                let r_val = right.try_evaluate(inputs)?;
                l_val.multiply(&r_val)
            }
        }
    }
}

impl fmt::Display for BracketTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketTree::Leaf(idx) => write!(f, "x{}", idx),
            BracketTree::Node(l, r) => write!(f, "({}·{})", l, r),
        }
    }
}

/// Largest Euclidean distance between the left-associated product and any
/// other bracketing of `inputs`. Zero (up to rounding) in associative algebras.
pub fn bracketing_spread(inputs: &[AlgebraElement]) -> Result<f64> {
    if inputs.is_empty() {
        return Ok(0.0);
    }
    let reference = BracketTree::left_associated(inputs.len()).try_evaluate(inputs)?;
    let mut spread: f64 = 0.0;
    for tree in BracketTree::all_bracketings(inputs.len()) {
        let diff = tree.try_evaluate(inputs)?.try_sub(&reference)?;
        spread = spread.max(diff.euclidean_norm_sq().sqrt());
    }
    Ok(spread)
}
