// src/config.rs
// Numeric tolerances shared by every algebra in the tower.

// --- CONFIGURATION ---
/// Absolute threshold on norm_sq below which an element is treated as singular.
pub const DEFAULT_ZERO_EPSILON: f64 = 1e-20;
/// Absolute threshold on the Euclidean sum of squares below which an element is the additive zero.
pub const DEFAULT_ZERO_ELEMENT_EPSILON: f64 = 1e-20;
/// Relative tolerance for comparing results of the two multiplication paths.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;
/// Coefficients below this magnitude are skipped by the display utility.
pub const DEFAULT_DISPLAY_THRESHOLD: f64 = 1e-10;
/// Dimensions whose multiplication runs through a derived structure table.
pub const FAST_PATH_DIMS: [usize; 2] = [4, 8];
/// Deepest tower the engine builds (dimension 2^16).
pub const MAX_LEVELS: usize = 16;
/// Gamma sequences up to this length are memoized process-wide (up to sedenions).
pub const MEMOIZED_LEVELS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlgebraConfig {
    pub zero_epsilon: f64,
    pub zero_element_epsilon: f64,
    pub relative_tolerance: f64,
    pub display_threshold: f64,
    pub use_fast_path: bool, // Table multiplication for FAST_PATH_DIMS
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        AlgebraConfig {
            zero_epsilon: DEFAULT_ZERO_EPSILON,
            zero_element_epsilon: DEFAULT_ZERO_ELEMENT_EPSILON,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            display_threshold: DEFAULT_DISPLAY_THRESHOLD,
            use_fast_path: true,
        }
    }
}

impl AlgebraConfig {
    pub fn with_zero_epsilon(mut self, eps: f64) -> Self {
        self.zero_epsilon = eps.abs();
        self
    }

    pub fn with_zero_element_epsilon(mut self, eps: f64) -> Self {
        self.zero_element_epsilon = eps.abs();
        self
    }

    pub fn with_relative_tolerance(mut self, tol: f64) -> Self {
        self.relative_tolerance = tol.abs();
        self
    }

    pub fn with_display_threshold(mut self, threshold: f64) -> Self {
        self.display_threshold = threshold.abs();
        self
    }

    pub fn with_fast_path(mut self, enabled: bool) -> Self {
        self.use_fast_path = enabled;
        self
    }

    /// True when `dim` should multiply through the structure table.
    pub fn fast_path_for(&self, dim: usize) -> bool {
        self.use_fast_path && FAST_PATH_DIMS.contains(&dim)
    }

    /// |a - b| <= tol * max(1, |a|, |b|)
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        let scale = 1.0f64.max(a.abs()).max(b.abs());
        (a - b).abs() <= self.relative_tolerance * scale
    }
}
