// =============================================================================
// Qubit Lens - Floating Point Tolerance
// =============================================================================
// Table of Contents:
//   1. Tolerance - absolute/relative tolerance pair
//   2. Presets for 64-bit and 32-bit accumulated error
// =============================================================================
// Purpose: Simulation accumulates floating error, so every equality check in
//          the workspace goes through |a - b| < atol + rtol * max(|a|, |b|).
// =============================================================================

use serde::{Deserialize, Serialize};

// =============================================================================
// 1. Tolerance
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub absolute: f64,
    pub relative: f64,
}

impl Tolerance {
    // =========================================================================
    // 2. Presets
    // =========================================================================

    pub const DOUBLE_PRECISION: Tolerance = Tolerance {
        absolute: 1e-8,
        relative: 1e-12,
    };

    pub const SINGLE_PRECISION: Tolerance = Tolerance {
        absolute: 1e-5,
        relative: 1e-8,
    };

    pub fn new(absolute: f64, relative: f64) -> Self {
        Self { absolute, relative }
    }

    pub fn values_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.absolute + self.relative * a.abs().max(b.abs())
    }

    pub fn is_negligible(&self, value: f64) -> bool {
        self.values_equal(value, 0.0)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DOUBLE_PRECISION
    }
}
