// =============================================================================
// Qubit Lens - Algebra Error Types
// =============================================================================
// Table of Contents:
//   1. AlgebraError - Local precondition violations of the algebra layer
//   2. Result type alias
// =============================================================================

use thiserror::Error;

// =============================================================================
// 1. AlgebraError
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    #[error("Dimension mismatch in {operation}: {left_shape:?} vs {right_shape:?}")]
    DimensionMismatch {
        operation: &'static str,
        left_shape: (usize, usize),
        right_shape: (usize, usize),
    },

    #[error("Division by a complex value with zero modulus")]
    DivideByZero,

    #[error("Matrix of dimension {dimension} is singular: no viable pivot remains")]
    SingularMatrix { dimension: usize },
}

impl AlgebraError {
    pub(crate) fn dimension_mismatch(
        operation: &'static str,
        left_shape: (usize, usize),
        right_shape: (usize, usize),
    ) -> Self {
        AlgebraError::DimensionMismatch {
            operation,
            left_shape,
            right_shape,
        }
    }
}

// =============================================================================
// 2. Result type alias
// =============================================================================

pub type AlgebraResult<T> = Result<T, AlgebraError>;
