// =============================================================================
// Qubit Lens - Complex Algebra
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Re-exports
//   3. Prelude Module
// =============================================================================
// Purpose: Dense complex linear algebra over flat interleaved re/im buffers.
//          Scalars, vectors and matrices used by the quantum circuit runtime
//          to represent state vectors, gates and composed operators.
// =============================================================================

pub mod complex;
pub mod complex_matrix;
pub mod complex_vector;
pub mod error;
pub mod formatting;
pub mod tolerance;

pub use complex::Complex;
pub use complex_matrix::ComplexMatrix;
pub use complex_vector::ComplexVector;
pub use error::{AlgebraError, AlgebraResult};
pub use tolerance::Tolerance;

pub mod prelude {
    pub use crate::complex::*;
    pub use crate::complex_matrix::*;
    pub use crate::complex_vector::*;
    pub use crate::error::*;
    pub use crate::formatting::*;
    pub use crate::tolerance::*;
}
