// =============================================================================
// Qubit Lens - Quantum Circuit Runtime
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Re-exports
//   3. Prelude Module
// =============================================================================
// Purpose: Dense state-vector circuit core. Gate catalog, embedding of gates
//          onto registers via qubit maps, circuit composition, projective
//          measurement and entanglement detection by state decomposition.
// =============================================================================

pub mod canonical_vector_map;
pub mod circuit_library;
pub mod circuit_program;
pub mod configuration;
pub mod error;
pub mod gate_embedding;
pub mod gate_operations;
pub mod measurement;
pub mod state_decomposition;
pub mod state_preparation;
pub mod state_rendering;

pub use complex_algebra;

pub mod prelude {
    pub use crate::canonical_vector_map::*;
    pub use crate::circuit_library::*;
    pub use crate::circuit_program::*;
    pub use crate::configuration::*;
    pub use crate::error::*;
    pub use crate::gate_embedding::*;
    pub use crate::gate_operations::*;
    pub use crate::measurement::*;
    pub use crate::state_decomposition::*;
    pub use crate::state_preparation::*;
    pub use crate::state_rendering::*;

    pub use complex_algebra::{Complex, ComplexMatrix, ComplexVector, Tolerance};
}
