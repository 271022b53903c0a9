// =============================================================================
// Qubit Lens - Unified Error Types
// =============================================================================
// Table of Contents:
//   1. QuantumRuntimeError - Main error enum
//   2. CircuitError - Qubit map, embedding and composition errors
//   3. MeasurementError - Measurement sampling errors
//   4. DecompositionError - Bipartition and state shape errors
//   5. ConfigurationError - Simulator configuration errors
// =============================================================================
// Purpose: Unified error handling across the circuit runtime. Algebra-level
//          failures from complex_algebra bubble up through `Algebra`.
// =============================================================================

use complex_algebra::AlgebraError;
use thiserror::Error;

// =============================================================================
// 1. QuantumRuntimeError - Main error enum
// =============================================================================

#[derive(Debug, Error)]
pub enum QuantumRuntimeError {
    #[error("Algebra error: {0}")]
    Algebra(#[from] AlgebraError),

    #[error("Circuit error: {0}")]
    Circuit(#[from] CircuitError),

    #[error("Measurement error: {0}")]
    Measurement(#[from] MeasurementError),

    #[error("Decomposition error: {0}")]
    Decomposition(#[from] DecompositionError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

// =============================================================================
// 2. CircuitError - Qubit map, embedding and composition errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    #[error("Gate matrix must be square with a power-of-two dimension, got {rows}x{columns}")]
    InvalidGateShape { rows: usize, columns: usize },

    #[error("Gate acts on {required} qubits, but the qubit map names {provided} targets")]
    TargetCountMismatch { required: usize, provided: usize },

    #[error("Gate acts on {gate_qubits} qubits, more than the {register_qubits} in the qubit map")]
    RegisterTooSmall {
        gate_qubits: usize,
        register_qubits: usize,
    },

    #[error("Target index {0} appears more than once in the qubit map")]
    DuplicateTargetIndex(usize),

    #[error("Target index {index} is outside 0..{gate_qubits}")]
    TargetIndexOutOfRange { index: usize, gate_qubits: usize },

    #[error("Unknown qubit role code {0}")]
    UnknownRoleCode(i32),

    #[error("Target index {0} has no integer role code")]
    RoleCodeOverflow(usize),

    #[error("Invalid qubit position {position}: circuit has {total} qubits")]
    InvalidQubitPosition { position: usize, total: usize },

    #[error("Basis index {index} is outside a {dimension}-dimensional state")]
    BasisIndexOutOfRange { index: usize, dimension: usize },

    #[error("Operator dimension {dimension} does not match the {expected}-dimensional circuit")]
    OperatorDimensionMismatch { dimension: usize, expected: usize },

    #[error("Circuit too large: {qubits} qubits exceeds maximum {max}")]
    CircuitTooLarge { qubits: usize, max: usize },

    #[error("Empty circuit: no operators to compose")]
    EmptyCircuit,

    #[error("Unknown gate name: {0}")]
    UnknownGate(String),
}

// =============================================================================
// 3. MeasurementError - Measurement sampling errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementError {
    #[error("Invalid shot count: {0} (must be > 0)")]
    InvalidShotCount(usize),

    #[error("Projector of dimension {projector} cannot act on a state of length {state}")]
    ProjectorDimensionMismatch { projector: usize, state: usize },
}

// =============================================================================
// 4. DecompositionError - Bipartition and state shape errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompositionError {
    #[error("State length {0} is not a power of two")]
    StateLengthNotPowerOfTwo(usize),

    #[error("Qubit {qubit} is outside the {total}-qubit state")]
    QubitOutOfRange { qubit: usize, total: usize },

    #[error("Qubit {0} appears in both partitions or twice in one partition")]
    OverlappingPartition(usize),

    #[error("Qubit {0} belongs to neither partition")]
    UncoveredQubit(usize),

    #[error("A {0}-qubit register has no addressable state vector")]
    RegisterTooLarge(usize),
}

// =============================================================================
// 5. ConfigurationError - Simulator configuration errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// =============================================================================
// Result type alias
// =============================================================================

pub type QuantumResult<T> = Result<T, QuantumRuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_error() {
        let err = CircuitError::CircuitTooLarge { qubits: 20, max: 12 };
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_error_conversion() {
        let runtime_err: QuantumRuntimeError = CircuitError::EmptyCircuit.into();
        assert!(matches!(runtime_err, QuantumRuntimeError::Circuit(_)));

        let runtime_err: QuantumRuntimeError = AlgebraError::DivideByZero.into();
        assert!(matches!(
            runtime_err,
            QuantumRuntimeError::Algebra(AlgebraError::DivideByZero)
        ));
    }

    #[test]
    fn test_decomposition_error_message() {
        let err = DecompositionError::QubitOutOfRange { qubit: 4, total: 3 };
        assert!(err.to_string().contains('4'));
    }
}
