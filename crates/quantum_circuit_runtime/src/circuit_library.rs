// =============================================================================
// Qubit Lens - Circuit Library
// =============================================================================
// Table of Contents:
//   1. Bell pair circuits
//   2. GHZ state preparation
//   3. Quantum Fourier transform
//   4. Entanglement swapping preparation
// =============================================================================
// Purpose: Ready-made composed operators for common textbook circuits.
// =============================================================================

use complex_algebra::ComplexMatrix;
use tracing::debug;

use crate::circuit_program::{QuantumCircuitStructure, compose_circuit};
use crate::error::QuantumResult;
use crate::gate_embedding::{QubitMap, embed_gate};
use crate::gate_operations::{RotationGate, StandardGate};

// =============================================================================
// 1. Bell pair circuits
// =============================================================================

/// H on qubit 0 followed by CNOT(0 -> 1); maps |00> to (|00> + |11>)/sqrt(2).
pub fn bell_pair_entangler() -> QuantumResult<ComplexMatrix> {
    let mut circuit = QuantumCircuitStructure::new(2)?;
    circuit
        .apply_hadamard_gate(0)?
        .apply_controlled_not_gate(0, 1)?;
    circuit.compose()
}

/// Inverse of `bell_pair_entangler`: CNOT(0 -> 1) followed by H on qubit 0.
pub fn bell_pair_disentangler() -> QuantumResult<ComplexMatrix> {
    let mut circuit = QuantumCircuitStructure::new(2)?;
    circuit
        .apply_controlled_not_gate(0, 1)?
        .apply_hadamard_gate(0)?;
    circuit.compose()
}

// =============================================================================
// 2. GHZ state preparation
// =============================================================================

/// H on qubit 0 and a CNOT chain; maps |0...0> to (|0...0> + |1...1>)/sqrt(2).
pub fn ghz_state_preparation(number_of_quantum_bits: usize) -> QuantumResult<ComplexMatrix> {
    let mut circuit = QuantumCircuitStructure::new(number_of_quantum_bits)?;
    circuit.apply_hadamard_gate(0)?;
    for qubit in 1..number_of_quantum_bits {
        circuit.apply_controlled_not_gate(qubit - 1, qubit)?;
    }
    circuit.compose()
}

// =============================================================================
// 3. Quantum Fourier transform
// =============================================================================

/// QFT on `number_of_quantum_bits` qubits, qubit 0 most significant.
///
/// For each qubit i: H on i, then R1(pi / 2^j) on i controlled by qubit i + j.
/// The output order is restored with SWAP(i, n - i - 1).
pub fn quantum_fourier_transform(number_of_quantum_bits: usize) -> QuantumResult<ComplexMatrix> {
    let n = number_of_quantum_bits;
    let hadamard = StandardGate::Hadamard.matrix();
    let swap = StandardGate::Swap.matrix();
    let mut operators = Vec::new();

    for i in 0..n {
        operators.push(embed_gate(&hadamard, &QubitMap::single_target(n, i))?);
        for j in 1..(n - i) {
            let phase = RotationGate::PhaseRotation(1.0 / (1u64 << j) as f64).matrix();
            let qubit_map = QubitMap::single_target(n, i).with_positive_control(i + j);
            operators.push(embed_gate(&phase, &qubit_map)?);
        }
    }
    for i in 0..n / 2 {
        operators.push(embed_gate(&swap, &QubitMap::pair_target(n, i, n - i - 1))?);
    }
    debug!(
        number_of_quantum_bits = n,
        operator_count = operators.len(),
        "built quantum fourier transform"
    );
    compose_circuit(&operators)
}

// =============================================================================
// 4. Entanglement swapping preparation
// =============================================================================

/// Four-qubit preparation for entanglement swapping: Bell pairs on (0, 1) and
/// (2, 3), then a Bell-basis rotation of the middle pair (1, 2). Measuring
/// qubits 1 and 2 afterwards leaves qubits 0 and 3 entangled.
pub fn entanglement_swapping_preparation() -> QuantumResult<ComplexMatrix> {
    let entangler = bell_pair_entangler()?;
    let disentangler = bell_pair_disentangler()?;
    compose_circuit(&[
        embed_gate(&entangler, &QubitMap::pair_target(4, 0, 1))?,
        embed_gate(&entangler, &QubitMap::pair_target(4, 2, 3))?,
        embed_gate(&disentangler, &QubitMap::pair_target(4, 1, 2))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use complex_algebra::{Complex, ComplexVector, Tolerance};
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    #[test]
    fn test_bell_pair() {
        let state = bell_pair_entangler()
            .unwrap()
            .apply_to_vector(&ComplexVector::basis(4, 0))
            .unwrap();
        let amplitude = Complex::from_real(FRAC_1_SQRT_2);
        assert_eq!(
            state,
            ComplexVector::from_values([amplitude, Complex::ZERO, Complex::ZERO, amplitude])
        );
    }

    #[test]
    fn test_disentangler_inverts_entangler() {
        let product = bell_pair_disentangler()
            .unwrap()
            .multiply(&bell_pair_entangler().unwrap())
            .unwrap();
        assert_eq!(product, ComplexMatrix::identity(4));
    }

    #[test]
    fn test_ghz_state() {
        let state = ghz_state_preparation(3)
            .unwrap()
            .apply_to_vector(&ComplexVector::basis(8, 0))
            .unwrap();
        assert_eq!(state.get(0), Complex::from_real(FRAC_1_SQRT_2));
        assert_eq!(state.get(7), Complex::from_real(FRAC_1_SQRT_2));
        assert!((state.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_qft_matches_discrete_fourier_matrix() {
        for n in 1..=3 {
            let qft = quantum_fourier_transform(n).unwrap();
            let dimension = 1usize << n;
            let scale = 1.0 / (dimension as f64).sqrt();
            for j in 0..dimension {
                for k in 0..dimension {
                    let phase = 2.0 * PI * (j * k) as f64 / dimension as f64;
                    let expected = Complex::from_polar(scale, phase);
                    assert!(
                        qft.get(j, k).approximately_equal(&expected),
                        "QFT({n}) entry ({j}, {k}) = {} expected {}",
                        qft.get(j, k),
                        expected
                    );
                }
            }
        }
    }

    #[test]
    fn test_qft_is_unitary() {
        assert!(quantum_fourier_transform(3).unwrap().is_unitary(Tolerance::default()));
    }

    #[test]
    fn test_entanglement_swapping_preparation_is_unitary() {
        let preparation = entanglement_swapping_preparation().unwrap();
        assert_eq!(preparation.shape(), (16, 16));
        assert!(preparation.is_unitary(Tolerance::default()));
    }
}
