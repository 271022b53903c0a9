// =============================================================================
// Qubit Lens - State Preparation
// =============================================================================
// Table of Contents:
//   1. Register size helpers
//   2. Basis and null states
//   3. Random states
//   4. Probabilities and observables
// =============================================================================
// Purpose: Amplitude vectors of length 2^n for n qubits, big-endian basis
//          order (|q0 q1 ... qn-1>, q0 most significant).
// =============================================================================

use complex_algebra::{Complex, ComplexVector};
use rand::Rng;

use crate::error::{CircuitError, DecompositionError, QuantumResult};

// =============================================================================
// 1. Register size helpers
// =============================================================================

/// Number of qubits described by `state`, if its length is a power of two.
pub fn number_of_quantum_bits(state: &ComplexVector) -> Result<usize, DecompositionError> {
    let length = state.len();
    if length.is_power_of_two() {
        Ok(length.trailing_zeros() as usize)
    } else {
        Err(DecompositionError::StateLengthNotPowerOfTwo(length))
    }
}

/// Length 2^n of an n-qubit state, or `CircuitTooLarge` when the interleaved
/// buffer of that length would not be addressable.
pub fn state_dimension(number_of_quantum_bits: usize) -> Result<usize, CircuitError> {
    u32::try_from(number_of_quantum_bits)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .filter(|dimension| dimension.checked_mul(2).is_some())
        .ok_or(CircuitError::CircuitTooLarge {
            qubits: number_of_quantum_bits,
            max: usize::BITS as usize - 2,
        })
}

/// `|q0 q1 ... qn-1>` tag of a basis index, e.g. `|01>`.
pub fn basis_label(index: usize, number_of_quantum_bits: usize) -> String {
    let bits: String = (0..number_of_quantum_bits)
        .rev()
        .map(|bit| if (index >> bit) & 1 == 1 { '1' } else { '0' })
        .collect();
    format!("|{bits}>")
}

// =============================================================================
// 2. Basis and null states
// =============================================================================

/// The all-zero vector of length 2^n. Not a physical state.
pub fn null_state(number_of_quantum_bits: usize) -> QuantumResult<ComplexVector> {
    Ok(ComplexVector::zeros(state_dimension(number_of_quantum_bits)?))
}

pub fn zero_state(number_of_quantum_bits: usize) -> QuantumResult<ComplexVector> {
    basis_state(number_of_quantum_bits, 0)
}

pub fn basis_state(number_of_quantum_bits: usize, index: usize) -> QuantumResult<ComplexVector> {
    let dimension = state_dimension(number_of_quantum_bits)?;
    if index >= dimension {
        return Err(CircuitError::BasisIndexOutOfRange { index, dimension }.into());
    }
    Ok(ComplexVector::basis(dimension, index))
}

// =============================================================================
// 3. Random states
// =============================================================================

/// Components drawn uniformly from [-0.5, 0.5) in both parts, then normalised.
pub fn random_state<R: Rng + ?Sized>(
    number_of_quantum_bits: usize,
    random_source: &mut R,
) -> QuantumResult<ComplexVector> {
    let dimension = state_dimension(number_of_quantum_bits)?;
    let state: ComplexVector = (0..dimension)
        .map(|_| {
            Complex::new(
                random_source.gen_range(-0.5..0.5),
                random_source.gen_range(-0.5..0.5),
            )
        })
        .collect();
    Ok(state.normalize()?)
}

// =============================================================================
// 4. Probabilities and observables
// =============================================================================

pub fn probability_distribution(state: &ComplexVector) -> Vec<f64> {
    state.iter().map(|amplitude| amplitude.modulus_square()).collect()
}

pub fn total_probability(state: &ComplexVector) -> f64 {
    state.norm_square()
}

/// `<Z_qubit>`: probability of |0> minus probability of |1> on `qubit`.
pub fn expectation_value_pauli_z(state: &ComplexVector, qubit: usize) -> QuantumResult<f64> {
    let n = number_of_quantum_bits(state)?;
    if qubit >= n {
        return Err(CircuitError::InvalidQubitPosition {
            position: qubit,
            total: n,
        }
        .into());
    }
    let mask = 1usize << (n - 1 - qubit);

    Ok(state
        .iter()
        .enumerate()
        .map(|(index, amplitude)| {
            let probability = amplitude.modulus_square();
            if index & mask == 0 { probability } else { -probability }
        })
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumRuntimeError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_state_initialization() {
        let state = zero_state(2).unwrap();
        assert_eq!(state.len(), 4);
        assert_eq!(state.get(0), Complex::ONE);
        assert_eq!(number_of_quantum_bits(&state).unwrap(), 2);
    }

    #[test]
    fn test_null_and_basis_states() {
        assert_eq!(null_state(3).unwrap().norm(), 0.0);
        let state = basis_state(2, 3).unwrap();
        assert_eq!(state.get(3), Complex::ONE);
        assert!(basis_state(2, 4).is_err());
    }

    #[test]
    fn test_oversized_register_is_an_error() {
        let too_large = usize::BITS as usize;
        for result in [
            zero_state(too_large),
            null_state(too_large),
            basis_state(too_large + 1, 0),
            random_state(too_large, &mut StdRng::seed_from_u64(1)),
        ] {
            assert!(matches!(
                result,
                Err(QuantumRuntimeError::Circuit(CircuitError::CircuitTooLarge { .. }))
            ));
        }
        assert_eq!(state_dimension(3), Ok(8));
        assert!(state_dimension(usize::BITS as usize - 1).is_err());
    }

    #[test]
    fn test_basis_label() {
        assert_eq!(basis_label(1, 2), "|01>");
        assert_eq!(basis_label(6, 3), "|110>");
    }

    #[test]
    fn test_random_state_is_normalized_and_seeded() {
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);
        let a = random_state(3, &mut first).unwrap();
        let b = random_state(3, &mut second).unwrap();
        assert!((a.norm() - 1.0).abs() < 1e-12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_probability_distribution() {
        let state = zero_state(1).unwrap();
        let probabilities = probability_distribution(&state);
        assert!((probabilities[0] - 1.0).abs() < 1e-10);
        assert!(probabilities[1].abs() < 1e-10);
        assert!((total_probability(&state) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_expectation_value_pauli_z() {
        let state = basis_state(2, 1).unwrap();
        assert!((expectation_value_pauli_z(&state, 0).unwrap() - 1.0).abs() < 1e-12);
        assert!((expectation_value_pauli_z(&state, 1).unwrap() + 1.0).abs() < 1e-12);
        assert!(expectation_value_pauli_z(&state, 2).is_err());
        assert!(expectation_value_pauli_z(&ComplexVector::zeros(3), 0).is_err());
    }
}
