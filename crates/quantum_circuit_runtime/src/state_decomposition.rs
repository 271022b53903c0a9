// =============================================================================
// Qubit Lens - State Decomposition
// =============================================================================
// Table of Contents:
//   1. Canonical form (phase and magnitude extraction)
//   2. Bipartition - Validated split of the register
//   3. DecomposedTerm
//   4. decompose_state - Separable-term expansion across a bipartition
// =============================================================================
// Purpose: Writes a state as sum_k c_k (a_k ⊗ b_k) over a bipartition (A, B).
//          A single term means the state is a product across the cut; more
//          terms mean the parts are entangled. The expansion is not made
//          orthonormal.
// =============================================================================

use complex_algebra::{Complex, ComplexVector, Tolerance};
use tracing::debug;

use crate::canonical_vector_map::CanonicalVectorMap;
use crate::configuration::SimulatorConfiguration;
use crate::error::{DecompositionError, QuantumResult};
use crate::state_preparation::{number_of_quantum_bits, state_dimension};

// =============================================================================
// 1. Canonical form
// =============================================================================

/// Splits `vector` into `(canonical, factor)` with `vector = factor * canonical`.
///
/// `canonical` has unit norm and a positive real first non-negligible
/// component. A vector with no non-negligible component maps to
/// `(|0...0>, 0)`.
pub fn extract_phase_and_magnitude(
    vector: &ComplexVector,
    tolerance: Tolerance,
) -> (ComplexVector, Complex) {
    let phase = vector
        .iter()
        .find(|component| !component.is_zero(tolerance))
        .and_then(|component| component.unit_phase());
    let Some(phase) = phase else {
        return (ComplexVector::basis(vector.len(), 0), Complex::ZERO);
    };
    let magnitude = vector.norm();
    let compensation = phase.scale(1.0 / magnitude).conjugate();
    (vector.scale_by(compensation), phase.scale(magnitude))
}

// =============================================================================
// 2. Bipartition
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition {
    number_of_quantum_bits: usize,
    partition_a: Vec<usize>,
    partition_b: Vec<usize>,
}

impl Bipartition {
    /// Validates the split. `partition_b` defaults to the ascending
    /// complement of `partition_a`. Together they must cover each qubit once.
    pub fn new(
        number_of_quantum_bits: usize,
        partition_a: &[usize],
        partition_b: Option<&[usize]>,
    ) -> Result<Self, DecompositionError> {
        state_dimension(number_of_quantum_bits)
            .map_err(|_| DecompositionError::RegisterTooLarge(number_of_quantum_bits))?;
        let mut seen = vec![false; number_of_quantum_bits];
        let mut claim = |qubit: usize| -> Result<(), DecompositionError> {
            let slot = seen.get_mut(qubit).ok_or(DecompositionError::QubitOutOfRange {
                qubit,
                total: number_of_quantum_bits,
            })?;
            if *slot {
                return Err(DecompositionError::OverlappingPartition(qubit));
            }
            *slot = true;
            Ok(())
        };

        for &qubit in partition_a {
            claim(qubit)?;
        }
        let partition_b = match partition_b {
            Some(explicit) => {
                for &qubit in explicit {
                    claim(qubit)?;
                }
                explicit.to_vec()
            }
            None => {
                let complement: Vec<usize> = (0..number_of_quantum_bits)
                    .filter(|qubit| !partition_a.contains(qubit))
                    .collect();
                for &qubit in &complement {
                    claim(qubit)?;
                }
                complement
            }
        };
        if let Some(uncovered) = seen.iter().position(|&covered| !covered) {
            return Err(DecompositionError::UncoveredQubit(uncovered));
        }

        Ok(Self {
            number_of_quantum_bits,
            partition_a: partition_a.to_vec(),
            partition_b,
        })
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn partition_a(&self) -> &[usize] {
        &self.partition_a
    }

    pub fn partition_b(&self) -> &[usize] {
        &self.partition_b
    }

    /// Scatters the bits of `local_index` (big-endian over `qubits`) into a
    /// full register index.
    fn scatter(&self, qubits: &[usize], local_index: usize) -> usize {
        let width = qubits.len();
        qubits
            .iter()
            .enumerate()
            .fold(0usize, |index, (slot, &qubit)| {
                let bit = (local_index >> (width - slot - 1)) & 1;
                index | (bit << (self.number_of_quantum_bits - qubit - 1))
            })
    }

    pub fn full_index(&self, a_index: usize, b_index: usize) -> usize {
        self.scatter(&self.partition_a, a_index) | self.scatter(&self.partition_b, b_index)
    }

    /// Rebuilds the full state vector from a term list in register order.
    pub fn recompose(&self, terms: &[DecomposedTerm]) -> ComplexVector {
        let mut state = ComplexVector::zeros(1usize << self.number_of_quantum_bits);
        for term in terms {
            for (a_index, a_value) in term.factor_a.iter().enumerate() {
                for (b_index, b_value) in term.factor_b.iter().enumerate() {
                    let index = self.full_index(a_index, b_index);
                    let value = state.get(index) + term.coefficient * a_value * b_value;
                    state.set(index, value);
                }
            }
        }
        state
    }
}

// =============================================================================
// 3. DecomposedTerm
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedTerm {
    pub coefficient: Complex,
    /// Canonical factor over partition A, length 2^|A|.
    pub factor_a: ComplexVector,
    /// Canonical factor over partition B, length 2^|B|.
    pub factor_b: ComplexVector,
}

impl DecomposedTerm {
    /// `coefficient * (factor_a ⊗ factor_b)` in partition order (A bits first).
    pub fn partition_ordered_state(&self) -> ComplexVector {
        self.factor_a
            .tensor(&self.factor_b)
            .scale_by(self.coefficient)
    }
}

// =============================================================================
// 4. decompose_state
// =============================================================================

pub fn decompose_state(
    state: &ComplexVector,
    partition_a: &[usize],
    partition_b: Option<&[usize]>,
) -> QuantumResult<Vec<DecomposedTerm>> {
    decompose_state_with_tolerance(state, partition_a, partition_b, Tolerance::default())
}

pub fn decompose_state_with_tolerance(
    state: &ComplexVector,
    partition_a: &[usize],
    partition_b: Option<&[usize]>,
    tolerance: Tolerance,
) -> QuantumResult<Vec<DecomposedTerm>> {
    let n = number_of_quantum_bits(state)?;
    let bipartition = Bipartition::new(n, partition_a, partition_b)?;
    Ok(decompose_across(state, &bipartition, tolerance))
}

/// Uses the tolerance of `configuration` for zero tests and factor grouping.
pub fn decompose_state_with_configuration(
    state: &ComplexVector,
    partition_a: &[usize],
    partition_b: Option<&[usize]>,
    configuration: &SimulatorConfiguration,
) -> QuantumResult<Vec<DecomposedTerm>> {
    decompose_state_with_tolerance(state, partition_a, partition_b, configuration.tolerance())
}

pub fn decompose_across(
    state: &ComplexVector,
    bipartition: &Bipartition,
    tolerance: Tolerance,
) -> Vec<DecomposedTerm> {
    let a_length = 1usize << bipartition.partition_a.len();
    let b_length = 1usize << bipartition.partition_b.len();

    // Group rows by canonical B factor; each group collects (row, lambda).
    let mut groups: CanonicalVectorMap<Vec<(usize, Complex)>> = CanonicalVectorMap::new(tolerance);
    for a_index in 0..a_length {
        let row: ComplexVector = (0..b_length)
            .map(|b_index| state.get(bipartition.full_index(a_index, b_index)))
            .collect();
        let (canonical_b, lambda) = extract_phase_and_magnitude(&row, tolerance);
        groups
            .get_or_insert_with(canonical_b, Vec::new)
            .push((a_index, lambda));
    }

    let mut terms: Vec<DecomposedTerm> = groups
        .into_entries()
        .into_iter()
        .map(|(factor_b, members)| {
            let mut unnormalised_a = ComplexVector::zeros(a_length);
            for (a_index, lambda) in members {
                unnormalised_a.set(a_index, lambda);
            }
            let (factor_a, coefficient) = extract_phase_and_magnitude(&unnormalised_a, tolerance);
            DecomposedTerm {
                coefficient,
                factor_a,
                factor_b,
            }
        })
        .filter(|term| !term.coefficient.is_zero(tolerance))
        .collect();
    terms.sort_by(|left, right| {
        right
            .coefficient
            .magnitude()
            .total_cmp(&left.coefficient.magnitude())
    });

    debug!(
        partition_a = ?bipartition.partition_a,
        partition_b = ?bipartition.partition_b,
        term_count = terms.len(),
        "decomposed state"
    );
    terms
}

pub fn is_separable(
    state: &ComplexVector,
    partition_a: &[usize],
    partition_b: Option<&[usize]>,
) -> QuantumResult<bool> {
    Ok(decompose_state(state, partition_a, partition_b)?.len() == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumRuntimeError;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn bell_state() -> ComplexVector {
        ComplexVector::from_values([FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2])
    }

    #[test]
    fn test_extract_phase_and_magnitude() {
        let vector = ComplexVector::from_values([(0.0, 0.0), (0.0, 2.0), (0.0, -2.0)]);
        let (canonical, factor) = extract_phase_and_magnitude(&vector, Tolerance::default());
        assert!((canonical.norm() - 1.0).abs() < 1e-12);
        assert_eq!(canonical.get(1), Complex::from_real(FRAC_1_SQRT_2));
        assert_eq!(canonical.scale_by(factor), vector);

        let (canonical, factor) =
            extract_phase_and_magnitude(&ComplexVector::zeros(2), Tolerance::default());
        assert_eq!(canonical, ComplexVector::basis(2, 0));
        assert_eq!(factor, Complex::ZERO);
    }

    #[test]
    fn test_bipartition_defaults_to_complement() {
        let bipartition = Bipartition::new(4, &[2, 0], None).unwrap();
        assert_eq!(bipartition.partition_b(), &[1, 3]);
        // a = |10> over (2, 0) sets qubit 2; b = |01> over (1, 3) sets qubit 3.
        assert_eq!(bipartition.full_index(0b10, 0b01), 0b0011);
    }

    #[test]
    fn test_bipartition_validation() {
        assert_eq!(
            Bipartition::new(2, &[2], None).unwrap_err(),
            DecompositionError::QubitOutOfRange { qubit: 2, total: 2 }
        );
        assert_eq!(
            Bipartition::new(3, &[0], Some(&[0, 1, 2])).unwrap_err(),
            DecompositionError::OverlappingPartition(0)
        );
        assert_eq!(
            Bipartition::new(3, &[0], Some(&[2])).unwrap_err(),
            DecompositionError::UncoveredQubit(1)
        );
        assert_eq!(
            Bipartition::new(usize::BITS as usize, &[0], None).unwrap_err(),
            DecompositionError::RegisterTooLarge(usize::BITS as usize)
        );
        assert!(matches!(
            decompose_state(&ComplexVector::zeros(3), &[0], None),
            Err(QuantumRuntimeError::Decomposition(
                DecompositionError::StateLengthNotPowerOfTwo(3)
            ))
        ));
    }

    #[test]
    fn test_bell_state_is_entangled() {
        let terms = decompose_state(&bell_state(), &[0], None).unwrap();
        assert_eq!(terms.len(), 2);
        for term in &terms {
            assert!((term.coefficient.magnitude() - FRAC_1_SQRT_2).abs() < 1e-12);
        }
        assert!(!is_separable(&bell_state(), &[1], None).unwrap());
    }

    #[test]
    fn test_product_state_is_separable() {
        let state = ComplexVector::from_values([0.5, 0.5, 0.5, 0.5]);
        let terms = decompose_state(&state, &[0], None).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].coefficient, Complex::ONE);
        assert_eq!(
            terms[0].factor_a,
            ComplexVector::from_values([FRAC_1_SQRT_2, FRAC_1_SQRT_2])
        );
    }

    #[test]
    fn test_terms_sorted_by_descending_magnitude() {
        let state = ComplexVector::from_values([0.6, 0.0, 0.0, 0.8]);
        let terms = decompose_state(&state, &[0], None).unwrap();
        assert_eq!(terms.len(), 2);
        assert!((terms[0].coefficient.magnitude() - 0.8).abs() < 1e-12);
        assert_eq!(terms[0].factor_b, ComplexVector::basis(2, 1));
    }

    #[test]
    fn test_recompose_restores_state() {
        let state = ComplexVector::from_values([
            (0.1, 0.2),
            (0.3, -0.1),
            (0.0, 0.4),
            (0.5, 0.0),
            (-0.2, 0.1),
            (0.0, 0.0),
            (0.3, 0.3),
            (0.1, -0.4),
        ])
        .normalize()
        .unwrap();
        let bipartition = Bipartition::new(3, &[2, 0], None).unwrap();
        let terms = decompose_across(&state, &bipartition, Tolerance::default());
        assert_eq!(bipartition.recompose(&terms), state);
    }

    #[test]
    fn test_configured_tolerance_absorbs_weak_branch() {
        let state = ComplexVector::from_values([1.0, 0.0, 0.0, 1e-6]);
        let strict = SimulatorConfiguration::default();
        let loose = SimulatorConfiguration::single_precision();
        assert_eq!(
            decompose_state_with_configuration(&state, &[0], None, &strict).unwrap().len(),
            2
        );
        let terms = decompose_state_with_configuration(&state, &[0], None, &loose).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].factor_b, ComplexVector::basis(2, 0));
    }

    #[test]
    fn test_uneven_partition_sizes() {
        // |0> ⊗ Bell(1, 2): qubit 0 separates from qubits 1 and 2.
        let state = ComplexVector::basis(2, 0).tensor(&bell_state());
        let terms = decompose_state(&state, &[0], None).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].factor_b, bell_state());
        let terms = decompose_state(&state, &[0, 1], Some(&[2])).unwrap();
        assert_eq!(terms.len(), 2);
    }
}
