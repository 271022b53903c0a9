// =============================================================================
// Qubit Lens - Circuit Program
// =============================================================================
// Table of Contents:
//   1. compose_circuit / apply_operator - Operator-level composition
//   2. OperatorApplication - One embedded gate in a circuit
//   3. QuantumCircuitStructure - Ordered circuit builder
// =============================================================================
// Purpose: Serial gate sequences collapsed into one operator. Gates act as
//          U|psi>, so applying op1 then op2 ... then opN equals the single
//          operator opN * ... * op2 * op1.
// =============================================================================

use complex_algebra::{AlgebraError, ComplexMatrix, ComplexVector};
use tracing::debug;
use uuid::Uuid;

use crate::configuration::{DEFAULT_MAXIMUM_QUANTUM_BITS, SimulatorConfiguration};
use crate::error::{CircuitError, QuantumResult};
use crate::gate_embedding::{QubitMap, embed_gate_with_limit};
use crate::gate_operations::{QuantumGateInterface, StandardGate};
use crate::state_preparation::state_dimension;

// =============================================================================
// 1. compose_circuit / apply_operator
// =============================================================================

/// Product `opN * ... * op1` of operators listed in application order.
pub fn compose_circuit(operators: &[ComplexMatrix]) -> QuantumResult<ComplexMatrix> {
    let (last, earlier) = operators.split_last().ok_or(CircuitError::EmptyCircuit)?;
    if !last.is_square() {
        return Err(AlgebraError::DimensionMismatch {
            operation: "compose_circuit",
            left_shape: last.shape(),
            right_shape: (last.rows(), last.rows()),
        }
        .into());
    }
    if let Some(mismatched) = earlier.iter().find(|operator| operator.shape() != last.shape()) {
        return Err(AlgebraError::DimensionMismatch {
            operation: "compose_circuit",
            left_shape: last.shape(),
            right_shape: mismatched.shape(),
        }
        .into());
    }
    debug!(
        operator_count = operators.len(),
        dimension = last.rows(),
        "composing circuit"
    );

    let mut composed = last.clone();
    for operator in earlier.iter().rev() {
        composed.multiply_in_place(operator)?;
    }
    Ok(composed)
}

pub fn apply_operator(
    operator: &ComplexMatrix,
    state: &ComplexVector,
) -> QuantumResult<ComplexVector> {
    Ok(operator.apply_to_vector(state)?)
}

// =============================================================================
// 2. OperatorApplication
// =============================================================================

#[derive(Debug, Clone)]
pub struct OperatorApplication {
    pub operation_name: String,
    pub embedded_operator: ComplexMatrix,
}

// =============================================================================
// 3. QuantumCircuitStructure
// =============================================================================

#[derive(Debug, Clone)]
pub struct QuantumCircuitStructure {
    id: Uuid,
    number_of_quantum_bits: usize,
    maximum_quantum_bits: usize,
    operator_applications: Vec<OperatorApplication>,
}

impl QuantumCircuitStructure {
    pub fn new(number_of_quantum_bits: usize) -> QuantumResult<Self> {
        Self::with_limit(number_of_quantum_bits, DEFAULT_MAXIMUM_QUANTUM_BITS)
    }

    pub fn with_configuration(
        number_of_quantum_bits: usize,
        configuration: &SimulatorConfiguration,
    ) -> QuantumResult<Self> {
        configuration.validate()?;
        Self::with_limit(number_of_quantum_bits, configuration.maximum_quantum_bits)
    }

    fn with_limit(
        number_of_quantum_bits: usize,
        maximum_quantum_bits: usize,
    ) -> QuantumResult<Self> {
        if number_of_quantum_bits > maximum_quantum_bits {
            return Err(CircuitError::CircuitTooLarge {
                qubits: number_of_quantum_bits,
                max: maximum_quantum_bits,
            }
            .into());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            number_of_quantum_bits,
            maximum_quantum_bits,
            operator_applications: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn dimension(&self) -> usize {
        1usize << self.number_of_quantum_bits
    }

    pub fn gate_count(&self) -> usize {
        self.operator_applications.len()
    }

    pub fn operator_applications(&self) -> &[OperatorApplication] {
        &self.operator_applications
    }

    pub fn operation_names(&self) -> Vec<&str> {
        self.operator_applications
            .iter()
            .map(|application| application.operation_name.as_str())
            .collect()
    }

    pub fn apply_gate(
        &mut self,
        gate: &dyn QuantumGateInterface,
        qubit_map: &QubitMap,
    ) -> QuantumResult<&mut Self> {
        if qubit_map.number_of_quantum_bits() != self.number_of_quantum_bits {
            return Err(CircuitError::OperatorDimensionMismatch {
                dimension: state_dimension(qubit_map.number_of_quantum_bits())?,
                expected: self.dimension(),
            }
            .into());
        }
        let embedded_operator =
            embed_gate_with_limit(&gate.gate_matrix(), qubit_map, self.maximum_quantum_bits)?;
        self.operator_applications.push(OperatorApplication {
            operation_name: gate.gate_name().to_string(),
            embedded_operator,
        });
        Ok(self)
    }

    /// Appends an operator that already spans the whole register.
    pub fn apply_operator(
        &mut self,
        operation_name: impl Into<String>,
        operator: ComplexMatrix,
    ) -> QuantumResult<&mut Self> {
        if operator.shape() != (self.dimension(), self.dimension()) {
            return Err(CircuitError::OperatorDimensionMismatch {
                dimension: operator.rows().max(operator.columns()),
                expected: self.dimension(),
            }
            .into());
        }
        self.operator_applications.push(OperatorApplication {
            operation_name: operation_name.into(),
            embedded_operator: operator,
        });
        Ok(self)
    }

    pub fn apply_single_qubit_gate(
        &mut self,
        gate: &dyn QuantumGateInterface,
        qubit: usize,
    ) -> QuantumResult<&mut Self> {
        let qubit_map = QubitMap::single_target(self.number_of_quantum_bits, qubit);
        self.apply_gate(gate, &qubit_map)
    }

    /// `gate` on `target`, active only where `control` is |1>.
    pub fn apply_controlled_gate(
        &mut self,
        gate: &dyn QuantumGateInterface,
        control: usize,
        target: usize,
    ) -> QuantumResult<&mut Self> {
        let qubit_map = QubitMap::single_target(self.number_of_quantum_bits, target)
            .with_positive_control(control);
        self.apply_gate(gate, &qubit_map)
    }

    pub fn apply_hadamard_gate(&mut self, qubit: usize) -> QuantumResult<&mut Self> {
        self.apply_single_qubit_gate(&StandardGate::Hadamard, qubit)
    }

    pub fn apply_pauli_x_gate(&mut self, qubit: usize) -> QuantumResult<&mut Self> {
        self.apply_single_qubit_gate(&StandardGate::PauliX, qubit)
    }

    pub fn apply_pauli_z_gate(&mut self, qubit: usize) -> QuantumResult<&mut Self> {
        self.apply_single_qubit_gate(&StandardGate::PauliZ, qubit)
    }

    pub fn apply_controlled_not_gate(
        &mut self,
        control: usize,
        target: usize,
    ) -> QuantumResult<&mut Self> {
        let qubit_map = QubitMap::pair_target(self.number_of_quantum_bits, control, target);
        self.apply_gate(&StandardGate::ControlledNot, &qubit_map)
    }

    pub fn apply_swap_gate(&mut self, qubit_a: usize, qubit_b: usize) -> QuantumResult<&mut Self> {
        let qubit_map = QubitMap::pair_target(self.number_of_quantum_bits, qubit_a, qubit_b);
        self.apply_gate(&StandardGate::Swap, &qubit_map)
    }

    /// The whole circuit as one operator. An empty circuit is an error.
    pub fn compose(&self) -> QuantumResult<ComplexMatrix> {
        let operators: Vec<ComplexMatrix> = self
            .operator_applications
            .iter()
            .map(|application| application.embedded_operator.clone())
            .collect();
        compose_circuit(&operators)
    }

    /// Applies each operator in order; an empty circuit returns the input.
    pub fn execute(&self, state: &ComplexVector) -> QuantumResult<ComplexVector> {
        if state.len() != self.dimension() {
            return Err(AlgebraError::DimensionMismatch {
                operation: "execute",
                left_shape: (self.dimension(), self.dimension()),
                right_shape: (state.len(), 1),
            }
            .into());
        }
        debug!(
            circuit_id = %self.id,
            gate_count = self.gate_count(),
            "executing circuit"
        );
        let mut current = state.clone();
        for application in &self.operator_applications {
            current = apply_operator(&application.embedded_operator, &current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumRuntimeError;
    use crate::gate_operations::RotationGate;
    use complex_algebra::Complex;

    #[test]
    fn test_compose_order() {
        let h = StandardGate::Hadamard.matrix();
        let x = StandardGate::PauliX.matrix();
        let composed = compose_circuit(&[h.clone(), x.clone()]).unwrap();
        assert_eq!(composed, x.multiply(&h).unwrap());
        assert_ne!(composed, h.multiply(&x).unwrap());
    }

    #[test]
    fn test_compose_errors() {
        assert!(matches!(
            compose_circuit(&[]),
            Err(QuantumRuntimeError::Circuit(CircuitError::EmptyCircuit))
        ));
        let mismatched = [ComplexMatrix::identity(2), ComplexMatrix::identity(4)];
        assert!(matches!(
            compose_circuit(&mismatched),
            Err(QuantumRuntimeError::Algebra(AlgebraError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_circuit_creation() {
        let mut circuit = QuantumCircuitStructure::new(2).unwrap();
        circuit
            .apply_hadamard_gate(0)
            .unwrap()
            .apply_controlled_not_gate(0, 1)
            .unwrap();

        assert_eq!(circuit.number_of_quantum_bits(), 2);
        assert_eq!(circuit.gate_count(), 2);
        assert_eq!(circuit.operation_names(), vec!["H", "CNOT"]);
    }

    #[test]
    fn test_execute_matches_compose() {
        let mut circuit = QuantumCircuitStructure::new(2).unwrap();
        circuit
            .apply_hadamard_gate(0)
            .unwrap()
            .apply_single_qubit_gate(&RotationGate::RotationY(0.3), 1)
            .unwrap()
            .apply_controlled_gate(&StandardGate::PhaseT, 1, 0)
            .unwrap();

        let state = ComplexVector::basis(4, 0);
        let executed = circuit.execute(&state).unwrap();
        let composed = apply_operator(&circuit.compose().unwrap(), &state).unwrap();
        assert_eq!(executed, composed);
        assert!((executed.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bell_state_execution() {
        let mut circuit = QuantumCircuitStructure::new(2).unwrap();
        circuit
            .apply_hadamard_gate(0)
            .unwrap()
            .apply_controlled_not_gate(0, 1)
            .unwrap();
        let bell = circuit.execute(&ComplexVector::basis(4, 0)).unwrap();
        let amplitude = Complex::from_real(std::f64::consts::FRAC_1_SQRT_2);
        assert_eq!(bell.get(0), amplitude);
        assert_eq!(bell.get(3), amplitude);
        assert_eq!(bell.get(1), Complex::ZERO);
    }

    #[test]
    fn test_apply_operator_checks_dimension() {
        let mut circuit = QuantumCircuitStructure::new(2).unwrap();
        assert!(circuit.apply_operator("I", ComplexMatrix::identity(2)).is_err());
        assert!(circuit.apply_operator("I", ComplexMatrix::identity(4)).is_ok());
        assert!(circuit.execute(&ComplexVector::zeros(2)).is_err());
    }

    #[test]
    fn test_register_limit_from_configuration() {
        let configuration = SimulatorConfiguration::default().with_maximum_quantum_bits(2);
        assert!(matches!(
            QuantumCircuitStructure::with_configuration(3, &configuration),
            Err(QuantumRuntimeError::Circuit(CircuitError::CircuitTooLarge { qubits: 3, max: 2 }))
        ));
        let circuit = QuantumCircuitStructure::with_configuration(2, &configuration).unwrap();
        assert_eq!(circuit.dimension(), 4);
    }

    #[test]
    fn test_oversized_register_is_refused() {
        assert!(matches!(
            QuantumCircuitStructure::new(usize::BITS as usize),
            Err(QuantumRuntimeError::Circuit(CircuitError::CircuitTooLarge { .. }))
        ));
        let invalid =
            SimulatorConfiguration::default().with_maximum_quantum_bits(usize::BITS as usize);
        assert!(matches!(
            QuantumCircuitStructure::with_configuration(2, &invalid),
            Err(QuantumRuntimeError::Configuration(_))
        ));
    }
}
