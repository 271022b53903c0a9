// =============================================================================
// Qubit Lens - Gate Embedding
// =============================================================================
// Table of Contents:
//   1. QubitRole - Role of one register position
//   2. QubitMap - Ordered roles for a whole register
//   3. EmbeddingLayout - Bit masks derived from a validated map
//   4. embed_gate - Lift a k-qubit gate to the full 2^N space
// =============================================================================
// Purpose: Places a gate on chosen register positions, optionally conditioned
//          on positive or negative controls. Position 0 is the most
//          significant bit of a basis index (|q0 q1 ... qN-1>).
// =============================================================================

use complex_algebra::{Complex, ComplexMatrix};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::configuration::{DEFAULT_MAXIMUM_QUANTUM_BITS, SimulatorConfiguration};
use crate::error::{CircuitError, QuantumResult};
use crate::state_preparation::state_dimension;

// =============================================================================
// 1. QubitRole
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitRole {
    /// Carries logical qubit `k` of the gate.
    Target(usize),
    Untouched,
    /// Gate acts only where this bit is 1.
    PositiveControl,
    /// Gate acts only where this bit is 0.
    NegativeControl,
}

impl QubitRole {
    pub const UNTOUCHED_CODE: i32 = -1;
    pub const POSITIVE_CONTROL_CODE: i32 = -2;
    pub const NEGATIVE_CONTROL_CODE: i32 = -3;

    pub fn from_code(code: i32) -> Result<Self, CircuitError> {
        match code {
            code if code >= 0 => Ok(QubitRole::Target(code as usize)),
            Self::UNTOUCHED_CODE => Ok(QubitRole::Untouched),
            Self::POSITIVE_CONTROL_CODE => Ok(QubitRole::PositiveControl),
            Self::NEGATIVE_CONTROL_CODE => Ok(QubitRole::NegativeControl),
            other => Err(CircuitError::UnknownRoleCode(other)),
        }
    }

    pub fn code(&self) -> Result<i32, CircuitError> {
        match self {
            QubitRole::Target(logical) => {
                i32::try_from(*logical).map_err(|_| CircuitError::RoleCodeOverflow(*logical))
            }
            QubitRole::Untouched => Ok(Self::UNTOUCHED_CODE),
            QubitRole::PositiveControl => Ok(Self::POSITIVE_CONTROL_CODE),
            QubitRole::NegativeControl => Ok(Self::NEGATIVE_CONTROL_CODE),
        }
    }
}

// =============================================================================
// 2. QubitMap
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitMap {
    roles: Vec<QubitRole>,
    /// First builder call that named a position outside the register.
    invalid_position: Option<usize>,
}

impl QubitMap {
    pub fn untouched(number_of_quantum_bits: usize) -> Self {
        Self {
            roles: vec![QubitRole::Untouched; number_of_quantum_bits],
            invalid_position: None,
        }
    }

    pub fn from_roles(roles: Vec<QubitRole>) -> Self {
        Self {
            roles,
            invalid_position: None,
        }
    }

    /// Builds a map from integer codes: `k >= 0` target, `-1` untouched,
    /// `-2` positive control, `-3` negative control.
    pub fn from_codes(codes: &[i32]) -> Result<Self, CircuitError> {
        let roles = codes
            .iter()
            .map(|&code| QubitRole::from_code(code))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_roles(roles))
    }

    pub fn single_target(number_of_quantum_bits: usize, position: usize) -> Self {
        Self::untouched(number_of_quantum_bits).with_target(position, 0)
    }

    /// Map for a two-qubit gate whose logical qubits 0 and 1 sit on `first` and `second`.
    pub fn pair_target(number_of_quantum_bits: usize, first: usize, second: usize) -> Self {
        Self::untouched(number_of_quantum_bits)
            .with_target(first, 0)
            .with_target(second, 1)
    }

    pub fn with_role(mut self, position: usize, role: QubitRole) -> Self {
        match self.roles.get_mut(position) {
            Some(slot) => *slot = role,
            None => {
                self.invalid_position.get_or_insert(position);
            }
        }
        self
    }

    pub fn with_target(self, position: usize, logical_index: usize) -> Self {
        self.with_role(position, QubitRole::Target(logical_index))
    }

    pub fn with_positive_control(self, position: usize) -> Self {
        self.with_role(position, QubitRole::PositiveControl)
    }

    pub fn with_negative_control(self, position: usize) -> Self {
        self.with_role(position, QubitRole::NegativeControl)
    }

    pub fn roles(&self) -> &[QubitRole] {
        &self.roles
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.roles.len()
    }

    pub fn codes(&self) -> Result<Vec<i32>, CircuitError> {
        self.roles.iter().map(QubitRole::code).collect()
    }

    fn bit_shift(&self, position: usize) -> usize {
        self.roles.len() - position - 1
    }
}

// =============================================================================
// 3. EmbeddingLayout
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct EmbeddingLayout {
    untouched_mask: usize,
    control_mask: usize,
    control_sign_mask: usize,
    /// Bit shift of the register position carrying logical qubit `l`.
    target_shifts: Vec<usize>,
}

impl EmbeddingLayout {
    fn build(
        gate: &ComplexMatrix,
        qubit_map: &QubitMap,
        maximum_quantum_bits: usize,
    ) -> Result<Self, CircuitError> {
        let (rows, columns) = gate.shape();
        if rows != columns || !rows.is_power_of_two() {
            return Err(CircuitError::InvalidGateShape { rows, columns });
        }
        if let Some(position) = qubit_map.invalid_position {
            return Err(CircuitError::InvalidQubitPosition {
                position,
                total: qubit_map.number_of_quantum_bits(),
            });
        }

        let register_qubits = qubit_map.number_of_quantum_bits();
        if register_qubits > maximum_quantum_bits {
            return Err(CircuitError::CircuitTooLarge {
                qubits: register_qubits,
                max: maximum_quantum_bits,
            });
        }
        state_dimension(register_qubits)?;
        let gate_qubits = rows.trailing_zeros() as usize;
        if gate_qubits > register_qubits {
            return Err(CircuitError::RegisterTooSmall {
                gate_qubits,
                register_qubits,
            });
        }

        let mut untouched_mask = 0usize;
        let mut control_mask = 0usize;
        let mut control_sign_mask = 0usize;
        let mut target_shifts: Vec<Option<usize>> = vec![None; gate_qubits];
        let mut target_count = 0usize;

        for (position, role) in qubit_map.roles().iter().enumerate() {
            let bit = 1usize << qubit_map.bit_shift(position);
            match *role {
                QubitRole::Untouched => untouched_mask |= bit,
                QubitRole::PositiveControl => {
                    control_mask |= bit;
                    control_sign_mask |= bit;
                }
                QubitRole::NegativeControl => control_mask |= bit,
                QubitRole::Target(logical) => {
                    target_count += 1;
                    let slot = target_shifts.get_mut(logical).ok_or(
                        CircuitError::TargetIndexOutOfRange {
                            index: logical,
                            gate_qubits,
                        },
                    )?;
                    if slot.is_some() {
                        return Err(CircuitError::DuplicateTargetIndex(logical));
                    }
                    *slot = Some(qubit_map.bit_shift(position));
                }
            }
        }

        if target_count != gate_qubits {
            return Err(CircuitError::TargetCountMismatch {
                required: gate_qubits,
                provided: target_count,
            });
        }
        // Every slot is filled: gate_qubits distinct in-range indices were seen.
        let target_shifts = target_shifts.into_iter().flatten().collect();

        Ok(Self {
            untouched_mask,
            control_mask,
            control_sign_mask,
            target_shifts,
        })
    }

    /// Index into the gate matrix gathered from the target bits of `index`.
    fn gate_index(&self, index: usize) -> usize {
        let gate_qubits = self.target_shifts.len();
        self.target_shifts
            .iter()
            .enumerate()
            .fold(0usize, |sub_index, (logical, &shift)| {
                sub_index | (((index >> shift) & 1) << (gate_qubits - logical - 1))
            })
    }
}

// =============================================================================
// 4. embed_gate
// =============================================================================

/// Embeds `gate` into the register described by `qubit_map` using the
/// default dense-size ceiling.
pub fn embed_gate(gate: &ComplexMatrix, qubit_map: &QubitMap) -> QuantumResult<ComplexMatrix> {
    embed_gate_with_limit(gate, qubit_map, DEFAULT_MAXIMUM_QUANTUM_BITS)
}

pub fn embed_gate_with_configuration(
    gate: &ComplexMatrix,
    qubit_map: &QubitMap,
    configuration: &SimulatorConfiguration,
) -> QuantumResult<ComplexMatrix> {
    embed_gate_with_limit(gate, qubit_map, configuration.maximum_quantum_bits)
}

pub fn embed_gate_with_limit(
    gate: &ComplexMatrix,
    qubit_map: &QubitMap,
    maximum_quantum_bits: usize,
) -> QuantumResult<ComplexMatrix> {
    let layout = EmbeddingLayout::build(gate, qubit_map, maximum_quantum_bits)?;
    let dimension = 1usize << qubit_map.number_of_quantum_bits();
    debug!(
        gate_dimension = gate.rows(),
        register_qubits = qubit_map.number_of_quantum_bits(),
        "embedding gate"
    );

    let fixed_mask = layout.untouched_mask | layout.control_mask;
    let mut embedded = ComplexMatrix::zeros(dimension, dimension);
    for i in 0..dimension {
        if i & layout.control_mask != layout.control_sign_mask {
            embedded.set(i, i, Complex::ONE);
            continue;
        }
        let row = layout.gate_index(i);
        for j in (0..dimension).filter(|&j| (i ^ j) & fixed_mask == 0) {
            embedded.set(i, j, gate.get(row, layout.gate_index(j)));
        }
    }
    Ok(embedded)
}
