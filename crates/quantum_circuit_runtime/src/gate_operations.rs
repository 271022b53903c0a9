// =============================================================================
// Qubit Lens - Gate Operations
// =============================================================================
// Table of Contents:
//   1. QuantumGateInterface - Core trait for all gates
//   2. StandardGate - fixed single- and two-qubit gate catalog
//   3. RotationGate - parameterised rotations (angles in units of pi)
//   4. Projectors and density matrices
// =============================================================================
// Purpose: Gate matrices in the logical basis of the gate itself. Placement
//          onto a register happens in gate_embedding via a QubitMap.
//          Qubit 0 of a multi-qubit gate is the most significant bit.
// =============================================================================

use complex_algebra::{Complex, ComplexMatrix, ComplexVector};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;
use std::str::FromStr;

use crate::error::CircuitError;

// =============================================================================
// 1. QuantumGateInterface - Core trait for all gates
// =============================================================================

pub trait QuantumGateInterface: fmt::Debug {
    fn gate_name(&self) -> &str;
    fn number_of_quantum_bits(&self) -> usize;
    fn gate_matrix(&self) -> ComplexMatrix;
}

/// Square matrix from row-major entries; `entries.len()` must be `dimension^2`.
fn square_matrix(dimension: usize, entries: &[Complex]) -> ComplexMatrix {
    let mut matrix = ComplexMatrix::zeros(dimension, dimension);
    for (index, value) in entries.iter().enumerate() {
        matrix.set(index / dimension, index % dimension, *value);
    }
    matrix
}

fn diagonal_matrix(entries: &[Complex]) -> ComplexMatrix {
    let mut matrix = ComplexMatrix::zeros(entries.len(), entries.len());
    for (index, value) in entries.iter().enumerate() {
        matrix.set(index, index, *value);
    }
    matrix
}

const ZERO: Complex = Complex::ZERO;
const ONE: Complex = Complex::ONE;
const EIGHTH_TURN: Complex = Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);

// =============================================================================
// 2. StandardGate - fixed gate catalog
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    Hadamard,
    PhaseT,
    PhaseS,
    /// `(HS)^3`, a global phase of e^{i pi/4}.
    GlobalPhaseEighthTurn,
    PauliX,
    PauliY,
    PauliZ,
    Identity,
    /// Qubit 0 controls, qubit 1 is the target.
    ControlledNot,
    ControlledT,
    Swap,
    /// `|0><0|`, the +1 projector of a Z measurement.
    ProjectorZPlus,
}

impl StandardGate {
    pub const ALL: [StandardGate; 12] = [
        StandardGate::Hadamard,
        StandardGate::PhaseT,
        StandardGate::PhaseS,
        StandardGate::GlobalPhaseEighthTurn,
        StandardGate::PauliX,
        StandardGate::PauliY,
        StandardGate::PauliZ,
        StandardGate::Identity,
        StandardGate::ControlledNot,
        StandardGate::ControlledT,
        StandardGate::Swap,
        StandardGate::ProjectorZPlus,
    ];

    pub fn catalog_name(&self) -> &'static str {
        match self {
            StandardGate::Hadamard => "H",
            StandardGate::PhaseT => "T",
            StandardGate::PhaseS => "S",
            StandardGate::GlobalPhaseEighthTurn => "HSHSHS",
            StandardGate::PauliX => "X",
            StandardGate::PauliY => "Y",
            StandardGate::PauliZ => "Z",
            StandardGate::Identity => "I",
            StandardGate::ControlledNot => "CNOT",
            StandardGate::ControlledT => "CT",
            StandardGate::Swap => "SWAP",
            StandardGate::ProjectorZPlus => "MES_Z_PLUS",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CircuitError> {
        StandardGate::ALL
            .iter()
            .copied()
            .find(|gate| gate.catalog_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CircuitError::UnknownGate(name.to_string()))
    }

    pub fn matrix(&self) -> ComplexMatrix {
        let h = Complex::from_real(FRAC_1_SQRT_2);
        match self {
            StandardGate::Hadamard => square_matrix(2, &[h, h, h, -h]),
            StandardGate::PhaseT => diagonal_matrix(&[ONE, EIGHTH_TURN]),
            StandardGate::PhaseS => diagonal_matrix(&[ONE, Complex::IMAGINARY_UNIT]),
            StandardGate::GlobalPhaseEighthTurn => diagonal_matrix(&[EIGHTH_TURN, EIGHTH_TURN]),
            StandardGate::PauliX => square_matrix(2, &[ZERO, ONE, ONE, ZERO]),
            StandardGate::PauliY => square_matrix(
                2,
                &[ZERO, -Complex::IMAGINARY_UNIT, Complex::IMAGINARY_UNIT, ZERO],
            ),
            StandardGate::PauliZ => diagonal_matrix(&[ONE, -ONE]),
            StandardGate::Identity => ComplexMatrix::identity(2),
            StandardGate::ControlledNot => square_matrix(
                4,
                &[
                    ONE, ZERO, ZERO, ZERO, //
                    ZERO, ONE, ZERO, ZERO, //
                    ZERO, ZERO, ZERO, ONE, //
                    ZERO, ZERO, ONE, ZERO,
                ],
            ),
            StandardGate::ControlledT => diagonal_matrix(&[ONE, ONE, ONE, EIGHTH_TURN]),
            StandardGate::Swap => square_matrix(
                4,
                &[
                    ONE, ZERO, ZERO, ZERO, //
                    ZERO, ZERO, ONE, ZERO, //
                    ZERO, ONE, ZERO, ZERO, //
                    ZERO, ZERO, ZERO, ONE,
                ],
            ),
            StandardGate::ProjectorZPlus => {
                density_matrix(&ComplexVector::from_values([ONE, ZERO]))
            }
        }
    }
}

impl QuantumGateInterface for StandardGate {
    fn gate_name(&self) -> &str {
        self.catalog_name()
    }

    fn number_of_quantum_bits(&self) -> usize {
        match self {
            StandardGate::ControlledNot | StandardGate::ControlledT | StandardGate::Swap => 2,
            _ => 1,
        }
    }

    fn gate_matrix(&self) -> ComplexMatrix {
        self.matrix()
    }
}

impl FromStr for StandardGate {
    type Err = CircuitError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        StandardGate::from_name(name)
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_name())
    }
}

// =============================================================================
// 3. RotationGate - parameterised rotations
// =============================================================================

/// Single-qubit rotations. Angles are given in units of pi, so `1.0` is a
/// half turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RotationGate {
    RotationX(f64),
    RotationY(f64),
    RotationZ(f64),
    /// `diag(1, e^{i theta})`.
    PhaseRotation(f64),
}

impl RotationGate {
    pub fn angle_over_pi(&self) -> f64 {
        match *self {
            RotationGate::RotationX(angle)
            | RotationGate::RotationY(angle)
            | RotationGate::RotationZ(angle)
            | RotationGate::PhaseRotation(angle) => angle,
        }
    }

    pub fn matrix(&self) -> ComplexMatrix {
        let theta = self.angle_over_pi() * PI;
        let cos_half = (theta / 2.0).cos();
        let sin_half = (theta / 2.0).sin();
        match self {
            RotationGate::RotationX(_) => square_matrix(
                2,
                &[
                    Complex::from_real(cos_half),
                    Complex::new(0.0, -sin_half),
                    Complex::new(0.0, -sin_half),
                    Complex::from_real(cos_half),
                ],
            ),
            RotationGate::RotationY(_) => square_matrix(
                2,
                &[
                    Complex::from_real(cos_half),
                    Complex::from_real(-sin_half),
                    Complex::from_real(sin_half),
                    Complex::from_real(cos_half),
                ],
            ),
            RotationGate::RotationZ(_) => diagonal_matrix(&[
                Complex::new(cos_half, -sin_half),
                Complex::new(cos_half, sin_half),
            ]),
            RotationGate::PhaseRotation(_) => {
                diagonal_matrix(&[ONE, Complex::from_polar(1.0, theta)])
            }
        }
    }
}

impl QuantumGateInterface for RotationGate {
    fn gate_name(&self) -> &str {
        match self {
            RotationGate::RotationX(_) => "RX",
            RotationGate::RotationY(_) => "RY",
            RotationGate::RotationZ(_) => "RZ",
            RotationGate::PhaseRotation(_) => "R1",
        }
    }

    fn number_of_quantum_bits(&self) -> usize {
        1
    }

    fn gate_matrix(&self) -> ComplexMatrix {
        self.matrix()
    }
}

// =============================================================================
// 4. Projectors and density matrices
// =============================================================================

/// Ket-bra `|v><v|`: entry (i, j) is `v_i * conj(v_j)`.
pub fn density_matrix(state: &ComplexVector) -> ComplexMatrix {
    state.outer(&state.conjugate())
}

pub fn measurement_projector_z_plus() -> ComplexMatrix {
    StandardGate::ProjectorZPlus.matrix()
}
