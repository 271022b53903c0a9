// =============================================================================
// Qubit Lens - Measurement Module
// =============================================================================
// Table of Contents:
//   1. MeasurementOutcome / MeasurementResult
//   2. Projective measurement (Born rule)
//   3. ProjectiveMeasurementEngine - Seeded measurement source
//   4. MeasurementStatistics - Repeated-shot aggregation
// =============================================================================
// Purpose: Two-outcome projective measurement against a projector P.
//          Outcome +1 with probability |P psi|^2 collapses to P psi; outcome -1
//          collapses to psi - P psi. P must be an orthogonal projector; this
//          is not re-checked.
// =============================================================================

use complex_algebra::{ComplexMatrix, ComplexVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::configuration::SimulatorConfiguration;
use crate::error::{MeasurementError, QuantumResult};

// =============================================================================
// 1. MeasurementOutcome / MeasurementResult
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementOutcome {
    Plus,
    Minus,
}

impl MeasurementOutcome {
    pub fn eigenvalue(&self) -> i32 {
        match self {
            MeasurementOutcome::Plus => 1,
            MeasurementOutcome::Minus => -1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MeasurementResult {
    pub post_measurement_state: ComplexVector,
    pub outcome: MeasurementOutcome,
    /// Probability of the +1 outcome before the draw.
    pub probability_plus: f64,
}

// =============================================================================
// 2. Projective measurement
// =============================================================================

/// Measures with an explicit uniform draw `random_value` in [0, 1).
pub fn measure_with_draw(
    state: &ComplexVector,
    projector: &ComplexMatrix,
    random_value: f64,
) -> QuantumResult<MeasurementResult> {
    if projector.rows() != state.len() || projector.columns() != state.len() {
        return Err(MeasurementError::ProjectorDimensionMismatch {
            projector: projector.rows().max(projector.columns()),
            state: state.len(),
        }
        .into());
    }
    let projection = projector.apply_to_vector(state)?;
    let probability_plus = projection.norm_square();
    trace!(probability_plus, random_value, "measurement draw");

    let (outcome, collapsed) = if random_value < probability_plus {
        (MeasurementOutcome::Plus, projection)
    } else {
        (MeasurementOutcome::Minus, state.subtract_elementwise(&projection)?)
    };
    Ok(MeasurementResult {
        post_measurement_state: collapsed.normalize()?,
        outcome,
        probability_plus,
    })
}

pub fn measure_with_random_source<R: Rng + ?Sized>(
    state: &ComplexVector,
    projector: &ComplexMatrix,
    random_source: &mut R,
) -> QuantumResult<MeasurementResult> {
    let random_value: f64 = random_source.gen_range(0.0..1.0);
    measure_with_draw(state, projector, random_value)
}

pub fn measure_state(
    state: &ComplexVector,
    projector: &ComplexMatrix,
) -> QuantumResult<MeasurementResult> {
    measure_with_random_source(state, projector, &mut rand::thread_rng())
}

/// Measures `shots` fresh copies of `state` and aggregates the outcomes.
pub fn sample_measurement_statistics<R: Rng + ?Sized>(
    state: &ComplexVector,
    projector: &ComplexMatrix,
    shots: usize,
    random_source: &mut R,
) -> QuantumResult<MeasurementStatistics> {
    if shots == 0 {
        return Err(MeasurementError::InvalidShotCount(shots).into());
    }
    let mut plus_count = 0usize;
    let mut probability_plus = 0.0;
    for _ in 0..shots {
        let result = measure_with_random_source(state, projector, random_source)?;
        probability_plus = result.probability_plus;
        if result.outcome == MeasurementOutcome::Plus {
            plus_count += 1;
        }
    }
    debug!(shots, plus_count, "sampled measurement statistics");
    Ok(MeasurementStatistics {
        total_shots: shots,
        plus_count,
        minus_count: shots - plus_count,
        expected_plus_probability: probability_plus,
    })
}

// =============================================================================
// 3. ProjectiveMeasurementEngine
// =============================================================================

/// Measurement source seeded from configuration, or from entropy when no
/// seed is configured.
#[derive(Debug, Clone)]
pub struct ProjectiveMeasurementEngine {
    random_source: StdRng,
}

impl ProjectiveMeasurementEngine {
    pub fn new(configuration: &SimulatorConfiguration) -> Self {
        let random_source = match configuration.measurement_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { random_source }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            random_source: StdRng::seed_from_u64(seed),
        }
    }

    pub fn measure(
        &mut self,
        state: &ComplexVector,
        projector: &ComplexMatrix,
    ) -> QuantumResult<MeasurementResult> {
        measure_with_random_source(state, projector, &mut self.random_source)
    }

    pub fn sample_statistics(
        &mut self,
        state: &ComplexVector,
        projector: &ComplexMatrix,
        shots: usize,
    ) -> QuantumResult<MeasurementStatistics> {
        sample_measurement_statistics(state, projector, shots, &mut self.random_source)
    }
}

// =============================================================================
// 4. MeasurementStatistics
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementStatistics {
    pub total_shots: usize,
    pub plus_count: usize,
    pub minus_count: usize,
    pub expected_plus_probability: f64,
}

impl MeasurementStatistics {
    pub fn count_of(&self, outcome: MeasurementOutcome) -> usize {
        match outcome {
            MeasurementOutcome::Plus => self.plus_count,
            MeasurementOutcome::Minus => self.minus_count,
        }
    }

    pub fn frequency_of(&self, outcome: MeasurementOutcome) -> f64 {
        self.count_of(outcome) as f64 / self.total_shots as f64
    }

    /// Shannon entropy of the observed outcome frequencies, in bits.
    pub fn entropy(&self) -> f64 {
        [MeasurementOutcome::Plus, MeasurementOutcome::Minus]
            .iter()
            .map(|&outcome| self.frequency_of(outcome))
            .filter(|&p| p > 0.0)
            .map(|p| -p * p.log2())
            .sum()
    }

    pub fn mean_eigenvalue(&self) -> f64 {
        (self.plus_count as f64 - self.minus_count as f64) / self.total_shots as f64
    }
}
