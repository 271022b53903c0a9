// =============================================================================
// Qubit Lens - Simulator Configuration
// =============================================================================
// Table of Contents:
//   1. SimulatorConfiguration
//   2. Presets
//   3. TOML loading and saving
// =============================================================================
// Purpose: Numeric tolerances, rendering precision, measurement seeding and
//          the dense-size ceiling shared by the runtime components.
// =============================================================================

use crate::error::{ConfigurationError, QuantumResult};
use complex_algebra::Tolerance;
use complex_algebra::formatting::DEFAULT_DISPLAY_PRECISION;
use serde::{Deserialize, Serialize};

// Dense operators on more qubits than this are refused by default (2^12 x 2^12).
pub const DEFAULT_MAXIMUM_QUANTUM_BITS: usize = 12;

// =============================================================================
// 1. SimulatorConfiguration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfiguration {
    pub absolute_tolerance: f64,
    pub relative_tolerance: f64,
    pub display_precision: usize,
    pub measurement_seed: Option<u64>,
    pub maximum_quantum_bits: usize,
}

impl Default for SimulatorConfiguration {
    fn default() -> Self {
        Self {
            absolute_tolerance: Tolerance::DOUBLE_PRECISION.absolute,
            relative_tolerance: Tolerance::DOUBLE_PRECISION.relative,
            display_precision: DEFAULT_DISPLAY_PRECISION,
            measurement_seed: None,
            maximum_quantum_bits: DEFAULT_MAXIMUM_QUANTUM_BITS,
        }
    }
}

// =============================================================================
// 2. Presets
// =============================================================================

impl SimulatorConfiguration {
    pub fn high_accuracy() -> Self {
        Self {
            absolute_tolerance: 1e-12,
            relative_tolerance: 1e-14,
            display_precision: 10,
            ..Self::default()
        }
    }

    pub fn single_precision() -> Self {
        Self {
            absolute_tolerance: Tolerance::SINGLE_PRECISION.absolute,
            relative_tolerance: Tolerance::SINGLE_PRECISION.relative,
            ..Self::default()
        }
    }

    pub fn with_measurement_seed(mut self, seed: u64) -> Self {
        self.measurement_seed = Some(seed);
        self
    }

    pub fn with_maximum_quantum_bits(mut self, maximum_quantum_bits: usize) -> Self {
        self.maximum_quantum_bits = maximum_quantum_bits;
        self
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.absolute_tolerance, self.relative_tolerance)
    }

    pub fn validate(&self) -> QuantumResult<()> {
        if !(self.absolute_tolerance.is_finite() && self.absolute_tolerance >= 0.0) {
            return Err(ConfigurationError::InvalidValue {
                field: "absolute_tolerance",
                reason: format!("{} is not a finite non-negative number", self.absolute_tolerance),
            }
            .into());
        }
        if !(self.relative_tolerance.is_finite() && self.relative_tolerance >= 0.0) {
            return Err(ConfigurationError::InvalidValue {
                field: "relative_tolerance",
                reason: format!("{} is not a finite non-negative number", self.relative_tolerance),
            }
            .into());
        }
        // 2^N x 2^N entries must stay addressable.
        if self.maximum_quantum_bits == 0 || self.maximum_quantum_bits >= usize::BITS as usize / 2 {
            return Err(ConfigurationError::InvalidValue {
                field: "maximum_quantum_bits",
                reason: format!("{} is outside 1..{}", self.maximum_quantum_bits, usize::BITS / 2),
            }
            .into());
        }
        Ok(())
    }

    // =========================================================================
    // 3. TOML loading and saving
    // =========================================================================

    /// Parses and validates a configuration. Missing keys take default values.
    pub fn from_toml_str(text: &str) -> QuantumResult<Self> {
        let configuration: Self = toml::from_str(text).map_err(ConfigurationError::from)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn to_toml_string(&self) -> QuantumResult<String> {
        Ok(toml::to_string(self).map_err(ConfigurationError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumRuntimeError;

    #[test]
    fn test_default_configuration() {
        let configuration = SimulatorConfiguration::default();
        assert_eq!(configuration.tolerance(), Tolerance::DOUBLE_PRECISION);
        assert_eq!(configuration.maximum_quantum_bits, DEFAULT_MAXIMUM_QUANTUM_BITS);
        assert!(configuration.measurement_seed.is_none());
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            SimulatorConfiguration::single_precision().tolerance(),
            Tolerance::SINGLE_PRECISION
        );
        let accurate = SimulatorConfiguration::high_accuracy();
        assert!(accurate.absolute_tolerance < SimulatorConfiguration::default().absolute_tolerance);
    }

    #[test]
    fn test_toml_round_trip() {
        let configuration = SimulatorConfiguration::default().with_measurement_seed(42);
        let text = configuration.to_toml_string().unwrap();
        assert!(text.contains("measurement_seed = 42"));
        let parsed = SimulatorConfiguration::from_toml_str(&text).unwrap();
        assert_eq!(parsed, configuration);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = SimulatorConfiguration::from_toml_str("display_precision = 2\n").unwrap();
        assert_eq!(parsed.display_precision, 2);
        assert_eq!(parsed.maximum_quantum_bits, DEFAULT_MAXIMUM_QUANTUM_BITS);
    }

    #[test]
    fn test_invalid_toml() {
        let err =
            SimulatorConfiguration::from_toml_str("display_precision = \"wide\"").unwrap_err();
        assert!(matches!(
            err,
            QuantumRuntimeError::Configuration(ConfigurationError::Parse(_))
        ));

        let err = SimulatorConfiguration::from_toml_str("absolute_tolerance = -1.0").unwrap_err();
        assert!(matches!(
            err,
            QuantumRuntimeError::Configuration(ConfigurationError::InvalidValue { .. })
        ));
    }
}
