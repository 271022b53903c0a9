// =============================================================================
// Qubit Lens - State Rendering
// =============================================================================
// Table of Contents:
//   1. Matrix table
//   2. State-vector table
//   3. Ket strings
//   4. Decomposed-term strings
//   5. TextRenderer - renderers bound to the configured precision
// =============================================================================
// Purpose: Human-readable text for operators, states and decompositions.
//          Every renderer returns a String; nothing here prints.
// =============================================================================

use complex_algebra::formatting::{TextColumn, format_rounded, render_columns};
use complex_algebra::{Complex, ComplexMatrix, ComplexVector};
use serde::{Deserialize, Serialize};

use crate::configuration::SimulatorConfiguration;
use crate::error::QuantumResult;
use crate::state_decomposition::DecomposedTerm;
use crate::state_preparation::{basis_label, number_of_quantum_bits};

// =============================================================================
// 1. Matrix table
// =============================================================================

pub fn render_matrix(matrix: &ComplexMatrix, precision: usize) -> String {
    matrix.to_string_with_precision(precision)
}

// =============================================================================
// 2. State-vector table
// =============================================================================

/// Table of basis tag, amplitude and probability per basis state, closed by
/// a `sum` row.
pub fn render_state_vector_table(state: &ComplexVector, precision: usize) -> QuantumResult<String> {
    let n = number_of_quantum_bits(state)?;

    let mut tags = vec![String::new()];
    let mut amplitudes = vec!["states".to_string()];
    let mut probabilities = vec!["probability".to_string()];
    for (index, amplitude) in state.iter().enumerate() {
        tags.push(basis_label(index, n));
        amplitudes.push(amplitude.to_string_with_precision(precision));
        probabilities.push(format_rounded(amplitude.modulus_square(), precision));
    }
    tags.push("sum".to_string());
    amplitudes.push(state.iter().sum::<Complex>().to_string_with_precision(precision));
    probabilities.push(format_rounded(state.norm_square(), precision));

    Ok(render_columns(&[
        TextColumn::right_aligned(tags),
        TextColumn::separator(" | "),
        TextColumn::right_aligned(amplitudes),
        TextColumn::separator(" | "),
        TextColumn::right_aligned(probabilities),
        TextColumn::separator(" |"),
    ]))
}

// =============================================================================
// 3. Ket strings
// =============================================================================

/// Wraps multi-part values such as `0.5-0.5i` in parentheses.
fn parenthesize_compound(text: String) -> String {
    if text.chars().skip(1).any(|character| character == '+' || character == '-') {
        format!("({text})")
    } else {
        text
    }
}

/// Sum of `amplitude|bits>` terms, e.g. `0.7071|00>+0.7071|11>`. Amplitudes
/// that round to zero are omitted; an all-zero state renders as `0`.
pub fn state_vector_to_ket_string(
    state: &ComplexVector,
    precision: usize,
) -> QuantumResult<String> {
    let n = number_of_quantum_bits(state)?;
    let mut rendered = String::new();
    for (index, amplitude) in state.iter().enumerate() {
        let value = amplitude.to_string_with_precision(precision);
        if value == "0" {
            continue;
        }
        let term = format!("{}{}", parenthesize_compound(value), basis_label(index, n));
        if !rendered.is_empty() && !term.starts_with('-') {
            rendered.push('+');
        }
        rendered.push_str(&term);
    }
    if rendered.is_empty() {
        rendered.push('0');
    }
    Ok(rendered)
}

// =============================================================================
// 4. Decomposed-term strings
// =============================================================================

/// Renders `c1((A1) ⊗ (B1)) + c2((A2) ⊗ (B2)) ...`.
pub fn decomposed_terms_to_string(
    terms: &[DecomposedTerm],
    precision: usize,
) -> QuantumResult<String> {
    let mut rendered = String::new();
    for term in terms {
        let coefficient =
            parenthesize_compound(term.coefficient.to_string_with_precision(precision));
        let factor_a =
            parenthesize_compound(state_vector_to_ket_string(&term.factor_a, precision)?);
        let factor_b =
            parenthesize_compound(state_vector_to_ket_string(&term.factor_b, precision)?);
        let body = format!("({factor_a} ⊗ {factor_b})");

        if rendered.is_empty() {
            rendered.push_str(&format!("{coefficient}{body}"));
        } else if let Some(magnitude) = coefficient.strip_prefix('-') {
            rendered.push_str(&format!(" - {magnitude}{body}"));
        } else {
            rendered.push_str(&format!(" + {coefficient}{body}"));
        }
    }
    Ok(rendered)
}

// =============================================================================
// 5. TextRenderer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRenderer {
    pub display_precision: usize,
}

impl TextRenderer {
    pub fn new(display_precision: usize) -> Self {
        Self { display_precision }
    }

    pub fn from_configuration(configuration: &SimulatorConfiguration) -> Self {
        Self::new(configuration.display_precision)
    }

    pub fn matrix(&self, matrix: &ComplexMatrix) -> String {
        render_matrix(matrix, self.display_precision)
    }

    pub fn state_vector_table(&self, state: &ComplexVector) -> QuantumResult<String> {
        render_state_vector_table(state, self.display_precision)
    }

    pub fn ket(&self, state: &ComplexVector) -> QuantumResult<String> {
        state_vector_to_ket_string(state, self.display_precision)
    }

    pub fn decomposed_terms(&self, terms: &[DecomposedTerm]) -> QuantumResult<String> {
        decomposed_terms_to_string(terms, self.display_precision)
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::from_configuration(&SimulatorConfiguration::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_decomposition::decompose_state;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn bell_state() -> ComplexVector {
        ComplexVector::from_values([FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2])
    }

    #[test]
    fn test_render_matrix() {
        let matrix =
            ComplexMatrix::from_rows(&[[(1.0, 0.0), (0.0, -1.0)], [(0.5, 0.5), (0.0, 0.0)]])
                .unwrap();
        assert_eq!(render_matrix(&matrix, 4), "|       1 -i|\n|0.5+0.5i  0|");
        assert_eq!(render_matrix(&matrix, 4), matrix.to_string_with_precision(4));
    }

    #[test]
    fn test_renderer_uses_configured_precision() {
        let configuration = SimulatorConfiguration::from_toml_str("display_precision = 2").unwrap();
        let renderer = TextRenderer::from_configuration(&configuration);
        assert_eq!(renderer.display_precision, 2);
        assert_eq!(renderer.ket(&bell_state()).unwrap(), "0.71|00>+0.71|11>");

        let terms = decompose_state(&bell_state(), &[0], None).unwrap();
        assert_eq!(
            renderer.decomposed_terms(&terms).unwrap(),
            "0.71(1|0> ⊗ 1|0>) + 0.71(1|1> ⊗ 1|1>)"
        );
        let table = renderer.state_vector_table(&bell_state()).unwrap();
        assert_eq!(table.lines().nth(1), Some("|00> |   0.71 |         0.5 |"));
        assert_eq!(TextRenderer::default().ket(&bell_state()).unwrap(), "0.7071|00>+0.7071|11>");
    }

    #[test]
    fn test_ket_string() {
        assert_eq!(
            state_vector_to_ket_string(&bell_state(), 4).unwrap(),
            "0.7071|00>+0.7071|11>"
        );
        let state = ComplexVector::from_values([(0.0, 0.0), (-0.6, 0.0), (0.0, 0.0), (0.0, 0.8)]);
        assert_eq!(state_vector_to_ket_string(&state, 4).unwrap(), "-0.6|01>+0.8i|11>");
        let compound = ComplexVector::from_values([(0.5, -0.5), (0.5, 0.5)]);
        assert_eq!(
            state_vector_to_ket_string(&compound, 4).unwrap(),
            "(0.5-0.5i)|0>+(0.5+0.5i)|1>"
        );
        assert_eq!(state_vector_to_ket_string(&ComplexVector::zeros(2), 4).unwrap(), "0");
    }

    #[test]
    fn test_state_vector_table() {
        let table = render_state_vector_table(&bell_state(), 4).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "     | states | probability |");
        assert_eq!(lines[1], "|00> | 0.7071 |         0.5 |");
        assert_eq!(lines[2], "|01> |      0 |           0 |");
        assert_eq!(lines[5], " sum | 1.4142 |           1 |");
    }

    #[test]
    fn test_decomposed_terms_to_string() {
        let terms = decompose_state(&bell_state(), &[0], None).unwrap();
        assert_eq!(
            decomposed_terms_to_string(&terms, 4).unwrap(),
            "0.7071(1|0> ⊗ 1|0>) + 0.7071(1|1> ⊗ 1|1>)"
        );

        let product = ComplexVector::from_values([0.5, -0.5, 0.5, -0.5]);
        let terms = decompose_state(&product, &[0], None).unwrap();
        assert_eq!(
            decomposed_terms_to_string(&terms, 4).unwrap(),
            "1((0.7071|0>+0.7071|1>) ⊗ (0.7071|0>-0.7071|1>))"
        );
    }
}
