// =============================================================================
// Qubit Lens - Complex Vector
// =============================================================================
// Table of Contents:
//   1. ComplexVector - dense vector over an interleaved re/im buffer
//   2. Construction and element access
//   3. Element-wise operations (pure and in-place)
//   4. Linear algebra (dot, outer, tensor, normalize, project)
//   5. Equality and Display
// =============================================================================
// Purpose: Amplitude vectors of dimension 2^n and generic algebraic vectors.
//          Element i lives at buffer offsets [2i, 2i + 1]. In-place variants
//          return `&mut Self` so calls can be chained.
// =============================================================================

use crate::complex::Complex;
use crate::complex_matrix::ComplexMatrix;
use crate::error::{AlgebraError, AlgebraResult};
use crate::formatting::DEFAULT_DISPLAY_PRECISION;
use crate::tolerance::Tolerance;
use num_complex::Complex64;
use std::fmt;

// =============================================================================
// 1. ComplexVector
// =============================================================================

#[derive(Debug, Clone)]
pub struct ComplexVector {
    buffer: Vec<f64>,
}

impl ComplexVector {
    // =========================================================================
    // 2. Construction and element access
    // =========================================================================

    pub fn zeros(length: usize) -> Self {
        Self {
            buffer: vec![0.0; length * 2],
        }
    }

    pub fn basis(length: usize, index: usize) -> Self {
        let mut vector = Self::zeros(length);
        vector.set(index, Complex::ONE);
        vector
    }

    pub fn from_values<I, C>(values: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Complex>,
    {
        let mut buffer = Vec::new();
        for value in values {
            let value: Complex = value.into();
            buffer.push(value.real());
            buffer.push(value.imaginary());
        }
        Self { buffer }
    }

    /// Builds a vector from an interleaved buffer; `None` if its length is odd.
    pub fn from_interleaved(buffer: Vec<f64>) -> Option<Self> {
        if buffer.len() % 2 == 0 {
            Some(Self { buffer })
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn get(&self, index: usize) -> Complex {
        Complex::new(self.buffer[index << 1], self.buffer[index << 1 | 1])
    }

    pub fn set(&mut self, index: usize, value: Complex) -> &mut Self {
        self.buffer[index << 1] = value.real();
        self.buffer[index << 1 | 1] = value.imaginary();
        self
    }

    pub fn fill(&mut self, value: Complex) -> &mut Self {
        for pair in self.buffer.chunks_exact_mut(2) {
            pair[0] = value.real();
            pair[1] = value.imaginary();
        }
        self
    }

    pub fn copy_from(&mut self, source: &ComplexVector, offset: usize) -> AlgebraResult<&mut Self> {
        if offset + source.len() > self.len() {
            return Err(AlgebraError::dimension_mismatch(
                "copy_from",
                (self.len(), 1),
                (offset + source.len(), 1),
            ));
        }
        let start = offset << 1;
        self.buffer[start..start + source.buffer.len()].copy_from_slice(&source.buffer);
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = Complex> + '_ {
        self.buffer
            .chunks_exact(2)
            .map(|pair| Complex::new(pair[0], pair[1]))
    }

    pub fn interleaved_buffer(&self) -> &[f64] {
        &self.buffer
    }

    pub fn as_complex64_slice(&self) -> &[Complex64] {
        bytemuck::cast_slice(&self.buffer)
    }

    pub fn as_complex64_slice_mut(&mut self) -> &mut [Complex64] {
        bytemuck::cast_slice_mut(&mut self.buffer)
    }

    fn ensure_same_length(
        &self,
        other: &ComplexVector,
        operation: &'static str,
    ) -> AlgebraResult<()> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(AlgebraError::dimension_mismatch(
                operation,
                (self.len(), 1),
                (other.len(), 1),
            ))
        }
    }

    fn map_pairs_in_place<F>(&mut self, other: &ComplexVector, operation: F)
    where
        F: Fn(Complex, Complex) -> Complex,
    {
        for (pair, other_pair) in self
            .buffer
            .chunks_exact_mut(2)
            .zip(other.buffer.chunks_exact(2))
        {
            let result = operation(
                Complex::new(pair[0], pair[1]),
                Complex::new(other_pair[0], other_pair[1]),
            );
            pair[0] = result.real();
            pair[1] = result.imaginary();
        }
    }

    fn map_in_place<F>(&mut self, operation: F)
    where
        F: Fn(Complex) -> Complex,
    {
        for pair in self.buffer.chunks_exact_mut(2) {
            let result = operation(Complex::new(pair[0], pair[1]));
            pair[0] = result.real();
            pair[1] = result.imaginary();
        }
    }

    // =========================================================================
    // 3. Element-wise operations
    // =========================================================================

    pub fn add_elementwise(&self, other: &ComplexVector) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.add_elementwise_in_place(other)?;
        Ok(result)
    }

    pub fn add_elementwise_in_place(&mut self, other: &ComplexVector) -> AlgebraResult<&mut Self> {
        self.ensure_same_length(other, "add")?;
        for (value, other_value) in self.buffer.iter_mut().zip(other.buffer.iter()) {
            *value += other_value;
        }
        Ok(self)
    }

    pub fn subtract_elementwise(&self, other: &ComplexVector) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.subtract_elementwise_in_place(other)?;
        Ok(result)
    }

    pub fn subtract_elementwise_in_place(
        &mut self,
        other: &ComplexVector,
    ) -> AlgebraResult<&mut Self> {
        self.ensure_same_length(other, "subtract")?;
        for (value, other_value) in self.buffer.iter_mut().zip(other.buffer.iter()) {
            *value -= other_value;
        }
        Ok(self)
    }

    pub fn multiply_elementwise(&self, other: &ComplexVector) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.multiply_elementwise_in_place(other)?;
        Ok(result)
    }

    pub fn multiply_elementwise_in_place(
        &mut self,
        other: &ComplexVector,
    ) -> AlgebraResult<&mut Self> {
        self.ensure_same_length(other, "multiply")?;
        self.map_pairs_in_place(other, |a, b| a * b);
        Ok(self)
    }

    pub fn divide_elementwise(&self, other: &ComplexVector) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.divide_elementwise_in_place(other)?;
        Ok(result)
    }

    pub fn divide_elementwise_in_place(
        &mut self,
        other: &ComplexVector,
    ) -> AlgebraResult<&mut Self> {
        self.ensure_same_length(other, "divide")?;
        let tolerance = Tolerance::default();
        if other.iter().any(|value| value.is_zero(tolerance)) {
            return Err(AlgebraError::DivideByZero);
        }
        self.map_pairs_in_place(other, |a, b| a / b);
        Ok(self)
    }

    pub fn invert_elementwise(&self) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.invert_elementwise_in_place()?;
        Ok(result)
    }

    pub fn invert_elementwise_in_place(&mut self) -> AlgebraResult<&mut Self> {
        let tolerance = Tolerance::default();
        if self.iter().any(|value| value.is_zero(tolerance)) {
            return Err(AlgebraError::DivideByZero);
        }
        self.map_in_place(|value| Complex::ONE / value);
        Ok(self)
    }

    pub fn negate(&self) -> Self {
        let mut result = self.clone();
        result.negate_in_place();
        result
    }

    pub fn negate_in_place(&mut self) -> &mut Self {
        for value in &mut self.buffer {
            *value = -*value;
        }
        self
    }

    pub fn conjugate(&self) -> Self {
        let mut result = self.clone();
        result.conjugate_in_place();
        result
    }

    pub fn conjugate_in_place(&mut self) -> &mut Self {
        for pair in self.buffer.chunks_exact_mut(2) {
            pair[1] = -pair[1];
        }
        self
    }

    pub fn scale_by(&self, factor: Complex) -> Self {
        let mut result = self.clone();
        result.scale_by_in_place(factor);
        result
    }

    pub fn scale_by_in_place(&mut self, factor: Complex) -> &mut Self {
        self.map_in_place(|value| value * factor);
        self
    }

    // =========================================================================
    // 4. Linear algebra
    // =========================================================================

    /// `Σ self_i * conj(other_i)`, conjugate-linear in the second argument.
    pub fn dot(&self, other: &ComplexVector) -> AlgebraResult<Complex> {
        self.ensure_same_length(other, "dot")?;
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a * b.conjugate())
            .sum())
    }

    /// `result[i, j] = self_i * other_j` without conjugation.
    pub fn outer(&self, other: &ComplexVector) -> ComplexMatrix {
        let mut result = ComplexMatrix::zeros(self.len(), other.len());
        for (i, a) in self.iter().enumerate() {
            for (j, b) in other.iter().enumerate() {
                result.set(i, j, a * b);
            }
        }
        result
    }

    /// Kronecker product: `result[i * other.len() + j] = self_i * other_j`.
    pub fn tensor(&self, other: &ComplexVector) -> Self {
        let mut result = Self::zeros(self.len() * other.len());
        for (i, a) in self.iter().enumerate() {
            for (j, b) in other.iter().enumerate() {
                result.set(i * other.len() + j, a * b);
            }
        }
        result
    }

    pub fn norm_square(&self) -> f64 {
        self.buffer.iter().map(|value| value * value).sum()
    }

    pub fn norm(&self) -> f64 {
        self.norm_square().sqrt()
    }

    pub fn normalize(&self) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.normalize_in_place()?;
        Ok(result)
    }

    pub fn normalize_in_place(&mut self) -> AlgebraResult<&mut Self> {
        let norm = self.norm();
        if Tolerance::default().is_negligible(norm) {
            return Err(AlgebraError::DivideByZero);
        }
        let inverse = 1.0 / norm;
        for value in &mut self.buffer {
            *value *= inverse;
        }
        Ok(self)
    }

    /// Component of `self` along `direction`:
    /// `direction * <self, direction> / <direction, direction>`.
    pub fn project_onto(&self, direction: &ComplexVector) -> AlgebraResult<Self> {
        let numerator = self.dot(direction)?;
        let denominator = direction.dot(direction)?;
        Ok(direction.scale_by(numerator.divide(denominator)?))
    }

    // =========================================================================
    // 5. Equality and Display
    // =========================================================================

    pub fn approximately_equal(&self, other: &ComplexVector) -> bool {
        self.approximately_equal_with(other, Tolerance::default())
    }

    pub fn approximately_equal_with(&self, other: &ComplexVector, tolerance: Tolerance) -> bool {
        self.len() == other.len()
            && self
                .buffer
                .iter()
                .zip(other.buffer.iter())
                .all(|(&a, &b)| tolerance.values_equal(a, b))
    }

    pub fn to_string_with_precision(&self, precision: usize) -> String {
        let entries: Vec<String> = self
            .iter()
            .map(|value| value.to_string_with_precision(precision))
            .collect();
        format!("|{}|", entries.join(" "))
    }
}

impl PartialEq for ComplexVector {
    fn eq(&self, other: &Self) -> bool {
        self.approximately_equal(other)
    }
}

impl FromIterator<Complex> for ComplexVector {
    fn from_iter<I: IntoIterator<Item = Complex>>(iter: I) -> Self {
        ComplexVector::from_values(iter)
    }
}

impl fmt::Display for ComplexVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_DISPLAY_PRECISION);
        f.write_str(&self.to_string_with_precision(precision))
    }
}
