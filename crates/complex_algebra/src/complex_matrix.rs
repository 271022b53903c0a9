// =============================================================================
// Qubit Lens - Complex Matrix
// =============================================================================
// Table of Contents:
//   1. ComplexMatrix - row-major interleaved dense matrix
//   2. Construction and element access
//   3. Element-wise operations
//   4. Products (matrix, matrix-vector, Kronecker)
//   5. Transpose, conjugate, adjoint
//   6. LU decomposition and determinant
//   7. Gauss-Jordan inversion
//   8. ndarray interop
//   9. Equality and Display
// =============================================================================
// Purpose: Operators of dimension 2^N x 2^N acting on amplitude vectors.
//          Entry (i, j) lives at buffer offsets [2(i*columns + j), +1].
// =============================================================================

use crate::complex::Complex;
use crate::complex_vector::ComplexVector;
use crate::error::{AlgebraError, AlgebraResult};
use crate::formatting::{DEFAULT_DISPLAY_PRECISION, TextColumn, render_columns};
use crate::tolerance::Tolerance;
use ndarray::Array2;
use num_complex::Complex64;
use std::fmt;

// =============================================================================
// 1. ComplexMatrix
// =============================================================================

#[derive(Debug, Clone)]
pub struct ComplexMatrix {
    rows: usize,
    columns: usize,
    buffer: Vec<f64>,
}

impl ComplexMatrix {
    // =========================================================================
    // 2. Construction and element access
    // =========================================================================

    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            buffer: vec![0.0; rows * columns * 2],
        }
    }

    pub fn identity(dimension: usize) -> Self {
        let mut matrix = Self::zeros(dimension, dimension);
        for index in 0..dimension {
            matrix.set(index, index, Complex::ONE);
        }
        matrix
    }

    /// Builds a matrix from nested rows. All rows must have the same length.
    pub fn from_rows<R, C>(rows: &[R]) -> AlgebraResult<Self>
    where
        R: AsRef<[C]>,
        C: Into<Complex> + Copy,
    {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());
        let mut matrix = Self::zeros(rows.len(), columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(AlgebraError::dimension_mismatch(
                    "from_rows",
                    (i, columns),
                    (i, row.len()),
                ));
            }
            for (j, value) in row.iter().enumerate() {
                matrix.set(i, j, (*value).into());
            }
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        (row * self.columns + column) << 1
    }

    pub fn get(&self, row: usize, column: usize) -> Complex {
        let offset = self.offset(row, column);
        Complex::new(self.buffer[offset], self.buffer[offset + 1])
    }

    pub fn set(&mut self, row: usize, column: usize, value: Complex) -> &mut Self {
        let offset = self.offset(row, column);
        self.buffer[offset] = value.real();
        self.buffer[offset + 1] = value.imaginary();
        self
    }

    pub fn row(&self, row: usize) -> ComplexVector {
        (0..self.columns).map(|column| self.get(row, column)).collect()
    }

    pub fn column(&self, column: usize) -> ComplexVector {
        (0..self.rows).map(|row| self.get(row, column)).collect()
    }

    pub fn interleaved_buffer(&self) -> &[f64] {
        &self.buffer
    }

    pub fn as_complex64_slice(&self) -> &[Complex64] {
        bytemuck::cast_slice(&self.buffer)
    }

    fn swap_rows(&mut self, first: usize, second: usize) {
        if first == second {
            return;
        }
        let width = self.columns << 1;
        let (low, high) = if first < second { (first, second) } else { (second, first) };
        let (head, tail) = self.buffer.split_at_mut(high * width);
        head[low * width..(low + 1) * width].swap_with_slice(&mut tail[..width]);
    }

    fn swap_columns(&mut self, first: usize, second: usize) {
        if first == second {
            return;
        }
        for row in 0..self.rows {
            let a = self.get(row, first);
            let b = self.get(row, second);
            self.set(row, first, b);
            self.set(row, second, a);
        }
    }

    fn ensure_same_shape(
        &self,
        other: &ComplexMatrix,
        operation: &'static str,
    ) -> AlgebraResult<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(AlgebraError::dimension_mismatch(operation, self.shape(), other.shape()))
        }
    }

    fn ensure_square(&self, operation: &'static str) -> AlgebraResult<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(AlgebraError::dimension_mismatch(
                operation,
                self.shape(),
                (self.rows, self.rows),
            ))
        }
    }

    fn largest_entry_modulus(&self) -> f64 {
        self.buffer
            .chunks_exact(2)
            .map(|pair| (pair[0] * pair[0] + pair[1] * pair[1]).sqrt())
            .fold(0.0, f64::max)
    }

    /// Pivots at or below this modulus are treated as zero.
    fn pivot_threshold(&self) -> f64 {
        self.rows as f64 * f64::EPSILON * self.largest_entry_modulus()
    }

    // =========================================================================
    // 3. Element-wise operations
    // =========================================================================

    pub fn add_elementwise(&self, other: &ComplexMatrix) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.add_elementwise_in_place(other)?;
        Ok(result)
    }

    pub fn add_elementwise_in_place(&mut self, other: &ComplexMatrix) -> AlgebraResult<&mut Self> {
        self.ensure_same_shape(other, "add")?;
        for (value, other_value) in self.buffer.iter_mut().zip(other.buffer.iter()) {
            *value += other_value;
        }
        Ok(self)
    }

    pub fn subtract_elementwise(&self, other: &ComplexMatrix) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.subtract_elementwise_in_place(other)?;
        Ok(result)
    }

    pub fn subtract_elementwise_in_place(
        &mut self,
        other: &ComplexMatrix,
    ) -> AlgebraResult<&mut Self> {
        self.ensure_same_shape(other, "subtract")?;
        for (value, other_value) in self.buffer.iter_mut().zip(other.buffer.iter()) {
            *value -= other_value;
        }
        Ok(self)
    }

    pub fn scale_by(&self, factor: Complex) -> Self {
        let mut result = self.clone();
        result.scale_by_in_place(factor);
        result
    }

    pub fn scale_by_in_place(&mut self, factor: Complex) -> &mut Self {
        for pair in self.buffer.chunks_exact_mut(2) {
            let value = Complex::new(pair[0], pair[1]) * factor;
            pair[0] = value.real();
            pair[1] = value.imaginary();
        }
        self
    }

    pub fn negate(&self) -> Self {
        let mut result = self.clone();
        for value in &mut result.buffer {
            *value = -*value;
        }
        result
    }

    // =========================================================================
    // 4. Products
    // =========================================================================

    pub fn multiply(&self, other: &ComplexMatrix) -> AlgebraResult<Self> {
        if self.columns != other.rows {
            return Err(AlgebraError::dimension_mismatch(
                "multiply",
                self.shape(),
                other.shape(),
            ));
        }
        let mut result = Self::zeros(self.rows, other.columns);
        for i in 0..self.rows {
            for k in 0..self.columns {
                let left = self.get(i, k);
                if left.real() == 0.0 && left.imaginary() == 0.0 {
                    continue;
                }
                for j in 0..other.columns {
                    let offset = result.offset(i, j);
                    let product = left * other.get(k, j);
                    result.buffer[offset] += product.real();
                    result.buffer[offset + 1] += product.imaginary();
                }
            }
        }
        Ok(result)
    }

    pub fn multiply_in_place(&mut self, other: &ComplexMatrix) -> AlgebraResult<&mut Self> {
        *self = self.multiply(other)?;
        Ok(self)
    }

    pub fn apply_to_vector(&self, vector: &ComplexVector) -> AlgebraResult<ComplexVector> {
        if self.columns != vector.len() {
            return Err(AlgebraError::dimension_mismatch(
                "apply_to_vector",
                self.shape(),
                (vector.len(), 1),
            ));
        }
        Ok((0..self.rows)
            .map(|i| {
                (0..self.columns)
                    .map(|j| self.get(i, j) * vector.get(j))
                    .sum::<Complex>()
            })
            .collect())
    }

    /// Kronecker product: block (i, j) of the result is `self[i, j] * other`.
    pub fn tensor(&self, other: &ComplexMatrix) -> Self {
        let mut result = Self::zeros(self.rows * other.rows, self.columns * other.columns);
        for i in 0..self.rows {
            for j in 0..self.columns {
                let block = self.get(i, j);
                for k in 0..other.rows {
                    for l in 0..other.columns {
                        result.set(
                            i * other.rows + k,
                            j * other.columns + l,
                            block * other.get(k, l),
                        );
                    }
                }
            }
        }
        result
    }

    // =========================================================================
    // 5. Transpose, conjugate, adjoint
    // =========================================================================

    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.columns, self.rows);
        for i in 0..self.rows {
            for j in 0..self.columns {
                result.set(j, i, self.get(i, j));
            }
        }
        result
    }

    pub fn conjugate(&self) -> Self {
        let mut result = self.clone();
        for pair in result.buffer.chunks_exact_mut(2) {
            pair[1] = -pair[1];
        }
        result
    }

    pub fn adjoint(&self) -> Self {
        self.transpose().conjugate()
    }

    pub fn is_unitary(&self, tolerance: Tolerance) -> bool {
        self.is_square()
            && self
                .multiply(&self.adjoint())
                .is_ok_and(|product| {
                    product.approximately_equal_with(&Self::identity(self.rows), tolerance)
                })
    }

    // =========================================================================
    // 6. LU decomposition and determinant
    // =========================================================================

    /// Doolittle LU with partial pivoting, in place.
    ///
    /// On success the strict lower triangle holds L (unit diagonal implied),
    /// the upper triangle holds U, and the returned vector maps each row of
    /// the factorisation to its original row index.
    pub fn lu_decompose(&mut self) -> AlgebraResult<Vec<usize>> {
        self.ensure_square("lu_decompose")?;
        let dimension = self.rows;
        let threshold = self.pivot_threshold();
        let mut permutation: Vec<usize> = (0..dimension).collect();

        for k in 0..dimension {
            let mut pivot_row = k;
            let mut largest = self.get(k, k).modulus_square();
            for i in (k + 1)..dimension {
                let candidate = self.get(i, k).modulus_square();
                if candidate > largest {
                    largest = candidate;
                    pivot_row = i;
                }
            }
            if largest.sqrt() <= threshold {
                return Err(AlgebraError::SingularMatrix { dimension });
            }
            self.swap_rows(k, pivot_row);
            permutation.swap(k, pivot_row);

            let pivot = self.get(k, k);
            for i in (k + 1)..dimension {
                let factor = self.get(i, k) / pivot;
                self.set(i, k, factor);
                for j in (k + 1)..dimension {
                    let updated = self.get(i, j) - factor * self.get(k, j);
                    self.set(i, j, updated);
                }
            }
        }
        Ok(permutation)
    }

    /// Determinant via LU; a singular matrix yields zero.
    pub fn determinant(&self) -> AlgebraResult<Complex> {
        self.ensure_square("determinant")?;
        let mut factors = self.clone();
        let permutation = match factors.lu_decompose() {
            Ok(permutation) => permutation,
            Err(AlgebraError::SingularMatrix { .. }) => return Ok(Complex::ZERO),
            Err(other) => return Err(other),
        };
        let mut determinant = (0..self.rows).fold(Complex::ONE, |product, index| {
            product * factors.get(index, index)
        });
        if permutation_is_odd(&permutation) {
            determinant = -determinant;
        }
        Ok(determinant)
    }

    // =========================================================================
    // 7. Gauss-Jordan inversion
    // =========================================================================

    pub fn invert(&self) -> AlgebraResult<Self> {
        let mut result = self.clone();
        result.invert_in_place()?;
        Ok(result)
    }

    /// Gauss-Jordan elimination with full pivoting.
    ///
    /// Each step moves the largest remaining entry among un-pivoted rows and
    /// columns onto the diagonal; column interchanges are undone at the end.
    pub fn invert_in_place(&mut self) -> AlgebraResult<&mut Self> {
        self.ensure_square("invert")?;
        let dimension = self.rows;
        let threshold = self.pivot_threshold();
        let mut pivoted = vec![false; dimension];
        let mut row_index = vec![0usize; dimension];
        let mut column_index = vec![0usize; dimension];

        for step in 0..dimension {
            let mut pivot: Option<(usize, usize, f64)> = None;
            for j in (0..dimension).filter(|&j| !pivoted[j]) {
                for k in (0..dimension).filter(|&k| !pivoted[k]) {
                    let candidate = self.get(j, k).modulus_square();
                    if pivot.is_none_or(|(_, _, largest)| candidate > largest) {
                        pivot = Some((j, k, candidate));
                    }
                }
            }
            let Some((pivot_row, pivot_column, largest)) = pivot else {
                return Err(AlgebraError::SingularMatrix { dimension });
            };
            if largest.sqrt() <= threshold {
                return Err(AlgebraError::SingularMatrix { dimension });
            }

            pivoted[pivot_column] = true;
            self.swap_rows(pivot_row, pivot_column);
            row_index[step] = pivot_row;
            column_index[step] = pivot_column;

            let pivot_inverse = Complex::ONE / self.get(pivot_column, pivot_column);
            self.set(pivot_column, pivot_column, Complex::ONE);
            for column in 0..dimension {
                let scaled = self.get(pivot_column, column) * pivot_inverse;
                self.set(pivot_column, column, scaled);
            }

            for row in (0..dimension).filter(|&row| row != pivot_column) {
                let factor = self.get(row, pivot_column);
                self.set(row, pivot_column, Complex::ZERO);
                for column in 0..dimension {
                    let updated = self.get(row, column) - self.get(pivot_column, column) * factor;
                    self.set(row, column, updated);
                }
            }
        }

        for step in (0..dimension).rev() {
            self.swap_columns(row_index[step], column_index[step]);
        }
        Ok(self)
    }

    // =========================================================================
    // 8. ndarray interop
    // =========================================================================

    pub fn to_array2(&self) -> Array2<Complex64> {
        Array2::from_shape_fn((self.rows, self.columns), |(i, j)| self.get(i, j).into())
    }

    pub fn from_array2(array: &Array2<Complex64>) -> Self {
        let (rows, columns) = array.dim();
        let mut matrix = Self::zeros(rows, columns);
        for ((i, j), value) in array.indexed_iter() {
            matrix.set(i, j, (*value).into());
        }
        matrix
    }

    // =========================================================================
    // 9. Equality and Display
    // =========================================================================

    pub fn approximately_equal(&self, other: &ComplexMatrix) -> bool {
        self.approximately_equal_with(other, Tolerance::default())
    }

    pub fn approximately_equal_with(&self, other: &ComplexMatrix, tolerance: Tolerance) -> bool {
        self.shape() == other.shape()
            && self
                .buffer
                .iter()
                .zip(other.buffer.iter())
                .all(|(&a, &b)| tolerance.values_equal(a, b))
    }

    /// One `|...|` line per row, each column right-aligned to its widest entry.
    pub fn to_string_with_precision(&self, precision: usize) -> String {
        if self.rows == 0 {
            return String::new();
        }
        let mut columns = vec![TextColumn::separator("|")];
        for column in 0..self.columns {
            if column > 0 {
                columns.push(TextColumn::separator(" "));
            }
            columns.push(TextColumn::right_aligned(
                (0..self.rows)
                    .map(|row| self.get(row, column).to_string_with_precision(precision))
                    .collect(),
            ));
        }
        columns.push(TextColumn::separator("|"));
        render_columns(&columns)
    }
}

fn permutation_is_odd(permutation: &[usize]) -> bool {
    let mut visited = vec![false; permutation.len()];
    let mut transpositions = 0;
    for start in 0..permutation.len() {
        let mut cycle_length = 0;
        let mut index = start;
        while !visited[index] {
            visited[index] = true;
            index = permutation[index];
            cycle_length += 1;
        }
        if cycle_length > 0 {
            transpositions += cycle_length - 1;
        }
    }
    transpositions % 2 == 1
}

impl PartialEq for ComplexMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.approximately_equal(other)
    }
}

impl fmt::Display for ComplexMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_DISPLAY_PRECISION);
        f.write_str(&self.to_string_with_precision(precision))
    }
}
