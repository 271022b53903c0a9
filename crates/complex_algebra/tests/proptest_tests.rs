//! Property-based tests for complex_algebra using proptest
//!
//! Algebraic identities that must hold for arbitrary well-conditioned inputs.

use complex_algebra::{Complex, ComplexMatrix, ComplexVector, Tolerance};
use proptest::prelude::*;

fn complex_strategy() -> impl Strategy<Value = Complex> {
    (-10.0f64..10.0, -10.0f64..10.0).prop_map(|(real, imaginary)| Complex::new(real, imaginary))
}

fn nonzero_complex_strategy() -> impl Strategy<Value = Complex> {
    complex_strategy().prop_filter("divisor must be away from zero", |value| {
        value.magnitude() > 0.1
    })
}

fn vector_pair_strategy() -> impl Strategy<Value = (ComplexVector, ComplexVector)> {
    (1usize..8).prop_flat_map(|length| {
        (
            prop::collection::vec(complex_strategy(), length),
            prop::collection::vec(complex_strategy(), length),
        )
            .prop_map(|(left, right)| {
                (
                    ComplexVector::from_values(left),
                    ComplexVector::from_values(right),
                )
            })
    })
}

// Strictly diagonally dominant matrices, which are always invertible.
fn well_conditioned_matrix_strategy() -> impl Strategy<Value = ComplexMatrix> {
    (1usize..6).prop_flat_map(|dimension| {
        prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), dimension * dimension).prop_map(
            move |entries| {
                let mut matrix = ComplexMatrix::zeros(dimension, dimension);
                for (index, (real, imaginary)) in entries.into_iter().enumerate() {
                    let (row, column) = (index / dimension, index % dimension);
                    let mut value = Complex::new(real, imaginary);
                    if row == column {
                        value += Complex::from_real(2.0 * dimension as f64);
                    }
                    matrix.set(row, column, value);
                }
                matrix
            },
        )
    })
}

// ============================================================================
// Scalar Properties
// ============================================================================

proptest! {
    // Property: (a * b) / b = a for nonzero b
    #[test]
    fn multiply_then_divide_recovers_value(
        a in complex_strategy(),
        b in nonzero_complex_strategy()
    ) {
        let recovered = (a * b).divide(b).unwrap();
        prop_assert!(
            recovered.approximately_equal(&a),
            "(a*b)/b = {} but a = {}", recovered, a
        );
    }

    // Property: b * (1 / b) = 1
    #[test]
    fn inverse_is_multiplicative_inverse(b in nonzero_complex_strategy()) {
        let product = b * b.invert().unwrap();
        prop_assert!(product.approximately_equal(&Complex::ONE));
    }

    // Property: |a|^2 = a * conj(a)
    #[test]
    fn modulus_square_matches_conjugate_product(a in complex_strategy()) {
        let product = a * a.conjugate();
        let tolerance = Tolerance::new(1e-8, 1e-12);
        prop_assert!(tolerance.values_equal(product.real(), a.modulus_square()));
        prop_assert!(tolerance.is_negligible(product.imaginary()));
    }
}

// ============================================================================
// Vector Properties
// ============================================================================

proptest! {
    // Property: dot(u, v) = conj(dot(v, u))
    #[test]
    fn dot_is_conjugate_symmetric((u, v) in vector_pair_strategy()) {
        let forward = u.dot(&v).unwrap();
        let backward = v.dot(&u).unwrap();
        prop_assert!(forward.approximately_equal(&backward.conjugate()));
    }

    // Property: normalized nonzero vectors have unit norm
    #[test]
    fn normalize_gives_unit_norm((u, _) in vector_pair_strategy()) {
        prop_assume!(u.norm() > 1e-3);
        let normalized = u.normalize().unwrap();
        prop_assert!((normalized.norm() - 1.0).abs() < 1e-12);
    }

    // Property: |u ⊗ v| = |u| |v|
    #[test]
    fn tensor_norm_is_product_of_norms((u, v) in vector_pair_strategy()) {
        let tensor = u.tensor(&v);
        prop_assert_eq!(tensor.len(), u.len() * v.len());
        let expected = u.norm() * v.norm();
        prop_assert!((tensor.norm() - expected).abs() <= 1e-9 * expected.max(1.0));
    }
}

// ============================================================================
// Matrix Properties
// ============================================================================

proptest! {
    // Property: M * M^-1 = I for invertible M
    #[test]
    fn inverse_round_trip(matrix in well_conditioned_matrix_strategy()) {
        let inverse = matrix.invert().unwrap();
        let identity = ComplexMatrix::identity(matrix.rows());
        prop_assert!(matrix.multiply(&inverse).unwrap().approximately_equal(&identity));
        prop_assert!(inverse.multiply(&matrix).unwrap().approximately_equal(&identity));
    }

    // Property: (M^T)^T = M and (M^†)^† = M
    #[test]
    fn transpose_and_adjoint_are_involutions(matrix in well_conditioned_matrix_strategy()) {
        prop_assert_eq!(matrix.transpose().transpose(), matrix.clone());
        prop_assert_eq!(matrix.adjoint().adjoint(), matrix);
    }

    // Property: det(A ⊗ I_2) = det(A)^2
    #[test]
    fn determinant_of_kronecker_with_identity(matrix in well_conditioned_matrix_strategy()) {
        let determinant = matrix.determinant().unwrap();
        let kronecker = matrix.tensor(&ComplexMatrix::identity(2));
        let expected = determinant * determinant;
        let actual = kronecker.determinant().unwrap();
        let scale = expected.magnitude().max(1.0);
        prop_assert!((actual - expected).magnitude() <= 1e-9 * scale);
    }
}
