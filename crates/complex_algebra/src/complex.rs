// =============================================================================
// Qubit Lens - Complex Scalar
// =============================================================================
// Table of Contents:
//   1. Complex - (real, imaginary) value type over num_complex::Complex64
//   2. Arithmetic operator implementations
//   3. Tolerance-based equality
//   4. Conversions
//   5. Display
// =============================================================================

use crate::error::{AlgebraError, AlgebraResult};
use crate::formatting::{DEFAULT_DISPLAY_PRECISION, round_with_sign};
use crate::tolerance::Tolerance;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

// =============================================================================
// 1. Complex
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
#[repr(transparent)]
pub struct Complex {
    value: Complex64,
}

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    pub const IMAGINARY_UNIT: Complex = Complex::new(0.0, 1.0);

    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self {
            value: Complex64::new(real, imaginary),
        }
    }

    pub const fn from_real(real: f64) -> Self {
        Self::new(real, 0.0)
    }

    pub fn from_polar(magnitude: f64, phase: f64) -> Self {
        Complex64::from_polar(magnitude, phase).into()
    }

    pub fn real(&self) -> f64 {
        self.value.re
    }

    pub fn imaginary(&self) -> f64 {
        self.value.im
    }

    pub fn modulus_square(&self) -> f64 {
        self.value.norm_sqr()
    }

    pub fn magnitude(&self) -> f64 {
        self.value.norm()
    }

    pub fn argument(&self) -> f64 {
        self.value.arg()
    }

    pub fn conjugate(&self) -> Self {
        self.value.conj().into()
    }

    pub fn scale(&self, factor: f64) -> Self {
        self.value.scale(factor).into()
    }

    pub fn divide(&self, divisor: Complex) -> AlgebraResult<Self> {
        self.divide_with(divisor, Tolerance::default())
    }

    /// Fails with `DivideByZero` when `divisor` is zero under `tolerance`.
    pub fn divide_with(&self, divisor: Complex, tolerance: Tolerance) -> AlgebraResult<Self> {
        if divisor.is_zero(tolerance) {
            return Err(AlgebraError::DivideByZero);
        }
        Ok(*self / divisor)
    }

    pub fn invert(&self) -> AlgebraResult<Self> {
        Complex::ONE.divide(*self)
    }

    pub fn invert_with(&self, tolerance: Tolerance) -> AlgebraResult<Self> {
        Complex::ONE.divide_with(*self, tolerance)
    }

    /// The value rotated onto the unit circle, or `None` for zero.
    pub fn unit_phase(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            None
        } else {
            Some(self.scale(1.0 / magnitude))
        }
    }

    pub fn is_zero(&self, tolerance: Tolerance) -> bool {
        self.approximately_equal_with(&Complex::ZERO, tolerance)
    }

    pub fn approximately_equal(&self, other: &Complex) -> bool {
        self.approximately_equal_with(other, Tolerance::default())
    }

    pub fn approximately_equal_with(&self, other: &Complex, tolerance: Tolerance) -> bool {
        tolerance.values_equal(self.real(), other.real())
            && tolerance.values_equal(self.imaginary(), other.imaginary())
    }

    /// Renders `0`, `i`, `-i`, bare reals, bare imaginaries or `re±imi`,
    /// each part rounded to `precision` decimals.
    pub fn to_string_with_precision(&self, precision: usize) -> String {
        let (real_negative, real_text) = round_with_sign(self.real(), precision);
        let (imaginary_negative, imaginary_digits) = round_with_sign(self.imaginary(), precision);
        let imaginary_text = if imaginary_digits == "1" {
            "i".to_string()
        } else {
            format!("{imaginary_digits}i")
        };

        let real_is_zero = real_text == "0";
        let imaginary_is_zero = imaginary_digits == "0";
        let real_sign = if real_negative { "-" } else { "" };
        let imaginary_sign = if imaginary_negative { "-" } else { "+" };

        match (real_is_zero, imaginary_is_zero) {
            (true, true) => "0".to_string(),
            (_, true) => format!("{real_sign}{real_text}"),
            (true, false) => {
                let sign = if imaginary_negative { "-" } else { "" };
                format!("{sign}{imaginary_text}")
            }
            (false, false) => format!("{real_sign}{real_text}{imaginary_sign}{imaginary_text}"),
        }
    }
}

// =============================================================================
// 2. Arithmetic operator implementations
// =============================================================================

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        (self.value + rhs.value).into()
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        (self.value - rhs.value).into()
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        (self.value * rhs.value).into()
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Complex {
        (self.value * rhs).into()
    }
}

// Unchecked; `divide` is the fallible form.
impl Div for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        (self.value / rhs.value).into()
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        (-self.value).into()
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        self.value += rhs.value;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Complex) {
        self.value -= rhs.value;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, rhs: Complex) {
        self.value *= rhs.value;
    }
}

impl Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.map(|complex| complex.value).sum::<Complex64>().into()
    }
}

// =============================================================================
// 3. Tolerance-based equality
// =============================================================================

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.approximately_equal(other)
    }
}

// =============================================================================
// 4. Conversions
// =============================================================================

impl From<Complex64> for Complex {
    fn from(value: Complex64) -> Self {
        Self { value }
    }
}

impl From<Complex> for Complex64 {
    fn from(complex: Complex) -> Self {
        complex.value
    }
}

impl From<f64> for Complex {
    fn from(value: f64) -> Self {
        Complex::from_real(value)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((real, imaginary): (f64, f64)) -> Self {
        Complex::new(real, imaginary)
    }
}

impl From<Complex> for (f64, f64) {
    fn from(complex: Complex) -> Self {
        (complex.real(), complex.imaginary())
    }
}

// =============================================================================
// 5. Display
// =============================================================================

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_DISPLAY_PRECISION);
        f.write_str(&self.to_string_with_precision(precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pair() -> (Complex, Complex) {
        (Complex::new(-42.5, 17.25), Complex::new(3.75, -91.0))
    }

    #[test]
    fn test_additive_inverse() {
        let (a, b) = sample_pair();
        assert_ne!(a + b, a);
        assert_eq!(a + b - b, a);
    }

    #[test]
    fn test_multiplicative_inverse() {
        let (a, b) = sample_pair();
        assert_ne!(a * b, a);
        assert_eq!((a * b).divide(b).unwrap(), a);
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let (a, b) = sample_pair();
        assert_ne!(a.invert().unwrap(), a);
        assert_eq!(a.invert().unwrap().invert().unwrap(), a);
        assert_eq!(a * b * b.invert().unwrap(), a);
    }

    #[test]
    fn test_divide_by_zero() {
        let (a, _) = sample_pair();
        assert_eq!(a.divide(Complex::ZERO), Err(AlgebraError::DivideByZero));
        assert_eq!(Complex::ZERO.invert(), Err(AlgebraError::DivideByZero));
    }

    #[test]
    fn test_divisor_below_tolerance_is_zero() {
        let (a, _) = sample_pair();
        for tiny in [1e-150, 1e-170, 1e-9] {
            assert_eq!(a.divide(Complex::new(tiny, -tiny)), Err(AlgebraError::DivideByZero));
            assert_eq!(Complex::from_real(tiny).invert(), Err(AlgebraError::DivideByZero));
        }
        assert!(a.divide(Complex::new(1e-7, 0.0)).is_ok());
    }

    #[test]
    fn test_divide_with_tighter_tolerance() {
        let tight = Tolerance::new(1e-300, 0.0);
        let quotient = Complex::ONE.divide_with(Complex::from_real(1e-150), tight).unwrap();
        assert!((quotient.real() - 1e150).abs() < 1e138);
        assert!(quotient.real().is_finite());
        assert_eq!(Complex::ZERO.invert_with(tight), Err(AlgebraError::DivideByZero));
    }

    #[test]
    fn test_operators_match_num_complex() {
        let (a, b) = sample_pair();
        let (native_a, native_b) = (Complex64::from(a), Complex64::from(b));
        assert_eq!(Complex64::from(a * b), native_a * native_b);
        assert_eq!(Complex64::from(a + b), native_a + native_b);
        assert_eq!(Complex64::from(a / b), native_a / native_b);
        assert_eq!([a, b, -a].into_iter().sum::<Complex>(), b);
    }

    #[test]
    fn test_conjugate_product_is_real() {
        let (a, _) = sample_pair();
        assert!((a.conjugate() * a).imaginary().abs() < 1e-10);
        assert!(((a.conjugate() * a).real() - a.modulus_square()).abs() < 1e-9);
    }

    #[test]
    fn test_magnitude_and_scale() {
        let (a, _) = sample_pair();
        assert!((a.scale(1.0 / a.magnitude()).magnitude() - 1.0).abs() < 1e-12);
        assert!((a.magnitude().powi(2) - a.modulus_square()).abs() < 1e-9);
    }

    #[test]
    fn test_negate() {
        let (a, _) = sample_pair();
        assert_eq!(-a, Complex::new(42.5, -17.25));
        assert_eq!(a + (-a), Complex::ZERO);
    }

    #[test]
    fn test_unit_phase() {
        let phase = Complex::new(0.0, -3.0).unit_phase().unwrap();
        assert_eq!(phase, Complex::new(0.0, -1.0));
        assert!(Complex::ZERO.unit_phase().is_none());
    }

    #[test]
    fn test_tolerance_equality() {
        let a = Complex::new(1.0, 1.0);
        assert_eq!(a, Complex::new(1.0 + 1e-10, 1.0 - 1e-10));
        assert_ne!(a, Complex::new(1.0 + 1e-6, 1.0));
    }

    #[test]
    fn test_display_special_forms() {
        assert_eq!(Complex::new(0.0, 1.0).to_string(), "i");
        assert_eq!(Complex::new(0.0, -1.0).to_string(), "-i");
        assert_eq!(Complex::new(0.0, 0.0).to_string(), "0");
        assert_eq!(Complex::new(-2.5, 0.0).to_string(), "-2.5");
        assert_eq!(Complex::new(0.0, 0.25).to_string(), "0.25i");
        assert_eq!(Complex::new(1.0, -1.0).to_string(), "1-i");
    }

    #[test]
    fn test_display_precision() {
        let value = Complex::new(-3.142, 2.718);
        assert_eq!(value.to_string_with_precision(10), "-3.142+2.718i");
        assert_eq!(value.to_string_with_precision(2), "-3.14+2.72i");
        assert_eq!(format!("{value:.2}"), "-3.14+2.72i");
    }

    #[test]
    fn test_display_rounds_tiny_parts_away() {
        let value = Complex::new(std::f64::consts::FRAC_1_SQRT_2, -1e-17);
        assert_eq!(value.to_string(), "0.7071");
    }

    #[test]
    fn test_num_complex_round_trip() {
        let native = Complex64::new(0.5, -0.25);
        let ours: Complex = native.into();
        assert_eq!(ours, Complex::new(0.5, -0.25));
        assert_eq!(Complex64::from(ours), native);
    }
}
