use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};

use crate::error::Result;
use crate::field::PrimeField;

/// `coefficients[i]` is the coefficient of `x^i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// Fresh random polynomial of exactly `degree` with `constant` as its
    /// constant term. The leading coefficient is resampled until non-zero.
    pub fn generate<R: RngCore + CryptoRng>(
        field: &PrimeField,
        constant: &BigUint,
        degree: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(field.element(constant));
        for _ in 1..degree {
            coefficients.push(field.random_element(rng)?);
        }
        if degree > 0 {
            coefficients.push(field.random_nonzero(rng)?);
        }
        Ok(Polynomial { coefficients })
    }

    pub fn from_coefficients(coefficients: Vec<BigUint>) -> Self {
        Polynomial { coefficients }
    }

    pub fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner's method, reduced once at the end.
    pub fn evaluate(&self, field: &PrimeField, x: &BigUint) -> BigUint {
        let mut result = BigUint::zero();
        for c in self.coefficients.iter().rev() {
            result = result * x + c;
        }
        field.element(&result)
    }
}
