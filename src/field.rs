use num_bigint::{BigInt, BigUint, Sign};
use num_integer::{ExtendedGcd, Integer};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::{Result, ShamirError};

/// Exponents `p` for which `2^p - 1` is prime and wide enough to hold at least
/// one byte per chunk.
pub const MERSENNE_EXPONENTS: [u32; 8] = [31, 61, 89, 107, 127, 521, 607, 1279];

pub const DEFAULT_MERSENNE_EXPONENT: u32 = 127;

/// Arithmetic modulo a fixed prime. Every value handed out lies in `[0, modulus)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl Default for PrimeField {
    fn default() -> Self {
        PrimeField {
            modulus: mersenne_modulus(DEFAULT_MERSENNE_EXPONENT),
        }
    }
}

fn mersenne_modulus(exponent: u32) -> BigUint {
    (BigUint::one() << exponent) - BigUint::one()
}

impl PrimeField {
    /// The caller vouches that `modulus` is prime.
    pub fn new(modulus: BigUint) -> Self {
        PrimeField { modulus }
    }

    pub fn mersenne(exponent: u32) -> Result<Self> {
        if !MERSENNE_EXPONENTS.contains(&exponent) {
            return Err(ShamirError::UnsupportedPrime(exponent));
        }
        Ok(PrimeField::new(mersenne_modulus(exponent)))
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn element(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    pub fn from_u64(&self, value: u64) -> BigUint {
        self.element(&BigUint::from(value))
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = self.element(a);
        let b = self.element(b);
        if a >= b {
            a - b
        } else {
            &self.modulus - b + a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Inverse through the extended Euclidean algorithm.
    pub fn modinv(&self, a: &BigUint) -> Result<BigUint> {
        let a = BigInt::from_biguint(Sign::Plus, self.element(a));
        if a.is_zero() {
            return Err(ShamirError::NotInvertible);
        }
        let m = BigInt::from_biguint(Sign::Plus, self.modulus.clone());
        let ExtendedGcd { gcd, x, .. } = a.extended_gcd(&m);
        if !gcd.is_one() {
            return Err(ShamirError::NotInvertible);
        }
        let (_, inverse) = x.mod_floor(&m).into_parts();
        Ok(inverse)
    }

    /// Uniform draw from `[0, modulus)` by rejection sampling. A failing
    /// random source is surfaced, never papered over.
    pub fn random_element<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<BigUint> {
        let bits = self.modulus.bits();
        let mut buf = vec![0u8; ((bits + 7) / 8) as usize];
        let spare = (buf.len() as u64) * 8 - bits;
        loop {
            rng.try_fill_bytes(&mut buf)
                .map_err(ShamirError::EntropyUnavailable)?;
            buf[0] &= 0xffu8 >> spare;
            let candidate = BigUint::from_bytes_be(&buf);
            if candidate < self.modulus {
                return Ok(candidate);
            }
        }
    }

    pub fn random_nonzero<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<BigUint> {
        loop {
            let candidate = self.random_element(rng)?;
            if !candidate.is_zero() {
                return Ok(candidate);
            }
        }
    }

    /// Largest chunk length `L` (in bytes) with `2^(8L) - 1 < modulus`.
    pub fn max_chunk_len(&self) -> usize {
        (self.modulus.bits().saturating_sub(1) / 8) as usize
    }
}

/// Random source whose every draw fails.
#[cfg(test)]
pub(crate) struct FailingRng;

#[cfg(test)]
impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!("only try_fill_bytes is used")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("only try_fill_bytes is used")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!("only try_fill_bytes is used")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        Err(rand::Error::new("entropy source offline"))
    }
}

#[cfg(test)]
impl CryptoRng for FailingRng {}
