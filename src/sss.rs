use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::encoding::{decode, encode};
use crate::error::{Result, ShamirError};
use crate::field::PrimeField;
use crate::interpolation::{reconstruct, Point};
use crate::polynomial::Polynomial;

/// Shamir sharing of a single field element among parties `1..=num_parties`.
pub struct SSS {
    polynomial: Polynomial,
    shares: Vec<BigUint>,
}

impl SSS {
    pub fn create<R: RngCore + CryptoRng>(
        field: &PrimeField,
        secret: &BigUint,
        threshold: usize,
        num_parties: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if threshold < 2 {
            return Err(ShamirError::ThresholdTooLow(threshold as i64));
        }
        if num_parties < threshold {
            return Err(ShamirError::ThresholdExceedsShares {
                threshold: threshold as i64,
                shares: num_parties as i64,
            });
        }
        let polynomial = Polynomial::generate(field, secret, threshold - 1, rng)?;
        let shares = Self::eval_polynomial(field, &polynomial, num_parties);
        Ok(Self { polynomial, shares })
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// `shares()[x - 1]` belongs to party `x`.
    pub fn shares(&self) -> &[BigUint] {
        &self.shares
    }

    pub fn into_shares(self) -> Vec<BigUint> {
        self.shares
    }

    fn eval_polynomial(field: &PrimeField, polynomial: &Polynomial, num_parties: usize) -> Vec<BigUint> {
        (1..=num_parties as u64)
            .map(|x| polynomial.evaluate(field, &BigUint::from(x)))
            .collect()
    }
}

/// Encodes one chunk and shares it under a fresh polynomial drawn from the OS.
pub fn share_chunk(
    field: &PrimeField,
    chunk: &str,
    threshold: usize,
    num_parties: usize,
) -> Result<Vec<BigUint>> {
    let sss = SSS::create(field, &encode(chunk), threshold, num_parties, &mut OsRng)?;
    Ok(sss.into_shares())
}

pub fn recover_chunk(field: &PrimeField, points: &[Point]) -> Result<Vec<u8>> {
    Ok(decode(&reconstruct(field, points)?))
}
