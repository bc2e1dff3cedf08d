use std::collections::HashSet;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{Result, ShamirError};
use crate::field::PrimeField;

/// A share of one chunk: `(x, y)` on that chunk's polynomial.
pub type Point = (u64, BigUint);

/// Value at `x` of the polynomial through `points`.
///
/// With `k` points this is the unique polynomial of degree below `k`. Feeding
/// fewer points than the sharing threshold gives a well-defined but unrelated
/// value; nothing here can tell the difference.
pub fn interpolate_at(field: &PrimeField, points: &[Point], x: &BigUint) -> Result<BigUint> {
    let xs = distinct_abscissae(field, points)?;
    let x = field.element(x);

    let mut acc = BigUint::zero();
    for (i, (xi, (_, yi))) in xs.iter().zip(points).enumerate() {
        let mut num = BigUint::one();
        let mut den = BigUint::one();
        for (j, xj) in xs.iter().enumerate() {
            if i != j {
                num = field.mul(&num, &field.sub(&x, xj));
                den = field.mul(&den, &field.sub(xi, xj));
            }
        }
        let term = field.mul(&field.mul(yi, &num), &field.modinv(&den)?);
        acc = field.add(&acc, &term);
    }
    Ok(acc)
}

/// The constant term, i.e. the shared chunk value.
pub fn reconstruct(field: &PrimeField, points: &[Point]) -> Result<BigUint> {
    interpolate_at(field, points, &BigUint::zero())
}

fn distinct_abscissae(field: &PrimeField, points: &[Point]) -> Result<Vec<BigUint>> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .map(|(x, _)| {
            let xr = field.from_u64(*x);
            if !seen.insert(xr.clone()) {
                return Err(ShamirError::DuplicateShareIndex(*x));
            }
            Ok(xr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::Polynomial;

    fn field() -> PrimeField {
        PrimeField::new(BigUint::from(97u32))
    }

    fn points_on(poly: &Polynomial, xs: &[u64]) -> Vec<Point> {
        xs.iter()
            .map(|&x| (x, poly.evaluate(&field(), &BigUint::from(x))))
            .collect()
    }

    #[test]
    fn recovers_constant_term() {
        // 3x^2 + 11x + 42
        let poly = Polynomial::from_coefficients(vec![
            BigUint::from(42u32),
            BigUint::from(11u32),
            BigUint::from(3u32),
        ]);
        for xs in [[1u64, 2, 3], [2, 4, 5], [5, 1, 3]] {
            let secret = reconstruct(&field(), &points_on(&poly, &xs)).unwrap();
            assert_eq!(secret, BigUint::from(42u32));
        }
    }

    #[test]
    fn extra_consistent_points_still_work() {
        let poly = Polynomial::from_coefficients(vec![BigUint::from(9u32), BigUint::from(4u32)]);
        let points = points_on(&poly, &[1, 2, 3, 4, 5]);
        assert_eq!(reconstruct(&field(), &points).unwrap(), BigUint::from(9u32));
    }

    #[test]
    fn evaluates_away_from_zero() {
        let poly = Polynomial::from_coefficients(vec![
            BigUint::from(1u32),
            BigUint::from(2u32),
            BigUint::from(3u32),
        ]);
        let points = points_on(&poly, &[1, 2, 3]);
        let at_ten = interpolate_at(&field(), &points, &BigUint::from(10u32)).unwrap();
        assert_eq!(at_ten, poly.evaluate(&field(), &BigUint::from(10u32)));
    }

    #[test]
    fn too_few_points_leave_secret_open() {
        // Two degree-2 polynomials through the same point at x = 1 but with
        // different constants: one point cannot pin the secret down.
        let f = field();
        let a = Polynomial::from_coefficients(vec![
            BigUint::from(10u32),
            BigUint::from(5u32),
            BigUint::from(1u32),
        ]);
        let b = Polynomial::from_coefficients(vec![
            BigUint::from(13u32),
            BigUint::from(1u32),
            BigUint::from(2u32),
        ]);
        let one = BigUint::one();
        assert_eq!(a.evaluate(&f, &one), b.evaluate(&f, &one));

        let points = points_on(&a, &[1]);
        assert_eq!(points, points_on(&b, &[1]));
        assert_ne!(a.coefficients()[0], b.coefficients()[0]);
        let guess = reconstruct(&f, &points).unwrap();
        assert!(guess != a.coefficients()[0] || guess != b.coefficients()[0]);
    }

    #[test]
    fn duplicate_x_is_rejected() {
        let points = vec![(2, BigUint::from(1u32)), (2, BigUint::from(5u32))];
        assert!(matches!(
            reconstruct(&field(), &points),
            Err(ShamirError::DuplicateShareIndex(2))
        ));
        // 99 ≡ 2 (mod 97)
        let points = vec![(2, BigUint::from(1u32)), (99, BigUint::from(5u32))];
        assert!(matches!(
            reconstruct(&field(), &points),
            Err(ShamirError::DuplicateShareIndex(99))
        ));
    }

    #[test]
    fn no_points_interpolate_to_zero() {
        assert!(reconstruct(&field(), &[]).unwrap().is_zero());
    }
}
