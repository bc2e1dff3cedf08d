use std::collections::HashSet;
use std::fmt;

use num_bigint::BigUint;
use num_traits::Num;

use crate::error::{Result, ShamirError};
use crate::interpolation::Point;

pub const SUBSHARE_SEPARATOR: &str = "+";

/// Everything one party holds: its share of every chunk, in chunk order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareBundle {
    index: u64,
    subshares: Vec<BigUint>,
}

impl ShareBundle {
    pub fn new(index: u64, subshares: Vec<BigUint>) -> Self {
        ShareBundle { index, subshares }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn subshares(&self) -> &[BigUint] {
        &self.subshares
    }

    pub fn subshare(&self, chunk: usize) -> Option<&BigUint> {
        self.subshares.get(chunk)
    }

    pub fn chunk_count(&self) -> usize {
        self.subshares.len()
    }

    /// The `y_1+y_2+...+y_k` body.
    pub fn bundle(&self) -> String {
        self.subshares
            .iter()
            .map(BigUint::to_string)
            .collect::<Vec<_>>()
            .join(SUBSHARE_SEPARATOR)
    }

    /// Parses one `<x> <bundle>` pair of command-line tokens.
    pub fn parse(index: &str, bundle: &str) -> Result<Self> {
        let index = parse_index(index)?;
        let subshares = bundle
            .split(SUBSHARE_SEPARATOR)
            .map(parse_subshare)
            .collect::<Result<Vec<_>>>()?;
        Ok(ShareBundle { index, subshares })
    }
}

impl fmt::Display for ShareBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.index, self.bundle())
    }
}

fn parse_index(token: &str) -> Result<u64> {
    let index: u64 = token
        .parse()
        .map_err(|_| ShamirError::MalformedShareIndex(token.to_string()))?;
    if index == 0 {
        return Err(ShamirError::ZeroShareIndex);
    }
    Ok(index)
}

fn parse_subshare(token: &str) -> Result<BigUint> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ShamirError::MalformedSubsecret(token.to_string()));
    }
    BigUint::from_str_radix(token, 10)
        .map_err(|_| ShamirError::MalformedFieldElement(token.to_string()))
}

/// Validates and parses the flattened `x1 bundle1 x2 bundle2 ...` argument
/// list of `combine`.
///
/// Only "at least two shares" can be checked: the threshold used at split is not
/// part of a share, so whether enough shares were supplied is up to the caller.
pub fn parse_combine_args<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<ShareBundle>> {
    if tokens.len() < 4 {
        return Err(ShamirError::NotEnoughShareTokens(tokens.len()));
    }
    if tokens.len() % 2 != 0 {
        return Err(ShamirError::OddTokenCount(tokens.len()));
    }

    let mut seen = HashSet::new();
    let mut bundles: Vec<ShareBundle> = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks_exact(2) {
        let bundle = ShareBundle::parse(pair[0].as_ref(), pair[1].as_ref())?;
        if let Some(first) = bundles.first() {
            if bundle.chunk_count() != first.chunk_count() {
                return Err(ShamirError::SubsecretCountMismatch {
                    index: pair[0].as_ref().to_string(),
                    expected: first.chunk_count(),
                    found: bundle.chunk_count(),
                });
            }
        }
        if !seen.insert(bundle.index()) {
            return Err(ShamirError::DuplicateShareIndex(bundle.index()));
        }
        bundles.push(bundle);
    }
    Ok(bundles)
}

/// Regroups per-chunk share vectors (`per_chunk[i][x - 1]`) into one bundle
/// per party.
pub fn bundles_from_chunks(per_chunk: &[Vec<BigUint>], share_count: usize) -> Vec<ShareBundle> {
    (0..share_count)
        .map(|party| {
            let subshares = per_chunk.iter().map(|shares| shares[party].clone()).collect();
            ShareBundle::new(party as u64 + 1, subshares)
        })
        .collect()
}

/// The inverse regrouping: for every chunk, the `(x, y)` points across all
/// bundles. Bundles must agree on their chunk count.
pub fn points_per_chunk(bundles: &[ShareBundle]) -> Result<Vec<Vec<Point>>> {
    let chunk_count = bundles.first().map_or(0, ShareBundle::chunk_count);
    if let Some(odd) = bundles.iter().find(|b| b.chunk_count() != chunk_count) {
        return Err(ShamirError::SubsecretCountMismatch {
            index: odd.index().to_string(),
            expected: chunk_count,
            found: odd.chunk_count(),
        });
    }
    Ok((0..chunk_count)
        .map(|chunk| {
            bundles
                .iter()
                .map(|b| (b.index(), b.subshares[chunk].clone()))
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u32) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn display_matches_cli_output() {
        let bundle = ShareBundle::new(2, vec![big(23), big(100), big(19)]);
        assert_eq!(bundle.bundle(), "23+100+19");
        assert_eq!(bundle.to_string(), "(2, 23+100+19)");
        assert_eq!(ShareBundle::parse("2", "23+100+19").unwrap(), bundle);
    }

    #[test]
    fn transpose_groups_by_party() {
        let per_chunk = vec![vec![big(23), big(345)], vec![big(100), big(99)], vec![big(19), big(50)]];
        let bundles = bundles_from_chunks(&per_chunk, 2);
        assert_eq!(bundles[0].bundle(), "23+100+19");
        assert_eq!(bundles[1].bundle(), "345+99+50");
        assert_eq!(bundles[1].index(), 2);

        let points = points_per_chunk(&bundles).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], vec![(1, big(100)), (2, big(99))]);
    }

    #[test]
    fn parses_combine_tokens() {
        let bundles = parse_combine_args(&["2", "334343+23232", "4", "32312321+2312312"]).unwrap();
        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[1].index(), 4);
        assert_eq!(bundles[1].subshare(1), Some(&big(2312312)));
        assert_eq!(bundles[0].subshare(2), None);
    }

    #[test]
    fn rejects_short_or_odd_input() {
        assert!(matches!(
            parse_combine_args(&["2", "12+34"]),
            Err(ShamirError::NotEnoughShareTokens(2))
        ));
        assert!(matches!(
            parse_combine_args(&["2", "12+34", "4"]),
            Err(ShamirError::NotEnoughShareTokens(3))
        ));
        assert!(matches!(
            parse_combine_args(&["2", "12", "4", "56", "7"]),
            Err(ShamirError::OddTokenCount(5))
        ));
    }

    #[test]
    fn rejects_mismatched_subsecret_counts() {
        assert!(matches!(
            parse_combine_args(&["2", "12", "4", "56+78"]),
            Err(ShamirError::SubsecretCountMismatch {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn regrouping_rejects_ragged_bundles() {
        let bundles = vec![
            ShareBundle::new(1, vec![big(5), big(6)]),
            ShareBundle::new(2, vec![big(7)]),
        ];
        match points_per_chunk(&bundles) {
            Err(ShamirError::SubsecretCountMismatch {
                index,
                expected,
                found,
            }) => assert_eq!((index.as_str(), expected, found), ("2", 2, 1)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(
            parse_combine_args(&["x", "12", "4", "56"]),
            Err(ShamirError::MalformedShareIndex(_))
        ));
        assert!(matches!(
            parse_combine_args(&["-1", "12", "4", "56"]),
            Err(ShamirError::MalformedShareIndex(_))
        ));
        assert!(matches!(
            parse_combine_args(&["0", "12", "4", "56"]),
            Err(ShamirError::ZeroShareIndex)
        ));
        for bad in ["12+", "+12", "1a", "-3", "1 2", ""] {
            assert!(matches!(
                parse_combine_args(&["2", "12", "4", bad]),
                Err(ShamirError::MalformedSubsecret(_))
            ));
        }
    }

    #[test]
    fn rejects_duplicate_share_numbers() {
        assert!(matches!(
            parse_combine_args(&["3", "12", "3", "56"]),
            Err(ShamirError::DuplicateShareIndex(3))
        ));
    }
}
