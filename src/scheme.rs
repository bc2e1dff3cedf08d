use serde::{Deserialize, Serialize};

use crate::chunk::{join_chunks, split_chunks};
use crate::error::{Result, ShamirError};
use crate::field::PrimeField;
use crate::params::SharingParameters;
use crate::share::{bundles_from_chunks, parse_combine_args, points_per_chunk, ShareBundle};
use crate::sss::{recover_chunk, share_chunk};
use crate::workers::fan_out;

/// The field every split/combine runs in, plus the chunk length it allows.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemeConfig {
    field: PrimeField,
    chunk_len: usize,
}

impl SchemeConfig {
    /// Fails when the modulus cannot hold even a one-byte chunk.
    pub fn new(field: PrimeField) -> Result<Self> {
        let chunk_len = field.max_chunk_len();
        if chunk_len == 0 {
            return Err(ShamirError::ModulusTooSmall(field.modulus().to_string()));
        }
        Ok(SchemeConfig { field, chunk_len })
    }

    /// Scheme over `2^exponent - 1`.
    pub fn mersenne(exponent: u32) -> Result<Self> {
        Self::new(PrimeField::mersenne(exponent)?)
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }
}

impl Default for SchemeConfig {
    fn default() -> Self {
        let field = PrimeField::default();
        let chunk_len = field.max_chunk_len();
        SchemeConfig { field, chunk_len }
    }
}

#[derive(Clone, Debug)]
pub struct SplitOutcome {
    pub params: SharingParameters,
    pub bundles: Vec<ShareBundle>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareRecord {
    pub index: u64,
    pub bundle: String,
}

/// Machine-readable form of a split.
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitReport {
    pub threshold: usize,
    pub share_count: usize,
    pub modulus: String,
    pub shares: Vec<ShareRecord>,
}

impl SplitOutcome {
    pub fn report(&self, config: &SchemeConfig) -> SplitReport {
        SplitReport {
            threshold: self.params.threshold,
            share_count: self.params.share_count,
            modulus: config.field().modulus().to_string(),
            shares: self
                .bundles
                .iter()
                .map(|b| ShareRecord {
                    index: b.index(),
                    bundle: b.bundle(),
                })
                .collect(),
        }
    }
}

/// Splits `secret` into `share_count` bundles, any `threshold` of which
/// rebuild it. Nothing is produced unless every chunk was shared.
pub fn split_secret(
    config: &SchemeConfig,
    secret: &str,
    share_count: i64,
    threshold: i64,
) -> Result<SplitOutcome> {
    let params = SharingParameters::validate(secret, share_count, threshold)?;
    let chunks = split_chunks(secret, config.chunk_len());

    let per_chunk = fan_out(chunks, |_, chunk| {
        share_chunk(config.field(), chunk, params.threshold, params.share_count)
    })?;

    Ok(SplitOutcome {
        params,
        bundles: bundles_from_chunks(&per_chunk, params.share_count),
    })
}

/// Rebuilds the secret from the flattened `x1 bundle1 x2 bundle2 ...` tokens.
pub fn combine_shares<S: AsRef<str>>(config: &SchemeConfig, tokens: &[S]) -> Result<String> {
    let bundles = parse_combine_args(tokens)?;
    combine_bundles(config, &bundles)
}

/// Bundles must agree on their chunk count; [`parse_combine_args`] checks
/// that for user input.
pub fn combine_bundles(config: &SchemeConfig, bundles: &[ShareBundle]) -> Result<String> {
    let chunks = fan_out(points_per_chunk(bundles)?, |_, points| {
        recover_chunk(config.field(), &points)
    })?;
    Ok(String::from_utf8_lossy(&join_chunks(&chunks)).into_owned())
}

/// Recombines the first and the last `threshold` bundles of a fresh split and
/// checks both give back `secret`. An outcome holding fewer than `threshold`
/// bundles fails verification.
pub fn verify_split(config: &SchemeConfig, secret: &str, outcome: &SplitOutcome) -> Result<()> {
    let t = outcome.params.threshold;
    let bundles = &outcome.bundles;
    if t == 0 || bundles.len() < t {
        return Err(ShamirError::VerificationFailed);
    }
    for subset in [&bundles[..t], &bundles[bundles.len() - t..]] {
        if combine_bundles(config, subset)? != secret {
            return Err(ShamirError::VerificationFailed);
        }
    }
    Ok(())
}
