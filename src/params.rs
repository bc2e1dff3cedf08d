use serde::{Deserialize, Serialize};

use crate::encoding::is_ascii;
use crate::error::{Result, ShamirError};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SharingParameters {
    pub threshold: usize,   //t
    pub share_count: usize, //n
}

impl SharingParameters {
    /// Checks the split preconditions in the order a user would fix them.
    pub fn validate(secret: &str, share_count: i64, threshold: i64) -> Result<Self> {
        validate_secret(secret)?;
        if share_count < 1 {
            return Err(ShamirError::TooFewShares(share_count));
        }
        if threshold < 2 {
            return Err(ShamirError::ThresholdTooLow(threshold));
        }
        if share_count < threshold {
            return Err(ShamirError::ThresholdExceedsShares {
                threshold,
                shares: share_count,
            });
        }
        Ok(SharingParameters {
            threshold: threshold as usize,
            share_count: share_count as usize,
        })
    }
}

pub fn validate_secret(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(ShamirError::EmptySecret);
    }
    if !is_ascii(secret) {
        return Err(ShamirError::NonAsciiSecret);
    }
    // A leading NUL would vanish from a chunk's big-endian encoding.
    if secret.contains('\0') {
        return Err(ShamirError::NulInSecret);
    }
    Ok(())
}
