use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShamirError>;

#[derive(Debug, Error)]
pub enum ShamirError {
    #[error("Empty secret.")]
    EmptySecret,
    #[error("Secret must be ASCII.")]
    NonAsciiSecret,
    #[error("Secret must not contain NUL characters.")]
    NulInSecret,
    #[error("Number of shares less than 1 (got {0}).")]
    TooFewShares(i64),
    #[error("Threshold less than 2 (got {0}).")]
    ThresholdTooLow(i64),
    #[error("Number of shares ({shares}) is less than the threshold ({threshold}).")]
    ThresholdExceedsShares { threshold: i64, shares: i64 },
    #[error("Must combine at least two shares (got {0} arguments).")]
    NotEnoughShareTokens(usize),
    #[error("Combine command takes an even number of arguments (got {0}).")]
    OddTokenCount(usize),
    #[error(
        "Each share must contain the same number of subsecrets (numbers separated by '+'): \
         share {index} has {found}, expected {expected}."
    )]
    SubsecretCountMismatch {
        index: String,
        expected: usize,
        found: usize,
    },
    #[error("Shares must be of the form 'int+int+int+..+int', found {0:?}.")]
    MalformedSubsecret(String),
    #[error("Share numbers must be 64-bit unsigned ints, found {0:?}.")]
    MalformedShareIndex(String),
    #[error("Share number 0 is not a valid share.")]
    ZeroShareIndex,
    #[error("Share number {0} was supplied more than once.")]
    DuplicateShareIndex(u64),
    #[error("2^{0} - 1 is not a supported Mersenne prime.")]
    UnsupportedPrime(u32),
    #[error("Modulus {0} is too small to hold a one-byte chunk.")]
    ModulusTooSmall(String),

    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(rand::Error),
    #[error("element has no inverse modulo the field prime")]
    NotInvertible,
    #[error("malformed field element {0:?}")]
    MalformedFieldElement(String),
    #[error("freshly split shares did not reconstruct the secret")]
    VerificationFailed,
}

impl ShamirError {
    /// Fatal errors mean the environment or an internal precondition broke;
    /// everything else is bad caller input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShamirError::EntropyUnavailable(_)
                | ShamirError::NotInvertible
                | ShamirError::MalformedFieldElement(_)
                | ShamirError::VerificationFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers() {
        assert!(!ShamirError::EmptySecret.is_fatal());
        assert!(!ShamirError::DuplicateShareIndex(3).is_fatal());
        assert!(ShamirError::NotInvertible.is_fatal());
        assert!(ShamirError::MalformedFieldElement("x".into()).is_fatal());
        assert!(ShamirError::EntropyUnavailable(rand::Error::new("drained")).is_fatal());
        assert!(!ShamirError::ModulusTooSmall("97".into()).is_fatal());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = ShamirError::ThresholdExceedsShares {
            threshold: 5,
            shares: 2,
        };
        assert_eq!(
            err.to_string(),
            "Number of shares (2) is less than the threshold (5)."
        );
    }
}
