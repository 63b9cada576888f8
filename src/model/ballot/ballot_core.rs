use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Commitment;

/// Core ballot data: the commitment a participant cast, and whether the
/// authority has since bound it to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotCore {
    /// The opaque commitment submitted at cast time.
    pub commitment: Commitment,
    /// When the ballot was cast.
    pub cast_at: DateTime<Utc>,
    /// Whether the reveal operation has bound this ballot to a candidate.
    /// Flips to true exactly once.
    pub verified_at_reveal: bool,
}

impl BallotCore {
    /// Create a fresh, unverified ballot.
    pub fn new(commitment: Commitment, cast_at: DateTime<Utc>) -> Self {
        Self {
            commitment,
            cast_at,
            verified_at_reveal: false,
        }
    }

    /// Mark this ballot as verified. One-way; the reveal operation is the
    /// only caller.
    pub(crate) fn verify(&mut self) {
        self.verified_at_reveal = true;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use sha2::{Digest, Sha256};

    use super::*;

    #[test]
    fn starts_unverified() {
        let cast_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        let mut ballot = BallotCore::new(Commitment::new(Sha256::digest(b"a").into()), cast_at);
        assert!(!ballot.verified_at_reveal);
        assert_eq!(ballot.cast_at, cast_at);

        ballot.verify();
        assert!(ballot.verified_at_reveal);
    }
}
