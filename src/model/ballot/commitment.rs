use std::fmt::{self, Debug, Display, Formatter};

use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};

/// Size of a vote commitment in bytes.
pub const COMMITMENT_BYTES: usize = 32;

/// An opaque fixed-size vote commitment, standing in for a hidden
/// candidate choice until the authority reveals it.
///
/// Producing a binding commitment is the caller's concern; the election
/// never inspects the value beyond equality and the all-zero check.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment([u8; COMMITMENT_BYTES]);

impl Commitment {
    pub fn new(bytes: [u8; COMMITMENT_BYTES]) -> Self {
        Self(bytes)
    }

    /// An all-zero commitment carries no information and is rejected at
    /// cast time.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&byte| byte == 0)
    }

    pub fn as_bytes(&self) -> &[u8; COMMITMENT_BYTES] {
        &self.0
    }
}

impl From<[u8; COMMITMENT_BYTES]> for Commitment {
    fn from(bytes: [u8; COMMITMENT_BYTES]) -> Self {
        Self(bytes)
    }
}

impl Display for Commitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", HEXLOWER.encode(&self.0))
    }
}

impl Debug for Commitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({self})")
    }
}
