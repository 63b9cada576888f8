use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque participant identity, as supplied by the authentication
/// collaborator.
///
/// The election never authenticates anyone; it only compares identities
/// for equality against the stored authority or the registry. Identities
/// are validated to be non-empty at construction, so an invalid identity
/// can never reach a transition operation.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create an identity, rejecting empty or whitespace-only values.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::InvalidIdentity);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ParticipantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identity() {
        let id = ParticipantId::new("alice").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
    }

    #[test]
    fn empty_identity_rejected() {
        assert_eq!(ParticipantId::new(""), Err(Error::InvalidIdentity));
        assert_eq!(ParticipantId::new("   "), Err(Error::InvalidIdentity));
    }

    #[test]
    fn parse_from_str() {
        let id: ParticipantId = "bob".parse().unwrap();
        assert_eq!(id, ParticipantId::new("bob").unwrap());
        assert!("".parse::<ParticipantId>().is_err());
    }
}
