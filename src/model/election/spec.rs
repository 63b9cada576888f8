use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::CandidateId;

/// An election specification: everything needed to create an election.
///
/// A spec is plain data; it is validated when turned into an
/// [`ElectionCore`](super::ElectionCore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSpec {
    /// Election name.
    pub name: String,
    /// Start of the voting window (inclusive).
    pub start_time: DateTime<Utc>,
    /// End of the voting window (inclusive).
    pub end_time: DateTime<Utc>,
    /// Candidates in their declared order; results are reported in this
    /// order.
    pub candidates: Vec<CandidateId>,
}

impl ElectionSpec {
    /// Check the window ordering and candidate list.
    pub fn validate(&self) -> Result<()> {
        if self.start_time >= self.end_time {
            return Err(Error::InvalidWindow);
        }
        if self.candidates.is_empty() {
            return Err(Error::NoCandidates);
        }
        Ok(())
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use chrono::Duration;

    use super::*;

    impl ElectionSpec {
        /// An election whose window is currently open.
        pub fn current_example() -> Self {
            let now = Utc::now();
            Self {
                name: "Student Union President".to_string(),
                start_time: now - Duration::hours(1),
                end_time: now + Duration::hours(1),
                candidates: vec![
                    "Alice Appleby".to_string(),
                    "Bob Birch".to_string(),
                    "Carol Cherry".to_string(),
                ],
            }
        }

        /// An election whose window has not opened yet.
        pub fn future_example() -> Self {
            let now = Utc::now();
            Self {
                start_time: now + Duration::days(1),
                end_time: now + Duration::days(2),
                ..Self::current_example()
            }
        }

        /// An election whose window is already over.
        pub fn past_example() -> Self {
            let now = Utc::now();
            Self {
                start_time: now - Duration::days(2),
                end_time: now - Duration::days(1),
                ..Self::current_example()
            }
        }
    }
}
