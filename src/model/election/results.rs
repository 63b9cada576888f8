use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CandidateId;

/// The final tally, reported in the election's declared candidate order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionResults {
    /// Candidates in their declared order.
    pub candidates: Vec<CandidateId>,
    /// Vote counts, parallel to `candidates`.
    pub counts: Vec<u64>,
}

impl ElectionResults {
    /// Total number of ballots bound to a candidate at reveal time.
    pub fn revealed_votes(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Always-available election statistics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingStats {
    /// Number of registered participants.
    pub registered_count: u64,
    /// Number of ballots cast.
    pub total_votes: u64,
    /// Start of the voting window (inclusive).
    pub start_time: DateTime<Utc>,
    /// End of the voting window (inclusive).
    pub end_time: DateTime<Utc>,
    /// Whether the authority has paused the election.
    pub paused: bool,
    /// Whether results have been revealed.
    pub results_revealed: bool,
}
