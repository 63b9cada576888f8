pub use election_core::{ElectionCore, ElectionMetadata};
pub use results::{ElectionResults, VotingStats};
pub use spec::ElectionSpec;
pub use state::ElectionPhase;

mod election_core;
mod results;
mod spec;
mod state;

/// Candidate IDs (names) are strings.
pub type CandidateId = String;
