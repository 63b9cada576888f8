use thiserror::Error;

use crate::model::election::CandidateId;
use crate::model::participant::ParticipantId;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way an election operation can be rejected.
///
/// Errors are synchronous and local to the call that produced them; a
/// failed operation leaves the election state untouched, including the
/// multi-item reveal batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("caller is not the election authority")]
    Unauthorized,
    #[error("the election is paused")]
    Paused,
    #[error("voting has not yet opened")]
    NotYetOpen,
    #[error("voting has closed")]
    VotingClosed,
    #[error("voting is still open; results cannot be revealed yet")]
    VotingStillOpen,
    #[error("participant identities must be non-empty")]
    InvalidIdentity,
    #[error("participant {0} is already registered")]
    AlreadyRegistered(ParticipantId),
    #[error("{0} is not a registered participant")]
    NotRegistered(ParticipantId),
    #[error("participant {0} has already voted")]
    AlreadyVoted(ParticipantId),
    #[error("commitment must not be all zeroes")]
    EmptyCommitment,
    #[error("commitment has already been used by another ballot")]
    CommitmentReused,
    #[error("participant {0} has not voted")]
    HasNotVoted(ParticipantId),
    #[error("ballot for {0} is already verified")]
    AlreadyVerified(ParticipantId),
    #[error("{0:?} is not a candidate in this election")]
    InvalidCandidate(CandidateId),
    #[error("reveal batch names {voters} voters but only {total_votes} votes were cast")]
    VoterCountExceedsTotal { voters: usize, total_votes: u64 },
    #[error("results have already been revealed")]
    AlreadyRevealed,
    #[error("results are not ready")]
    ResultsNotReady,
    #[error("reveal batch has {voters} voters but {choices} candidate choices")]
    LengthMismatch { voters: usize, choices: usize },
    #[error("voting must start before it ends")]
    InvalidWindow,
    #[error("an election needs at least one candidate")]
    NoCandidates,
}
