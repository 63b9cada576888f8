use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ballot::{BallotCore, Commitment};
use crate::model::participant::ParticipantId;

use super::results::{ElectionResults, VotingStats};
use super::spec::ElectionSpec;
use super::state::ElectionPhase;
use super::CandidateId;

/// A view on just the election's top-level parameters, immutable once the
/// election is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionMetadata {
    /// Election name.
    pub name: String,
    /// Start of the voting window (inclusive).
    pub start_time: DateTime<Utc>,
    /// End of the voting window (inclusive).
    pub end_time: DateTime<Utc>,
}

/// Core election state: every fact the state machine owns.
///
/// All transition operations take `&mut self`, so a transition can never
/// be re-entered or observed mid-mutation by anything holding the same
/// election. [`Election`](crate::Election) wraps this in a lock for
/// genuinely concurrent callers.
///
/// Time-gated operations take `now` explicitly; the caller reads its
/// clock once at entry and the operation never sees a second instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionCore {
    /// Top-level parameters.
    metadata: ElectionMetadata,
    /// Candidates in their declared order; results are reported in this
    /// order.
    candidates: Vec<CandidateId>,
    /// The privileged identity allowed to register participants, pause,
    /// and reveal results.
    authority: ParticipantId,
    /// Registered participants. Registration is write-once.
    registered: HashSet<ParticipantId>,
    /// Ballots keyed by the participant who cast them.
    ballots: HashMap<ParticipantId, BallotCore>,
    /// Every commitment ever accepted, for uniqueness across ballots.
    used_commitments: HashSet<Commitment>,
    /// Per-candidate counts, populated only by the reveal operation.
    tally: HashMap<CandidateId, u64>,
    /// Blocks transitions while set. Orthogonal to the window.
    paused: bool,
    /// One-way flag; set by the only successful reveal.
    results_revealed: bool,
    /// Number of ballots cast.
    total_votes: u64,
}

impl ElectionCore {
    /// Create a new election from a validated spec.
    pub fn new(spec: ElectionSpec, authority: ParticipantId) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            metadata: ElectionMetadata {
                name: spec.name,
                start_time: spec.start_time,
                end_time: spec.end_time,
            },
            candidates: spec.candidates,
            authority,
            registered: HashSet::new(),
            ballots: HashMap::new(),
            used_commitments: HashSet::new(),
            tally: HashMap::new(),
            paused: false,
            results_revealed: false,
            total_votes: 0,
        })
    }

    pub fn metadata(&self) -> &ElectionMetadata {
        &self.metadata
    }

    pub fn candidates(&self) -> &[CandidateId] {
        &self.candidates
    }

    pub fn authority(&self) -> &ParticipantId {
        &self.authority
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_revealed(&self) -> bool {
        self.results_revealed
    }

    pub fn is_registered(&self, participant: &ParticipantId) -> bool {
        self.registered.contains(participant)
    }

    pub fn has_voted(&self, participant: &ParticipantId) -> bool {
        self.ballots.contains_key(participant)
    }

    /// Derive the lifecycle phase at the given instant.
    pub fn phase(&self, now: DateTime<Utc>) -> ElectionPhase {
        if now < self.metadata.start_time {
            ElectionPhase::NotStarted
        } else if now <= self.metadata.end_time {
            if self.paused {
                ElectionPhase::Paused
            } else {
                ElectionPhase::Open
            }
        } else if self.results_revealed {
            ElectionPhase::Revealed
        } else {
            ElectionPhase::Closed
        }
    }

    fn require_authority(&self, caller: &ParticipantId) -> Result<()> {
        if caller != &self.authority {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    /// Pause the election. Authority only; re-pausing is not an error.
    pub fn pause(&mut self, caller: &ParticipantId) -> Result<()> {
        self.require_authority(caller)?;
        self.paused = true;
        Ok(())
    }

    /// Unpause the election. Authority only; prior votes are unaffected.
    pub fn unpause(&mut self, caller: &ParticipantId) -> Result<()> {
        self.require_authority(caller)?;
        self.paused = false;
        Ok(())
    }

    /// Register a participant. Registration is write-once per identity;
    /// registering the same identity twice is an error, not a change.
    pub fn register(&mut self, caller: &ParticipantId, participant: ParticipantId) -> Result<()> {
        self.require_authority(caller)?;
        if self.paused {
            return Err(Error::Paused);
        }
        if self.registered.contains(&participant) {
            return Err(Error::AlreadyRegistered(participant));
        }
        self.registered.insert(participant);
        Ok(())
    }

    /// Accept one commitment from a registered participant inside the
    /// voting window.
    ///
    /// The checks and the writes form one atomic unit: nothing is written
    /// until every check has passed, so no caller can observe a ballot
    /// without its commitment in the uniqueness set or a stale count.
    pub fn cast_vote(
        &mut self,
        caller: &ParticipantId,
        commitment: Commitment,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.paused {
            return Err(Error::Paused);
        }
        if now < self.metadata.start_time {
            return Err(Error::NotYetOpen);
        }
        if now > self.metadata.end_time {
            return Err(Error::VotingClosed);
        }
        if !self.registered.contains(caller) {
            return Err(Error::NotRegistered(caller.clone()));
        }
        if self.ballots.contains_key(caller) {
            return Err(Error::AlreadyVoted(caller.clone()));
        }
        if commitment.is_zero() {
            return Err(Error::EmptyCommitment);
        }
        if self.used_commitments.contains(&commitment) {
            return Err(Error::CommitmentReused);
        }

        self.ballots
            .insert(caller.clone(), BallotCore::new(commitment, now));
        self.used_commitments.insert(commitment);
        self.total_votes += 1;
        Ok(())
    }

    /// Check a voter's stored commitment against a claimed one.
    ///
    /// A missing ballot is an error, not `false`: "never voted" and
    /// "voted for something else" must be distinguishable.
    pub fn verify_vote(&self, voter: &ParticipantId, commitment: &Commitment) -> Result<bool> {
        match self.ballots.get(voter) {
            Some(ballot) => Ok(&ballot.commitment == commitment),
            None => Err(Error::HasNotVoted(voter.clone())),
        }
    }

    /// Bind previously cast commitments to candidate choices and
    /// accumulate the tally. Authority only, after the window closes, at
    /// most once ever.
    ///
    /// The batch is all-or-nothing: the whole of it is validated before
    /// any record is touched, so a failure at any index aborts the call
    /// with zero tally or ballot mutation.
    pub fn reveal_results(
        &mut self,
        caller: &ParticipantId,
        voters: &[ParticipantId],
        choices: &[CandidateId],
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.require_authority(caller)?;
        if self.paused {
            return Err(Error::Paused);
        }
        if now <= self.metadata.end_time {
            return Err(Error::VotingStillOpen);
        }
        if self.results_revealed {
            return Err(Error::AlreadyRevealed);
        }
        if voters.len() != choices.len() {
            return Err(Error::LengthMismatch {
                voters: voters.len(),
                choices: choices.len(),
            });
        }
        if voters.len() as u64 > self.total_votes {
            return Err(Error::VoterCountExceedsTotal {
                voters: voters.len(),
                total_votes: self.total_votes,
            });
        }

        // Validation pass. A voter that appears twice in the batch counts
        // as already verified, exactly as if the items ran in order.
        let mut new_tally: HashMap<CandidateId, u64> = HashMap::new();
        let mut seen: HashSet<&ParticipantId> = HashSet::new();
        for (voter, choice) in voters.iter().zip(choices) {
            let ballot = self
                .ballots
                .get(voter)
                .ok_or_else(|| Error::HasNotVoted(voter.clone()))?;
            if ballot.verified_at_reveal || !seen.insert(voter) {
                return Err(Error::AlreadyVerified(voter.clone()));
            }
            if !self.candidates.contains(choice) {
                return Err(Error::InvalidCandidate(choice.clone()));
            }
            *new_tally.entry(choice.clone()).or_insert(0) += 1;
        }

        // Commit pass. Nothing below can fail.
        for voter in voters {
            let ballot = self.ballots.get_mut(voter).unwrap(); // Presence checked above.
            ballot.verify();
        }
        self.tally = new_tally;
        self.results_revealed = true;
        Ok(())
    }

    /// The final tally, in the election's declared candidate order.
    pub fn results(&self) -> Result<ElectionResults> {
        if !self.results_revealed {
            return Err(Error::ResultsNotReady);
        }
        let counts = self
            .candidates
            .iter()
            .map(|candidate| self.tally.get(candidate).copied().unwrap_or(0))
            .collect();
        Ok(ElectionResults {
            candidates: self.candidates.clone(),
            counts,
        })
    }

    /// Election statistics. Always available.
    pub fn stats(&self) -> VotingStats {
        VotingStats {
            registered_count: self.registered.len() as u64,
            total_votes: self.total_votes,
            start_time: self.metadata.start_time,
            end_time: self.metadata.end_time,
            paused: self.paused,
            results_revealed: self.results_revealed,
        }
    }
}
