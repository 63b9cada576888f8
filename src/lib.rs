//! Commit-reveal election state machine.
//!
//! An election registers eligible participants, accepts one opaque vote
//! commitment per participant inside a bounded time window, and lets the
//! election authority reveal and tally the results exactly once. Every
//! transition is guarded against replay, reentry, and out-of-window
//! execution.
//!
//! Transport, persistence, commitment generation, and caller
//! authentication are collaborators supplied by the embedding
//! application; this crate owns the election state and its invariants.
//! The clock and the event sink are injected (see [`clock`] and
//! [`event`]), and all state types carry serde support so a collaborator
//! can persist them.
//!
//! [`Election`] is the thread-safe entry point. [`ElectionCore`] is the
//! underlying single-owner state machine for callers that bring their
//! own locking.

pub mod clock;
pub mod error;
pub mod event;
pub mod model;

mod election;

pub use clock::{Clock, ManualClock, SystemClock};
pub use election::Election;
pub use error::{Error, Result};
pub use event::{ElectionEvent, EventSink, LogSink};
pub use model::ballot::{BallotCore, Commitment, COMMITMENT_BYTES};
pub use model::election::{
    CandidateId, ElectionCore, ElectionMetadata, ElectionPhase, ElectionResults, ElectionSpec,
    VotingStats,
};
pub use model::participant::ParticipantId;
