use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::model::participant::ParticipantId;

/// Notification emitted after a successful state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElectionEvent {
    /// The pause flag was set or cleared (possibly re-asserted).
    PauseChanged { paused: bool },
    /// A participant was added to the registry.
    ParticipantRegistered { participant: ParticipantId },
    /// A ballot was accepted.
    VoteCast {
        voter: ParticipantId,
        cast_at: DateTime<Utc>,
    },
    /// The tally is final and results are readable.
    ResultsRevealed {
        /// Ballots bound to a candidate by the reveal batch.
        revealed_votes: u64,
        /// Ballots cast in total.
        total_votes: u64,
    },
}

/// Collaborator notified of every successful state transition.
///
/// Sinks are invoked while the election's exclusive lock is still held,
/// so a sink must not call back into the election it observes; the held
/// lock is what keeps a notification from re-entering a mutation.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &ElectionEvent);
}

/// Default sink: translates events into `log` records.
#[derive(Debug, Copy, Clone, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &ElectionEvent) {
        match event {
            ElectionEvent::PauseChanged { paused: true } => warn!("Election paused"),
            ElectionEvent::PauseChanged { paused: false } => info!("Election unpaused"),
            ElectionEvent::ParticipantRegistered { participant } => {
                info!("Registered participant {participant}")
            }
            ElectionEvent::VoteCast { voter, .. } => info!("Accepted ballot from {voter}"),
            ElectionEvent::ResultsRevealed {
                revealed_votes,
                total_votes,
            } => info!("Results revealed: {revealed_votes}/{total_votes} ballots bound to candidates"),
        }
    }
}
