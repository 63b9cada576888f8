use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::warn;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::event::{ElectionEvent, EventSink, LogSink};
use crate::model::ballot::Commitment;
use crate::model::election::{
    CandidateId, ElectionCore, ElectionPhase, ElectionResults, ElectionSpec, VotingStats,
};
use crate::model::participant::ParticipantId;

/// Thread-safe handle to an election.
///
/// Transition operations hold the exclusive lock across the whole
/// operation, including event emission, so concurrent callers can never
/// interleave with a mutation and a sink callback can never re-enter
/// one. Queries share a read lock and observe a consistent snapshot.
///
/// The clock is read once per operation, before the lock is taken; a
/// single call never sees two different times.
pub struct Election {
    core: RwLock<ElectionCore>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl Election {
    /// Create an election with the default collaborators: wall-clock
    /// time and the log-based event sink.
    pub fn new(spec: ElectionSpec, authority: ParticipantId) -> Result<Self> {
        Self::with_collaborators(spec, authority, Arc::new(SystemClock), Arc::new(LogSink))
    }

    /// Create an election with explicit clock and event sink
    /// collaborators.
    pub fn with_collaborators(
        spec: ElectionSpec,
        authority: ParticipantId,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let core = ElectionCore::new(spec, authority)?;
        Ok(Self {
            core: RwLock::new(core),
            clock,
            sink,
        })
    }

    /// Pause the election.
    pub fn pause(&self, caller: &ParticipantId) -> Result<()> {
        let mut core = self.write();
        core.pause(caller)?;
        self.sink.emit(&ElectionEvent::PauseChanged { paused: true });
        Ok(())
    }

    /// Unpause the election.
    pub fn unpause(&self, caller: &ParticipantId) -> Result<()> {
        let mut core = self.write();
        core.unpause(caller)?;
        self.sink
            .emit(&ElectionEvent::PauseChanged { paused: false });
        Ok(())
    }

    /// Register a participant.
    pub fn register(&self, caller: &ParticipantId, participant: ParticipantId) -> Result<()> {
        let mut core = self.write();
        core.register(caller, participant.clone())?;
        self.sink
            .emit(&ElectionEvent::ParticipantRegistered { participant });
        Ok(())
    }

    /// Cast a vote commitment for the calling participant.
    pub fn cast_vote(&self, caller: &ParticipantId, commitment: Commitment) -> Result<()> {
        let now = self.clock.now();
        let mut core = self.write();
        if let Err(err) = core.cast_vote(caller, commitment, now) {
            warn!("Rejected ballot from {caller}: {err}");
            return Err(err);
        }
        self.sink.emit(&ElectionEvent::VoteCast {
            voter: caller.clone(),
            cast_at: now,
        });
        Ok(())
    }

    /// Reveal the results: bind each listed voter's commitment to a
    /// candidate choice and finalize the tally.
    pub fn reveal_results(
        &self,
        caller: &ParticipantId,
        voters: &[ParticipantId],
        choices: &[CandidateId],
    ) -> Result<()> {
        let now = self.clock.now();
        let mut core = self.write();
        if let Err(err) = core.reveal_results(caller, voters, choices, now) {
            warn!("Rejected reveal: {err}");
            return Err(err);
        }
        self.sink.emit(&ElectionEvent::ResultsRevealed {
            revealed_votes: voters.len() as u64,
            total_votes: core.stats().total_votes,
        });
        Ok(())
    }

    /// Check a voter's stored commitment against a claimed one.
    pub fn verify_vote(&self, voter: &ParticipantId, commitment: &Commitment) -> Result<bool> {
        self.read().verify_vote(voter, commitment)
    }

    /// The final tally, once revealed.
    pub fn results(&self) -> Result<ElectionResults> {
        self.read().results()
    }

    /// Election statistics. Always available.
    pub fn stats(&self) -> VotingStats {
        self.read().stats()
    }

    /// The lifecycle phase at the current clock reading.
    pub fn phase(&self) -> ElectionPhase {
        let now = self.clock.now();
        self.read().phase(now)
    }

    fn read(&self) -> RwLockReadGuard<'_, ElectionCore> {
        self.core.read().expect("election lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, ElectionCore> {
        self.core.write().expect("election lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::thread;

    use chrono::{Duration, TimeZone, Utc};

    use crate::clock::ManualClock;
    use crate::error::Error;

    use super::*;

    /// Sink that records every event, for asserting emission.
    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<ElectionEvent>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<ElectionEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: &ElectionEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn authority() -> ParticipantId {
        "returning-officer".parse().unwrap()
    }

    fn pid(name: &str) -> ParticipantId {
        name.parse().unwrap()
    }

    fn spec() -> ElectionSpec {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        ElectionSpec {
            name: "Club Captain".to_string(),
            start_time: start,
            end_time: start + Duration::hours(1),
            candidates: vec!["north".to_string(), "south".to_string()],
        }
    }

    fn random_commitment() -> Commitment {
        Commitment::new(rand::random())
    }

    fn election_at_open() -> (Arc<Election>, Arc<ManualClock>, Arc<RecordingSink>) {
        let clock = Arc::new(ManualClock::new(spec().start_time));
        let sink = Arc::new(RecordingSink::default());
        let election = Election::with_collaborators(
            spec(),
            authority(),
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::clone(&sink) as Arc<dyn EventSink>,
        )
        .unwrap();
        (Arc::new(election), clock, sink)
    }

    #[test]
    fn full_flow_through_handle() {
        let (election, clock, sink) = election_at_open();
        assert_eq!(election.phase(), ElectionPhase::Open);

        election.register(&authority(), pid("alice")).unwrap();
        election.register(&authority(), pid("bob")).unwrap();

        let a = random_commitment();
        let b = random_commitment();
        election.cast_vote(&pid("alice"), a).unwrap();
        election.cast_vote(&pid("bob"), b).unwrap();
        assert!(election.verify_vote(&pid("alice"), &a).unwrap());

        // Close the window and reveal.
        clock.set(spec().end_time + Duration::seconds(1));
        assert_eq!(election.phase(), ElectionPhase::Closed);
        election
            .reveal_results(
                &authority(),
                &[pid("alice"), pid("bob")],
                &["north".to_string(), "north".to_string()],
            )
            .unwrap();

        assert_eq!(election.phase(), ElectionPhase::Revealed);
        let results = election.results().unwrap();
        assert_eq!(results.counts, vec![2, 0]);

        let events = sink.events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ElectionEvent::ResultsRevealed { .. }))
                .count(),
            1
        );
        assert!(events.contains(&ElectionEvent::ResultsRevealed {
            revealed_votes: 2,
            total_votes: 2,
        }));
    }

    #[test]
    fn pause_emits_events() {
        let (election, _clock, sink) = election_at_open();
        election.pause(&authority()).unwrap();
        assert_eq!(election.phase(), ElectionPhase::Paused);
        election.unpause(&authority()).unwrap();

        assert_eq!(
            sink.events(),
            vec![
                ElectionEvent::PauseChanged { paused: true },
                ElectionEvent::PauseChanged { paused: false },
            ]
        );
    }

    #[test]
    fn rejected_operations_emit_nothing() {
        let (election, clock, sink) = election_at_open();
        clock.set(spec().start_time - Duration::seconds(1));

        election.register(&authority(), pid("alice")).unwrap();
        let err = election
            .cast_vote(&pid("alice"), random_commitment())
            .unwrap_err();
        assert_eq!(err, Error::NotYetOpen);

        // Only the registration made it to the sink.
        assert_eq!(
            sink.events(),
            vec![ElectionEvent::ParticipantRegistered {
                participant: pid("alice"),
            }]
        );
    }

    #[test]
    fn concurrent_casting_neither_loses_nor_double_counts() {
        let (election, _clock, _sink) = election_at_open();
        const VOTERS: usize = 8;

        for i in 0..VOTERS {
            election
                .register(&authority(), pid(&format!("voter-{i}")))
                .unwrap();
        }

        let handles: Vec<_> = (0..VOTERS)
            .map(|i| {
                let election = Arc::clone(&election);
                thread::spawn(move || {
                    let voter = pid(&format!("voter-{i}"));
                    let commitment = random_commitment();
                    // Each voter tries twice; exactly one attempt lands.
                    let first = election.cast_vote(&voter, commitment);
                    let second = election.cast_vote(&voter, commitment);
                    (first, second, voter, commitment)
                })
            })
            .collect();

        for handle in handles {
            let (first, second, voter, commitment) = handle.join().unwrap();
            first.unwrap();
            assert_eq!(second.unwrap_err(), Error::AlreadyVoted(voter.clone()));
            assert!(election.verify_vote(&voter, &commitment).unwrap());
        }

        let stats = election.stats();
        assert_eq!(stats.total_votes, VOTERS as u64);
        assert_eq!(stats.registered_count, VOTERS as u64);
    }
}
