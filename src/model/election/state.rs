use serde::{Deserialize, Serialize};

/// Phases of the election lifecycle.
///
/// Phases are never stored; they are derived on demand from the clock
/// and the pause/reveal flags, so there is no stored state to drift out
/// of sync with the window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionPhase {
    /// The voting window has not opened yet.
    NotStarted,
    /// The voting window is open and ballots are accepted.
    Open,
    /// Inside the voting window, but the authority has paused voting.
    Paused,
    /// The voting window has closed; results are not yet revealed.
    Closed,
    /// Results have been revealed. Terminal.
    Revealed,
}
