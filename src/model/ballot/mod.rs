pub use ballot_core::BallotCore;
pub use commitment::{Commitment, COMMITMENT_BYTES};

mod ballot_core;
mod commitment;
