// crates/mp_algo/src/lib.rs
#![forbid(unsafe_code)]

// ----------------------------- Tally (public surface) ---------------------------

pub mod tally;

pub use tally::{tally, DecidedBy, TallyError, TallyOutcome};

// ----------------------------- Quorum & roster ----------------------------------

pub mod quorum;
pub mod roster;

pub use quorum::QuorumSummary;
pub use roster::{Ballot, Roster, RosterEntry};
