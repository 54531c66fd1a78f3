//! Per-item tally (deterministic, integers-only).
//!
//! Inputs:
//! - one `AgendaItem` with three non-negative area tallies (for/against/abstain)
//!   and an optional precomputed decision.
//!
//! Output:
//! - `TallyOutcome` with the raw areas, the voted area, three percentages in
//!   tenths and the approval flag.
//!
//! Notes:
//! - Percent denominator is the item's **voted** area (`for+against+abstain`),
//!   not the building total. Zero voted area yields 0/0/0.
//! - A precomputed decision wins; otherwise approval is an exact strict
//!   majority (`for / voted > 1/2`).

use mp_core::{
    rounding::{area_share, is_strict_majority},
    AgendaItem, Area, Decision, PctTenths,
};

/// Where `approved` came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecidedBy {
    Precomputed,
    SimpleMajority,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyOutcome {
    pub votes_for: Area,
    pub votes_against: Area,
    pub votes_abstain: Area,
    pub voted: Area,
    pub pct_for: PctTenths,
    pub pct_against: PctTenths,
    pub pct_abstain: PctTenths,
    pub approved: bool,
    pub decided_by: DecidedBy,
}

/// Tabulation errors.
#[derive(Debug, PartialEq, Eq)]
pub enum TallyError {
    /// The three tallies cannot be summed in `u64` hundredths.
    Overflow,
}

/// Tally one agenda item.
pub fn tally(item: &AgendaItem) -> Result<TallyOutcome, TallyError> {
    let voted = Area::checked_sum([item.votes_for, item.votes_against, item.votes_abstain])
        .ok_or(TallyError::Overflow)?;

    let (approved, decided_by) = match item.decision {
        Some(d) => (d == Decision::Approved, DecidedBy::Precomputed),
        None => (is_strict_majority(item.votes_for, voted), DecidedBy::SimpleMajority),
    };

    Ok(TallyOutcome {
        votes_for: item.votes_for,
        votes_against: item.votes_against,
        votes_abstain: item.votes_abstain,
        voted,
        pct_for: area_share(item.votes_for, voted),
        pct_against: area_share(item.votes_against, voted),
        pct_abstain: area_share(item.votes_abstain, voted),
        approved,
        decided_by,
    })
}
