//! Structural checks over a `SynthesisInput`, run before any tallying or
//! rendering. Each failure names the offending meeting, item, or voter.

use std::collections::BTreeSet;
use std::fmt;

use crate::area::Area;
use crate::entities::SynthesisInput;
use crate::ids::{AgendaItemId, VoterId};

/// Validation errors for core inputs and params.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    VotedAreaExceedsTotal { voted: Area, total: Area },
    ParticipationExceedsEligible { participated: u32, eligible: u32 },
    TallyExceedsTotal { item: AgendaItemId, tally: Area, total: Area },
    TallyOverflow { item: AgendaItemId },
    DuplicatePosition { item: AgendaItemId, position: u32 },
    UnknownAgendaItem(AgendaItemId),
    ZeroBallotArea { voter: VoterId },
    DomainOutOfRange(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::VotedAreaExceedsTotal { voted, total } => {
                write!(f, "voted area {voted} exceeds total area {total}")
            }
            CoreError::ParticipationExceedsEligible { participated, eligible } => {
                write!(f, "participated count {participated} exceeds eligible count {eligible}")
            }
            CoreError::TallyExceedsTotal { item, tally, total } => {
                write!(f, "agenda item {item}: tallies sum to {tally}, above total area {total}")
            }
            CoreError::TallyOverflow { item } => write!(f, "agenda item {item}: tally overflow"),
            CoreError::DuplicatePosition { item, position } => {
                write!(f, "agenda item {item}: position {position} already used")
            }
            CoreError::UnknownAgendaItem(item) => write!(f, "ballots grouped under unknown agenda item {item}"),
            CoreError::ZeroBallotArea { voter } => write!(f, "voter {voter}: ballot area must be > 0"),
            CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Check every invariant of the input snapshot. First violation wins.
pub fn validate_input(input: &SynthesisInput) -> Result<(), CoreError> {
    let m = &input.meeting;
    if m.voted_area > m.total_area {
        return Err(CoreError::VotedAreaExceedsTotal { voted: m.voted_area, total: m.total_area });
    }
    if m.participated_count > m.eligible_count {
        return Err(CoreError::ParticipationExceedsEligible {
            participated: m.participated_count,
            eligible: m.eligible_count,
        });
    }
    if m.quorum_threshold_pct > 100 {
        return Err(CoreError::DomainOutOfRange("quorum_threshold_pct"));
    }

    let mut positions = BTreeSet::new();
    let mut known = BTreeSet::new();
    for item in &input.agenda {
        if !positions.insert(item.position) {
            return Err(CoreError::DuplicatePosition { item: item.id.clone(), position: item.position });
        }
        known.insert(&item.id);
        let tally = Area::checked_sum([item.votes_for, item.votes_against, item.votes_abstain])
            .ok_or_else(|| CoreError::TallyOverflow { item: item.id.clone() })?;
        if tally > m.total_area {
            return Err(CoreError::TallyExceedsTotal { item: item.id.clone(), tally, total: m.total_area });
        }
    }

    if let Some(unknown) = input.votes_by_item.keys().find(|k| !known.contains(k)) {
        return Err(CoreError::UnknownAgendaItem(unknown.clone()));
    }

    let ballots = input.roster.iter().chain(input.votes_by_item.values().flatten());
    if let Some(bad) = ballots.into_iter().find(|v| v.area.is_zero()) {
        return Err(CoreError::ZeroBallotArea { voter: bad.voter_id.clone() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn h(x: u64) -> Area { Area::from_hundredths(x) }

    fn input() -> SynthesisInput {
        SynthesisInput {
            meeting: MeetingSnapshot {
                id: "m-1".parse().unwrap(),
                sequence_number: 3,
                address: "ул. Ленина, д. 5".into(),
                format: ConductFormat::Hybrid,
                scheduled_at: chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap().and_hms_opt(18, 0, 0).unwrap(),
                total_area: h(100_000),
                voted_area: h(80_000),
                eligible_count: 40,
                participated_count: 31,
                quorum_threshold_pct: 50,
                quorum_reached: true,
                organizer_name: "Иванов И. И.".into(),
            },
            agenda: vec![AgendaItem {
                id: "a-2".parse().unwrap(),
                position: 2,
                title: "Ремонт кровли".into(),
                description: None,
                votes_for: h(60_000),
                votes_against: h(30_000),
                votes_abstain: h(10_000),
                decision: None,
            }],
            roster: vec![],
            votes_by_item: BTreeMap::new(),
            integrity_hash: None,
        }
    }

    #[test]
    fn accepts_consistent_snapshot() {
        assert_eq!(validate_input(&input()), Ok(()));
    }

    #[test]
    fn rejects_voted_above_total() {
        let mut i = input();
        i.meeting.voted_area = h(100_001);
        assert!(matches!(validate_input(&i), Err(CoreError::VotedAreaExceedsTotal { .. })));
    }

    #[test]
    fn rejects_tally_above_total_area() {
        let mut i = input();
        i.agenda[0].votes_abstain = h(10_001);
        let err = validate_input(&i).unwrap_err();
        assert_eq!(err.to_string(), "agenda item a-2: tallies sum to 1000.01, above total area 1000.00");
    }

    #[test]
    fn rejects_duplicate_positions_and_unknown_groups() {
        let mut i = input();
        let mut dup = i.agenda[0].clone();
        dup.id = "a-3".parse().unwrap();
        i.agenda.push(dup);
        assert!(matches!(validate_input(&i), Err(CoreError::DuplicatePosition { position: 2, .. })));

        let mut i = input();
        i.votes_by_item.insert("ghost".parse().unwrap(), vec![]);
        assert!(matches!(validate_input(&i), Err(CoreError::UnknownAgendaItem(_))));
    }
}
