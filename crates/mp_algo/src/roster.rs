//! Voter roster: one entry per distinct voter id, in first-appearance order.
//!
//! Order: the flat roster first, then any voter that only appears in the
//! per-item groups (walked in agenda-item-id order). The 1-based `index`
//! is stable for unchanged input and feeds the relationship-id scheme.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use mp_core::{AgendaItemId, Area, VoteChoice, VoteRecord, VoterId};

/// One ballot of a roster entry, attributed to its agenda item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub item: AgendaItemId,
    pub choice: VoteChoice,
    pub voted_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    /// 1-based, stable w.r.t. input order.
    pub index: usize,
    pub voter_id: VoterId,
    pub display_name: String,
    pub unit_label: String,
    pub area: Area,
    /// Latest ballot timestamp seen for this voter.
    pub last_voted_at: NaiveDateTime,
    pub ballots: Vec<Ballot>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn build(flat: &[VoteRecord], by_item: &BTreeMap<AgendaItemId, Vec<VoteRecord>>) -> Self {
        let mut entries: Vec<RosterEntry> = Vec::new();
        let mut slot: HashMap<VoterId, usize> = HashMap::new();

        let mut admit = |rec: &VoteRecord, entries: &mut Vec<RosterEntry>| -> usize {
            if let Some(&i) = slot.get(&rec.voter_id) {
                let e = &mut entries[i];
                if rec.voted_at > e.last_voted_at {
                    e.last_voted_at = rec.voted_at;
                }
                return i;
            }
            let i = entries.len();
            entries.push(RosterEntry {
                index: i + 1,
                voter_id: rec.voter_id.clone(),
                display_name: rec.display_name.clone(),
                unit_label: rec.unit_label.clone(),
                area: rec.area,
                last_voted_at: rec.voted_at,
                ballots: Vec::new(),
            });
            slot.insert(rec.voter_id.clone(), i);
            i
        };

        for rec in flat {
            admit(rec, &mut entries);
        }
        for (item, recs) in by_item {
            for rec in recs {
                let i = admit(rec, &mut entries);
                entries[i].ballots.push(Ballot { item: item.clone(), choice: rec.choice, voted_at: rec.voted_at });
            }
        }

        Roster { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, voter: &VoterId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| &e.voter_id == voter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(id: &str, minute: u32, choice: VoteChoice) -> VoteRecord {
        VoteRecord {
            voter_id: id.parse().unwrap(),
            display_name: format!("Voter {id}"),
            unit_label: format!("кв. {id}"),
            area: Area::from_hundredths(5_000),
            voted_at: chrono::NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(10, minute, 0).unwrap(),
            choice,
            justification: None,
        }
    }

    #[test]
    fn dedups_in_first_appearance_order() {
        let flat = vec![rec("v2", 1, VoteChoice::For), rec("v1", 2, VoteChoice::For), rec("v2", 3, VoteChoice::Against)];
        let mut by_item = BTreeMap::new();
        by_item.insert("a".parse().unwrap(), vec![rec("v1", 4, VoteChoice::For), rec("v3", 5, VoteChoice::Abstain)]);
        by_item.insert("b".parse().unwrap(), vec![rec("v2", 6, VoteChoice::Against)]);

        let r = Roster::build(&flat, &by_item);
        let ids: Vec<(usize, &str)> = r.entries().iter().map(|e| (e.index, e.voter_id.as_str())).collect();
        assert_eq!(ids, vec![(1, "v2"), (2, "v1"), (3, "v3")]);

        let v2 = r.get(&"v2".parse().unwrap()).unwrap();
        assert_eq!(v2.ballots.len(), 1);
        assert_eq!(v2.ballots[0].item.as_str(), "b");
        assert_eq!(v2.last_voted_at.format("%H:%M").to_string(), "10:06");
    }

    #[test]
    fn same_input_same_indices() {
        let flat = vec![rec("x", 1, VoteChoice::For), rec("y", 1, VoteChoice::For)];
        let a = Roster::build(&flat, &BTreeMap::new());
        let b = Roster::build(&flat, &BTreeMap::new());
        assert_eq!(a, b);
    }

    #[test]
    fn no_ballots_no_voters() {
        let r = Roster::build(&[], &BTreeMap::new());
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert!(r.get(&"v1".parse().unwrap()).is_none());
    }
}
