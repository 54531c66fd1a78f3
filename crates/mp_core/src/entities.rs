//! crates/mp_core/src/entities.rs
//! Input entities for one synthesis call. Immutable after construction;
//! the engine never persists them.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::ids::{AgendaItemId, MeetingId, VoterId};

/// How the meeting was conducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConductFormat {
    #[cfg_attr(feature = "serde", serde(rename = "in_person"))]
    InPerson,
    #[cfg_attr(feature = "serde", serde(rename = "remote"))]
    Remote,
    #[cfg_attr(feature = "serde", serde(rename = "hybrid"))]
    Hybrid,
}

/// Externally precomputed decision for an agenda item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Decision {
    #[cfg_attr(feature = "serde", serde(rename = "approved"))]
    Approved,
    #[cfg_attr(feature = "serde", serde(rename = "rejected"))]
    Rejected,
}

/// A single ballot choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VoteChoice {
    #[cfg_attr(feature = "serde", serde(rename = "for"))]
    For,
    #[cfg_attr(feature = "serde", serde(rename = "against"))]
    Against,
    #[cfg_attr(feature = "serde", serde(rename = "abstain"))]
    Abstain,
}

/// Meeting-level metadata and quorum figures. Every field is required on the
/// wire: a missing quorum flag must fail loading, not default to a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeetingSnapshot {
    pub id: MeetingId,
    pub sequence_number: u32,
    pub address: String,
    pub format: ConductFormat,
    pub scheduled_at: NaiveDateTime,
    pub total_area: Area,
    pub voted_area: Area,
    pub eligible_count: u32,
    pub participated_count: u32,
    pub quorum_threshold_pct: u8,
    pub quorum_reached: bool,
    pub organizer_name: String,
}

/// One resolution put to vote. Position 1 is reserved for the synthesized
/// "elect chair and secretary" item; callers usually start at 2 but only
/// uniqueness and order are significant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgendaItem {
    pub id: AgendaItemId,
    pub position: u32,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    pub votes_for: Area,
    pub votes_against: Area,
    pub votes_abstain: Area,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub decision: Option<Decision>,
}

/// A voter's ballot on one agenda item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoteRecord {
    pub voter_id: VoterId,
    pub display_name: String,
    pub unit_label: String,
    pub area: Area,
    pub voted_at: NaiveDateTime,
    pub choice: VoteChoice,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub justification: Option<String>,
}

impl VoteRecord {
    /// Justification text if present and not blank.
    pub fn justification_text(&self) -> Option<&str> {
        self.justification.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Registration block of the organization that runs the meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrganizationIdentity {
    pub name: String,
    pub tax_id: String,
    pub registration_id: String,
    pub address: String,
}

impl Default for OrganizationIdentity {
    fn default() -> Self {
        Self {
            name: "ТСЖ «Управляющая организация»".to_string(),
            tax_id: "0000000000".to_string(),
            registration_id: "0000000000000".to_string(),
            address: String::new(),
        }
    }
}

/// Everything one synthesis call consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynthesisInput {
    pub meeting: MeetingSnapshot,
    pub agenda: Vec<AgendaItem>,
    /// Flat roster spanning all items (drives the appendix order).
    pub roster: Vec<VoteRecord>,
    /// Ballots grouped by agenda item id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub votes_by_item: BTreeMap<AgendaItemId, Vec<VoteRecord>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub integrity_hash: Option<String>,
}

impl SynthesisInput {
    /// Agenda items sorted by position.
    pub fn agenda_in_order(&self) -> Vec<&AgendaItem> {
        let mut items: Vec<&AgendaItem> = self.agenda.iter().collect();
        items.sort_by_key(|it| it.position);
        items
    }

    /// Ballots for `item`; empty when the item has none.
    pub fn votes_for_item(&self, item: &AgendaItemId) -> &[VoteRecord] {
        self.votes_by_item.get(item).map(Vec::as_slice).unwrap_or(&[])
    }
}
