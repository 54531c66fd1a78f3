//! crates/mp_report/src/model.rs
//! Pure protocol model + mapper from tallied inputs.
//! No I/O, no recomputation of decisions: tallies and quorum come in finished.
//! Strings here are plain text; escaping happens in the renderer.

use chrono::{Datelike, NaiveDateTime};

use mp_algo::{QuorumSummary, Roster, TallyOutcome};
use mp_core::{AgendaItem, SynthesisInput, SynthesisParams, VoterId};

use crate::format::{fmt_ballot_time, fmt_date, fmt_time, fmt_timestamp};
use crate::phrases;

/// One agenda item with its finished tally, in agenda order.
#[derive(Clone, Debug)]
pub struct ItemResult<'a> {
    pub item: &'a AgendaItem,
    pub tally: TallyOutcome,
}

/// Everything the composer reads.
#[derive(Clone, Debug)]
pub struct ComposeInput<'a> {
    pub input: &'a SynthesisInput,
    pub items: &'a [ItemResult<'a>],
    pub quorum: &'a QuorumSummary,
    pub roster: &'a Roster,
    pub params: &'a SynthesisParams,
    pub generated_at: NaiveDateTime,
}

// -------------------- Public model root & sections (document order) --------------------

#[derive(Clone, Debug)]
pub struct ProtocolModel {
    pub header: HeaderBlock,
    pub title: TitleBlock,
    pub info: MeetingInfo,
    pub quorum: QuorumBlock,
    pub agenda: Vec<AgendaLine>,
    pub sections: Vec<ItemSection>,
    pub attribution: Attribution,
    pub appendix: Vec<RosterRow>,
    pub footer: Footer,
    pub organization_image_mm: u32,
    pub voter_image_mm: u32,
}

#[derive(Clone, Debug)]
pub struct HeaderBlock { pub boilerplate: String, pub citation: String }

#[derive(Clone, Debug)]
pub struct TitleBlock {
    pub number: String,                  // "12/2026"
    pub heading: String,
    pub address: String,
    pub format_phrase: String,
}

#[derive(Clone, Debug)]
pub struct MeetingInfo { pub date: String, pub time: String, pub venue: String }

#[derive(Clone, Debug)]
pub struct QuorumBlock {
    pub total_area: String,              // "1000.00"
    pub voted_area: String,
    pub participation_pct: String,       // "80.0"
    pub participated: u32,
    pub eligible: u32,
    pub threshold_pct: u8,
    pub reached: bool,
}

#[derive(Clone, Debug)]
pub struct AgendaLine { pub number: usize, pub title: String }

#[derive(Clone, Debug)]
pub struct ItemSection {
    pub number: usize,
    pub title: String,
    pub body: ItemBody,
}

#[derive(Clone, Debug)]
pub enum ItemBody {
    /// Synthesized item 1.
    ElectChair { chair: String },
    Voted {
        description: Option<String>,
        tally: TallyCells,
        approved: bool,
        voters: Option<VoterTable>,
    },
}

#[derive(Clone, Debug)]
pub struct TallyCells {
    pub areas: [String; 3],              // for / against / abstain, "600.00"
    pub percents: [String; 3],           // "60.0"
}

#[derive(Clone, Debug)]
pub struct VoterTable {
    pub with_justification: bool,
    pub rows: Vec<VoterRow>,
}

#[derive(Clone, Debug)]
pub struct VoterRow {
    pub number: usize,
    pub name: String,
    pub unit: String,
    pub area: String,
    pub choice: String,
    pub time: String,
    pub justification: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Attribution { pub organizer: String, pub organization: String }

#[derive(Clone, Debug)]
pub struct RosterRow {
    pub index: usize,
    pub voter: VoterId,
    pub name: String,
    pub unit: String,
    pub area: String,
}

#[derive(Clone, Debug)]
pub struct Footer { pub generated_at: String, pub integrity_hash: Option<String> }

// -------------------- Mapper --------------------

pub fn build_model(c: &ComposeInput<'_>) -> ProtocolModel {
    let m = &c.input.meeting;

    let header = HeaderBlock {
        boilerplate: phrases::HEADER_BOILERPLATE.to_string(),
        citation: phrases::REGULATORY_CITATION.to_string(),
    };

    let title = TitleBlock {
        number: format!("{}/{}", m.sequence_number, c.generated_at.year()),
        heading: phrases::TITLE_HEADING.to_string(),
        address: m.address.clone(),
        format_phrase: phrases::conduct_format(m.format).to_string(),
    };

    let info = MeetingInfo {
        date: fmt_date(m.scheduled_at.date()),
        time: fmt_time(m.scheduled_at),
        venue: m.address.clone(),
    };

    let q = c.quorum;
    let quorum = QuorumBlock {
        total_area: q.total_area.to_string(),
        voted_area: q.voted_area.to_string(),
        participation_pct: q.participation.to_string(),
        participated: q.participated_count,
        eligible: q.eligible_count,
        threshold_pct: q.threshold_pct,
        reached: q.reached,
    };

    let mut agenda = vec![AgendaLine { number: 1, title: phrases::ELECT_CHAIR_TITLE.to_string() }];
    agenda.extend(c.items.iter().enumerate().map(|(i, r)| AgendaLine { number: i + 2, title: r.item.title.clone() }));

    let mut sections = vec![ItemSection {
        number: 1,
        title: phrases::ELECT_CHAIR_TITLE.to_string(),
        body: ItemBody::ElectChair { chair: m.organizer_name.clone() },
    }];
    sections.extend(c.items.iter().enumerate().map(|(i, r)| item_section(i + 2, r, c.input)));

    let attribution = Attribution {
        organizer: m.organizer_name.clone(),
        organization: c.params.organization.name.clone(),
    };

    let appendix = c
        .roster
        .entries()
        .iter()
        .map(|e| RosterRow {
            index: e.index,
            voter: e.voter_id.clone(),
            name: e.display_name.clone(),
            unit: e.unit_label.clone(),
            area: e.area.to_string(),
        })
        .collect();

    let footer = Footer {
        generated_at: fmt_timestamp(c.generated_at),
        integrity_hash: c.input.integrity_hash.clone().filter(|h| !h.trim().is_empty()),
    };

    ProtocolModel {
        header,
        title,
        info,
        quorum,
        agenda,
        sections,
        attribution,
        appendix,
        footer,
        organization_image_mm: c.params.organization_image_mm,
        voter_image_mm: c.params.voter_image_mm,
    }
}

fn item_section(number: usize, r: &ItemResult<'_>, input: &SynthesisInput) -> ItemSection {
    let t = &r.tally;
    let tally = TallyCells {
        areas: [t.votes_for.to_string(), t.votes_against.to_string(), t.votes_abstain.to_string()],
        percents: [t.pct_for.to_string(), t.pct_against.to_string(), t.pct_abstain.to_string()],
    };

    let ballots = input.votes_for_item(&r.item.id);
    let voters = (!ballots.is_empty()).then(|| VoterTable {
        with_justification: ballots.iter().any(|b| b.justification_text().is_some()),
        rows: ballots
            .iter()
            .enumerate()
            .map(|(i, b)| VoterRow {
                number: i + 1,
                name: b.display_name.clone(),
                unit: b.unit_label.clone(),
                area: b.area.to_string(),
                choice: phrases::choice(b.choice).to_string(),
                time: fmt_ballot_time(b.voted_at),
                justification: b.justification_text().map(str::to_string),
            })
            .collect(),
    });

    ItemSection {
        number,
        title: r.item.title.clone(),
        body: ItemBody::Voted {
            description: r.item.description.clone().filter(|d| !d.trim().is_empty()),
            tally,
            approved: t.approved,
            voters,
        },
    }
}
