//! crates/mp_report/src/lib.rs
//! Protocol composer: finished tallies in, WordprocessingML body fragments out.
//!
//! Two stages, both pure:
//! - `model::build_model` maps inputs to plain-text blocks in document order;
//! - `render_docx::render_body` renders blocks to escaped XML plus symbolic
//!   image placeholders.
//!
//! The composer never recomputes a decision and never touches bytes of an
//! image; identical inputs give identical markup.

#![forbid(unsafe_code)]

pub mod format;
pub mod model;
pub mod phrases;
pub mod render_docx;

pub use model::{build_model, ComposeInput, ItemResult, ProtocolModel};
pub use render_docx::{render_body, TABLE_WIDTH_TWIPS};

use mp_core::Markup;

/// Compose the protocol body for one meeting.
pub fn compose(c: &ComposeInput<'_>) -> Markup {
    render_body(&build_model(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mp_algo::{tally, QuorumSummary, Roster};
    use mp_core::{
        AgendaItem, AgendaItemId, Area, ConductFormat, ImageKey, MeetingId, MeetingSnapshot, SynthesisInput,
        SynthesisParams, VoteChoice, VoteRecord, VoterId,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn ballot(id: &str, name: &str, choice: VoteChoice, justification: Option<&str>) -> VoteRecord {
        VoteRecord {
            voter_id: VoterId::try_from(id).unwrap(),
            display_name: name.into(),
            unit_label: "кв. 1".into(),
            area: Area::from_hundredths(6_000),
            voted_at: at(18, 5),
            choice,
            justification: justification.map(str::to_string),
        }
    }

    fn input() -> SynthesisInput {
        let item = |id: &str, pos: u32, title: &str, f: u64, a: u64, ab: u64| AgendaItem {
            id: AgendaItemId::try_from(id).unwrap(),
            position: pos,
            title: title.into(),
            description: None,
            votes_for: Area::from_hundredths(f),
            votes_against: Area::from_hundredths(a),
            votes_abstain: Area::from_hundredths(ab),
            decision: None,
        };
        let mut by_item = BTreeMap::new();
        by_item.insert(
            AgendaItemId::try_from("a-1").unwrap(),
            vec![ballot("v-1", "Петров П. П.", VoteChoice::For, None), ballot("v-2", "Сидоров С. С.", VoteChoice::Against, Some("дорого"))],
        );
        SynthesisInput {
            meeting: MeetingSnapshot {
                id: MeetingId::try_from("m-12").unwrap(),
                sequence_number: 12,
                address: "ул. Ленина, д. 1".into(),
                format: ConductFormat::Remote,
                scheduled_at: at(18, 0),
                total_area: Area::from_hundredths(100_000),
                voted_area: Area::from_hundredths(80_000),
                eligible_count: 10,
                participated_count: 8,
                quorum_threshold_pct: 50,
                quorum_reached: true,
                organizer_name: "Иванов И. И.".into(),
            },
            // deliberately out of position order
            agenda: vec![
                item("a-2", 2, "Замена лифта", 40_000, 50_000, 10_000),
                item("a-1", 1, "Ремонт крыши", 60_000, 30_000, 10_000),
            ],
            roster: vec![],
            votes_by_item: by_item,
            integrity_hash: None,
        }
    }

    #[test]
    fn compose_numbers_items_after_chair_election() {
        let input = input();
        let params = SynthesisParams::default();
        let items: Vec<ItemResult<'_>> = input
            .agenda_in_order()
            .into_iter()
            .map(|item| ItemResult { item, tally: tally(item).unwrap() })
            .collect();
        let quorum = QuorumSummary::from_meeting(&input.meeting);
        let roster = Roster::build(&input.roster, &input.votes_by_item);
        let c = ComposeInput {
            input: &input,
            items: &items,
            quorum: &quorum,
            roster: &roster,
            params: &params,
            generated_at: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap(),
        };

        let model = build_model(&c);
        assert_eq!(model.title.number, "12/2026");
        let titles: Vec<_> = model.agenda.iter().map(|l| (l.number, l.title.as_str())).collect();
        assert_eq!(titles, vec![(1, phrases::ELECT_CHAIR_TITLE), (2, "Ремонт крыши"), (3, "Замена лифта")]);
        assert!(model.footer.integrity_hash.is_none());

        let markup = compose(&c);
        let body = markup.text_xml();
        assert!(body.contains(phrases::DECISION_APPROVED));
        assert!(body.contains(phrases::DECISION_REJECTED));
        assert!(body.contains("дорого"));
        assert!(!body.contains(phrases::FOOTER_HASH));

        let keys: Vec<_> = markup.image_refs().map(|r| r.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ImageKey::Organization,
                ImageKey::Voter(VoterId::try_from("v-1").unwrap()),
                ImageKey::Voter(VoterId::try_from("v-2").unwrap()),
            ]
        );
        assert_eq!(compose(&c), markup);
    }
}
