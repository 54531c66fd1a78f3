//! Meeting-level quorum summary.
//!
//! Quorum is evaluated once per meeting, upstream. This module only derives
//! the participation percent for display; `reached` is carried through
//! unchanged from the snapshot.

use mp_core::{rounding::area_share, Area, MeetingSnapshot, PctTenths};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuorumSummary {
    pub total_area: Area,
    pub voted_area: Area,
    /// voted / total, tenths of a percent.
    pub participation: PctTenths,
    pub participated_count: u32,
    pub eligible_count: u32,
    pub threshold_pct: u8,
    pub reached: bool,
}

impl QuorumSummary {
    pub fn from_meeting(m: &MeetingSnapshot) -> Self {
        Self {
            total_area: m.total_area,
            voted_area: m.voted_area,
            participation: area_share(m.voted_area, m.total_area),
            participated_count: m.participated_count,
            eligible_count: m.eligible_count,
            threshold_pct: m.quorum_threshold_pct,
            reached: m.quorum_reached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::ConductFormat;

    fn meeting(total: u64, voted: u64, reached: bool) -> MeetingSnapshot {
        MeetingSnapshot {
            id: "m".parse().unwrap(),
            sequence_number: 1,
            address: String::new(),
            format: ConductFormat::InPerson,
            scheduled_at: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            total_area: Area::from_hundredths(total),
            voted_area: Area::from_hundredths(voted),
            eligible_count: 10,
            participated_count: 4,
            quorum_threshold_pct: 50,
            quorum_reached: reached,
            organizer_name: String::new(),
        }
    }

    #[test]
    fn participation_uses_total_area() {
        let q = QuorumSummary::from_meeting(&meeting(100_000, 66_667, true));
        assert_eq!(q.participation.to_string(), "66.7");
        assert!(q.reached);
    }

    #[test]
    fn reached_flag_is_not_recomputed() {
        // 70% participation, but upstream said no quorum (e.g. a stricter rule).
        let q = QuorumSummary::from_meeting(&meeting(100_000, 70_000, false));
        assert!(!q.reached);
    }

    #[test]
    fn zero_total_area_does_not_divide() {
        let q = QuorumSummary::from_meeting(&meeting(0, 0, false));
        assert_eq!(q.participation, PctTenths::ZERO);
    }
}
