//! Identity payloads: ordered `Label: value` lines.
//!
//! One payload maps to exactly one image. The text form is what the QR
//! symbol carries, so it must parse back into the same lines.

use mp_algo::RosterEntry;
use mp_core::{MeetingSnapshot, OrganizationIdentity};

const DATE_FMT: &str = "%d.%m.%Y";
const DATE_TIME_FMT: &str = "%d.%m.%Y %H:%M";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    lines: Vec<(String, String)>,
}

#[derive(Default)]
pub struct PayloadBuilder {
    lines: Vec<(String, String)>,
}

/// Fold line breaks so every value stays on one line.
fn one_line(s: &str) -> String {
    s.split(['\r', '\n']).filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ").trim().to_string()
}

impl PayloadBuilder {
    /// Append a line. Colons in labels become spaces; line breaks in values fold to spaces.
    pub fn line(mut self, label: &str, value: impl AsRef<str>) -> Self {
        let label = one_line(&label.replace(':', " "));
        self.lines.push((label, one_line(value.as_ref())));
        self
    }

    /// Append a line only when `value` is non-blank.
    pub fn line_opt(self, label: &str, value: &str) -> Self {
        if value.trim().is_empty() { self } else { self.line(label, value) }
    }

    pub fn build(self) -> Payload {
        Payload { lines: self.lines }
    }
}

impl Payload {
    pub fn builder() -> PayloadBuilder {
        PayloadBuilder::default()
    }

    /// Registration block of the organization for this meeting.
    pub fn organization(org: &OrganizationIdentity, meeting: &MeetingSnapshot) -> Payload {
        Payload::builder()
            .line("Организация", &org.name)
            .line_opt("ИНН", &org.tax_id)
            .line_opt("ОГРН", &org.registration_id)
            .line_opt("Адрес организации", &org.address)
            .line("Собрание", meeting.id.as_str())
            .line("Дата собрания", meeting.scheduled_at.format(DATE_FMT).to_string())
            .line("Инициатор", &meeting.organizer_name)
            .build()
    }

    /// Ballot receipt for one voter.
    pub fn voter(meeting: &MeetingSnapshot, entry: &RosterEntry) -> Payload {
        Payload::builder()
            .line("Собрание", meeting.id.as_str())
            .line("Адрес", &meeting.address)
            .line("Собственник", &entry.display_name)
            .line("ID", entry.voter_id.as_str())
            .line("Помещение", &entry.unit_label)
            .line("Площадь", format!("{} м²", entry.area))
            .line("Голосование", entry.last_voted_at.format(DATE_TIME_FMT).to_string())
            .line("Бюллетени", entry.ballots.len().to_string())
            .build()
    }

    pub fn lines(&self) -> &[(String, String)] {
        &self.lines
    }

    /// Text carried by the image.
    pub fn text(&self) -> String {
        self.lines.iter().map(|(l, v)| format!("{l}: {v}")).collect::<Vec<_>>().join("\n")
    }

    /// Inverse of [`Payload::text`].
    pub fn parse(text: &str) -> Option<Payload> {
        let mut lines = Vec::new();
        for raw in text.split('\n') {
            let (l, v) = raw.split_once(": ").or_else(|| raw.strip_suffix(':').map(|l| (l, "")))?;
            lines.push((l.to_string(), v.to_string()));
        }
        Some(Payload { lines })
    }
}
