//! Download file name: `Протокол_{sequence}_{address}.docx`.
//! The address keeps ASCII alphanumerics and Cyrillic letters; every other
//! run collapses to one `_`; no leading/trailing `_`; at most 80 characters.

use mp_core::MeetingSnapshot;

pub const FILE_PREFIX: &str = "Протокол";
pub const MAX_ADDRESS_CHARS: usize = 80;

pub fn protocol_file_name(meeting: &MeetingSnapshot) -> String {
    let address = sanitize_address(&meeting.address);
    if address.is_empty() {
        format!("{FILE_PREFIX}_{}.docx", meeting.sequence_number)
    } else {
        format!("{FILE_PREFIX}_{}_{address}.docx", meeting.sequence_number)
    }
}

fn keep(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '\u{0400}'..='\u{04FF}')
}

pub fn sanitize_address(raw: &str) -> String {
    let mut out = String::new();
    let mut gap = false;
    for c in raw.chars() {
        if keep(c) {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    let capped: String = out.chars().take(MAX_ADDRESS_CHARS).collect();
    capped.trim_end_matches('_').to_string()
}
