// ------------------------- formatting helpers -------------------------
//
// Escaping, dates, and column arithmetic. Areas and percents format through
// their own `Display` (two and one decimals); nothing here uses a locale.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::phrases::MONTHS_GENITIVE;

/// Escape text for XML character data and attribute values.
/// Control characters that XML 1.0 forbids are dropped.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// `14 марта 2026 г.`
pub fn fmt_date(d: NaiveDate) -> String {
    format!("{} {} {} г.", d.day(), MONTHS_GENITIVE[d.month0() as usize], d.year())
}

/// `18:05`
pub fn fmt_time(t: NaiveDateTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// `19.10.2026 14:30:05`
pub fn fmt_timestamp(t: NaiveDateTime) -> String {
    format!(
        "{:02}.{:02}.{:04} {:02}:{:02}:{:02}",
        t.day(),
        t.month(),
        t.year(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

/// `14.03.2026 18:05`
pub fn fmt_ballot_time(t: NaiveDateTime) -> String {
    format!("{:02}.{:02}.{:04} {}", t.day(), t.month(), t.year(), fmt_time(t))
}

/// Split `total` into columns proportional to `weights`; the sum is exactly
/// `total` (the rounding remainder goes to the widest column).
pub fn distribute_widths(weights: &[u32], total: u32) -> Vec<u32> {
    let sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if sum == 0 {
        return vec![0; weights.len()];
    }
    let mut cols: Vec<u32> = weights
        .iter()
        .map(|&w| (u64::from(total) * u64::from(w) / sum) as u32)
        .collect();
    let used: u32 = cols.iter().sum();
    if let Some((widest, _)) = weights.iter().enumerate().max_by_key(|(i, w)| (**w, std::cmp::Reverse(*i))) {
        cols[widest] += total - used;
    }
    cols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_reserved_characters() {
        assert_eq!(esc(r#"A & B <c> "d" 'e'"#), "A &amp; B &lt;c&gt; &quot;d&quot; &apos;e&apos;");
        assert_eq!(esc("кв. 5\u{0007}"), "кв. 5");
    }

    #[test]
    fn dates_use_fixed_month_table() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(fmt_date(d), "19 октября 2026 г.");
        let t = d.and_hms_opt(9, 5, 7).unwrap();
        assert_eq!(fmt_time(t), "09:05");
        assert_eq!(fmt_timestamp(t), "19.10.2026 09:05:07");
        assert_eq!(fmt_ballot_time(t), "19.10.2026 09:05");
    }

    #[test]
    fn widths_always_fill_the_table() {
        let with = distribute_widths(&[5, 24, 12, 11, 12, 14, 22], 9638);
        let without = distribute_widths(&[5, 24, 12, 11, 12, 14], 9638);
        assert_eq!(with.iter().sum::<u32>(), 9638);
        assert_eq!(without.iter().sum::<u32>(), 9638);
        // dropping a column widens the others rather than leaving a gap
        assert!(without[1] > with[1]);
        assert_eq!(distribute_widths(&[1, 1, 1], 10), vec![4, 3, 3]);
    }
}
