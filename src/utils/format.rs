//! Date, time, and name normalization for sheet cells.
//!
//! Sheet exports mix ISO dates, JS-style long dates ("Tue Feb 17 2026
//! 00:00:00 GMT+0000"), and slash forms, so every cell goes through these
//! helpers before comparison or display. Normalization never fails: an
//! unrecognized value passes through unchanged.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Lowercase and strip all whitespace, for case/space-insensitive matching
/// of player and course names ("Concra Wood" == "ConcraWood").
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Normalize a date cell to `YYYY-MM-DD`; unparseable input is returned
/// trimmed but otherwise unchanged. Idempotent on already-normalized input.
pub fn normalize_date_str(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    match parse_date(s) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => s.to_string(),
    }
}

/// Normalize a time cell to zero-padded 24-hour `HH:MM` (accepts "2:30 PM",
/// "14:30", "12:05am"). Input without an `H:MM` pattern passes through.
pub fn normalize_time_str(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    match extract_time(s) {
        Some((h, m)) => format!("{:02}:{:02}", h, m),
        None => s.to_string(),
    }
}

/// Try to parse a date cell into a calendar date.
///
/// Accepts ISO `YYYY-MM-DD` (with or without a `T...` suffix), JS-style long
/// dates with the trailing time/timezone truncated, and slash/dash numeric
/// forms tried month-first then day-first.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // "2026-02-23T00:00:00" -> "2026-02-23"; keep the whole string when the
    // prefix isn't date-shaped ("Tue Feb ..." splits on its own 'T')
    let t_head = s.split('T').next().unwrap_or(s);
    let s = if t_head.contains('-') { t_head } else { s };

    let stripped = strip_datetime_suffix(s);
    let s = stripped.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Some(d) = parse_long_date(s) {
        return Some(d);
    }
    parse_numeric_date(s)
}

/// Parse a score-row timestamp for newest-first ordering.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::MIN))
}

/// Drop everything from the first time-like or timezone token onward:
/// "Tue Feb 17 2026 00:00:00 GMT+0000" -> "Tue Feb 17 2026".
fn strip_datetime_suffix(s: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for tok in s.split_whitespace() {
        let time_like = tok.contains(':') && tok.starts_with(|c: char| c.is_ascii_digit());
        if time_like || tok.starts_with("GMT") || tok.starts_with("UTC") || tok.starts_with('+') {
            break;
        }
        kept.push(tok);
    }
    kept.join(" ")
}

/// "Tue Feb 17 2026" or "Feb 17 2026".
fn parse_long_date(s: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let (month_tok, day_tok, year_tok) = match tokens.as_slice() {
        [weekday, month, day, year] if weekday.chars().all(|c| c.is_ascii_alphabetic()) => {
            (*month, *day, *year)
        }
        [month, day, year] => (*month, *day, *year),
        _ => return None,
    };
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month_tok))? as u32
        + 1;
    let day: u32 = day_tok.parse().ok()?;
    let year: i32 = year_tok.parse().ok()?;
    if !(2000..=2100).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Slash/dash numeric date with a trailing 4-digit year, month-first tried
/// before day-first.
fn parse_numeric_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }
    let a: u32 = parts[0].trim().parse().ok()?;
    let b: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    if !(2000..=2100).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, a, b).or_else(|| NaiveDate::from_ymd_opt(year, b, a))
}

/// Find the first `H:MM` pattern and apply any am/pm marker.
fn extract_time(s: &str) -> Option<(u32, u32)> {
    let bytes = s.as_bytes();
    let lower = s.to_ascii_lowercase();
    for i in 0..bytes.len() {
        if bytes[i] != b':' {
            continue;
        }
        // up to two digits immediately before the colon
        let mut start = i;
        while start > 0 && bytes[start - 1].is_ascii_digit() && i - start < 2 {
            start -= 1;
        }
        if start == i {
            continue;
        }
        let minute_str = match bytes.get(i + 1..i + 3) {
            Some(d) if d.iter().all(|b| b.is_ascii_digit()) => &s[i + 1..i + 3],
            _ => continue,
        };
        let hour_parsed: Option<u32> = s[start..i].parse().ok();
        let minute_parsed: Option<u32> = minute_str.parse().ok();
        let (mut hour, minute) = match (hour_parsed, minute_parsed) {
            (Some(h), Some(m)) => (h, m),
            _ => continue,
        };
        if lower.contains("pm") && hour < 12 {
            hour += 12;
        }
        if lower.contains("am") && hour == 12 {
            hour = 0;
        }
        return Some((hour, minute));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Concra Wood"), "concrawood");
        assert_eq!(normalize_name("  Jo  Bloggs "), "jobloggs");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_normalize_date_iso_idempotent() {
        assert_eq!(normalize_date_str("2026-02-23"), "2026-02-23");
        let once = normalize_date_str("2026-02-23");
        assert_eq!(normalize_date_str(&once), once);
    }

    #[test]
    fn test_normalize_date_js_long_form() {
        assert_eq!(
            normalize_date_str("Mon Feb 23 2026 00:00:00 GMT+0000"),
            "2026-02-23"
        );
        assert_eq!(normalize_date_str("Feb 23 2026"), "2026-02-23");
    }

    #[test]
    fn test_normalize_date_slash_forms() {
        assert_eq!(normalize_date_str("2/23/2026"), "2026-02-23");
        // month-first is invalid here, so day-first wins
        assert_eq!(normalize_date_str("23/2/2026"), "2026-02-23");
    }

    #[test]
    fn test_normalize_date_passthrough_on_failure() {
        assert_eq!(normalize_date_str("  next tuesday  "), "next tuesday");
        assert_eq!(normalize_date_str(""), "");
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time_str("2:30 PM"), "14:30");
        assert_eq!(normalize_time_str("14:30"), "14:30");
        assert_eq!(normalize_time_str("9:05"), "09:05");
        assert_eq!(normalize_time_str("12:05am"), "00:05");
        assert_eq!(normalize_time_str("12:30 pm"), "12:30");
        assert_eq!(normalize_time_str("morning"), "morning");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026-02-23T10:15:00Z").is_some());
        assert!(parse_timestamp("2026-02-23 10:15:00").is_some());
        assert!(parse_timestamp("2026-02-23").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn test_timestamp_ordering() {
        let a = parse_timestamp("2026-02-23 10:15:00").unwrap();
        let b = parse_timestamp("2026-02-23T11:00:00").unwrap();
        assert!(b > a);
    }
}
