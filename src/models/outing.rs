//! Outing record and next-outing selection.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::format::{normalize_time_str, parse_date};

/// An outing stays "next" for this long after its tee time, so the schedule
/// doesn't switch away mid-round on the day.
const NEXT_OUTING_GRACE_HOURS: i64 = 5;

/// Outing dates outside this range are treated as data-entry noise.
const YEAR_MIN: i32 = 2000;
const YEAR_MAX: i32 = 2100;

/// One scheduled round from the Outings sheet, scoped to a single society.
/// `date` is normalized `YYYY-MM-DD`; `time` is normalized `HH:MM` or empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Outing {
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(rename = "courseName", default)]
    pub course_name: String,
    #[serde(default)]
    pub notes: String,
}

impl Outing {
    /// Tee-off as a datetime, midnight when no time is recorded. `None`
    /// for unparseable dates or years outside the sanity range.
    pub fn start(&self) -> Option<NaiveDateTime> {
        let date = parse_date(&self.date)?;
        if !(YEAR_MIN..=YEAR_MAX).contains(&date.year()) {
            return None;
        }
        let time = NaiveTime::parse_from_str(&normalize_time_str(&self.time), "%H:%M")
            .unwrap_or(NaiveTime::MIN);
        Some(date.and_time(time))
    }
}

/// First outing (in the list's chronological order) whose tee time plus the
/// grace window is still ahead of `now`.
pub fn next_outing(outings: &[Outing], now: NaiveDateTime) -> Option<&Outing> {
    outings.iter().find(|o| {
        o.start()
            .map_or(false, |start| start + Duration::hours(NEXT_OUTING_GRACE_HOURS) > now)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outing(date: &str, time: &str) -> Outing {
        Outing {
            date: date.to_string(),
            time: time.to_string(),
            course_name: "Millicent".to_string(),
            notes: String::new(),
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_start_with_and_without_time() {
        assert_eq!(outing("2026-05-10", "09:30").start(), Some(at("2026-05-10", "09:30")));
        assert_eq!(outing("2026-05-10", "").start(), Some(at("2026-05-10", "00:00")));
        assert_eq!(outing("sometime in May", "").start(), None);
    }

    #[test]
    fn test_start_rejects_out_of_range_years() {
        assert_eq!(outing("1970-01-01", "").start(), None);
    }

    #[test]
    fn test_next_outing_grace_window() {
        let outings = vec![outing("2026-05-10", "09:30"), outing("2026-06-14", "10:00")];

        // mid-round on the day: still the next outing
        assert_eq!(
            next_outing(&outings, at("2026-05-10", "13:00")).unwrap().date,
            "2026-05-10"
        );
        // more than the grace window after tee-off: moves on
        assert_eq!(
            next_outing(&outings, at("2026-05-10", "15:00")).unwrap().date,
            "2026-06-14"
        );
        // nothing left
        assert!(next_outing(&outings, at("2026-07-01", "08:00")).is_none());
    }

    #[test]
    fn test_next_outing_skips_unparseable_dates() {
        let outings = vec![outing("tbc", ""), outing("2026-06-14", "10:00")];
        assert_eq!(
            next_outing(&outings, at("2026-01-01", "00:00")).unwrap().date,
            "2026-06-14"
        );
    }
}
