//! Submitted score record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::format::parse_timestamp;

/// One submitted round with its Stableford aggregates, in the wire shape
/// used by both `saveScore` and `loadScores`. `holes` entries are raw
/// stroke-count strings; an empty entry is an unscored hole and contributes
/// nothing to any aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Score {
    #[serde(rename = "playerName")]
    pub player_name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub handicap: i32,
    #[serde(default)]
    pub holes: Vec<String>,
    #[serde(rename = "holePoints", default)]
    pub hole_points: Vec<u32>,
    #[serde(rename = "totalScore", default)]
    pub total_score: u32,
    #[serde(rename = "totalPoints", default)]
    pub total_points: u32,
    #[serde(rename = "outScore", default)]
    pub out_score: u32,
    #[serde(rename = "outPoints", default)]
    pub out_points: u32,
    #[serde(rename = "inScore", default)]
    pub in_score: u32,
    #[serde(rename = "inPoints", default)]
    pub in_points: u32,
    #[serde(rename = "back6Score", default)]
    pub back6_score: u32,
    #[serde(rename = "back6Points", default)]
    pub back6_points: u32,
    #[serde(rename = "back3Score", default)]
    pub back3_score: u32,
    #[serde(rename = "back3Points", default)]
    pub back3_points: u32,
    /// Set by the write endpoint when the row is stored; empty on submission.
    #[serde(default)]
    pub timestamp: String,
}

impl Score {
    /// Parsed timestamp for newest-first ordering; unparseable timestamps
    /// sort last.
    pub fn timestamp_value(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// Sort newest timestamp first, in place.
    pub fn sort_newest_first(scores: &mut [Score]) {
        scores.sort_by(|a, b| match (a.timestamp_value(), b.timestamp_value()) {
            (Some(ta), Some(tb)) => tb.cmp(&ta),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.timestamp.cmp(&a.timestamp),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_at(timestamp: &str) -> Score {
        Score {
            player_name: "Jo".to_string(),
            timestamp: timestamp.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut scores = vec![
            score_at("2026-02-01 09:00:00"),
            score_at("2026-03-01 09:00:00"),
            score_at("not a time"),
            score_at("2026-02-15 09:00:00"),
        ];
        Score::sort_newest_first(&mut scores);
        assert_eq!(scores[0].timestamp, "2026-03-01 09:00:00");
        assert_eq!(scores[1].timestamp, "2026-02-15 09:00:00");
        assert_eq!(scores[2].timestamp, "2026-02-01 09:00:00");
        assert_eq!(scores[3].timestamp, "not a time");
    }

    #[test]
    fn test_wire_field_names() {
        let score = Score {
            player_name: "Jo".to_string(),
            back6_points: 7,
            ..Default::default()
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["playerName"], "Jo");
        assert_eq!(json["back6Points"], 7);
        assert!(json.get("player_name").is_none());
    }
}
