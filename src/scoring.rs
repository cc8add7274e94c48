//! Stableford scoring engine.
//!
//! Pure functions of (course hole data, handicap, strokes); recomputed on
//! every input change, nothing cached. A stroke count of 0 means the hole
//! was not played: it scores 0 points and is excluded from every score and
//! points aggregate, while the course's par aggregates are always computed
//! from the full 18 holes.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::{HoleData, Score};

pub const HOLE_COUNT: usize = 18;

/// Extra strokes a player receives on one hole.
///
/// A hole whose stroke index is within the handicap gets one shot, plus one
/// more for each full 18 the handicap exceeds the index by. The second
/// branch is always 0 when the index is above the handicap; it is kept in
/// the allocation's published form.
pub fn shots_received(stroke_index: u32, handicap: i32) -> i32 {
    let index = stroke_index as i32;
    if index <= handicap {
        (handicap - index) / 18 + 1
    } else {
        (handicap - index).max(0) / 18
    }
}

/// Summed strokes and points over one stretch of holes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SplitTotals {
    pub score: u32,
    pub points: u32,
}

/// A computed scorecard: per-hole shots and points plus the stretch
/// aggregates. Score/points stretches count scored holes only; the par
/// totals cover all 18 regardless.
#[derive(Debug, Clone, Serialize)]
pub struct StablefordCard {
    pub points: [u32; HOLE_COUNT],
    pub shots: [i32; HOLE_COUNT],
    pub out: SplitTotals,
    #[serde(rename = "in")]
    pub in_nine: SplitTotals,
    pub back6: SplitTotals,
    pub back3: SplitTotals,
    pub total: SplitTotals,
    pub out_par: u32,
    pub in_par: u32,
    pub total_par: u32,
    pub holes_played: u32,
}

/// Compute Stableford points and aggregates for one round.
///
/// A handicap of 0 (or anything non-positive, the coercion default for bad
/// input) means "not yet entered": every point and aggregate stays 0, only
/// the par totals are populated.
pub fn compute_stableford(
    course: &HoleData,
    handicap: i32,
    strokes: &[u32; HOLE_COUNT],
) -> StablefordCard {
    let out_par: u32 = course.pars[..9].iter().sum();
    let in_par: u32 = course.pars[9..].iter().sum();
    let mut card = StablefordCard {
        points: [0; HOLE_COUNT],
        shots: [0; HOLE_COUNT],
        out: SplitTotals::default(),
        in_nine: SplitTotals::default(),
        back6: SplitTotals::default(),
        back3: SplitTotals::default(),
        total: SplitTotals::default(),
        out_par,
        in_par,
        total_par: out_par + in_par,
        holes_played: 0,
    };

    if handicap <= 0 {
        return card;
    }

    for i in 0..HOLE_COUNT {
        card.shots[i] = shots_received(course.indexes[i], handicap);
        if strokes[i] == 0 {
            continue;
        }
        let net_strokes = strokes[i] as i32 - card.shots[i];
        let net_vs_par = course.pars[i] as i32 - net_strokes;
        card.points[i] = (net_vs_par + 2).max(0) as u32;
        card.holes_played += 1;

        let (s, p) = (strokes[i], card.points[i]);
        card.total.score += s;
        card.total.points += p;
        if i < 9 {
            card.out.score += s;
            card.out.points += p;
        } else {
            card.in_nine.score += s;
            card.in_nine.points += p;
        }
        if i >= 12 {
            card.back6.score += s;
            card.back6.points += p;
        }
        if i >= 15 {
            card.back3.score += s;
            card.back3.points += p;
        }
    }
    card
}

/// Submission problems reported to the user before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingPlayerName,
    #[error("Please select a course")]
    MissingCourse,
    #[error("Please enter your handicap")]
    MissingHandicap,
    #[error("Please enter at least one hole score")]
    NoHoleScores,
}

/// Validate the form inputs and assemble the full score record for
/// `saveScore`. Unscored holes become empty cells; the timestamp is left
/// for the write endpoint to stamp.
pub fn build_score_record(
    player_name: &str,
    course_name: &str,
    course: &HoleData,
    handicap: i32,
    strokes: &[u32; HOLE_COUNT],
    date: NaiveDate,
) -> Result<Score, ValidationError> {
    let player_name = player_name.trim();
    if player_name.is_empty() {
        return Err(ValidationError::MissingPlayerName);
    }
    let course_name = course_name.trim();
    if course_name.is_empty() {
        return Err(ValidationError::MissingCourse);
    }
    if handicap <= 0 {
        return Err(ValidationError::MissingHandicap);
    }
    if strokes.iter().all(|&s| s == 0) {
        return Err(ValidationError::NoHoleScores);
    }

    let card = compute_stableford(course, handicap, strokes);
    Ok(Score {
        player_name: player_name.to_string(),
        course: course_name.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        handicap,
        holes: strokes
            .iter()
            .map(|&s| if s == 0 { String::new() } else { s.to_string() })
            .collect(),
        hole_points: card.points.to_vec(),
        total_score: card.total.score,
        total_points: card.total.points,
        out_score: card.out.score,
        out_points: card.out.points,
        in_score: card.in_nine.score,
        in_points: card.in_nine.points,
        back6_score: card.back6.score,
        back6_points: card.back6.points,
        back3_score: card.back3.score,
        back3_points: card.back3.points,
        timestamp: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All par 4s, stroke indexes 1..=18 in hole order.
    fn flat_course() -> HoleData {
        let mut indexes = [0u32; 18];
        for (i, slot) in indexes.iter_mut().enumerate() {
            *slot = i as u32 + 1;
        }
        HoleData {
            pars: [4; 18],
            indexes,
        }
    }

    #[test]
    fn test_shots_received_allocation() {
        // handicap 9: indexes 1-9 get one shot, 10-18 get none
        for index in 1..=9 {
            assert_eq!(shots_received(index, 9), 1);
        }
        for index in 10..=18 {
            assert_eq!(shots_received(index, 9), 0);
        }
        // handicap 27: indexes 1-9 get two shots
        assert_eq!(shots_received(5, 27), 2);
        assert_eq!(shots_received(10, 27), 1);
    }

    #[test]
    fn test_shots_received_high_index_branch_is_zero() {
        // the index > handicap branch always evaluates to 0
        for handicap in 1..=36 {
            for index in (handicap + 1)..=18 {
                assert_eq!(shots_received(index as u32, handicap), 0);
            }
        }
    }

    #[test]
    fn test_stableford_par_with_shot_is_three_points() {
        let course = flat_course();
        let mut strokes = [0u32; 18];
        strokes[0] = 4; // par on the index-1 hole, one shot received
        let card = compute_stableford(&course, 9, &strokes);
        assert_eq!(card.points[0], 3);
    }

    #[test]
    fn test_stableford_double_bogey_no_shot_is_zero_points() {
        let course = flat_course();
        let mut strokes = [0u32; 18];
        strokes[14] = 6; // par+2 on the index-15 hole, no shot
        let card = compute_stableford(&course, 9, &strokes);
        assert_eq!(card.points[14], 0);
    }

    #[test]
    fn test_zero_handicap_resets_everything() {
        let course = flat_course();
        let card = compute_stableford(&course, 0, &[5; 18]);
        assert_eq!(card.points, [0; 18]);
        assert_eq!(card.total, SplitTotals::default());
        assert_eq!(card.out, SplitTotals::default());
        assert_eq!(card.holes_played, 0);
        // par totals are display data, not gated on the handicap
        assert_eq!(card.out_par, 36);
        assert_eq!(card.in_par, 36);
        assert_eq!(card.total_par, 72);
    }

    #[test]
    fn test_unscored_holes_excluded_from_aggregates() {
        let course = flat_course();
        let mut strokes = [4u32; 18];
        strokes[3] = 0; // hole 4 not played
        let card = compute_stableford(&course, 9, &strokes);
        assert_eq!(card.holes_played, 17);
        assert_eq!(card.out.score, 8 * 4);
        assert_eq!(card.total.score, 17 * 4);
        assert_eq!(card.points[3], 0);
        // par aggregate still counts the unplayed hole
        assert_eq!(card.out_par, 36);
    }

    #[test]
    fn test_full_round_aggregates() {
        let course = flat_course();
        let card = compute_stableford(&course, 9, &[4; 18]);
        // holes 1-9: net birdie (3 pts), holes 10-18: par (2 pts)
        assert_eq!(card.out.points, 27);
        assert_eq!(card.in_nine.points, 18);
        assert_eq!(card.total.points, 45);
        assert_eq!(card.back6.points, 12);
        assert_eq!(card.back3.points, 6);
        assert_eq!(card.back6.score, 24);
        assert_eq!(card.back3.score, 12);
    }

    #[test]
    fn test_points_floor_at_zero_uncapped_above() {
        let course = flat_course();
        let mut strokes = [0u32; 18];
        strokes[17] = 9; // blowup hole, no shot
        strokes[0] = 1; // ace with a shot: net 0 on a par 4
        let card = compute_stableford(&course, 1, &strokes);
        assert_eq!(card.points[17], 0);
        assert_eq!(card.points[0], 6);
    }

    #[test]
    fn test_build_score_record_validation() {
        let course = flat_course();
        let date = NaiveDate::from_ymd_opt(2026, 2, 23).unwrap();
        let strokes = [4u32; 18];
        assert_eq!(
            build_score_record("", "Trim", &course, 9, &strokes, date).unwrap_err(),
            ValidationError::MissingPlayerName
        );
        assert_eq!(
            build_score_record("Jo", "", &course, 9, &strokes, date).unwrap_err(),
            ValidationError::MissingCourse
        );
        assert_eq!(
            build_score_record("Jo", "Trim", &course, 0, &strokes, date).unwrap_err(),
            ValidationError::MissingHandicap
        );
        assert_eq!(
            build_score_record("Jo", "Trim", &course, 9, &[0; 18], date).unwrap_err(),
            ValidationError::NoHoleScores
        );
    }

    #[test]
    fn test_build_score_record_fields() {
        let course = flat_course();
        let date = NaiveDate::from_ymd_opt(2026, 2, 23).unwrap();
        let mut strokes = [4u32; 18];
        strokes[5] = 0;
        let score = build_score_record("  Jo Bloggs ", "Trim", &course, 9, &strokes, date).unwrap();
        assert_eq!(score.player_name, "Jo Bloggs");
        assert_eq!(score.date, "2026-02-23");
        assert_eq!(score.holes[5], "");
        assert_eq!(score.holes[0], "4");
        assert_eq!(score.hole_points.len(), 18);
        assert_eq!(score.total_score, 17 * 4);
        assert_eq!(score.timestamp, "");
    }
}
