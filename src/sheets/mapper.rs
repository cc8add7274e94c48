//! Header-indexed mapping from parsed CSV rows to domain records.
//!
//! The first row of every sheet is the header; columns are resolved once
//! per sheet by case-insensitive name and rows are then read by position.
//! Data-shape problems never fail a read: missing columns and bad cells
//! fall back to defaults and are reported as `CoercionWarning`s for the
//! caller to log, so dirty exports degrade instead of erroring.

use std::fmt;

use crate::models::{Course, Outing, Player, Score, Society};
use crate::utils::format::{normalize_date_str, normalize_name, normalize_time_str, parse_date};

/// Scores returned by `loadScores` when the caller gives no limit.
pub const DEFAULT_SCORE_LIMIT: usize = 50;

/// A data-shape problem survived during mapping. Reads keep going; these
/// exist so bad cells show up in logs and tests instead of vanishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionWarning {
    MissingColumn { column: String },
    BadNumber { column: String, value: String },
    BadDate { value: String },
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionWarning::MissingColumn { column } => {
                write!(f, "missing column \"{}\"", column)
            }
            CoercionWarning::BadNumber { column, value } => {
                write!(f, "non-numeric \"{}\" in column \"{}\"", value, column)
            }
            CoercionWarning::BadDate { value } => write!(f, "unparseable date \"{}\"", value),
        }
    }
}

/// Mapping output: the records plus whatever coercion warnings the sheet
/// produced.
#[derive(Debug)]
pub struct Mapped<T> {
    pub records: Vec<T>,
    pub warnings: Vec<CoercionWarning>,
}

impl<T> Mapped<T> {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Column positions resolved from a header row, once per fetched sheet.
#[derive(Debug)]
pub struct HeaderIndex {
    headers: Vec<String>,
}

impl HeaderIndex {
    pub fn new(header_row: &[String]) -> Self {
        Self {
            headers: header_row.iter().map(|h| h.trim().to_string()).collect(),
        }
    }

    /// Case-insensitive exact header-name lookup.
    pub fn col(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    fn require(&self, name: &str, warnings: &mut Vec<CoercionWarning>) -> Option<usize> {
        let col = self.col(name);
        if col.is_none() {
            warnings.push(CoercionWarning::MissingColumn {
                column: name.to_string(),
            });
        }
        col
    }
}

fn cell<'a>(row: &'a [String], col: Option<usize>) -> &'a str {
    col.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
}

fn cell_num(
    row: &[String],
    col: Option<usize>,
    column: &str,
    warnings: &mut Vec<CoercionWarning>,
) -> f64 {
    let v = cell(row, col);
    if v.is_empty() {
        return 0.0;
    }
    match v.parse::<f64>() {
        Ok(n) => n,
        Err(_) => {
            warnings.push(CoercionWarning::BadNumber {
                column: column.to_string(),
                value: v.to_string(),
            });
            0.0
        }
    }
}

fn cell_count(
    row: &[String],
    col: Option<usize>,
    column: &str,
    warnings: &mut Vec<CoercionWarning>,
) -> u32 {
    cell_num(row, col, column, warnings).max(0.0) as u32
}

fn tenant_match(row: &[String], sid_col: Option<usize>, society_id: &str) -> bool {
    cell(row, sid_col).eq_ignore_ascii_case(society_id.trim())
}

/// Map every row of the Societies sheet.
pub fn map_societies(rows: &[Vec<String>]) -> Mapped<Society> {
    if rows.len() < 2 {
        return Mapped::empty();
    }
    let mut warnings = Vec::new();
    let header = HeaderIndex::new(&rows[0]);
    let c_id = header.require("SocietyID", &mut warnings);
    let c_name = header.require("SocietyName", &mut warnings);
    let c_contact = header.col("ContactPerson");
    let c_num_players = header.col("NumberOfPlayers");
    let c_num_outings = header.col("NumberOfOutings");
    let c_status = header.col("Status");
    let c_created = header.col("CreatedDate");
    let c_notes = header.col("CaptainsNotes");

    let records = rows[1..]
        .iter()
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .map(|row| {
            let status = cell(row, c_status);
            Society {
                society_id: cell(row, c_id).to_string(),
                society_name: cell(row, c_name).to_string(),
                contact_person: cell(row, c_contact).to_string(),
                number_of_players: cell_count(row, c_num_players, "NumberOfPlayers", &mut warnings),
                number_of_outings: cell_count(row, c_num_outings, "NumberOfOutings", &mut warnings),
                status: if status.is_empty() {
                    "Active".to_string()
                } else {
                    status.to_string()
                },
                created_date: cell(row, c_created).to_string(),
                captains_notes: cell(row, c_notes).to_string(),
            }
        })
        .collect();

    Mapped { records, warnings }
}

/// Map the Players sheet, keeping only the given society's rows. Rows with
/// an empty player name are discarded.
pub fn map_players(rows: &[Vec<String>], society_id: &str) -> Mapped<Player> {
    if rows.len() < 2 {
        return Mapped::empty();
    }
    let mut warnings = Vec::new();
    let header = HeaderIndex::new(&rows[0]);
    let c_sid = header.require("SocietyID", &mut warnings);
    let c_name = header.require("PlayerName", &mut warnings);
    let c_handicap = header.col("Handicap");

    let records = rows[1..]
        .iter()
        .filter(|row| tenant_match(row, c_sid, society_id))
        .filter_map(|row| {
            let name = cell(row, c_name);
            if name.is_empty() {
                return None;
            }
            Some(Player {
                player_name: name.to_string(),
                handicap: cell_num(row, c_handicap, "Handicap", &mut warnings),
            })
        })
        .collect();

    Mapped { records, warnings }
}

/// Map the Outings sheet for one society, normalized and sorted ascending
/// by date then time. Rows with an empty or unparseable date are dropped
/// (with a warning for the unparseable ones).
pub fn map_outings(rows: &[Vec<String>], society_id: &str) -> Mapped<Outing> {
    if rows.len() < 2 {
        return Mapped::empty();
    }
    let mut warnings = Vec::new();
    let header = HeaderIndex::new(&rows[0]);
    let c_sid = header.require("SocietyID", &mut warnings);
    let c_date = header.require("Date", &mut warnings);
    let c_time = header.col("Time");
    let c_course = header.col("CourseName");
    let c_notes = header.col("Notes");

    let mut records: Vec<Outing> = rows[1..]
        .iter()
        .filter(|row| tenant_match(row, c_sid, society_id))
        .filter_map(|row| {
            let raw_date = cell(row, c_date);
            if raw_date.is_empty() {
                return None;
            }
            if parse_date(raw_date).is_none() {
                warnings.push(CoercionWarning::BadDate {
                    value: raw_date.to_string(),
                });
                return None;
            }
            Some(Outing {
                date: normalize_date_str(raw_date),
                time: normalize_time_str(cell(row, c_time)),
                course_name: cell(row, c_course).to_string(),
                notes: cell(row, c_notes).to_string(),
            })
        })
        .collect();

    // dates and times are normalized, so the string pair orders chronologically
    records.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));

    Mapped { records, warnings }
}

/// Map the Courses sheet. Courses are not tenant-scoped; rows with an empty
/// name are discarded. `courseImage` is only present when the sheet has the
/// column.
pub fn map_courses(rows: &[Vec<String>]) -> Mapped<Course> {
    if rows.len() < 2 {
        return Mapped::empty();
    }
    let mut warnings = Vec::new();
    let header = HeaderIndex::new(&rows[0]);
    let c_name = header.require("CourseName", &mut warnings);
    let c_par = header.col("ParIndx");
    let c_url = header.col("CourseURL");
    let c_map = header.col("CourseMaploc");
    let c_club = header.col("ClubName");
    let c_image = header.col("CourseImage");

    let records = rows[1..]
        .iter()
        .filter_map(|row| {
            let name = cell(row, c_name);
            if name.is_empty() {
                return None;
            }
            Some(Course {
                course_name: name.to_string(),
                par_indx: cell(row, c_par).to_string(),
                course_url: cell(row, c_url).to_string(),
                course_maploc: cell(row, c_map).to_string(),
                club_name: cell(row, c_club).to_string(),
                course_image: c_image.map(|_| cell(row, c_image).to_string()),
            })
        })
        .collect();

    Mapped { records, warnings }
}

/// Filters applied to the Scores sheet after the tenant filter.
#[derive(Debug, Clone, Copy)]
pub struct ScoreQuery<'a> {
    /// Case/space-insensitive player-name match.
    pub player_name: Option<&'a str>,
    /// Exact course-name match.
    pub course: Option<&'a str>,
    pub limit: usize,
}

impl Default for ScoreQuery<'_> {
    fn default() -> Self {
        Self {
            player_name: None,
            course: None,
            limit: DEFAULT_SCORE_LIMIT,
        }
    }
}

/// Map the Scores sheet for one society, newest timestamp first, capped at
/// the query limit.
pub fn map_scores(rows: &[Vec<String>], society_id: &str, query: &ScoreQuery) -> Mapped<Score> {
    if rows.len() < 2 {
        return Mapped::empty();
    }
    let mut warnings = Vec::new();
    let header = HeaderIndex::new(&rows[0]);
    let c_sid = header.require("SocietyID", &mut warnings);
    let c_player = header.require("PlayerName", &mut warnings);
    let c_course = header.col("CourseName");
    let c_date = header.col("Date");
    let c_handicap = header.col("Handicap");
    let hole_cols: Vec<Option<usize>> = (1..=18).map(|h| header.col(&format!("Hole{h}"))).collect();
    let points_cols: Vec<Option<usize>> =
        (1..=18).map(|h| header.col(&format!("Points{h}"))).collect();
    let c_total_score = header.col("Total Score");
    let c_total_points = header.col("Total Points");
    let c_out_score = header.col("Out Score");
    let c_out_points = header.col("Out Points");
    let c_in_score = header.col("In Score");
    let c_in_points = header.col("In Points");
    let c_back6_score = header.col("Back 6 Score");
    let c_back6_points = header.col("Back 6 Points");
    let c_back3_score = header.col("Back 3 Score");
    let c_back3_points = header.col("Back 3 Points");
    let c_timestamp = header.col("Timestamp");

    let wanted_player = query.player_name.map(normalize_name).filter(|n| !n.is_empty());

    let mut records: Vec<Score> = rows[1..]
        .iter()
        .filter(|row| tenant_match(row, c_sid, society_id))
        .filter_map(|row| {
            let player = cell(row, c_player);
            if player.is_empty() {
                return None;
            }
            if let Some(wanted) = &wanted_player {
                if &normalize_name(player) != wanted {
                    return None;
                }
            }
            if let Some(course) = query.course {
                if !course.is_empty() && cell(row, c_course) != course {
                    return None;
                }
            }

            let holes = hole_cols.iter().map(|&c| cell(row, c).to_string()).collect();
            let hole_points = points_cols
                .iter()
                .enumerate()
                .map(|(i, &c)| cell_count(row, c, &format!("Points{}", i + 1), &mut warnings))
                .collect();

            Some(Score {
                player_name: player.to_string(),
                course: cell(row, c_course).to_string(),
                date: normalize_date_str(cell(row, c_date)),
                handicap: cell_num(row, c_handicap, "Handicap", &mut warnings) as i32,
                holes,
                hole_points,
                total_score: cell_count(row, c_total_score, "Total Score", &mut warnings),
                total_points: cell_count(row, c_total_points, "Total Points", &mut warnings),
                out_score: cell_count(row, c_out_score, "Out Score", &mut warnings),
                out_points: cell_count(row, c_out_points, "Out Points", &mut warnings),
                in_score: cell_count(row, c_in_score, "In Score", &mut warnings),
                in_points: cell_count(row, c_in_points, "In Points", &mut warnings),
                back6_score: cell_count(row, c_back6_score, "Back 6 Score", &mut warnings),
                back6_points: cell_count(row, c_back6_points, "Back 6 Points", &mut warnings),
                back3_score: cell_count(row, c_back3_score, "Back 3 Score", &mut warnings),
                back3_points: cell_count(row, c_back3_points, "Back 3 Points", &mut warnings),
                timestamp: cell(row, c_timestamp).to_string(),
            })
        })
        .collect();

    Score::sort_newest_first(&mut records);
    records.truncate(query.limit);

    Mapped { records, warnings }
}
