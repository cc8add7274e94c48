//! Course record, `ParIndx` hole data, and the course catalog.
//!
//! Hole data arrives as a single comma-separated `ParIndx` cell: 18 pars
//! followed by 18 stroke indexes, optionally preceded by one offset field.
//! The catalog resolves a course name (case/space-insensitive) against an
//! ordered list of sources - sheet-loaded courses first, then the builtin
//! table - so a missing or empty Courses sheet degrades to known data
//! instead of an unusable scorecard.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::format::normalize_name;

/// One course row from the Courses sheet.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Course {
    #[serde(rename = "courseName")]
    pub course_name: String,
    #[serde(rename = "parIndx", default)]
    pub par_indx: String,
    #[serde(rename = "courseURL", default)]
    pub course_url: String,
    #[serde(rename = "courseMaploc", default)]
    pub course_maploc: String,
    #[serde(rename = "clubName", default)]
    pub club_name: String,
    #[serde(rename = "courseImage", default, skip_serializing_if = "Option::is_none")]
    pub course_image: Option<String>,
}

/// Per-hole par and stroke-index arrays for one course. Stroke index 1 is
/// the hardest hole; a well-formed course uses each of 1..=18 exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleData {
    pub pars: [u32; 18],
    pub indexes: [u32; 18],
}

impl Course {
    /// Decode the `ParIndx` cell. A 37-token cell carries a leading offset
    /// field before the 18 pars; a 36-token cell starts with the pars
    /// directly. Anything shorter has no usable hole data.
    pub fn hole_data(&self) -> Option<HoleData> {
        let tokens: Vec<&str> = self.par_indx.split(',').map(str::trim).collect();
        let (par_tokens, index_tokens) = if tokens.len() >= 37 {
            (&tokens[1..19], &tokens[19..37])
        } else if tokens.len() >= 36 {
            (&tokens[0..18], &tokens[18..36])
        } else {
            return None;
        };

        let mut pars = [0u32; 18];
        let mut indexes = [0u32; 18];
        for (slot, tok) in pars.iter_mut().zip(par_tokens) {
            *slot = tok.parse().unwrap_or(0);
        }
        for (slot, tok) in indexes.iter_mut().zip(index_tokens) {
            *slot = tok.parse().unwrap_or(0);
        }
        Some(HoleData { pars, indexes })
    }
}

/// A place hole data can come from. Lookup keys are pre-normalized
/// (lowercased, whitespace stripped).
pub trait CourseSource {
    fn label(&self) -> &'static str;
    fn lookup(&self, normalized_name: &str) -> Option<HoleData>;
}

/// Courses loaded from the Courses sheet.
pub struct SheetCourses {
    by_name: HashMap<String, HoleData>,
}

impl SheetCourses {
    pub fn new(courses: &[Course]) -> Self {
        let by_name = courses
            .iter()
            .filter_map(|c| {
                let key = normalize_name(&c.course_name);
                if key.is_empty() {
                    return None;
                }
                c.hole_data().map(|data| (key, data))
            })
            .collect();
        Self { by_name }
    }
}

impl CourseSource for SheetCourses {
    fn label(&self) -> &'static str {
        "sheet"
    }

    fn lookup(&self, normalized_name: &str) -> Option<HoleData> {
        self.by_name.get(normalized_name).copied()
    }
}

/// The builtin course table, used when the sheet has nothing for a course.
pub struct BuiltinCourses;

impl CourseSource for BuiltinCourses {
    fn label(&self) -> &'static str {
        "builtin"
    }

    fn lookup(&self, normalized_name: &str) -> Option<HoleData> {
        BUILTIN_COURSES
            .iter()
            .find(|(name, _, _)| normalize_name(name) == normalized_name)
            .map(|&(_, pars, indexes)| HoleData { pars, indexes })
    }
}

/// Ordered course-name resolver: sources are tried in sequence and the
/// first hit wins.
pub struct CourseCatalog {
    sources: Vec<Box<dyn CourseSource + Send + Sync>>,
}

impl CourseCatalog {
    pub fn new(sources: Vec<Box<dyn CourseSource + Send + Sync>>) -> Self {
        Self { sources }
    }

    /// Sheet courses first, builtin table as fallback.
    pub fn from_sheet(courses: &[Course]) -> Self {
        Self::new(vec![
            Box::new(SheetCourses::new(courses)),
            Box::new(BuiltinCourses),
        ])
    }

    /// Builtin table only, for when no Courses sheet is reachable.
    pub fn builtin_only() -> Self {
        Self::new(vec![Box::new(BuiltinCourses)])
    }

    pub fn lookup(&self, course_name: &str) -> Option<HoleData> {
        let key = normalize_name(course_name);
        if key.is_empty() {
            return None;
        }
        for source in &self.sources {
            if let Some(data) = source.lookup(&key) {
                debug!(course = course_name, source = source.label(), "Resolved course data");
                return Some(data);
            }
        }
        None
    }
}

/// Pars and stroke indexes for the courses the society has played, kept as
/// a fallback for when the Courses sheet is unreachable or incomplete.
#[rustfmt::skip]
const BUILTIN_COURSES: &[(&str, [u32; 18], [u32; 18])] = &[
    ("Ardee",
     [4,3,4,5,4,4,4,4,3,4,4,4,3,5,4,4,4,4], [8,14,4,18,2,12,10,6,16,9,15,5,17,1,11,13,7,3]),
    ("DonabateYR",
     [3,5,4,3,4,5,4,3,5,4,3,4,4,4,4,4,5,4], [9,7,3,17,1,5,15,13,11,4,10,16,6,12,8,18,14,2]),
    ("DeerPark",
     [4,3,4,4,4,3,5,4,5,4,3,4,4,5,3,4,4,5], [10,2,14,16,9,18,5,6,12,1,15,11,17,8,13,7,4,3]),
    ("Balcarrick",
     [4,4,4,4,3,5,3,5,4,4,4,4,4,4,5,3,5,4], [17,7,3,13,11,5,15,9,1,18,2,12,10,4,8,16,14,6]),
    ("Elmgreen",
     [4,5,4,4,3,4,3,4,4,4,3,4,4,4,4,5,3,4], [3,11,15,5,13,17,9,7,1,10,18,12,2,8,14,4,16,6]),
    ("HeadfortNew",
     [4,5,4,3,4,5,3,4,4,4,3,4,4,5,4,5,3,4], [6,18,10,14,2,8,16,4,12,9,11,5,1,15,3,17,13,7]),
    ("HeadfortOld",
     [5,3,4,5,4,4,5,3,4,3,5,4,4,3,4,4,4,4], [17,12,5,8,1,3,18,14,10,16,13,4,6,11,15,2,7,9]),
    ("HollywoodLakes",
     [4,4,4,3,5,3,4,4,5,4,3,4,4,5,5,4,3,4], [8,4,12,14,18,10,2,6,16,3,11,17,9,1,15,5,13,7]),
    ("KilkeaCastle",
     [4,5,4,3,5,3,4,4,4,3,4,5,4,3,4,3,4,4], [11,4,12,6,13,18,2,3,15,17,10,14,8,16,7,5,1,9]),
    ("Killeen",
     [5,4,4,4,4,3,4,3,5,5,4,4,4,3,4,5,4,3], [14,4,12,8,2,16,6,18,10,15,7,3,11,9,1,17,5,13]),
    ("KilleenCastle",
     [4,5,4,4,4,3,5,3,4,4,4,5,4,3,5,3,4,4], [3,9,12,13,4,11,15,17,1,5,7,16,8,14,18,10,6,2]),
    ("Moyvalley",
     [4,3,4,4,3,5,4,5,4,4,4,4,5,3,4,4,3,5], [10,16,4,8,18,6,2,14,12,15,7,5,9,13,17,3,11,1]),
    ("Newbridge",
     [5,4,3,5,4,3,4,4,5,4,3,4,4,3,4,4,4,5], [16,10,12,6,8,18,2,4,14,1,11,17,3,9,13,7,5,15]),
    ("Roganstown",
     [4,3,4,5,5,3,4,4,3,5,4,3,4,4,4,4,3,5], [4,18,6,16,14,8,2,10,12,11,7,15,1,13,9,3,17,5]),
    ("Rosslare",
     [4,3,5,4,4,4,5,3,4,3,4,5,4,3,4,4,4,5], [10,9,14,8,2,13,6,12,3,11,1,17,16,15,7,5,4,18]),
    ("Sillogue",
     [4,3,5,4,5,4,3,4,3,4,4,5,3,4,4,4,4,4], [4,10,7,12,5,16,15,1,17,2,8,3,13,14,11,9,18,6]),
    ("RoyalCurragh",
     [5,4,4,3,4,4,5,4,4,4,3,5,5,3,4,3,4,4], [14,6,17,4,16,8,12,3,10,7,13,5,2,15,11,18,1,9]),
    ("Rathcore",
     [5,4,4,3,4,4,4,4,3,5,3,4,5,4,4,3,4,5], [5,9,7,11,3,17,15,1,13,18,14,2,12,10,4,6,16,8]),
    ("StMargarets",
     [4,3,5,4,3,4,4,5,4,4,4,5,3,4,3,5,5,4], [13,17,11,1,15,3,5,9,7,10,6,18,12,4,14,16,8,2]),
    ("Trim",
     [3,5,5,4,4,4,3,4,5,4,4,3,4,4,4,4,4,5], [10,4,6,14,2,12,16,8,18,17,7,15,5,13,11,3,1,9]),
    ("Tulfarris",
     [5,3,4,4,4,3,4,4,5,4,3,4,5,4,5,3,4,4], [12,16,4,2,14,10,18,8,6,1,17,7,15,9,13,11,5,3]),
    ("Rathsllagh",
     [5,4,4,3,4,5,3,4,4,4,5,4,3,4,4,5,3,4], [13,2,15,11,9,6,17,4,7,1,10,12,18,14,8,5,16,3]),
    ("ConcraWood",
     [5,4,4,5,4,3,4,4,3,4,4,3,5,3,5,4,4,4], [13,3,17,5,1,15,11,7,9,6,4,16,12,18,14,2,8,10]),
    ("Royal_Tara",
     [5,4,5,4,3,4,4,3,5,4,3,4,3,5,3,4,4,5], [12,4,6,16,18,14,2,10,8,1,17,5,15,11,13,3,7,9]),
    ("Font",
     [4,4,3,4,5,4,4,3,5,4,5,3,4,4,5,3,3,5], [17,5,6,7,15,2,18,11,1,10,8,12,16,3,14,13,9,4]),
    ("Alicante",
     [5,4,3,5,4,3,4,3,5,5,4,3,4,5,3,5,3,4], [17,5,15,13,1,9,3,7,11,18,6,16,2,12,8,14,4,10]),
    ("Millicent",
     [5,5,4,3,4,4,4,4,3,4,4,4,5,4,3,5,3,5], [2,18,10,16,12,4,6,8,14,5,7,13,17,15,11,3,9,1]),
];
