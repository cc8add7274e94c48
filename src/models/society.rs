//! Society (tenant) record and captain's-notes markup.

use serde::{Deserialize, Serialize};

/// One society row from the Societies sheet. Identified by a
/// case-insensitive match on `society_id`; read-only projection, never
/// mutated by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Society {
    #[serde(rename = "societyId")]
    pub society_id: String,
    #[serde(rename = "societyName")]
    pub society_name: String,
    #[serde(rename = "contactPerson")]
    pub contact_person: String,
    #[serde(rename = "numberOfPlayers", default)]
    pub number_of_players: u32,
    #[serde(rename = "numberOfOutings", default)]
    pub number_of_outings: u32,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "createdDate", default)]
    pub created_date: String,
    #[serde(rename = "captainsNotes", default)]
    pub captains_notes: String,
}

/// One rendered line of the captain's notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLine {
    Heading(String),
    Paragraph(Vec<NoteSpan>),
    Spacer,
}

/// A run of paragraph text, bold or plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSpan {
    pub bold: bool,
    pub text: String,
}

/// A line under this length that is entirely upper-case reads as a heading.
const HEADING_MAX_LEN: usize = 50;

impl Society {
    pub fn matches_id(&self, society_id: &str) -> bool {
        self.society_id.eq_ignore_ascii_case(society_id.trim())
    }

    /// Split the captain's notes into renderable lines: `**…**` lines and
    /// short all-caps lines are headings, blank lines are spacers, and
    /// everything else is a paragraph with inline `**bold**` runs.
    pub fn notes_lines(&self) -> Vec<NoteLine> {
        self.captains_notes
            .split(['\n'])
            .map(|line| parse_note_line(line.trim_end_matches('\r').trim()))
            .collect()
    }
}

fn parse_note_line(line: &str) -> NoteLine {
    if line.is_empty() {
        return NoteLine::Spacer;
    }
    if line.len() > 4 && line.starts_with("**") && line.ends_with("**") {
        return NoteLine::Heading(line.replace("**", ""));
    }
    let all_caps = line.len() < HEADING_MAX_LEN
        && line.chars().any(|c| c.is_ascii_alphabetic())
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace());
    if all_caps {
        return NoteLine::Heading(line.to_string());
    }
    NoteLine::Paragraph(parse_spans(line))
}

/// Pair up `**…**` markers; unmatched markers stay literal text.
fn parse_spans(text: &str) -> Vec<NoteSpan> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        match rest[open + 2..].find("**") {
            Some(close) if close > 0 => {
                let before = &rest[..open];
                if !before.is_empty() {
                    spans.push(NoteSpan {
                        bold: false,
                        text: before.to_string(),
                    });
                }
                spans.push(NoteSpan {
                    bold: true,
                    text: rest[open + 2..open + 2 + close].to_string(),
                });
                rest = &rest[open + 2 + close + 2..];
            }
            _ => break,
        }
    }
    if !rest.is_empty() {
        spans.push(NoteSpan {
            bold: false,
            text: rest.to_string(),
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn society_with_notes(notes: &str) -> Society {
        Society {
            society_id: "bgs".to_string(),
            captains_notes: notes.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_id_case_insensitive() {
        let s = society_with_notes("");
        assert!(s.matches_id("BGS"));
        assert!(s.matches_id("  bgs  "));
        assert!(!s.matches_id("other"));
    }

    #[test]
    fn test_notes_headings_and_spacers() {
        let s = society_with_notes("**Welcome back**\n\nNEXT OUTING\nSee you at the first tee.");
        let lines = s.notes_lines();
        assert_eq!(lines[0], NoteLine::Heading("Welcome back".to_string()));
        assert_eq!(lines[1], NoteLine::Spacer);
        assert_eq!(lines[2], NoteLine::Heading("NEXT OUTING".to_string()));
        assert!(matches!(lines[3], NoteLine::Paragraph(_)));
    }

    #[test]
    fn test_notes_inline_bold() {
        let s = society_with_notes("Tee off at **10:30 sharp** please.");
        let lines = s.notes_lines();
        let NoteLine::Paragraph(spans) = &lines[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans.len(), 3);
        assert!(!spans[0].bold);
        assert!(spans[1].bold);
        assert_eq!(spans[1].text, "10:30 sharp");
        assert_eq!(spans[2].text, " please.");
    }

    #[test]
    fn test_notes_unbalanced_markers_stay_literal() {
        let s = society_with_notes("price is 2 ** 3 euro");
        let NoteLine::Paragraph(spans) = &s.notes_lines()[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "price is 2 ** 3 euro");
    }
}
