//! Read router: named read actions over the published sheets.
//!
//! Single entry point (`dispatch`) for the enumerated read-only actions.
//! Every branch answers with the uniform `{success, error?, ...}` envelope;
//! fetch, parse, and mapping failures are caught here and never escape as
//! errors. Composite actions fetch their sheets concurrently and fail as a
//! whole if any fetch fails, except the admin composite which resolves the
//! society first and short-circuits.

use std::collections::HashSet;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::cache::SocietyCache;
use crate::config::SheetTab;
use crate::csv;
use crate::models::{Course, Outing, Player, Score, Society};
use crate::utils::format::normalize_name;

use super::mapper::{self, CoercionWarning, ScoreQuery, DEFAULT_SCORE_LIMIT};

/// The read-only actions the router serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAction {
    GetAllSocieties,
    GetSociety,
    GetPlayers,
    GetOutings,
    GetCourses,
    GetSocietyAdminData,
    GetScorecardData,
    LoadScores,
}

impl ReadAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "getAllSocieties" => Some(Self::GetAllSocieties),
            "getSociety" => Some(Self::GetSociety),
            "getPlayers" => Some(Self::GetPlayers),
            "getOutings" => Some(Self::GetOutings),
            "getCourses" => Some(Self::GetCourses),
            "getSocietyAdminData" => Some(Self::GetSocietyAdminData),
            "getScorecardData" => Some(Self::GetScorecardData),
            "loadScores" => Some(Self::LoadScores),
            _ => None,
        }
    }
}

/// A read request as it arrives from a page: an action name plus optional
/// tenant and score-query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadRequest {
    pub action: String,
    #[serde(rename = "societyId", default)]
    pub society_id: Option<String>,
    #[serde(rename = "playerName", default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// The uniform response envelope. Exactly the entity lists for the
/// dispatched action are present; on failure only `error` is set.
#[derive(Debug, Default, Serialize)]
pub struct ReadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub societies: Option<Vec<Society>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub society: Option<Society>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<Player>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outings: Option<Vec<Outing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<Score>>,
}

impl ReadResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Routes read actions to the sheet mappers. Holds the HTTP client and the
/// optional society cache; construct one per page context with its
/// dependencies injected rather than sharing ambient state.
pub struct SheetsReader {
    client: ApiClient,
    society_cache: Option<SocietyCache>,
}

impl SheetsReader {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            society_cache: None,
        }
    }

    /// Enable the short-lived society cache (read-through on miss).
    pub fn with_society_cache(mut self, cache: SocietyCache) -> Self {
        self.society_cache = Some(cache);
        self
    }

    /// Dispatch one named read action. Never returns an error: anything
    /// that goes wrong becomes a `success: false` envelope.
    pub async fn dispatch(&self, request: &ReadRequest) -> ReadResponse {
        let Some(action) = ReadAction::parse(&request.action) else {
            return ReadResponse::failure(format!("Unknown read action: {}", request.action));
        };
        debug!(action = %request.action, "Dispatching read action");
        match self.dispatch_inner(action, request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(action = %request.action, error = %e, "Read action failed");
                ReadResponse::failure(e.to_string())
            }
        }
    }

    async fn dispatch_inner(&self, action: ReadAction, request: &ReadRequest) -> Result<ReadResponse> {
        match action {
            ReadAction::GetAllSocieties => Ok(ReadResponse {
                success: true,
                societies: Some(self.get_all_societies().await?),
                ..Default::default()
            }),
            ReadAction::GetCourses => Ok(ReadResponse {
                success: true,
                courses: Some(self.get_courses().await?),
                ..Default::default()
            }),
            ReadAction::GetSociety => {
                let sid = required_society_id(request)?;
                Ok(ReadResponse {
                    success: true,
                    society: Some(self.get_society(sid).await?),
                    ..Default::default()
                })
            }
            ReadAction::GetPlayers => {
                let sid = required_society_id(request)?;
                Ok(ReadResponse {
                    success: true,
                    players: Some(self.get_players(sid).await?),
                    ..Default::default()
                })
            }
            ReadAction::GetOutings => {
                let sid = required_society_id(request)?;
                Ok(ReadResponse {
                    success: true,
                    outings: Some(self.get_outings(sid).await?),
                    ..Default::default()
                })
            }
            ReadAction::GetSocietyAdminData => {
                let sid = required_society_id(request)?;
                let (society, players, outings) = self.get_society_admin_data(sid).await?;
                Ok(ReadResponse {
                    success: true,
                    society: Some(society),
                    players: Some(players),
                    outings: Some(outings),
                    ..Default::default()
                })
            }
            ReadAction::GetScorecardData => {
                let sid = required_society_id(request)?;
                let (outings, courses, players) = self.get_scorecard_data(sid).await?;
                Ok(ReadResponse {
                    success: true,
                    outings: Some(outings),
                    courses: Some(courses),
                    players: Some(players),
                    ..Default::default()
                })
            }
            ReadAction::LoadScores => {
                let sid = request
                    .society_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| anyhow!("societyId is required"))?;
                let query = ScoreQuery {
                    player_name: request.player_name.as_deref(),
                    course: request.course.as_deref(),
                    limit: request.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_SCORE_LIMIT),
                };
                Ok(ReadResponse {
                    success: true,
                    scores: Some(self.load_scores(sid, &query).await?),
                    ..Default::default()
                })
            }
        }
    }

    async fn sheet_rows(&self, tab: SheetTab) -> Result<Vec<Vec<String>>> {
        let text = self.client.fetch_sheet_csv(tab).await?;
        Ok(csv::parse(&text))
    }

    pub async fn get_all_societies(&self) -> Result<Vec<Society>> {
        let rows = self.sheet_rows(SheetTab::Societies).await?;
        let mapped = mapper::map_societies(&rows);
        log_warnings(SheetTab::Societies, &mapped.warnings);
        Ok(mapped.records)
    }

    /// One society by id, case-insensitively. Served from the cache when
    /// enabled and fresh; a miss fetches and populates it.
    pub async fn get_society(&self, society_id: &str) -> Result<Society> {
        if let Some(cache) = &self.society_cache {
            if let Some(society) = cache.get(society_id) {
                return Ok(society);
            }
        }

        let rows = self.sheet_rows(SheetTab::Societies).await?;
        let mapped = mapper::map_societies(&rows);
        log_warnings(SheetTab::Societies, &mapped.warnings);

        let society = mapped
            .records
            .into_iter()
            .find(|s| s.matches_id(society_id))
            .ok_or_else(|| anyhow!("Society not found: {society_id}"))?;

        if let Some(cache) = &self.society_cache {
            cache.put(&society);
        }
        Ok(society)
    }

    pub async fn get_players(&self, society_id: &str) -> Result<Vec<Player>> {
        let rows = self.sheet_rows(SheetTab::Players).await?;
        let mapped = mapper::map_players(&rows, society_id);
        log_warnings(SheetTab::Players, &mapped.warnings);
        Ok(mapped.records)
    }

    pub async fn get_outings(&self, society_id: &str) -> Result<Vec<Outing>> {
        let rows = self.sheet_rows(SheetTab::Outings).await?;
        let mapped = mapper::map_outings(&rows, society_id);
        log_warnings(SheetTab::Outings, &mapped.warnings);
        Ok(mapped.records)
    }

    pub async fn get_courses(&self) -> Result<Vec<Course>> {
        let rows = self.sheet_rows(SheetTab::Courses).await?;
        let mapped = mapper::map_courses(&rows);
        log_warnings(SheetTab::Courses, &mapped.warnings);
        Ok(mapped.records)
    }

    /// Admin composite: society plus its players and outings. The society
    /// lookup runs first; if it fails the other sheets are never fetched.
    pub async fn get_society_admin_data(
        &self,
        society_id: &str,
    ) -> Result<(Society, Vec<Player>, Vec<Outing>)> {
        let society = self.get_society(society_id).await?;
        let (players, outings) =
            tokio::join!(self.get_players(society_id), self.get_outings(society_id));
        Ok((society, players?, outings?))
    }

    /// Scorecard composite: outings, the courses those outings are played
    /// on, and players, fetched concurrently. A failure in any sheet fails
    /// the whole composite.
    pub async fn get_scorecard_data(
        &self,
        society_id: &str,
    ) -> Result<(Vec<Outing>, Vec<Course>, Vec<Player>)> {
        let (outings, courses, players) = tokio::join!(
            self.get_outings(society_id),
            self.get_courses(),
            self.get_players(society_id),
        );
        let outings = outings?;
        let courses = courses_for_outings(&outings, courses?);
        Ok((outings, courses, players?))
    }

    pub async fn load_scores(&self, society_id: &str, query: &ScoreQuery<'_>) -> Result<Vec<Score>> {
        let rows = self.sheet_rows(SheetTab::Scores).await?;
        let mapped = mapper::map_scores(&rows, society_id, query);
        log_warnings(SheetTab::Scores, &mapped.warnings);
        Ok(mapped.records)
    }
}

fn required_society_id(request: &ReadRequest) -> Result<&str> {
    request
        .society_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("Society ID is required"))
}

/// The scorecard join: keep only courses whose normalized name matches some
/// outing's course name for this society.
fn courses_for_outings(outings: &[Outing], courses: Vec<Course>) -> Vec<Course> {
    let wanted: HashSet<String> = outings
        .iter()
        .map(|o| normalize_name(&o.course_name))
        .filter(|n| !n.is_empty())
        .collect();
    courses
        .into_iter()
        .filter(|c| wanted.contains(&normalize_name(&c.course_name)))
        .collect()
}

fn log_warnings(tab: SheetTab, warnings: &[CoercionWarning]) {
    for warning in warnings {
        warn!(sheet = tab.name(), %warning, "Dirty sheet data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn reader() -> SheetsReader {
        SheetsReader::new(ApiClient::new(Config::default()).unwrap())
    }

    fn outing(course_name: &str) -> Outing {
        Outing {
            date: "2026-05-10".to_string(),
            course_name: course_name.to_string(),
            ..Default::default()
        }
    }

    fn course(course_name: &str) -> Course {
        Course {
            course_name: course_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_read_action_parse() {
        assert_eq!(ReadAction::parse("loadScores"), Some(ReadAction::LoadScores));
        assert_eq!(
            ReadAction::parse("getScorecardData"),
            Some(ReadAction::GetScorecardData)
        );
        // action names are exact
        assert_eq!(ReadAction::parse("LoadScores"), None);
        assert_eq!(ReadAction::parse("deleteSociety"), None);
    }

    #[test]
    fn test_courses_for_outings_normalized_join() {
        let outings = vec![outing("Concra Wood"), outing("TRIM")];
        let courses = vec![course("ConcraWood"), course("Trim"), course("Millicent")];
        let joined = courses_for_outings(&outings, courses);
        let names: Vec<&str> = joined.iter().map(|c| c.course_name.as_str()).collect();
        assert_eq!(names, vec!["ConcraWood", "Trim"]);
    }

    #[test]
    fn test_courses_for_outings_no_outings_no_courses() {
        assert!(courses_for_outings(&[], vec![course("Trim")]).is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_action() {
        let response = reader()
            .dispatch(&ReadRequest {
                action: "explodeSheet".to_string(),
                ..Default::default()
            })
            .await;
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("Unknown read action: explodeSheet")
        );
        assert!(response.scores.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_requires_society_id() {
        let response = reader()
            .dispatch(&ReadRequest {
                action: "getPlayers".to_string(),
                ..Default::default()
            })
            .await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Society ID is required"));

        let response = reader()
            .dispatch(&ReadRequest {
                action: "loadScores".to_string(),
                society_id: Some("  ".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(response.error.as_deref(), Some("societyId is required"));
    }

    #[tokio::test]
    async fn test_dispatch_never_errors_on_unconfigured_source() {
        // no sheet id configured: the fetch fails, the envelope reports it
        let response = reader()
            .dispatch(&ReadRequest {
                action: "getAllSocieties".to_string(),
                ..Default::default()
            })
            .await;
        assert!(!response.success);
        assert!(response.error.is_some());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let json = serde_json::to_value(ReadResponse::failure("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
        assert!(json.get("societies").is_none());
        assert!(json.get("scores").is_none());
    }

    #[test]
    fn test_read_request_wire_names() {
        let request: ReadRequest = serde_json::from_str(
            r#"{"action": "loadScores", "societyId": "bgs", "playerName": "Jo", "limit": 5}"#,
        )
        .unwrap();
        assert_eq!(request.society_id.as_deref(), Some("bgs"));
        assert_eq!(request.player_name.as_deref(), Some("Jo"));
        assert_eq!(request.limit, Some(5));
    }
}
