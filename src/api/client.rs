//! HTTP client for the sheet CSV exports and the script write endpoint.
//!
//! The write endpoint accepts a form-encoded POST with a single `data`
//! field holding a JSON envelope `{action, societyId?, data}` and answers
//! `{success: true, ...}` or `{success: false, error}`. It is deployed as a
//! script web-app, so responses can be empty, HTML error pages, or
//! redirects; everything is normalized here into `ApiError` categories.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Config, SheetTab};
use crate::models::{Score, Society};

use super::ApiError;

/// HTTP request timeout in seconds. Published-sheet exports can be slow to
/// first byte, script cold starts slower still.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct WriteEnvelope<'a> {
    action: &'a str,
    #[serde(rename = "societyId", skip_serializing_if = "Option::is_none")]
    society_id: Option<&'a str>,
    data: Value,
}

#[derive(Debug, Deserialize)]
struct ExistingScoreResponse {
    #[serde(default)]
    exists: bool,
    score: Option<Score>,
}

/// API client for the sheet source and write endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch one sheet tab's CSV export as text.
    pub async fn fetch_sheet_csv(&self, tab: SheetTab) -> Result<String> {
        let url = self
            .config
            .sheet_url(tab)
            .ok_or_else(|| ApiError::SheetNotConfigured(tab.name().to_string()))?;

        debug!(tab = tab.name(), "Fetching sheet CSV");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read CSV body for sheet {}", tab.name()))
    }

    /// POST one write action and return the parsed success envelope.
    async fn post_action(
        &self,
        action: &str,
        society_id: Option<&str>,
        data: Value,
    ) -> Result<Value> {
        if self.config.api_url.is_empty() {
            return Err(ApiError::EndpointNotConfigured.into());
        }

        let envelope = WriteEnvelope {
            action,
            society_id,
            data,
        };
        let payload =
            serde_json::to_string(&envelope).context("Failed to serialize write request")?;

        debug!(action, society_id = society_id.unwrap_or("-"), "Posting write action");

        // form-encoded with a single JSON field; a JSON body would trigger a
        // CORS preflight the script endpoint cannot answer
        let response = self
            .client
            .post(&self.config.api_url)
            .form(&[("data", payload.as_str())])
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ApiError::EndpointNotFound.into());
        }

        let text = response.text().await.map_err(ApiError::Network)?;

        // an empty 2xx body still counts as success for this endpoint
        if text.trim().is_empty() && status.is_success() {
            return Ok(Value::Object(Default::default()));
        }

        let value: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) if text.contains("<html") || text.contains("<!DOCTYPE") => {
                return Err(ApiError::MalformedResponse(
                    "server returned an HTML page instead of JSON; the web app may not be \
                     deployed correctly"
                        .to_string(),
                )
                .into());
            }
            Err(_) => {
                return Err(ApiError::MalformedResponse(ApiError::truncate_body(&text)).into());
            }
        };

        if value.get("success").and_then(Value::as_bool).unwrap_or(false) {
            Ok(value)
        } else {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error from server")
                .to_string();
            warn!(action, error = %message, "Write action rejected");
            Err(ApiError::Server(message).into())
        }
    }

    /// Persist a computed score record for one society.
    pub async fn save_score(&self, society_id: &str, score: &Score) -> Result<()> {
        let data = serde_json::to_value(score).context("Failed to serialize score")?;
        self.post_action("saveScore", Some(society_id), data).await?;
        Ok(())
    }

    /// Look up a previously saved score for the same player/course/date, so
    /// a resubmission can overwrite in place instead of duplicating.
    pub async fn check_existing_score(
        &self,
        society_id: &str,
        player_name: &str,
        course: &str,
        date: &str,
    ) -> Result<Option<Score>> {
        let data = serde_json::json!({
            "playerName": player_name,
            "course": course,
            "date": date,
        });
        let value = self
            .post_action("checkExistingScore", Some(society_id), data)
            .await?;
        let parsed: ExistingScoreResponse = serde_json::from_value(value)
            .context("Failed to parse checkExistingScore response")?;
        Ok(if parsed.exists { parsed.score } else { None })
    }

    // ===== Master admin actions (no tenant scope) =====

    pub async fn create_society(&self, society: &Society) -> Result<()> {
        let data = serde_json::to_value(society).context("Failed to serialize society")?;
        self.post_action("createSociety", None, data).await?;
        Ok(())
    }

    pub async fn update_society(&self, society: &Society) -> Result<()> {
        let data = serde_json::to_value(society).context("Failed to serialize society")?;
        self.post_action("updateSociety", None, data).await?;
        Ok(())
    }

    pub async fn delete_society(&self, society_id: &str) -> Result<()> {
        let data = serde_json::json!({ "societyId": society_id });
        self.post_action("deleteSociety", None, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_envelope_shape() {
        let envelope = WriteEnvelope {
            action: "saveScore",
            society_id: Some("bgs"),
            data: serde_json::json!({"playerName": "Jo"}),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["action"], "saveScore");
        assert_eq!(json["societyId"], "bgs");
        assert_eq!(json["data"]["playerName"], "Jo");
    }

    #[test]
    fn test_write_envelope_omits_society_for_admin_actions() {
        let envelope = WriteEnvelope {
            action: "createSociety",
            society_id: None,
            data: serde_json::json!({}),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("societyId").is_none());
    }

    #[test]
    fn test_existing_score_response_parsing() {
        let found: ExistingScoreResponse = serde_json::from_str(
            r#"{"success": true, "exists": true, "score": {"playerName": "Jo", "handicap": 12}}"#,
        )
        .unwrap();
        assert!(found.exists);
        assert_eq!(found.score.unwrap().player_name, "Jo");

        let missing: ExistingScoreResponse =
            serde_json::from_str(r#"{"success": true, "exists": false}"#).unwrap();
        assert!(!missing.exists);
        assert!(missing.score.is_none());
    }
}
