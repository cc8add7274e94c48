//! Application configuration management.
//!
//! Holds the published-sheet id, the per-tab `gid` values for each logical
//! sheet, and the script write-endpoint URL. One sheet serves every tenant;
//! the same export URL shape is reused per tab by varying `gid`.
//!
//! Configuration is stored at `~/.config/teebook/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "teebook";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// CSV export URL shape for one published-sheet tab
const CSV_URL_TEMPLATE: &str =
    "https://docs.google.com/spreadsheets/d/e/{SHEET_ID}/pub?gid={GID}&single=true&output=csv";

/// The logical sheets backing the read model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetTab {
    Societies,
    Players,
    Outings,
    Courses,
    Scores,
}

impl SheetTab {
    pub fn name(&self) -> &'static str {
        match self {
            SheetTab::Societies => "Societies",
            SheetTab::Players => "Players",
            SheetTab::Outings => "Outings",
            SheetTab::Courses => "Courses",
            SheetTab::Scores => "Scores",
        }
    }
}

/// Tab ids (`gid`) within the published sheet, one per logical sheet.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SheetGids {
    #[serde(default)]
    pub societies: String,
    #[serde(default)]
    pub players: String,
    #[serde(default)]
    pub outings: String,
    #[serde(default)]
    pub courses: String,
    #[serde(default)]
    pub scores: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Published-sheet id from the "publish to web" URL.
    #[serde(default)]
    pub sheet_id: String,
    #[serde(default)]
    pub gids: SheetGids,
    /// Script web-app URL for the write endpoint.
    #[serde(default)]
    pub api_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn gid(&self, tab: SheetTab) -> &str {
        match tab {
            SheetTab::Societies => &self.gids.societies,
            SheetTab::Players => &self.gids.players,
            SheetTab::Outings => &self.gids.outings,
            SheetTab::Courses => &self.gids.courses,
            SheetTab::Scores => &self.gids.scores,
        }
    }

    /// CSV export URL for one tab, `None` until the sheet id and that tab's
    /// gid are both configured.
    pub fn sheet_url(&self, tab: SheetTab) -> Option<String> {
        let gid = self.gid(tab);
        if self.sheet_id.is_empty() || gid.is_empty() {
            return None;
        }
        Some(
            CSV_URL_TEMPLATE
                .replace("{SHEET_ID}", &self.sheet_id)
                .replace("{GID}", gid),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            sheet_id: "2PACX-example".to_string(),
            gids: SheetGids {
                societies: "0".to_string(),
                players: "111".to_string(),
                outings: "222".to_string(),
                courses: "333".to_string(),
                scores: "444".to_string(),
            },
            api_url: "https://example.test/exec".to_string(),
        }
    }

    #[test]
    fn test_sheet_url_substitution() {
        let url = config().sheet_url(SheetTab::Players).unwrap();
        assert_eq!(
            url,
            "https://docs.google.com/spreadsheets/d/e/2PACX-example/pub?gid=111&single=true&output=csv"
        );
    }

    #[test]
    fn test_sheet_url_requires_configuration() {
        assert!(Config::default().sheet_url(SheetTab::Societies).is_none());

        let mut partial = config();
        partial.gids.scores = String::new();
        assert!(partial.sheet_url(SheetTab::Scores).is_none());
        assert!(partial.sheet_url(SheetTab::Outings).is_some());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let parsed: Config =
            serde_json::from_str(&serde_json::to_string(&config()).unwrap()).unwrap();
        assert_eq!(parsed.gid(SheetTab::Courses), "333");
        assert_eq!(parsed.api_url, "https://example.test/exec");
    }
}
