//! Player record.

use serde::{Deserialize, Serialize};

/// One player row, scoped to a single society. Names are free text and not
/// deduplicated; matching elsewhere is case/space-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Player {
    #[serde(rename = "playerName")]
    pub player_name: String,
    #[serde(default)]
    pub handicap: f64,
}

impl Player {
    /// Player names sorted for display in a picker.
    pub fn sorted_names(players: &[Player]) -> Vec<String> {
        let mut names: Vec<String> = players
            .iter()
            .map(|p| p.player_name.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_names_skips_blanks() {
        let players = vec![
            Player {
                player_name: "Pat".to_string(),
                handicap: 12.0,
            },
            Player {
                player_name: "  ".to_string(),
                handicap: 0.0,
            },
            Player {
                player_name: "Jo".to_string(),
                handicap: 9.0,
            },
        ];
        assert_eq!(Player::sorted_names(&players), vec!["Jo", "Pat"]);
    }
}
