use serde_json::Value;

use super::result_set::ResultSet;
use crate::domain::round_one_decimal;

pub const OVERALL_DASHBOARD_SET: &str = "OverallPlayerDashboard";
pub const PLAYER_INFO_SET: &str = "CommonPlayerInfo";

/// Per-game averages read from a season dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonAverages {
    pub pts: f64,
    pub fga: f64,
}

/// Name fields from the player identity lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerIdentity {
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
}

/// Points and field goal attempts per game; `None` unless both resolve
pub fn parse_season_averages(data: &Value) -> Option<SeasonAverages> {
    let set = ResultSet::find(data, OVERALL_DASHBOARD_SET)?;
    let row = set.first_row()?;
    let pts = row.f64(set.column("PTS")?)?;
    let fga = row.f64(set.column("FGA")?)?;

    Some(SeasonAverages {
        pts: round_one_decimal(pts),
        fga: round_one_decimal(fga),
    })
}

/// Identity fields; anything missing is left empty
pub fn parse_player_identity(data: &Value) -> PlayerIdentity {
    let Some(set) = ResultSet::find(data, PLAYER_INFO_SET) else {
        return PlayerIdentity::default();
    };
    let Some(row) = set.first_row() else {
        return PlayerIdentity::default();
    };

    let text = |header: &str| {
        set.column(header)
            .and_then(|index| row.str(index))
            .map(|s| s.trim().to_string())
    };

    PlayerIdentity {
        first_name: text("FIRST_NAME").unwrap_or_default(),
        last_name: text("LAST_NAME").unwrap_or_default(),
        display_name: text("DISPLAY_FIRST_LAST").filter(|name| !name.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_season_averages() {
        let data = json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["GROUP_SET", "GP", "FGA", "PTS"],
                "rowSet": [["Overall", 70, 18.44, 25.66]]
            }]
        });
        let averages = parse_season_averages(&data).unwrap();
        assert_eq!(averages.pts, 25.7);
        assert_eq!(averages.fga, 18.4);
    }

    #[test]
    fn test_season_averages_need_both_columns() {
        let no_fga = json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["PTS"],
                "rowSet": [[25.0]]
            }]
        });
        assert!(parse_season_averages(&no_fga).is_none());

        let no_rows = json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["PTS", "FGA"],
                "rowSet": []
            }]
        });
        assert!(parse_season_averages(&no_rows).is_none());

        let text_value = json!({
            "resultSets": [{
                "name": "OverallPlayerDashboard",
                "headers": ["PTS", "FGA"],
                "rowSet": [["n/a", 10.0]]
            }]
        });
        assert!(parse_season_averages(&text_value).is_none());
    }

    #[test]
    fn test_parse_player_identity() {
        let data = json!({
            "resultSets": [{
                "name": "CommonPlayerInfo",
                "headers": ["PERSON_ID", "FIRST_NAME", "LAST_NAME", "DISPLAY_FIRST_LAST"],
                "rowSet": [[2544, "LeBron", "James", "LeBron James"]]
            }]
        });
        let identity = parse_player_identity(&data);
        assert_eq!(identity.first_name, "LeBron");
        assert_eq!(identity.last_name, "James");
        assert_eq!(identity.display_name.as_deref(), Some("LeBron James"));
    }

    #[test]
    fn test_incomplete_identity_defaults_to_empty() {
        let data = json!({
            "resultSets": [{
                "name": "CommonPlayerInfo",
                "headers": ["PERSON_ID", "FIRST_NAME"],
                "rowSet": [[2544, "LeBron"]]
            }]
        });
        let identity = parse_player_identity(&data);
        assert_eq!(identity.first_name, "LeBron");
        assert_eq!(identity.last_name, "");
        assert_eq!(identity.display_name, None);

        assert_eq!(parse_player_identity(&json!({})), PlayerIdentity::default());
    }
}
