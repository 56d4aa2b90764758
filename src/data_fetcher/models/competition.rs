use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Season reference embedded in competition listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentSeason {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Competition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(rename = "type", default)]
    pub competition_type: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_season: Option<CurrentSeason>,
}

impl Competition {
    /// Display label with the running season, e.g. "Premier League (2024/25)".
    pub fn season_label(&self) -> String {
        match &self.current_season {
            Some(season) => match season.name.as_deref().or(season.year.as_deref()) {
                Some(label) => format!("{} ({})", self.name, label),
                None => self.name.clone(),
            },
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Season {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub year: String,
    pub competition_id: String,
    #[serde(default)]
    pub disabled: bool,
}

impl Season {
    /// True when `date` (YYYY-MM-DD) falls inside the season. The provider's
    /// ISO dates compare correctly as strings.
    pub fn covers(&self, date: &str) -> bool {
        self.start_date.as_str() <= date && date <= self.end_date.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_deserializes_provider_shape() {
        let json = r#"{
            "id": "sr:competition:17",
            "name": "Premier League",
            "category": {"id": "sr:category:1", "name": "England", "country_code": "ENG"},
            "type": "league",
            "gender": "men"
        }"#;
        let competition: Competition = serde_json::from_str(json).unwrap();
        assert_eq!(competition.competition_type, "league");
        assert_eq!(competition.category.country_code.as_deref(), Some("ENG"));
        assert!(competition.current_season.is_none());
    }

    #[test]
    fn test_competition_without_category() {
        let json = r#"{"id": "sr:competition:8", "name": "La Liga"}"#;
        let competition: Competition = serde_json::from_str(json).unwrap();
        assert_eq!(competition.category, Category::default());
        assert_eq!(competition.gender, "");
    }

    #[test]
    fn test_season_label() {
        let mut competition: Competition =
            serde_json::from_str(r#"{"id": "c", "name": "Serie A"}"#).unwrap();
        assert_eq!(competition.season_label(), "Serie A");

        competition.current_season = Some(CurrentSeason {
            id: "sr:season:1".to_string(),
            name: None,
            year: Some("24/25".to_string()),
        });
        assert_eq!(competition.season_label(), "Serie A (24/25)");

        competition.current_season = Some(CurrentSeason {
            id: "sr:season:1".to_string(),
            name: Some("Serie A 24/25".to_string()),
            year: Some("24/25".to_string()),
        });
        assert_eq!(competition.season_label(), "Serie A (Serie A 24/25)");
    }

    #[test]
    fn test_season_covers() {
        let season = Season {
            id: "sr:season:118689".to_string(),
            name: "Premier League 24/25".to_string(),
            start_date: "2024-08-16".to_string(),
            end_date: "2025-05-25".to_string(),
            year: "24/25".to_string(),
            competition_id: "sr:competition:17".to_string(),
            disabled: false,
        };
        assert!(season.covers("2024-08-16"));
        assert!(season.covers("2025-01-01"));
        assert!(season.covers("2025-05-25"));
        assert!(!season.covers("2025-05-26"));
        assert!(!season.covers("2024-08-15"));
    }
}
