use serde::{Deserialize, Serialize};

/// Side of a competitor within a match
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
    Home,
    Away,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Competitor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<Qualifier>,
    #[serde(rename = "virtual", default)]
    pub is_virtual: bool,
}

impl Competitor {
    /// Short name for tables: the abbreviation when known, otherwise the name.
    pub fn short_name(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }
}

/// One row of a league table.
///
/// The provider names some columns differently (`position`, `win`/`wins`,
/// `goal_diff`); those spellings are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Standing {
    pub competitor: Competitor,
    #[serde(default)]
    pub played: u32,
    #[serde(default, alias = "win", alias = "wins")]
    pub won: u32,
    #[serde(default, alias = "draw", alias = "draws")]
    pub drawn: u32,
    #[serde(default, alias = "loss", alias = "losses")]
    pub lost: u32,
    #[serde(default)]
    pub goals_for: u32,
    #[serde(default)]
    pub goals_against: u32,
    #[serde(default, alias = "goal_diff")]
    pub goal_difference: i32,
    #[serde(default)]
    pub points: u32,
    #[serde(default, alias = "position")]
    pub rank: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "standings")]
    pub group_standings: Vec<Standing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingTable {
    #[serde(rename = "type", default)]
    pub table_type: String,
    #[serde(default)]
    pub groups: Vec<StandingGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(rename = "type", default)]
    pub player_type: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}
