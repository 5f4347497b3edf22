//! ESPN team page → roster with season averages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value_to_string;

#[derive(Debug, Default, Deserialize)]
pub struct RosterResponse {
    #[serde(default)]
    pub team: RosterTeam,
}

#[derive(Debug, Default, Deserialize)]
pub struct RosterTeam {
    #[serde(default)]
    pub athletes: Vec<AthleteEntry>,
}

/// ESPN either groups athletes by position (`items`) or lists them flat
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AthleteEntry {
    Group { items: Vec<Athlete> },
    Athlete(Athlete),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: Option<Value>,
    pub display_name: Option<String>,
    pub position: Option<Position>,
    pub jersey: Option<String>,
    #[serde(rename = "class")]
    pub class_year: Option<Value>,
    pub headshot: Option<Headshot>,
    #[serde(default)]
    pub statistics: Vec<StatGroup>,
}

#[derive(Debug, Deserialize)]
pub struct Position {
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Headshot {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatGroup {
    pub name: Option<String>,
    pub splits: Option<Splits>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Splits {
    #[serde(default)]
    pub categories: Vec<StatCategory>,
}

#[derive(Debug, Deserialize)]
pub struct StatCategory {
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Deserialize)]
pub struct Stat {
    pub name: Option<String>,
    pub value: Option<Value>,
}

/// Per-game season averages (percentages as ESPN reports them)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub ppg: f64,
    pub rpg: f64,
    pub apg: f64,
    pub fgp: f64,
    pub tpp: f64,
    pub ftp: f64,
    pub spg: f64,
    pub bpg: f64,
    pub topg: f64,
    pub mpg: f64,
}

impl PlayerStats {
    fn set(&mut self, name: &str, value: f64) {
        let slot = match name {
            "pointsPerGame" => &mut self.ppg,
            "reboundsPerGame" => &mut self.rpg,
            "assistsPerGame" => &mut self.apg,
            "fieldGoalPct" => &mut self.fgp,
            "threePointPct" => &mut self.tpp,
            "freeThrowPct" => &mut self.ftp,
            "stealsPerGame" => &mut self.spg,
            "blocksPerGame" => &mut self.bpg,
            "turnoversPerGame" => &mut self.topg,
            "minutesPerGame" => &mut self.mpg,
            _ => return,
        };
        *slot = value;
    }

    /// (label, value) pairs in display order
    pub fn columns(&self) -> [(&'static str, f64); 10] {
        [
            ("PPG", self.ppg),
            ("RPG", self.rpg),
            ("APG", self.apg),
            ("FG%", self.fgp),
            ("3P%", self.tpp),
            ("FT%", self.ftp),
            ("STL", self.spg),
            ("BLK", self.bpg),
            ("TO", self.topg),
            ("MIN", self.mpg),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: String,
    pub full_name: String,
    pub position: Option<String>,
    pub number: Option<String>,
    pub class_year: Option<String>,
    pub headshot: Option<String>,
    pub stats: PlayerStats,
}

/// Flatten the roster and sort it by name
pub fn parse_roster(response: RosterResponse) -> Vec<Player> {
    let mut players: Vec<_> = response
        .team
        .athletes
        .into_iter()
        .flat_map(|entry| match entry {
            AthleteEntry::Group { items } => items,
            AthleteEntry::Athlete(athlete) => vec![athlete],
        })
        .map(parse_athlete)
        .collect();

    players.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    players
}

fn parse_athlete(athlete: Athlete) -> Player {
    let mut stats = PlayerStats::default();

    let season = athlete.statistics.iter().find(|s| {
        s.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains("season"))
    });
    let categories = season
        .and_then(|s| s.splits.as_ref())
        .map(|splits| splits.categories.as_slice())
        .unwrap_or_default();

    for stat in categories.iter().flat_map(|c| &c.stats) {
        let value = stat.value.as_ref().and_then(stat_value);
        if let (Some(name), Some(value)) = (stat.name.as_deref(), value) {
            stats.set(name, value);
        }
    }

    Player {
        id: athlete.id.as_ref().and_then(value_to_string).unwrap_or_default(),
        full_name: athlete.display_name.unwrap_or_default(),
        position: athlete.position.and_then(|p| p.abbreviation),
        number: athlete.jersey,
        class_year: athlete.class_year.as_ref().and_then(value_to_string),
        headshot: athlete.headshot.and_then(|h| h.href),
        stats,
    }
}

fn stat_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn athlete(id: u32, name: &str, ppg: Value) -> Value {
        json!({
            "id": id.to_string(),
            "displayName": name,
            "position": { "abbreviation": "G" },
            "jersey": "1",
            "class": "Senior",
            "statistics": [
                { "name": "career", "splits": { "categories": [{ "stats": [{ "name": "pointsPerGame", "value": 99.0 }] }] } },
                { "name": "2023-24 Season", "splits": { "categories": [
                    { "stats": [
                        { "name": "pointsPerGame", "value": ppg },
                        { "name": "reboundsPerGame", "value": "4.5" },
                        { "name": "somethingElse", "value": 1.0 }
                    ] },
                    { "stats": [{ "name": "minutesPerGame", "value": 31.2 }] }
                ] } }
            ]
        })
    }

    #[test]
    fn grouped_roster_is_flattened_and_sorted() {
        let response: RosterResponse = serde_json::from_value(json!({
            "team": { "athletes": [
                { "position": "guards", "items": [athlete(1, "Walter Clayton Jr.", json!(17.2))] },
                { "position": "forwards", "items": [athlete(2, "Alex Condon", json!(10.1))] }
            ] }
        }))
        .unwrap();

        let players = parse_roster(response);
        let names: Vec<_> = players.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, ["Alex Condon", "Walter Clayton Jr."]);

        let walter = &players[1];
        assert_eq!(walter.id, "1");
        assert_eq!(walter.position.as_deref(), Some("G"));
        assert_eq!(walter.class_year.as_deref(), Some("Senior"));
        assert_eq!(walter.stats.ppg, 17.2);
        assert_eq!(walter.stats.rpg, 4.5);
        assert_eq!(walter.stats.mpg, 31.2);
        assert_eq!(walter.stats.apg, 0.0);
    }

    #[test]
    fn flat_roster_without_stats() {
        let response: RosterResponse = serde_json::from_value(json!({
            "team": { "athletes": [{ "id": 7, "displayName": "Will Richard" }] }
        }))
        .unwrap();

        let players = parse_roster(response);
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, "7");
        assert_eq!(players[0].stats, PlayerStats::default());
    }

    #[test]
    fn missing_team_is_empty() {
        let response: RosterResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parse_roster(response).is_empty());
    }
}
