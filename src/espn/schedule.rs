//! ESPN team schedule → `ScheduledGame`s.

use chrono::{DateTime, NaiveDateTime, Utc};
use hoopcal_core::{GameRecord, GameResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::value_to_string;

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
pub struct EspnEvent {
    pub id: Option<Value>,
    pub date: Option<String>,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    pub status: Option<Status>,
    pub venue: Option<Venue>,
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub home_away: Option<String>,
    pub team: Option<Team>,
    pub score: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Option<Value>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub logos: Vec<Logo>,
}

#[derive(Debug, Deserialize)]
pub struct Logo {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    #[serde(rename = "type")]
    pub kind: Option<StatusType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusType {
    pub short_detail: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    #[serde(default)]
    pub names: Vec<String>,
    pub media: Option<Media>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub short_name: Option<String>,
}

/// One game on the team's schedule, from the team's point of view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledGame {
    pub id: String,
    pub opponent_name: String,
    pub is_home: bool,
    pub start_time: DateTime<Utc>,
    pub venue: Option<String>,
    pub broadcast_channel: Option<String>,
    pub status: String,
    pub self_score: Option<u32>,
    pub opponent_score: Option<u32>,
    pub opponent_logo: Option<String>,
}

impl ScheduledGame {
    pub fn record(&self) -> GameRecord {
        GameRecord {
            id: self.id.clone(),
            opponent_name: self.opponent_name.clone(),
            is_home: self.is_home,
            start_time: self.start_time,
            venue: self.venue.clone(),
            broadcast_channel: self.broadcast_channel.clone(),
        }
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            self_score: self.self_score,
            opponent_score: self.opponent_score,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.result().is_completed()
    }
}

/// Normalize a schedule response for `team_id`, sorted by start time.
///
/// Events without an id or a readable date are skipped.
pub fn parse_schedule(response: ScheduleResponse, team_id: u32) -> Vec<ScheduledGame> {
    let team_id = team_id.to_string();

    let mut games: Vec<_> = response
        .events
        .into_iter()
        .filter_map(|event| parse_event(event, &team_id))
        .collect();

    games.sort_by_key(|g| g.start_time);
    games
}

fn parse_event(event: EspnEvent, team_id: &str) -> Option<ScheduledGame> {
    let Some(id) = event.id.as_ref().and_then(value_to_string) else {
        warn!("skipping schedule entry without an id");
        return None;
    };
    let Some(start_time) = event.date.as_deref().and_then(parse_espn_date) else {
        warn!(id = %id, date = ?event.date, "skipping schedule entry without a readable date");
        return None;
    };

    let comp = event.competitions.into_iter().next().unwrap_or_default();

    let side = |which: &str| {
        comp.competitors
            .iter()
            .find(|c| c.home_away.as_deref() == Some(which))
    };
    let home = side("home");
    let away = side("away");

    let home_team_id = home
        .and_then(|c| c.team.as_ref())
        .and_then(|t| t.id.as_ref())
        .and_then(value_to_string);
    let is_home = home_team_id.as_deref() == Some(team_id);

    let (self_side, opp_side) = if is_home { (home, away) } else { (away, home) };
    let opp_team = opp_side.and_then(|c| c.team.as_ref());

    let status = comp
        .status
        .as_ref()
        .and_then(|s| s.kind.as_ref())
        .and_then(|t| t.short_detail.clone().or_else(|| t.description.clone()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Scheduled".to_string());

    let broadcast_channel = comp.broadcasts.first().and_then(|b| {
        b.names
            .first()
            .cloned()
            .or_else(|| b.media.as_ref().and_then(|m| m.short_name.clone()))
    });

    Some(ScheduledGame {
        id,
        opponent_name: opp_team
            .and_then(|t| t.display_name.clone())
            .unwrap_or_else(|| "Opponent".to_string()),
        is_home,
        start_time,
        venue: comp.venue.as_ref().and_then(|v| v.full_name.clone()),
        broadcast_channel,
        status,
        self_score: self_side.and_then(|c| c.score.as_ref()).and_then(parse_score),
        opponent_score: opp_side.and_then(|c| c.score.as_ref()).and_then(parse_score),
        opponent_logo: opp_team.and_then(|t| t.logos.first()).and_then(|l| l.href.clone()),
    })
}

/// ESPN dates usually omit seconds ("2024-01-06T19:00Z")
fn parse_espn_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Scores come as numbers, numeric strings, or `{ "value", "displayValue" }`
fn parse_score(raw: &Value) -> Option<u32> {
    match raw {
        Value::Number(n) => n.as_f64().and_then(whole_points),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(whole_points),
        Value::Object(map) => map
            .get("value")
            .and_then(parse_score)
            .or_else(|| map.get("displayValue").and_then(parse_score)),
        _ => None,
    }
}

fn whole_points(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0).then(|| value.round() as u32)
}
