//! ESPN site API: fetching and normalizing into hoopcal's game types.

mod client;
mod roster;
mod schedule;

pub use client::EspnClient;
pub use roster::{parse_roster, Player, PlayerStats, RosterResponse};
pub use schedule::{parse_schedule, ScheduleResponse, ScheduledGame};

use serde_json::Value;

/// ESPN is inconsistent about ids being strings or numbers
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
