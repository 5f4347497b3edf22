//! Next-game lookup and tip-off countdown.

use chrono::{DateTime, Duration, Utc};

use crate::game::GameRecord;

/// First game in `games` that starts strictly after `now`.
///
/// `games` is expected to be sorted by start time.
pub fn next_game(games: &[GameRecord], now: DateTime<Utc>) -> Option<&GameRecord> {
    games.iter().find(|game| game.start_time > now)
}

/// When an alarm `minutes_before` tip-off should fire
pub fn reminder_time(game: &GameRecord, minutes_before: u32) -> DateTime<Utc> {
    game.start_time - Duration::minutes(i64::from(minutes_before))
}

/// Human countdown to tip-off: "2d 3h 15m", "3h 15m 9s", "15m 9s" or "Tip-off!"
pub fn format_countdown(remaining: Duration) -> String {
    if remaining <= Duration::zero() {
        return "Tip-off!".to_string();
    }

    let total = remaining.num_seconds();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else {
        format!("{minutes}m {seconds}s")
    }
}
