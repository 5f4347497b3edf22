//! Plain game types fed into the rating engine and the calendar builder.
//!
//! The CLI normalizes raw API responses into these shapes. Nothing here
//! parses or validates; missing data is simply `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final score of one game from the team's point of view.
///
/// Both scores are present only for completed games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameResult {
    pub self_score: Option<u32>,
    pub opponent_score: Option<u32>,
}

impl GameResult {
    pub fn new(self_score: u32, opponent_score: u32) -> Self {
        GameResult {
            self_score: Some(self_score),
            opponent_score: Some(opponent_score),
        }
    }

    /// A game that has not been played yet
    pub fn unplayed() -> Self {
        GameResult::default()
    }

    /// Both scores, if the game is complete
    pub fn scores(&self) -> Option<(u32, u32)> {
        self.self_score.zip(self.opponent_score)
    }

    pub fn is_completed(&self) -> bool {
        self.scores().is_some()
    }
}

/// A scheduled game, as needed to put it on a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Stable per-game identifier (used for the calendar UID)
    pub id: String,
    pub opponent_name: String,
    pub is_home: bool,
    pub start_time: DateTime<Utc>,
    pub venue: Option<String>,
    pub broadcast_channel: Option<String>,
}

impl GameRecord {
    /// "vs" for home games, "@" for away games
    pub fn connector(&self) -> &'static str {
        if self.is_home { "vs" } else { "@" }
    }
}
