//! Calendar documents for games.
//!
//! `CalendarDocumentBuilder` turns `GameRecord`s into plain `CalendarEvent`
//! values; `generate` serializes them as RFC 5545 text.

mod generate;

pub use generate::generate_ics;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HoopcalConfig;
use crate::game::GameRecord;

/// Every game is blocked out for this long
pub const GAME_DURATION_HOURS: i64 = 2;

/// Stand-in for a missing venue or broadcast channel
pub const TBD: &str = "TBD";

/// Filename used when exporting a whole season
pub const SCHEDULE_FILENAME: &str = "Gator_Hoops_Schedule.ics";

/// A display alarm attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAlarm {
    pub minutes_before: u32,
    pub description: String,
}

impl GameAlarm {
    pub fn new(minutes_before: u32) -> Self {
        let description = match minutes_before {
            60 => "Game starting in 1 hour".to_string(),
            1 => "Game starting in 1 minute".to_string(),
            m => format!("Game starting in {m} minutes"),
        };
        GameAlarm {
            minutes_before,
            description,
        }
    }
}

/// One VEVENT, with all text already flattened to a single line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// "<game id>@<namespace>", identical every time the game is exported
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// DTSTAMP. The one field that differs between two exports of the same game.
    pub stamp: DateTime<Utc>,
    pub alarm: Option<GameAlarm>,
}

impl CalendarEvent {
    /// Filename offered when downloading this event, e.g. "Florida_Gators_vs_Kentucky.ics"
    pub fn suggested_filename(&self) -> String {
        format!("{}.ics", self.summary.split_whitespace().collect::<Vec<_>>().join("_"))
    }

    /// One-event document holding this event
    pub fn into_document(self, prodid: &str) -> CalendarDocument {
        CalendarDocument {
            prodid: prodid.to_string(),
            events: vec![self],
        }
    }

    /// Serialize this event on its own, wrapped in a VCALENDAR
    pub fn to_ics(&self, prodid: &str) -> String {
        self.clone().into_document(prodid).to_ics()
    }
}

/// A VCALENDAR holding zero or more events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDocument {
    pub prodid: String,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    pub fn to_ics(&self) -> String {
        generate_ics(self)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Builds calendar events for one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocumentBuilder {
    pub team_name: String,
    pub uid_namespace: String,
    pub prodid: String,
    pub attribution: String,
}

impl Default for CalendarDocumentBuilder {
    fn default() -> Self {
        HoopcalConfig::default().calendar_builder()
    }
}

impl CalendarDocumentBuilder {
    /// "<Team> vs <Opponent>" at home, "<Team> @ <Opponent>" away
    pub fn title(&self, game: &GameRecord) -> String {
        format!("{} {} {}", self.team_name, game.connector(), game.opponent_name)
    }

    pub fn description(&self, game: &GameRecord) -> String {
        format!(
            "TV: {} — Auto-generated from {}",
            game.broadcast_channel.as_deref().unwrap_or(TBD),
            self.attribution
        )
    }

    pub fn location(&self, game: &GameRecord) -> String {
        game.venue.clone().unwrap_or_else(|| TBD.to_string())
    }

    pub fn uid(&self, game: &GameRecord) -> String {
        format!("{}@{}", game.id, self.uid_namespace)
    }

    /// Build the event for `game`, stamped with the current time
    pub fn build_event(
        &self,
        game: &GameRecord,
        alarm_minutes_before: Option<u32>,
    ) -> CalendarEvent {
        self.build_event_at(game, alarm_minutes_before, Utc::now())
    }

    /// Build the event for `game` with an explicit DTSTAMP
    pub fn build_event_at(
        &self,
        game: &GameRecord,
        alarm_minutes_before: Option<u32>,
        stamp: DateTime<Utc>,
    ) -> CalendarEvent {
        CalendarEvent {
            uid: self.uid(game),
            summary: single_line(&self.title(game)),
            description: single_line(&self.description(game)),
            location: single_line(&self.location(game)),
            start: game.start_time,
            end: game.start_time + Duration::hours(GAME_DURATION_HOURS),
            stamp,
            alarm: alarm_minutes_before.map(GameAlarm::new),
        }
    }

    /// Build one document holding an event per game, in input order.
    ///
    /// Game ids are not checked for uniqueness. Two games sharing an id end up
    /// as two events sharing a UID; callers that care must dedup first.
    pub fn build_document(
        &self,
        games: &[GameRecord],
        alarm_minutes_before: Option<u32>,
    ) -> CalendarDocument {
        let stamp = Utc::now();
        let events: Vec<_> = games
            .iter()
            .map(|game| self.build_event_at(game, alarm_minutes_before, stamp))
            .collect();

        debug!(events = events.len(), "built calendar document");

        CalendarDocument {
            prodid: self.prodid.clone(),
            events,
        }
    }

    /// Single-event document for `game`
    pub fn build_single(
        &self,
        game: &GameRecord,
        alarm_minutes_before: Option<u32>,
    ) -> CalendarDocument {
        self.build_event(game, alarm_minutes_before).into_document(&self.prodid)
    }
}

/// Replace CR and LF with spaces; iCalendar text values are line-oriented
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Compact UTC form used by DTSTART/DTEND and Google links: 20240106T190000Z
pub fn compact_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}
