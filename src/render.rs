//! Terminal rendering for schedule cards and the roster.
//!
//! Colored with owo_colors; every card is returned as a string so commands
//! decide where it goes.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use hoopcal_core::rating::{as_percent, predict_win_probability};
use hoopcal_core::schedule::{format_countdown, reminder_time};
use owo_colors::OwoColorize;

use crate::espn::{Player, ScheduledGame};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Tip-off time in the configured timezone, or local time
pub fn format_start(start: &DateTime<Utc>, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => start.with_timezone(&tz).format("%a %b %-d, %-I:%M %p %Z").to_string(),
        None => start.with_timezone(&chrono::Local).format("%a %b %-d, %-I:%M %p").to_string(),
    }
}

/// "[ESPN] [O'Connell Center]"
fn pills(game: &ScheduledGame) -> String {
    [game.broadcast_channel.as_deref(), game.venue.as_deref()]
        .into_iter()
        .flatten()
        .map(|p| format!("[{p}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn headline(game: &ScheduledGame) -> String {
    let matchup = format!("{} {}", game.record().connector(), game.opponent_name);
    let pills = pills(game);
    if pills.is_empty() {
        matchup.bold().to_string()
    } else {
        format!("{} {}", matchup.bold(), pills.dimmed())
    }
}

/// "Prediction: 57% win"
pub fn prediction_line(rating: f64, is_home: bool) -> String {
    format!("Prediction: {}% win", as_percent(predict_win_probability(rating, is_home)))
}

/// One schedule card: score for finished games, prediction for the rest
pub struct GameCard<'a> {
    pub game: &'a ScheduledGame,
    pub rating: f64,
    pub tz: Option<Tz>,
}

impl Render for GameCard<'_> {
    fn render(&self) -> String {
        let game = self.game;
        let mut lines = vec![headline(game)];

        let when = format_start(&game.start_time, self.tz);
        match game.result().scores() {
            Some((mine, theirs)) => {
                let score = format!("{mine}-{theirs}");
                let score = if mine > theirs {
                    score.green().to_string()
                } else if mine < theirs {
                    score.red().to_string()
                } else {
                    score
                };
                lines.push(format!("   {}  {}", when.dimmed(), score.bold()));
            }
            None => {
                lines.push(format!("   {}  {}", when.dimmed(), game.status.dimmed()));
                lines.push(format!("   {}", prediction_line(self.rating, game.is_home).cyan()));
            }
        }

        lines.join("\n")
    }
}

/// Highlighted card for the next game, with a countdown
pub struct NextGameCard<'a> {
    pub game: Option<&'a ScheduledGame>,
    pub now: DateTime<Utc>,
    pub tz: Option<Tz>,
    pub alarm_minutes: u32,
}

impl Render for NextGameCard<'_> {
    fn render(&self) -> String {
        let Some(game) = self.game else {
            return "No upcoming games found.".dimmed().to_string();
        };

        let countdown = format_countdown(game.start_time - self.now);
        let alert_at = reminder_time(&game.record(), self.alarm_minutes);
        [
            format!("{} {}", "Next:".yellow().bold(), headline(game)),
            format!("   {}", format_start(&game.start_time, self.tz).dimmed()),
            format!("   {}", countdown.yellow()),
            format!(
                "   {}",
                format!(
                    "Add it with a {}-minute alert ({}): hoopcal export --next",
                    self.alarm_minutes,
                    format_start(&alert_at, self.tz)
                )
                .dimmed()
            ),
        ]
        .join("\n")
    }
}

impl Render for Player {
    fn render(&self) -> String {
        let number = self.number.as_deref().map(|n| format!("#{n} ")).unwrap_or_default();
        let position = self.position.as_deref().unwrap_or_default();
        let class_year = self
            .class_year
            .as_deref()
            .map(|c| format!(" · {c}"))
            .unwrap_or_default();
        let meta = format!("{number}{position}{class_year}");

        let stats = self
            .stats
            .columns()
            .iter()
            .map(|(label, value)| format!("{} {:.1}", label.dimmed(), value))
            .collect::<Vec<_>>()
            .join("  ");

        format!("{}  {}\n   {}", self.full_name.bold(), meta.trim().dimmed(), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn game(self_score: Option<u32>, opponent_score: Option<u32>) -> ScheduledGame {
        ScheduledGame {
            id: "401".to_string(),
            opponent_name: "Kentucky".to_string(),
            is_home: true,
            start_time: Utc.with_ymd_and_hms(2024, 1, 6, 19, 0, 0).unwrap(),
            venue: Some("O'Connell Center".to_string()),
            broadcast_channel: Some("ESPN".to_string()),
            status: "Sat, January 6th at 2:00 PM EST".to_string(),
            self_score,
            opponent_score,
            opponent_logo: None,
        }
    }

    #[test]
    fn start_in_configured_timezone() {
        let start = Utc.with_ymd_and_hms(2024, 1, 6, 19, 0, 0).unwrap();
        assert_eq!(
            format_start(&start, Some(chrono_tz::America::New_York)),
            "Sat Jan 6, 2:00 PM EST"
        );
    }

    #[test]
    fn unplayed_card_has_prediction() {
        let game = game(None, None);
        let card = GameCard { game: &game, rating: 1500.0, tz: Some(chrono_tz::UTC) }.render();

        assert!(card.contains("vs Kentucky"), "{card}");
        assert!(card.contains("[ESPN] [O'Connell Center]"), "{card}");
        assert!(card.contains("Prediction: 57% win"), "{card}");
    }

    #[test]
    fn finished_card_has_score_and_no_prediction() {
        let game = game(Some(80), Some(70));
        let card = GameCard { game: &game, rating: 1500.0, tz: Some(chrono_tz::UTC) }.render();

        assert!(card.contains("80-70"), "{card}");
        assert!(!card.contains("Prediction"), "{card}");
    }

    #[test]
    fn next_game_countdown() {
        let game = game(None, None);
        let now = Utc.with_ymd_and_hms(2024, 1, 4, 16, 30, 0).unwrap();
        let card = NextGameCard { game: Some(&game), now, tz: None, alarm_minutes: 60 }.render();

        assert!(card.contains("2d 2h 30m"), "{card}");
        assert!(card.contains("60-minute alert"), "{card}");
    }

    #[test]
    fn next_game_shows_when_the_alert_fires() {
        let game = game(None, None);
        let now = Utc.with_ymd_and_hms(2024, 1, 6, 12, 0, 0).unwrap();
        let card = NextGameCard {
            game: Some(&game),
            now,
            tz: Some(chrono_tz::America::New_York),
            alarm_minutes: 90,
        }
        .render();

        assert!(card.contains("Sat Jan 6, 2:00 PM EST"), "{card}");
        assert!(card.contains("90-minute alert (Sat Jan 6, 12:30 PM EST)"), "{card}");
    }

    #[test]
    fn no_next_game() {
        let card =
            NextGameCard { game: None, now: Utc::now(), tz: None, alarm_minutes: 60 }.render();
        assert!(card.contains("No upcoming games found."), "{card}");
    }

    #[test]
    fn player_line() {
        let player = Player {
            id: "1".to_string(),
            full_name: "Walter Clayton Jr.".to_string(),
            position: Some("G".to_string()),
            number: Some("1".to_string()),
            class_year: Some("Senior".to_string()),
            headshot: None,
            stats: crate::espn::PlayerStats { ppg: 17.25, ..Default::default() },
        };
        let rendered = player.render();

        assert!(rendered.contains("#1 G · Senior"), "{rendered}");
        assert!(rendered.contains("17.2") || rendered.contains("17.3"), "{rendered}");
    }
}
