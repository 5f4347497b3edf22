use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use hoopcal_core::rating::{compute_rating, predict_win_probability};
use hoopcal_core::schedule::next_game;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::Source;
use crate::espn::ScheduledGame;
use crate::render::{GameCard, NextGameCard, Render};

#[derive(Serialize)]
struct ScheduleReport<'a> {
    rating: f64,
    games: Vec<GameReport<'a>>,
}

#[derive(Serialize)]
struct GameReport<'a> {
    #[serde(flatten)]
    game: &'a ScheduledGame,
    /// Only for games that have not been played
    win_probability: Option<f64>,
}

/// Rating from every completed game, oldest first
pub fn team_rating(games: &[ScheduledGame]) -> f64 {
    let history: Vec<_> = games.iter().map(ScheduledGame::result).collect();
    compute_rating(&history)
}

pub async fn run(source: Source, tz: Option<Tz>, alarm_minutes: u32, json: bool) -> Result<()> {
    let games = source.schedule().await?;
    let rating = team_rating(&games);

    if json {
        let report = ScheduleReport {
            rating,
            games: games
                .iter()
                .map(|game| GameReport {
                    game,
                    win_probability: (!game.is_completed())
                        .then(|| predict_win_probability(rating, game.is_home)),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let records: Vec<_> = games.iter().map(ScheduledGame::record).collect();
    let now = Utc::now();
    let next = next_game(&records, now).and_then(|r| games.iter().find(|g| g.id == r.id));

    println!(
        "{}",
        NextGameCard {
            game: next,
            now,
            tz,
            alarm_minutes,
        }
        .render()
    );
    println!();

    if games.is_empty() {
        println!("{}", "No games found".dimmed());
        return Ok(());
    }

    println!("{} {:.0}", "Team rating:".dimmed(), rating);
    println!();

    for game in &games {
        println!("{}", GameCard { game, rating, tz }.render());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn game(id: &str, self_score: Option<u32>, opponent_score: Option<u32>) -> ScheduledGame {
        ScheduledGame {
            id: id.to_string(),
            opponent_name: "Opponent".to_string(),
            is_home: true,
            start_time: Utc.with_ymd_and_hms(2024, 1, 6, 19, 0, 0).unwrap(),
            venue: None,
            broadcast_channel: None,
            status: "Scheduled".to_string(),
            self_score,
            opponent_score,
            opponent_logo: None,
        }
    }

    #[test]
    fn rating_ignores_unplayed_games() {
        let games = vec![
            game("1", Some(80), Some(70)),
            game("2", None, None),
            game("3", Some(60), Some(65)),
        ];
        assert!((team_rating(&games) - 1502.2154).abs() < 1e-3);
    }
}
