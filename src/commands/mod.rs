pub mod config;
pub mod export;
pub mod links;
pub mod roster;
pub mod schedule;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::espn::{parse_roster, parse_schedule, EspnClient, Player, ScheduledGame};
use crate::utils::tui::create_spinner;

/// Where schedule and roster data come from: ESPN, or a saved response
pub struct Source {
    pub league: String,
    pub team_id: u32,
    pub input: Option<PathBuf>,
}

impl Source {
    fn client(&self) -> EspnClient {
        EspnClient::new(&self.league, self.team_id)
    }

    pub async fn schedule(&self) -> Result<Vec<ScheduledGame>> {
        let response = match &self.input {
            Some(path) => read_json(path)?,
            None => {
                let spinner = create_spinner("Loading schedule".to_string());
                let result = self.client().schedule().await;
                spinner.finish_and_clear();
                result?
            }
        };

        let games = parse_schedule(response, self.team_id);
        tracing::info!(games = games.len(), "schedule loaded");
        Ok(games)
    }

    pub async fn roster(&self) -> Result<Vec<Player>> {
        let response = match &self.input {
            Some(path) => read_json(path)?,
            None => {
                let spinner = create_spinner("Loading roster".to_string());
                let result = self.client().roster().await;
                spinner.finish_and_clear();
                result?
            }
        };

        Ok(parse_roster(response))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Find a game by ESPN id, listing the known ids if it is missing
pub fn find_game<'a>(games: &'a [ScheduledGame], id: &str) -> Result<&'a ScheduledGame> {
    match games.iter().find(|g| g.id == id) {
        Some(game) => Ok(game),
        None => {
            let available: Vec<_> = games.iter().map(|g| g.id.as_str()).collect();
            anyhow::bail!("Game '{}' not found. Available: {}", id, available.join(", "));
        }
    }
}
