use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use super::{RosterResponse, ScheduleResponse};

const BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball";

/// Client for one team's ESPN pages
pub struct EspnClient {
    http: reqwest::Client,
    league: String,
    team_id: u32,
}

impl EspnClient {
    pub fn new(league: &str, team_id: u32) -> Self {
        EspnClient {
            http: reqwest::Client::new(),
            league: league.to_string(),
            team_id,
        }
    }

    fn team_url(&self) -> String {
        format!("{}/{}/teams/{}", BASE_URL, self.league, self.team_id)
    }

    pub async fn schedule(&self) -> Result<ScheduleResponse> {
        self.get_json(&format!("{}/schedule", self.team_url())).await
    }

    pub async fn roster(&self) -> Result<RosterResponse> {
        self.get_json(&self.team_url()).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        info!(url, "fetching");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?
            .error_for_status()
            .with_context(|| format!("ESPN returned an error for {}", url))?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}
