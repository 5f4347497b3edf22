use anyhow::Result;
use owo_colors::OwoColorize;

use super::Source;
use crate::render::Render;

pub async fn run(source: Source) -> Result<()> {
    let players = source.roster().await?;

    if players.is_empty() {
        println!("{}", "No players found.".dimmed());
        return Ok(());
    }

    for player in &players {
        println!("{}", player.render());
    }

    Ok(())
}
