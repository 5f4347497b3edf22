use anyhow::Result;
use hoopcal_core::ics::CalendarDocumentBuilder;
use owo_colors::OwoColorize;

use super::{find_game, Source};

pub async fn run(source: Source, builder: &CalendarDocumentBuilder, game_id: &str) -> Result<()> {
    let games = source.schedule().await?;
    let game = find_game(&games, game_id)?.record();

    println!("{}", builder.title(&game).bold());
    for (provider, link) in builder.build_external_links(&game) {
        println!("  {}", provider.to_string().dimmed());
        println!("  {}", link);
    }

    Ok(())
}
