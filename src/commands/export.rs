use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use hoopcal_core::config::HoopcalConfig;
use hoopcal_core::ics::{CalendarDocument, SCHEDULE_FILENAME};
use hoopcal_core::links::GOOGLE_IMPORT_URL;
use hoopcal_core::schedule::next_game;
use owo_colors::OwoColorize;
use tracing::info;

use super::{find_game, Source};
use crate::espn::ScheduledGame;

/// Which games end up in the exported file
pub enum Selection {
    All,
    Game(String),
    Next,
}

pub struct ExportOptions {
    pub selection: Selection,
    pub alarm_minutes: Option<u32>,
    pub output: Option<PathBuf>,
    pub open_import: bool,
}

pub async fn run(source: Source, config: &HoopcalConfig, options: ExportOptions) -> Result<()> {
    let games = source.schedule().await?;
    let (document, filename) = build(&games, config, &options.selection, options.alarm_minutes)?;

    let path = match options.output {
        Some(path) => path,
        None => config.export_dir()?.join(filename),
    };
    write_document(&document, &path)?;

    println!(
        "{} {} {}",
        "Saved".green(),
        pluralize_events(document.events.len()),
        path.display()
    );

    if options.open_import {
        println!("Opening Google Calendar import: {}", GOOGLE_IMPORT_URL.dimmed());
        open::that(GOOGLE_IMPORT_URL).context("Failed to open browser")?;
    }

    Ok(())
}

/// Build the document for `selection`, plus the filename to save it under
fn build(
    games: &[ScheduledGame],
    config: &HoopcalConfig,
    selection: &Selection,
    alarm_minutes: Option<u32>,
) -> Result<(CalendarDocument, String)> {
    let builder = config.calendar_builder();

    match selection {
        Selection::All => {
            if games.is_empty() {
                anyhow::bail!("No games on the schedule to export");
            }
            let records: Vec<_> = games.iter().map(ScheduledGame::record).collect();
            Ok((builder.build_document(&records, alarm_minutes), SCHEDULE_FILENAME.to_string()))
        }
        Selection::Game(id) => {
            let record = find_game(games, id)?.record();
            let document = builder.build_single(&record, alarm_minutes);
            let filename = document.events[0].suggested_filename();
            Ok((document, filename))
        }
        Selection::Next => {
            let records: Vec<_> = games.iter().map(ScheduledGame::record).collect();
            let Some(record) = next_game(&records, Utc::now()) else {
                anyhow::bail!("No upcoming games found");
            };
            // The next game always gets an alert
            let alarm = alarm_minutes.unwrap_or(config.default_alarm_minutes);
            let document = builder.build_single(record, Some(alarm));
            let filename = document.events[0].suggested_filename();
            Ok((document, filename))
        }
    }
}

fn write_document(document: &CalendarDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, document.to_ics())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), events = document.events.len(), "exported calendar");
    Ok(())
}

fn pluralize_events(count: usize) -> String {
    if count == 1 {
        "1 game to".to_string()
    } else {
        format!("{count} games to")
    }
}
