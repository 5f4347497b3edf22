use anyhow::Result;
use hoopcal_core::config::HoopcalConfig;
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let config_path = HoopcalConfig::config_path()?;

    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            HoopcalConfig::create_default_config(&config_path)?;
            println!("{} {}", "Created".green(), config_path.display());
        }
        return Ok(());
    }

    let config = HoopcalConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Export:  {}", config.export_dir()?.display());
    println!();
    println!("{}", "Team".bold());
    println!("  {} (ESPN id {})", config.team_name, config.team_id);
    println!("  League:  {}", config.league);

    Ok(())
}
