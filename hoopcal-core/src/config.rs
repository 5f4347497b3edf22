//! Global hoopcal configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{HoopcalError, HoopcalResult};
use crate::ics::CalendarDocumentBuilder;

static DEFAULT_TEAM_NAME: &str = "Florida Gators";
static DEFAULT_LEAGUE: &str = "mens-college-basketball";
static DEFAULT_UID_NAMESPACE: &str = "gatorhoops";
static DEFAULT_PRODID: &str = "-//GatorHoops//EN";
static DEFAULT_ATTRIBUTION: &str = "Gator Hoops";
static DEFAULT_EXPORT_DIR: &str = ".";

fn default_team_name() -> String {
    DEFAULT_TEAM_NAME.to_string()
}

fn default_team_id() -> u32 {
    57
}

fn default_league() -> String {
    DEFAULT_LEAGUE.to_string()
}

fn default_uid_namespace() -> String {
    DEFAULT_UID_NAMESPACE.to_string()
}

fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}

fn default_attribution() -> String {
    DEFAULT_ATTRIBUTION.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn default_alarm_minutes() -> u32 {
    60
}

/// Global configuration at ~/.config/hoopcal/config.toml
///
/// Every key is optional. A missing file means the Florida Gators defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HoopcalConfig {
    #[serde(default = "default_team_name")]
    pub team_name: String,

    /// ESPN team id
    #[serde(default = "default_team_id")]
    pub team_id: u32,

    /// ESPN league slug, e.g. "womens-college-basketball"
    #[serde(default = "default_league")]
    pub league: String,

    /// Domain part of every calendar UID
    #[serde(default = "default_uid_namespace")]
    pub uid_namespace: String,

    #[serde(default = "default_prodid")]
    pub prodid: String,

    /// Name credited at the end of every event description
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Where exported .ics files go (~ is expanded)
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Alarm used when exporting only the next game
    #[serde(default = "default_alarm_minutes")]
    pub default_alarm_minutes: u32,

    /// IANA timezone for displaying tip-off times, local time if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for HoopcalConfig {
    fn default() -> Self {
        HoopcalConfig {
            team_name: default_team_name(),
            team_id: default_team_id(),
            league: default_league(),
            uid_namespace: default_uid_namespace(),
            prodid: default_prodid(),
            attribution: default_attribution(),
            export_dir: default_export_dir(),
            default_alarm_minutes: default_alarm_minutes(),
            timezone: None,
        }
    }
}

impl HoopcalConfig {
    pub fn config_path() -> HoopcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HoopcalError::Config("Could not determine config directory".into()))?
            .join("hoopcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from ~/.config/hoopcal/config.toml
    pub fn load() -> HoopcalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> HoopcalResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: HoopcalConfig = toml::from_str(&content).map_err(|e| {
            HoopcalError::Config(format!("Could not parse {}: {e}", path.display()))
        })?;

        // Surface a bad timezone at load time rather than on first render
        config.display_timezone()?;

        Ok(config)
    }

    /// Export directory with `~` and environment variables expanded
    pub fn export_dir(&self) -> HoopcalResult<PathBuf> {
        let raw = self.export_dir.to_string_lossy();
        let expanded = shellexpand::full(&raw)
            .map_err(|e| HoopcalError::Config(format!("Could not expand export_dir: {e}")))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }

    /// Parsed display timezone, `None` meaning the system's local time
    pub fn display_timezone(&self) -> HoopcalResult<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| HoopcalError::Config(format!("Unknown timezone '{name}'")))
            })
            .transpose()
    }

    /// Calendar builder carrying this team's naming
    pub fn calendar_builder(&self) -> CalendarDocumentBuilder {
        CalendarDocumentBuilder {
            team_name: self.team_name.clone(),
            uid_namespace: self.uid_namespace.clone(),
            prodid: self.prodid.clone(),
            attribution: self.attribution.clone(),
        }
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HoopcalResult<()> {
        let contents = format!(
            "\
# hoopcal configuration

# Team to follow (ESPN team id):
# team_name = \"{DEFAULT_TEAM_NAME}\"
# team_id = 57

# mens-college-basketball or womens-college-basketball:
# league = \"{DEFAULT_LEAGUE}\"

# Calendar export:
# uid_namespace = \"{DEFAULT_UID_NAMESPACE}\"
# export_dir = \"~/Downloads\"
# default_alarm_minutes = 60

# Show tip-off times in this timezone instead of local time:
# timezone = \"America/New_York\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HoopcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HoopcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
