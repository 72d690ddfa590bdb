// Configuration loading and parsing (league.toml).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use benchcoach_core::insight::ActualPointsView;
use benchcoach_core::lineup::{Position, SlotType};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::report::OutputFormat;

/// Built-in league settings, used when no config file is found.
const DEFAULT_LEAGUE_TOML: &str = include_str!("../defaults/league.toml");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
    /// File the settings were read from; `None` for built-in defaults.
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub name: String,
    pub platform: String,
    pub num_teams: usize,
    /// Starting slot requirements in lineup display order.
    pub lineup: Vec<(SlotType, usize)>,
}

impl LeagueConfig {
    /// Number of starting slots the league requires.
    pub fn starting_slots(&self) -> usize {
        self.lineup.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub free_agent_count: usize,
    /// Empty means no filter.
    pub free_agent_positions: Vec<Position>,
    pub format: OutputFormat,
    pub actual_points: ActualPointsView,
}

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueSection,
    #[serde(default)]
    report: ReportSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
struct LeagueSection {
    name: String,
    #[serde(default)]
    platform: String,
    num_teams: usize,
    /// Signed so a negative count is reported as a validation error rather
    /// than a parse error.
    lineup: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ReportSection {
    free_agent_count: usize,
    free_agent_positions: Vec<String>,
    format: OutputFormat,
    actual_points: ActualPointsView,
}

impl Default for ReportSection {
    fn default() -> Self {
        ReportSection {
            free_agent_count: 5,
            free_agent_positions: Vec::new(),
            format: OutputFormat::Markdown,
            actual_points: ActualPointsView::Auto,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LoggingSection {
    #[serde(default)]
    filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the league config.
///
/// Search order: the explicit path (which must exist), `./config/league.toml`,
/// `league.toml` in the per-user config directory, then the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let local = std::env::current_dir()
        .map(|cwd| cwd.join("config").join("league.toml"))
        .ok();
    let candidates = local.into_iter().chain(user_config_path());

    for path in candidates {
        if path.is_file() {
            return load_config_file(&path);
        }
        debug!(path = %path.display(), "no config here");
    }

    default_config()
}

/// Per-user config location, e.g. `~/.config/benchcoach/league.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "benchcoach")
        .map(|dirs| dirs.config_dir().join("league.toml"))
}

/// Load and validate a specific league.toml.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    let mut config = parse_config(&text, path)?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// The built-in league settings.
pub fn default_config() -> Result<Config, ConfigError> {
    parse_config(DEFAULT_LEAGUE_TOML, Path::new("<built-in defaults>"))
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: LeagueFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(file)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: LeagueFile) -> Result<Config, ConfigError> {
    let league = file.league;

    if league.num_teams == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.num_teams".into(),
            message: "must be greater than 0".into(),
        });
    }

    let mut lineup: Vec<(SlotType, usize)> = Vec::new();
    for (key, count) in &league.lineup {
        let field = format!("league.lineup.{key}");
        let slot = SlotType::from_str_slot(key).ok_or_else(|| ConfigError::ValidationError {
            field: field.clone(),
            message: format!("unknown slot type `{key}`"),
        })?;
        if !slot.is_starting() {
            return Err(ConfigError::ValidationError {
                field,
                message: format!("{slot} is not a starting slot"),
            });
        }
        let count = usize::try_from(*count).map_err(|_| ConfigError::ValidationError {
            field: field.clone(),
            message: format!("must be >= 0, got {count}"),
        })?;
        if lineup.iter().any(|(existing, _)| *existing == slot) {
            return Err(ConfigError::ValidationError {
                field,
                message: format!("{slot} is listed more than once"),
            });
        }
        if count > 0 {
            lineup.push((slot, count));
        }
    }
    lineup.sort_by_key(|(slot, _)| slot.sort_order());

    let report = file.report;
    let mut positions = Vec::new();
    for raw in &report.free_agent_positions {
        let pos = Position::from_str_pos(raw).ok_or_else(|| ConfigError::ValidationError {
            field: "report.free_agent_positions".into(),
            message: format!("unknown position `{raw}`"),
        })?;
        if !positions.contains(&pos) {
            positions.push(pos);
        }
    }

    Ok(Config {
        league: LeagueConfig {
            name: league.name,
            platform: league.platform,
            num_teams: league.num_teams,
            lineup,
        },
        report: ReportConfig {
            free_agent_count: report.free_agent_count,
            free_agent_positions: positions,
            format: report.format,
            actual_points: report.actual_points,
        },
        logging: LoggingConfig {
            filter: file.logging.filter.filter(|f| !f.trim().is_empty()),
        },
        source: None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
