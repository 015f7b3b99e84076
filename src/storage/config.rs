//! User profile and application configuration.

use crate::templates::{ExperienceLevel, Goal, RecommendationInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Unit system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kilograms
    #[default]
    Metric,
    /// Pounds
    Imperial,
}

impl Units {
    /// Stable key used in storage.
    pub fn key(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Parse a storage key, falling back to metric.
    pub fn from_key(key: &str) -> Self {
        match key {
            "imperial" => Units::Imperial,
            _ => Units::Metric,
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Metric => write!(f, "Metric"),
            Units::Imperial => write!(f, "Imperial"),
        }
    }
}

/// User profile with the attributes used to pick a starter routine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Training goal
    pub goal: Goal,
    /// Training experience
    pub experience: ExperienceLevel,
    /// Days per week available for training (1-7)
    pub days_per_week: u8,
    /// Unit preference
    pub units: Units,
    /// Whether the first-run flow has been completed or skipped
    pub onboarding_complete: bool,
    /// Profile creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: "Athlete".to_string(),
            goal: Goal::GeneralFitness,
            experience: ExperienceLevel::Beginner,
            days_per_week: 3,
            units: Units::Metric,
            onboarding_complete: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UserProfile {
    /// Create a new user profile with the given name.
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Update the weekly schedule.
    pub fn set_days_per_week(&mut self, days: u8) -> Result<(), &'static str> {
        if !Self::validate_days(days) {
            return Err("Days per week must be between 1 and 7");
        }

        self.days_per_week = days;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Validate days per week (1-7).
    pub fn validate_days(days: u8) -> bool {
        (1..=7).contains(&days)
    }

    /// Recommendation input derived from this profile.
    pub fn recommendation_input(&self) -> RecommendationInput {
        RecommendationInput::new(self.days_per_week, self.goal, self.experience)
    }

    /// Convert a weight to the user's preferred units.
    pub fn display_weight(&self, weight_kg: f32) -> (f32, &'static str) {
        match self.units {
            Units::Metric => (weight_kg, "kg"),
            Units::Imperial => (weight_kg * 2.20462, "lbs"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Workout session settings
    #[serde(default)]
    pub session: SessionSettings,
    /// Default unit preference for new profiles
    #[serde(default)]
    pub units: Units,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            session: SessionSettings::default(),
            units: Units::Metric,
        }
    }
}

impl AppConfig {
    /// Path of the SQLite database inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("ironlog.db")
    }
}

/// Workout session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Rest period seeded into new routines, in seconds
    pub default_rest_seconds: u32,
    /// Cache the active workout after every change
    pub autosave: bool,
    /// Smallest weight step offered when adjusting a set
    pub weight_increment_kg: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_rest_seconds: 90,
            autosave: true,
            weight_increment_kg: 2.5,
        }
    }
}

impl SessionSettings {
    /// Round a weight to the nearest loadable increment.
    pub fn round_weight(&self, weight_kg: f32) -> f32 {
        if self.weight_increment_kg <= 0.0 {
            return weight_kg.max(0.0);
        }
        ((weight_kg / self.weight_increment_kg).round() * self.weight_increment_kg).max(0.0)
    }

    /// Move a weight up or down by whole increments.
    pub fn step_weight(&self, weight_kg: f32, steps: i32) -> f32 {
        self.round_weight(weight_kg + steps as f32 * self.weight_increment_kg)
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "ironlog", "IronLog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load application configuration from a file, using defaults when it is missing.
///
/// The data directory is set to the file's parent directory.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let data_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if !path.exists() {
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save application configuration to a file.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    tracing::debug!("Saved configuration to {}", path.display());
    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
