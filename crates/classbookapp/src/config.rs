//! # Configuration
//!
//! Settings live in `config.json` inside a config directory chosen by the client
//! (the CLI uses the OS config dir from the `directories` crate). A missing file
//! means defaults; missing keys take their default too.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `latency` | `simulated` | `simulated` sleeps on every store call, `none` never does |
//! | `latency_scale` | `1.0` | Multiplier applied to the simulated delays, at most 100 |
//! | `upcoming_window_days` | `7` | How far ahead the dashboard looks for due work, at most 3650 |
//! | `upcoming_limit` | `5` | How many upcoming assignments the dashboard shows |
//! | `seed_path` | none | JSON snapshot to start from instead of the demo class |

use crate::commands::dashboard::UpcomingWindow;
use crate::error::{ClassbookError, Result};
use crate::store::{Classroom, Latency, NoLatency, Seed, SimulatedLatency, MAX_SCALE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CONFIG_FILENAME: &str = "config.json";

/// Longest dashboard look-ahead `set` accepts, about ten years.
pub const MAX_UPCOMING_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyMode {
    #[default]
    Simulated,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassbookConfig {
    pub latency: LatencyMode,
    pub latency_scale: f64,
    pub upcoming_window_days: i64,
    pub upcoming_limit: usize,
    pub seed_path: Option<PathBuf>,
}

impl Default for ClassbookConfig {
    fn default() -> Self {
        Self {
            latency: LatencyMode::Simulated,
            latency_scale: 1.0,
            upcoming_window_days: crate::aggregate::UPCOMING_WINDOW_DAYS,
            upcoming_limit: crate::aggregate::UPCOMING_LIMIT,
            seed_path: None,
        }
    }
}

pub const KEYS: [&str; 5] = [
    "latency",
    "latency_scale",
    "upcoming_window_days",
    "upcoming_limit",
    "seed_path",
];

fn invalid(key: &str, value: &str) -> ClassbookError {
    ClassbookError::Config(format!("Invalid value for {key}: {value}"))
}

impl ClassbookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ClassbookConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory, creating it when needed
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        tracing::info!(dir = %config_dir.display(), "saved config");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "latency" => match self.latency {
                LatencyMode::Simulated => "simulated".to_string(),
                LatencyMode::None => "none".to_string(),
            },
            "latency_scale" => self.latency_scale.to_string(),
            "upcoming_window_days" => self.upcoming_window_days.to_string(),
            "upcoming_limit" => self.upcoming_limit.to_string(),
            "seed_path" => self
                .seed_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            other => return Err(ClassbookError::Config(format!("Unknown key: {other}"))),
        };
        Ok(value)
    }

    /// Set one key from its text form. An empty `seed_path` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "latency" => {
                self.latency = match value.trim().to_ascii_lowercase().as_str() {
                    "simulated" => LatencyMode::Simulated,
                    "none" => LatencyMode::None,
                    _ => return Err(invalid(key, value)),
                }
            }
            "latency_scale" => {
                let scale: f64 = value.trim().parse().map_err(|_| invalid(key, value))?;
                if !scale.is_finite() || !(0.0..=MAX_SCALE).contains(&scale) {
                    return Err(invalid(key, value));
                }
                self.latency_scale = scale;
            }
            "upcoming_window_days" => {
                let days: i64 = value.trim().parse().map_err(|_| invalid(key, value))?;
                if !(0..=MAX_UPCOMING_WINDOW_DAYS).contains(&days) {
                    return Err(invalid(key, value));
                }
                self.upcoming_window_days = days;
            }
            "upcoming_limit" => {
                self.upcoming_limit = value.trim().parse().map_err(|_| invalid(key, value))?;
            }
            "seed_path" => {
                let trimmed = value.trim();
                self.seed_path = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            other => return Err(ClassbookError::Config(format!("Unknown key: {other}"))),
        }
        Ok(())
    }

    pub fn upcoming_window(&self) -> UpcomingWindow {
        UpcomingWindow {
            days: self.upcoming_window_days,
            limit: self.upcoming_limit,
        }
    }

    pub fn latency_source(&self) -> Arc<dyn Latency> {
        match self.latency {
            LatencyMode::Simulated => Arc::new(SimulatedLatency::scaled(self.latency_scale)),
            LatencyMode::None => Arc::new(NoLatency),
        }
    }

    /// The configured seed snapshot, or the demo class when none is set.
    pub fn seed(&self) -> Result<Seed> {
        match &self.seed_path {
            Some(path) => Seed::load(path),
            None => Seed::demo(),
        }
    }

    /// Build the classroom this configuration describes.
    pub fn classroom(&self) -> Result<Classroom> {
        Ok(Classroom::from_seed(self.seed()?, self.latency_source()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = ClassbookConfig::default();
        assert_eq!(config.latency, LatencyMode::Simulated);
        assert_eq!(config.latency_scale, 1.0);
        assert_eq!(config.upcoming_window(), UpcomingWindow::default());
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn load_missing_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ClassbookConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, ClassbookConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join("classbook");
        let mut config = ClassbookConfig::default();
        config.set("latency", "none").unwrap();
        config.set("upcoming_limit", "3").unwrap();
        config.save(&config_dir).unwrap();

        let loaded = ClassbookConfig::load(&config_dir).unwrap();
        assert_eq!(loaded.latency, LatencyMode::None);
        assert_eq!(loaded.upcoming_limit, 3);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"latency": "none"}"#).unwrap();
        let config = ClassbookConfig::load(dir.path()).unwrap();
        assert_eq!(config.latency, LatencyMode::None);
        assert_eq!(config.upcoming_window_days, 7);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ nope").unwrap();
        assert!(matches!(
            ClassbookConfig::load(dir.path()),
            Err(ClassbookError::Serialization(_))
        ));
    }

    #[test]
    fn set_rejects_bad_values_and_keys() {
        let mut config = ClassbookConfig::default();
        assert!(config.set("latency", "sometimes").is_err());
        assert!(config.set("latency_scale", "-1").is_err());
        assert!(config.set("upcoming_limit", "many").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert!(config.get("colour").is_err());
        assert_eq!(config, ClassbookConfig::default());
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let mut config = ClassbookConfig::default();
        assert!(config.set("latency_scale", "1e300").is_err());
        assert!(config.set("latency_scale", "100.5").is_err());
        assert!(config.set("upcoming_window_days", "9000000000000").is_err());
        assert!(config.set("upcoming_window_days", "3651").is_err());
        assert_eq!(config, ClassbookConfig::default());

        config.set("latency_scale", "100").unwrap();
        config.set("upcoming_window_days", "3650").unwrap();
    }

    #[tokio::test]
    async fn hand_edited_extremes_do_not_panic() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"latency_scale": 1e300, "upcoming_window_days": 9000000000000}"#,
        )
        .unwrap();
        let config = ClassbookConfig::load(dir.path()).unwrap();

        let delay =
            SimulatedLatency::scaled(config.latency_scale).delay_for(crate::store::Op::Get);
        assert_eq!(delay, std::time::Duration::from_millis(200).mul_f64(MAX_SCALE));

        let room = Classroom::instant(Seed::demo().unwrap());
        let now = chrono::DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let dashboard = crate::commands::dashboard::load(&room, now, config.upcoming_window())
            .await
            .unwrap();
        assert_eq!(dashboard.value.upcoming.len(), config.upcoming_limit);
    }

    #[test]
    fn every_key_can_be_read() {
        let mut config = ClassbookConfig::default();
        config.set("seed_path", "/tmp/class.json").unwrap();
        for key in KEYS {
            assert!(config.get(key).is_ok(), "{key}");
        }
        assert_eq!(config.get("seed_path").unwrap(), "/tmp/class.json");
        config.set("seed_path", "").unwrap();
        assert!(config.seed_path.is_none());
    }

    #[tokio::test]
    async fn classroom_from_default_config_holds_demo_class() {
        let mut config = ClassbookConfig::default();
        config.set("latency", "none").unwrap();
        let room = config.classroom().unwrap();
        assert!(!room.students.get_all().await.is_empty());
    }
}
