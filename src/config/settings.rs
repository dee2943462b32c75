use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_max_interval_days() -> i64 {
    3660
}

/// How a habit stored as "weekly" recurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeeklyRule {
    /// Due only during the calendar week of the start date.
    #[default]
    StartWeek,
    /// Due every week on the start date's weekday.
    EveryWeek,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecurrenceConfig {
    #[serde(default)]
    pub weekly_rule: WeeklyRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Longest interval, in days, handed to streak and aggregation calls.
    #[serde(default = "default_max_interval_days")]
    pub max_interval_days: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_interval_days: default_max_interval_days(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Defaults to `snapshot.json` in the data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub recurrence: RecurrenceConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "cadence")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn snapshot_path(&self) -> Result<PathBuf> {
        match &self.snapshot.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("snapshot.json")),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.recurrence.weekly_rule, WeeklyRule::StartWeek);
        assert_eq!(config.limits.max_interval_days, 3660);
        assert!(config.snapshot.path.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[recurrence]
weekly_rule = "every_week"
"#,
        )
        .unwrap();
        assert_eq!(config.recurrence.weekly_rule, WeeklyRule::EveryWeek);
        assert_eq!(config.limits.max_interval_days, 3660);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.limits.max_interval_days = 90;
        config.snapshot.path = Some(dir.path().join("snap.json"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.limits.max_interval_days, 90);
        assert_eq!(loaded.snapshot_path().unwrap(), dir.path().join("snap.json"));
    }
}
