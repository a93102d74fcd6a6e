use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::campaign::store::DEFAULT_NAME_PREFIX;
use crate::core::campaign::wizard::{
    validate_step_config, StepId, StepPreset, WizardError, WizardStepDef,
};
use crate::core::publish::Environment;

const APP_DIR: &str = "referral-builder";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub builder: BuilderConfig,
    pub publish: PublishConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Campaign builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Named step layout, used unless `steps` is given.
    pub preset: StepPreset,
    /// Explicit step order, e.g. `["rewards", "how-it-looks", "summary"]`.
    pub steps: Option<Vec<StepId>>,
    /// Prefix for generated campaign names.
    pub name_prefix: String,
}

/// Publish simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Artificial delay per environment in milliseconds.
    pub delay_ms: u64,
    /// Environments targeted by the publish action.
    pub environments: Vec<Environment>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 50 }
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            preset: StepPreset::default(),
            steps: None,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            environments: vec![Environment::Staging, Environment::Production],
        }
    }
}

impl BuilderConfig {
    /// Resolved, validated step list.
    pub fn step_defs(&self) -> Result<Vec<WizardStepDef>, WizardError> {
        let steps: Vec<WizardStepDef> = match &self.steps {
            Some(ids) => ids.iter().copied().map(WizardStepDef::from).collect(),
            None => self.preset.steps(),
        };
        validate_step_config(&steps)?;
        Ok(steps)
    }
}

impl PublishConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/referral-builder/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_checked().0
    }

    /// Like [`AppConfig::load`], also returning why defaults replaced an
    /// existing file. Called before logging is up, so the caller reports it.
    pub fn load_checked() -> (Self, Option<String>) {
        Self::load_from_checked(&Self::config_path())
    }

    /// Load configuration from `config_path`, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        Self::load_from_checked(config_path).0
    }

    /// Load configuration from `config_path`. A missing file is not a
    /// warning; a file that fails to parse is.
    pub fn load_from_checked(config_path: &Path) -> (Self, Option<String>) {
        let Ok(contents) = std::fs::read_to_string(config_path) else {
            return (Self::default(), None);
        };
        match toml::from_str(&contents) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default(),
                Some(format!(
                    "Failed to parse config at {}: {e}, using defaults",
                    config_path.display()
                )),
            ),
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
