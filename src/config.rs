use crate::error::{Result, SowPlanError};
use crate::logic::defaults::SubcategoryDefaults;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Plant dataset (JSON or YAML list of plant records)
    pub plants_file: Option<PathBuf>,
    pub schedule: ScheduleConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Used when hardening days cannot be resolved for an indoor plant
    pub fallback_hardening_days: u32,
    /// Fixed "today" for reproducible harvest-date checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Per-subcategory values layered over the built-in tables
    pub subcategories: HashMap<String, SubcategoryDefaults>,
}

impl Config {
    /// Load configuration. An explicit path must exist; otherwise the
    /// standard locations are searched and built-in defaults are used when
    /// nothing is found.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) if !p.exists() => {
                return Err(SowPlanError::Config(format!(
                    "Config file not found at {:?}",
                    p
                )));
            }
            Some(p) => p.to_path_buf(),
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using built-in defaults");
                    return Ok(Self::default().with_env_overrides());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SowPlanError::Config(format!("Failed to read config: {}", e)))?;

        Ok(Self::parse(&config_str)?.with_env_overrides())
    }

    /// Parse YAML after `${VAR}` substitution.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| SowPlanError::Config(format!("Failed to parse config: {}", e)))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("SOWPLAN_PLANTS") {
            if !path.trim().is_empty() {
                self.plants_file = Some(PathBuf::from(path));
            }
        }
        self
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        let xdg_config = Self::default_config_path().ok()?;
        xdg_config.exists().then_some(xdg_config)
    }

    /// Default path for writing new config files (~/.config/sowplan/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SowPlanError::Config("Cannot determine config directory".into()))?
            .join("sowplan");
        Ok(config_dir.join("config.yaml"))
    }

    /// Write a default config file and return where it went.
    pub fn write_default(path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut config = Self::default();
        config.plants_file = Some(PathBuf::from("${SOWPLAN_DATA}/plants.json"));
        let yaml = serde_yaml::to_string(&config)?;

        let content = format!(
            "# sowplan configuration\n# Generated by `sowplan init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;
        tracing::info!("Wrote default config to {}", config_path.display());
        Ok(config_path)
    }

    /// Plant dataset path: CLI flag first, then config (and its env override).
    pub fn plants_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.plants_file.clone())
            .ok_or_else(|| {
                SowPlanError::Config(
                    "No plant dataset configured. Pass --plants or set plants_file / SOWPLAN_PLANTS."
                        .into(),
                )
            })
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| SowPlanError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
