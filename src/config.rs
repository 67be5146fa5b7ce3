use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_USER_CONFIG: &str = "artefact_config.yaml";
pub const DEFAULT_TOOL_CONFIG: &str = "tool_config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    /// User config listing the requested tools
    pub user_config: PathBuf,
    /// System tool catalog
    pub tool_config: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            user_config: PathBuf::from(DEFAULT_USER_CONFIG),
            tool_config: PathBuf::from(DEFAULT_TOOL_CONFIG),
        }
    }
}

/// What `Config::load` did, logged once the logger is installed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// File the config came from, `None` when defaults were used
    pub source: Option<PathBuf>,
    /// Implicit config files that exist but failed to load
    pub skipped: Vec<(PathBuf, String)>,
}

impl LoadReport {
    pub fn log(&self) {
        for (path, reason) in &self.skipped {
            log::warn!("Failed to load config from {}: {}", path.display(), reason);
        }
        match &self.source {
            Some(path) => log::info!("Loaded config from: {}", path.display()),
            None => log::info!("No config file found, using defaults"),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<(Self, LoadReport)> {
        let mut report = LoadReport::default();

        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            let config = Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            report.source = Some(path.clone());
            return Ok((config, report));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    report.source = Some(path);
                    return Ok((config, report));
                }
                Err(e) => report.skipped.push((path, format!("{:#}", e))),
            }
        }

        // No usable config file found, use defaults
        Ok((Self::default(), report))
    }

    /// Override the input paths with any given on the command line
    pub fn with_overrides(mut self, user_config: Option<&PathBuf>, tool_config: Option<&PathBuf>) -> Self {
        if let Some(path) = user_config {
            self.user_config = path.clone();
        }
        if let Some(path) = tool_config {
            self.tool_config = path.clone();
        }
        self
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }
}
