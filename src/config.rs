use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::constants::{
    self, DEFAULT_API_URL, DEFAULT_HISTORY_FILE, DEFAULT_LOG_DIR, DEFAULT_SESSION_FILE, DEFAULT_SUBMIT_PATH,
    ENV_API_TOKEN, ENV_API_URL, ENV_PRESET,
};
use crate::error::{PicksError, Result};
use crate::types::{Category, CategorySet};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub app: AppConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout unless set
    pub timeout_seconds: Option<u64>,
    /// Static bearer token; the session store takes precedence
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: None,
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preset: String,
    pub catalog_path: Option<String>,
    pub catalog_method: Option<HttpMethod>,
    pub submit_path: Option<String>,
    /// Replaces the preset's category set
    pub categories: Option<Vec<Category>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preset: constants::FLICK_PICK.to_string(),
            catalog_path: None,
            catalog_method: None,
            submit_path: None,
            categories: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub session_file: PathBuf,
    pub history_file: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
}

/// The two known apps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    FlickPick,
    StartBenchCut,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::FlickPick => constants::FLICK_PICK,
            Preset::StartBenchCut => constants::START_BENCH_CUT,
        }
    }

    fn default_categories(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Preset::FlickPick => constants::FLICK_PICK_CATEGORIES,
            Preset::StartBenchCut => constants::START_BENCH_CUT_CATEGORIES,
        }
    }

    fn default_catalog(self) -> (&'static str, HttpMethod) {
        match self {
            Preset::FlickPick => (constants::FLICK_PICK_CATALOG_PATH, HttpMethod::Get),
            // The player list is generated server side on a POST
            Preset::StartBenchCut => (constants::START_BENCH_CUT_CATALOG_PATH, HttpMethod::Post),
        }
    }
}

impl FromStr for Preset {
    type Err = PicksError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            constants::FLICK_PICK | "flickpick" | "movies" => Ok(Preset::FlickPick),
            constants::START_BENCH_CUT | "startbenchcut" | "players" => Ok(Preset::StartBenchCut),
            other => Err(PicksError::Config(format!(
                "unknown preset '{}', expected one of: {}",
                other,
                constants::get_supported_presets().join(", ")
            ))),
        }
    }
}

/// Fully resolved settings for one app
#[derive(Debug, Clone)]
pub struct AppProfile {
    pub preset: Preset,
    pub categories: CategorySet,
    pub catalog_path: String,
    pub catalog_method: HttpMethod,
    pub submit_path: String,
}

impl Config {
    /// Loads `pickset.toml` from the working directory, or defaults when absent
    pub fn load() -> Result<Self> {
        let path = Path::new(constants::CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            debug!("No {} found, using defaults", constants::CONFIG_FILE);
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path)
            .map_err(|e| PicksError::Config(format!("Failed to read config file '{}': {}", path.display(), e)))?;
        Self::parse(&config_content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api.token = Some(token);
        }
        if let Some(preset) = lookup(ENV_PRESET) {
            self.app.preset = preset;
        }
    }

    /// Resolves the configured preset plus any per-field overrides
    pub fn app_profile(&self) -> Result<AppProfile> {
        let preset: Preset = self.app.preset.parse()?;
        let categories = match &self.app.categories {
            Some(custom) => CategorySet::new(custom.clone())?,
            None => CategorySet::from_pairs(preset.default_categories())?,
        };
        let (default_path, default_method) = preset.default_catalog();

        Ok(AppProfile {
            preset,
            categories,
            catalog_path: self.app.catalog_path.clone().unwrap_or_else(|| default_path.to_string()),
            catalog_method: self.app.catalog_method.unwrap_or(default_method),
            submit_path: self.app.submit_path.clone().unwrap_or_else(|| DEFAULT_SUBMIT_PATH.to_string()),
        })
    }
}
