use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_ENV: &str = "PG_CONFIG";
pub const API_URL_ENV: &str = "PG_AI_API";
pub const API_KEY_ENV: &str = "PG_AI_KEY";
pub const MODEL_ENV: &str = "PG_AI_MODEL";
pub const TIMEOUT_ENV: &str = "PG_TIMEOUT";

/// `[services]` table of the config file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServicesSection {
    pub ai_api: Option<String>,
    pub ai_key: Option<String>,
    pub ai_model: Option<String>,
    pub timeout: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    services: Option<ServicesSection>,
}

/// Connection settings for the generation endpoint.
///
/// Built once and handed to [`crate::generation::TextGenerator::new`]; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Whole-request timeout. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl ServicesConfig {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Values passed on the command line. They win over env and file.
#[derive(Debug, Clone, Default)]
pub struct ServiceOverrides {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Partially resolved settings after merging file, env and CLI values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSettings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ServiceSettings {
    pub fn api_url(&self) -> Result<&str, String> {
        self.api_url.as_deref().ok_or_else(|| {
            format!(
                "No API URL provided. Use --api-url, set {API_URL_ENV} or add services.ai_api to the config file."
            )
        })
    }

    pub fn model(&self) -> Result<&str, String> {
        self.model.as_deref().ok_or_else(|| {
            format!(
                "No model provided. Use --model, set {MODEL_ENV} or add services.ai_model to the config file."
            )
        })
    }

    pub fn api_key_present(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn into_config(self) -> Result<ServicesConfig, String> {
        let api_url = self.api_url()?.to_string();
        let model = self.model()?.to_string();
        let api_key = self.api_key.ok_or_else(|| {
            format!("No API key provided. Set {API_KEY_ENV} or add services.ai_key to the config file.")
        })?;

        Ok(ServicesConfig {
            api_url,
            api_key,
            model,
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Resolves settings from the config file, the process environment and
/// `overrides`, in increasing order of priority.
pub fn resolve_settings(overrides: &ServiceOverrides) -> Result<ServiceSettings, String> {
    let section = load_config_file()?
        .and_then(|(_, config)| config.services)
        .unwrap_or_default();
    merge_settings(section, |name| env::var(name).ok(), overrides)
}

pub fn merge_settings<F>(
    section: ServicesSection,
    lookup: F,
    overrides: &ServiceOverrides,
) -> Result<ServiceSettings, String>
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = |name: &str| non_empty(lookup(name));

    let env_timeout = match from_env(TIMEOUT_ENV) {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            format!("Invalid {TIMEOUT_ENV} '{raw}'. Expected a whole number of seconds.")
        })?),
        None => None,
    };

    Ok(ServiceSettings {
        api_url: non_empty(overrides.api_url.clone())
            .or_else(|| from_env(API_URL_ENV))
            .or_else(|| non_empty(section.ai_api)),
        api_key: from_env(API_KEY_ENV).or_else(|| non_empty(section.ai_key)),
        model: non_empty(overrides.model.clone())
            .or_else(|| from_env(MODEL_ENV))
            .or_else(|| non_empty(section.ai_model)),
        timeout_secs: overrides.timeout_secs.or(env_timeout).or(section.timeout),
    })
}

/// Checks that file and environment together yield a complete
/// [`ServicesConfig`].
///
/// Returns the config file that was read, or `None` when every value came
/// from the environment.
pub fn validate_config() -> Result<Option<PathBuf>, String> {
    let loaded = load_config_file()?;
    let (path, section) = match loaded {
        Some((path, config)) => (Some(path), config.services.unwrap_or_default()),
        None => (None, ServicesSection::default()),
    };
    merge_settings(section, |name| env::var(name).ok(), &ServiceOverrides::default())?
        .into_config()?;
    Ok(path)
}

fn load_config_file() -> Result<Option<(PathBuf, ConfigFile)>, String> {
    let explicit = explicit_config_path();
    let path = match explicit.clone().or_else(default_config_path) {
        Some(path) => path,
        None => return Ok(None),
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        // Only a file named through PG_CONFIG is mandatory.
        Err(err) if explicit.is_none() && err.kind() == io::ErrorKind::NotFound => {
            return Ok(None);
        }
        Err(err) => {
            return Err(format!(
                "Failed to read config file '{}': {err}",
                path.display()
            ));
        }
    };

    let config = parse_config(&raw, &path)?;
    Ok(Some((path, config)))
}

fn parse_config(raw: &str, path: &Path) -> Result<ConfigFile, String> {
    toml::from_str(raw)
        .map_err(|err| format!("Failed to parse config file '{}': {err}", path.display()))
}

pub fn config_path() -> Result<PathBuf, String> {
    explicit_config_path()
        .or_else(default_config_path)
        .ok_or_else(|| {
            format!("Cannot resolve config path: set {CONFIG_ENV} or HOME/XDG_CONFIG_HOME.")
        })
}

fn explicit_config_path() -> Option<PathBuf> {
    non_empty(env::var(CONFIG_ENV).ok()).map(PathBuf::from)
}

fn default_config_path() -> Option<PathBuf> {
    if let Some(xdg) = non_empty(env::var("XDG_CONFIG_HOME").ok()) {
        return Some(PathBuf::from(xdg).join("prodgen").join("config.toml"));
    }

    non_empty(env::var("HOME").ok()).map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("prodgen")
            .join("config.toml")
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
