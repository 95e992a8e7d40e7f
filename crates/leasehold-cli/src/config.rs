//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use leasehold_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration is saved to
    #[serde(skip)]
    location: Option<PathBuf>,
}

/// Credential profile: which provider, model and key to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Provider kind
    pub provider: ProviderKind,

    /// API base URL (provider default when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model identifier
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

/// Inference provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Hosted Messages-style API
    Messages,
    /// Local Ollama server
    Ollama,
}

impl ProviderKind {
    /// Name as written in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Messages => "messages",
            ProviderKind::Ollama => "ollama",
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory scanned by `process`
    pub source_dir: PathBuf,

    /// SQLite database holding extracted records
    pub database_path: PathBuf,

    /// Token limit requested from the model
    pub max_output_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,

    /// Timeout for one generation call (seconds)
    pub request_timeout_secs: u64,

    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(home_dir()?.join(".leasehold").join("config.toml"))
    }

    /// Load configuration from `path` (default location when `None`).
    ///
    /// A missing file yields the default configuration, bound to that path.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.location = Some(path);
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.location {
            Some(p) => p.clone(),
            None => Self::path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Whether the bound config file exists on disk.
    pub fn file_exists(&self) -> bool {
        self.location.as_ref().is_some_and(|p| p.exists())
    }

    /// Bind this configuration to a file.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Settings {
    /// Pipeline configuration derived from these settings.
    pub fn extractor_config(&self, fail_fast: bool) -> ExtractorConfig {
        ExtractorConfig {
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            request_timeout_secs: self.request_timeout_secs,
            fail_fast,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "default".to_string(),
            Profile {
                provider: ProviderKind::Messages,
                endpoint: None,
                model: leasehold_llm::messages::DEFAULT_MODEL.to_string(),
                api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            },
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            location: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = ExtractorConfig::default();
        let database_path = home_dir()
            .map(|home| home.join(".leasehold").join("leasehold.db"))
            .unwrap_or_else(|_| PathBuf::from("leasehold.db"));

        Self {
            source_dir: PathBuf::from("agreements"),
            database_path,
            max_output_tokens: defaults.max_output_tokens,
            temperature: defaults.temperature,
            request_timeout_secs: defaults.request_timeout_secs,
            color: true,
            format: OutputFormat::Table,
        }
    }
}

/// Environment variable read for the API key when a profile names none
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

fn default_profile() -> String {
    "default".to_string()
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(config.settings.max_output_tokens, 10_000);
        assert_eq!(config.settings.temperature, 0.5);
        assert_eq!(config.settings.request_timeout_secs, 300);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            provider: ProviderKind::Ollama,
            endpoint: Some("http://localhost:11434".to_string()),
            model: "llama3".to_string(),
            api_key_env: None,
        };

        config.set_profile("local".to_string(), profile);
        assert!(config.profiles.contains_key("local"));

        config.switch_profile("local".to_string()).unwrap();
        assert_eq!(config.active_profile, "local");
        assert_eq!(config.get_active_profile().unwrap().model, "llama3");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_file() {
        let toml_str = r#"
active_profile = "prod"

[profiles.prod]
provider = "messages"
model = "claude-3-haiku-20240307"
api_key_env = "PROD_KEY"

[settings]
source_dir = "/srv/agreements"
temperature = 0.2
format = "json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.provider, ProviderKind::Messages);
        assert_eq!(profile.api_key_env.as_deref(), Some("PROD_KEY"));
        assert!(profile.endpoint.is_none());
        assert_eq!(config.settings.source_dir, PathBuf::from("/srv/agreements"));
        assert_eq!(config.settings.temperature, 0.2);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.settings.max_output_tokens, 10_000);
    }

    #[test]
    fn test_extractor_config_from_settings() {
        let mut settings = Settings::default();
        settings.max_output_tokens = 4096;
        let config = settings.extractor_config(true);
        assert_eq!(config.max_output_tokens, 4096);
        assert_eq!(config.temperature, 0.5);
        assert!(config.fail_fast);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load(Some(&path)).unwrap();
        config.settings.source_dir = PathBuf::from("/tmp/agreements");
        config.save().unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.settings.source_dir, PathBuf::from("/tmp/agreements"));
        assert_eq!(loaded.profiles, config.profiles);
    }
}
