use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::{ Path, PathBuf };
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),
}

/// Providers we know how to talk to, paired with the environment variable
/// that holds their key. Order is the lookup order.
pub const PROVIDER_ENV_VARS: &[(&str, &str)] = &[
    ("anthropic", "ANTHROPIC_API_KEY"),
    ("openai", "OPENAI_API_KEY"),
];

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExplainerConfig {
    /// Preferred provider ("anthropic" or "openai")
    pub provider: String,

    /// API key for the explanation service. Falls back to the provider
    /// environment variables when unset.
    pub api_key: Option<String>,

    /// Override for the provider endpoint
    pub api_endpoint: Option<String>,

    /// Override for the provider model
    pub model: Option<String>,

    /// Hard upper bound on one explanation call, in seconds
    pub timeout_secs: u64,

    pub max_tokens: usize,

    pub temperature: f32,
}

impl ExplainerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the API key, checking environment variables if not in config.
    /// If the preferred provider has no key, the other known providers are tried.
    pub fn get_api_key(&self) -> Result<(String, String), ConfigError> {
        use log::{ debug, info };

        if let Some(api_key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from config");
            return Ok((self.provider.to_lowercase(), api_key.clone()));
        }

        let preferred = self.provider.to_lowercase();
        let ordered = PROVIDER_ENV_VARS.iter()
            .filter(|(provider, _)| *provider == preferred)
            .chain(PROVIDER_ENV_VARS.iter().filter(|(provider, _)| *provider != preferred));

        for (provider, env_var) in ordered {
            match std::env::var(env_var) {
                Ok(key) if !key.trim().is_empty() => {
                    if *provider == preferred {
                        info!("Using preferred provider: {}", provider);
                    } else {
                        info!("Using alternative provider: {} (preferred was {})", provider, preferred);
                    }
                    return Ok((provider.to_string(), key));
                }
                _ => debug!("Provider {} not available", provider),
            }
        }

        Err(ConfigError::MissingApiKey("No API keys found for any provider".to_string()))
    }
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        ExplainerConfig {
            provider: "anthropic".to_string(),
            api_key: None,
            api_endpoint: None,
            model: None,
            timeout_secs: 10,
            max_tokens: 300,
            temperature: 0.2,
        }
    }
}

/// Top-level configuration, usually loaded from a YAML file
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DocCompareConfig {
    /// Document root. Sample deals and templates live underneath it.
    pub data_dir: PathBuf,

    pub sample_deals_dir: String,

    pub templates_dir: String,

    pub default_template: String,

    /// Portfolio file; relative paths are taken from `data_dir`
    pub portfolio_file: PathBuf,

    /// Set to false to force the deterministic explanation path even when a
    /// key is present
    pub ai_explanations: bool,

    pub explainer: ExplainerConfig,
}

impl DocCompareConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: DocCompareConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn samples_path(&self) -> PathBuf {
        self.data_dir.join(&self.sample_deals_dir)
    }

    pub fn templates_path(&self) -> PathBuf {
        self.data_dir.join(&self.templates_dir)
    }

    pub fn portfolio_path(&self) -> PathBuf {
        if self.portfolio_file.is_absolute() {
            self.portfolio_file.clone()
        } else {
            self.data_dir.join(&self.portfolio_file)
        }
    }
}

impl Default for DocCompareConfig {
    fn default() -> Self {
        DocCompareConfig {
            data_dir: PathBuf::from("data"),
            sample_deals_dir: "sample_deals".to_string(),
            templates_dir: "templates".to_string(),
            default_template: "LMA_Leveraged_2023.txt".to_string(),
            portfolio_file: PathBuf::from("portfolio.json"),
            ai_explanations: true,
            explainer: ExplainerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_dir: /srv/deals\nai_explanations: false").unwrap();

        let config = DocCompareConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/deals"));
        assert!(!config.ai_explanations);
        assert_eq!(config.sample_deals_dir, "sample_deals");
        assert_eq!(config.samples_path(), PathBuf::from("/srv/deals/sample_deals"));
        assert_eq!(config.portfolio_path(), PathBuf::from("/srv/deals/portfolio.json"));
    }

    #[test]
    fn test_config_key_wins_over_environment() {
        let config = ExplainerConfig {
            api_key: Some("sk-from-config".to_string()),
            provider: "OpenAI".to_string(),
            ..ExplainerConfig::default()
        };
        let (provider, key) = config.get_api_key().unwrap();
        assert_eq!(provider, "openai");
        assert_eq!(key, "sk-from-config");
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_dir: [unterminated").unwrap();
        assert!(matches!(DocCompareConfig::from_file(file.path()), Err(ConfigError::ParseError(_))));
    }
}
