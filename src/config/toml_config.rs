use crate::config::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::{CardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub provider: ProviderConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    /// Load the configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse the configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the value of the environment variable. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Apply command line values on top of the file. Flags that were not
    /// given leave the file's value in place.
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(endpoint) = &cli.endpoint {
            self.provider.endpoint = Some(endpoint.clone());
        }
        if let Some(model) = &cli.model {
            self.provider.model = Some(model.clone());
        }
        if cli.temperature.is_some() {
            self.provider.temperature = cli.temperature;
        }
        if cli.max_tokens.is_some() {
            self.provider.max_tokens = cli.max_tokens;
        }
        if self.provider.api_key.is_none() {
            self.provider.api_key = cli.api_key.clone();
        }
        if let Some(path) = &cli.output_path {
            self.output = Some(OutputConfig { path: path.clone() });
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(key) = &self.provider.api_key {
            if let Some(var) = key.strip_prefix("${").and_then(|k| k.strip_suffix('}')) {
                return Err(CardError::MissingConfigError {
                    field: format!("provider.api_key (environment variable {} is not set)", var),
                });
            }
        }

        validation::validate_provider_settings(self)
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        self.provider.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.provider.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        self.provider.api_key.as_deref()
    }

    fn temperature(&self) -> Option<f32> {
        self.provider.temperature
    }

    fn max_tokens(&self) -> Option<u32> {
        self.provider.max_tokens
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[provider]
endpoint = "https://api.mistral.ai/v1"
model = "mistral-small"
temperature = 0.9
max_tokens = 400

[output]
path = "./cards"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.endpoint(), "https://api.mistral.ai/v1");
        assert_eq!(config.model(), "mistral-small");
        assert_eq!(config.temperature(), Some(0.9));
        assert_eq!(config.max_tokens(), Some(400));
        assert_eq!(config.output_path(), Some("./cards"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[provider]\n").unwrap();

        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert!(config.api_key().is_none());
        assert!(config.output_path().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CARD_FORGE_TOML_KEY", "sk-from-env");

        let toml_content = r#"
[provider]
api_key = "${CARD_FORGE_TOML_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), Some("sk-from-env"));
        assert!(config.validate().is_ok());

        std::env::remove_var("CARD_FORGE_TOML_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[provider]
api_key = "${CARD_FORGE_SURELY_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CardError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[provider]
endpoint = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[provider\nmodel = ").unwrap_err();
        assert!(matches!(err, CardError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[provider]
model = "file-model"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.model(), "file-model");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_file_values() {
        use clap::Parser;

        let mut config = TomlConfig::from_toml_str(
            r#"
[provider]
endpoint = "https://api.example.com/v1"
model = "file-model"
temperature = 0.2
"#,
        )
        .unwrap();
        let cli = crate::config::CliConfig::parse_from([
            "card-forge",
            "--model",
            "cli-model",
            "--output-path",
            "./out",
        ]);

        config.apply_overrides(&cli);

        assert_eq!(config.endpoint(), "https://api.example.com/v1");
        assert_eq!(config.model(), "cli-model");
        assert_eq!(config.temperature(), Some(0.2));
        assert_eq!(config.output_path(), Some("./out"));
    }
}
