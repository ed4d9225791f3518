pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "card-forge")]
#[command(about = "Generate a Magic the Gathering style card with a language model")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// Environment variable holding the API key
    #[arg(long, default_value = "OPENAI_API_KEY")]
    pub api_key_env: String,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Start from this concept instead of generating one
    #[arg(long)]
    pub concept: Option<String>,

    /// Directory to save the generated card to as JSON
    #[arg(long)]
    pub output_path: Option<String>,

    /// Show the resolved settings and the first prompt without calling the API
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(skip)]
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Read the API key from the environment variable named by `--api-key-env`.
    pub fn load_api_key(&mut self) {
        self.api_key = std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_provider_settings(self)
    }
}
