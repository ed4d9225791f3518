pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::llm::OpenAiCompatibleGenerator;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use self::core::{
    engine::{CardEngine, GenerationOutcome},
    pipeline::{CardPipeline, GENERATION_ORDER},
};
pub use domain::model::{CardDescription, CardField};
pub use domain::ports::TextGenerator;
pub use utils::error::{CardError, Result};
