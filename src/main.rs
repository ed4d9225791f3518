use card_forge::config::toml_config::TomlConfig;
use card_forge::core::{prompts, ConfigProvider};
use card_forge::utils::error::{ErrorSeverity, Result};
use card_forge::utils::{logger, validation::Validate};
use card_forge::{CardEngine, CardPipeline, CliConfig, LocalStorage, OpenAiCompatibleGenerator};
use clap::Parser;

#[tokio::main]
async fn main() {
    let mut cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting card-forge");
    cli.load_api_key();

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(mut config) => {
                    config.apply_overrides(&cli);
                    run(&config, &cli).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&cli, &cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Card generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: &C, cli: &CliConfig) -> Result<()> {
    config.validate()?;
    display_config_summary(config);

    if config.api_key().is_none() {
        tracing::warn!(
            "No API key found (checked {} and the config file); sending requests without one",
            cli.api_key_env
        );
    }

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no requests will be sent");
        let first_prompt = match cli.concept.as_deref() {
            Some(concept) => prompts::name_prompt(&card_forge::CardDescription::create(concept)?),
            None => prompts::concept_prompt(),
        };
        println!("First prompt:\n\n{}", first_prompt);
        return Ok(());
    }

    let pipeline = CardPipeline::new(OpenAiCompatibleGenerator::from_config(config));
    let mut engine: CardEngine<_, LocalStorage> = CardEngine::new(pipeline);
    if let Some(path) = config.output_path() {
        engine = engine.with_storage(
            LocalStorage::new(path.to_string()),
            Some(config.model().to_string()),
        );
    }

    let outcome = engine.run(cli.concept.as_deref()).await?;

    println!("{}", outcome.card);
    if let Some(saved_to) = outcome.saved_to {
        println!("📁 Card saved to: {}", saved_to);
    }

    Ok(())
}

fn display_config_summary<C: ConfigProvider>(config: &C) {
    tracing::info!("🔧 Endpoint: {}", config.endpoint());
    tracing::info!("🔧 Model: {}", config.model());
    if let Some(temperature) = config.temperature() {
        tracing::info!("🔧 Temperature: {}", temperature);
    }
    if let Some(max_tokens) = config.max_tokens() {
        tracing::info!("🔧 Max tokens: {}", max_tokens);
    }
    if let Some(path) = config.output_path() {
        tracing::info!("🔧 Output path: {}", path);
    }
}
