use anyhow::Context;
use clap::Parser;
use sibyl::utils::error::ErrorCategory;
use sibyl::utils::{logger, validation::Validate};
use sibyl::{CliConfig, CsvFeedbackSource, EngineConfig, Ingestor, RecommendationEngine, SibylError};

fn exit_code(error: &SibylError) -> i32 {
    match error.category() {
        ErrorCategory::Configuration => 1,
        ErrorCategory::Lookup => 2,
        ErrorCategory::NoSignal => 3,
        ErrorCategory::Input => 4,
        ErrorCategory::System => 5,
    }
}

fn fail(error: &SibylError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", error, error.category());
    tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code(error));
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => EngineConfig::default(),
    };
    let config = cli.merged_with(file_config);

    // Logging
    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting sibyl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // Validate configuration
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        fail(&e);
    }

    let source = match CsvFeedbackSource::from_config(&config) {
        Ok(source) => source,
        Err(e) => fail(&e),
    };

    let mut engine = RecommendationEngine::new();
    if let Err(e) = Ingestor::new(source).load_into(&mut engine) {
        fail(&e);
    }

    let query = cli.query(&config);
    match query.run(&engine) {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}
