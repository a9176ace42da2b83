use crate::config::toml_config::{EngineConfig, LoggingConfig, SuggestConfig};
use crate::core::query::Query;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sibyl")]
#[command(about = "Collaborative filtering over like/dislike feedback")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Feedback file with user,item,action rows
    #[arg(short, long)]
    pub input: Option<String>,

    /// Field delimiter of the feedback file
    #[arg(long)]
    pub delimiter: Option<String>,

    /// The feedback file has no header row
    #[arg(long)]
    pub no_headers: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print results (and logs) as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Signed agreement between two users
    Similarity { user_a: String, user_b: String },
    /// Predicted score of an item for a user
    Predict { user: String, item: String },
    /// Unrated items ranked best first
    Suggest {
        user: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Size of the loaded relation
    Stats,
}

impl CliConfig {
    /// Layers command-line flags over a file configuration.
    pub fn merged_with(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(input) = &self.input {
            config.ingest.path = Some(input.clone());
        }
        if let Some(delimiter) = &self.delimiter {
            config.ingest.delimiter = Some(delimiter.clone());
        }
        if self.no_headers {
            config.ingest.has_headers = Some(false);
        }
        if let Command::Suggest {
            limit: Some(limit), ..
        } = &self.command
        {
            config.suggest.get_or_insert_with(SuggestConfig::default).limit = Some(*limit);
        }
        if self.json {
            config.logging.get_or_insert_with(LoggingConfig::default).json = Some(true);
        }
        config
    }

    /// The query to run, with the effective suggestion limit applied.
    pub fn query(&self, config: &EngineConfig) -> Query {
        match &self.command {
            Command::Similarity { user_a, user_b } => Query::Similarity {
                user_a: user_a.clone(),
                user_b: user_b.clone(),
            },
            Command::Predict { user, item } => Query::Prediction {
                user: user.clone(),
                item: item.clone(),
            },
            Command::Suggest { user, limit } => Query::Suggestion {
                user: user.clone(),
                limit: limit.or(config.suggestion_limit()),
            },
            Command::Stats => Query::Stats,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            validation::validate_path("config", config)?;
        }
        if let Some(input) = &self.input {
            validation::validate_path("input", input)?;
        }
        if let Some(delimiter) = &self.delimiter {
            validation::validate_delimiter("delimiter", delimiter)?;
        }

        match &self.command {
            Command::Similarity { user_a, user_b } => {
                validation::validate_identifier("user_a", user_a.as_str())?;
                validation::validate_identifier("user_b", user_b.as_str())?;
            }
            Command::Predict { user, item } => {
                validation::validate_identifier("user", user.as_str())?;
                validation::validate_identifier("item", item.as_str())?;
            }
            Command::Suggest { user, limit } => {
                validation::validate_identifier("user", user.as_str())?;
                if let Some(limit) = limit {
                    validation::validate_positive_number("limit", *limit, 1)?;
                }
            }
            Command::Stats => {}
        }

        Ok(())
    }
}
