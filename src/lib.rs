pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::CsvFeedbackSource;
pub use config::EngineConfig;
pub use self::core::{
    engine::{EngineStats, RecommendationEngine},
    ingest::{apply_events, apply_rows, IngestSummary, Ingestor},
    query::{Query, QueryReport},
    sorted_set::SortedSet,
};
pub use domain::model::{Feedback, FeedbackEvent, Identifier, ItemRecord, ScoredItem, UserRecord};
pub use domain::ports::FeedbackSource;
pub use utils::error::{Result, SibylError};
