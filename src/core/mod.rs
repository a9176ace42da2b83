pub mod engine;
pub mod ingest;
pub mod query;
pub mod sorted_set;

pub use crate::domain::model::{Feedback, FeedbackEvent, Identifier, ScoredItem};
pub use crate::domain::ports::FeedbackSource;
pub use crate::utils::error::Result;
