use crate::core::engine::{EngineStats, RecommendationEngine};
use crate::core::ScoredItem;
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;

/// A read-only question asked of an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Similarity { user_a: String, user_b: String },
    Prediction { user: String, item: String },
    Suggestion { user: String, limit: Option<usize> },
    Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryReport {
    Similarity {
        user_a: String,
        user_b: String,
        score: f64,
    },
    Prediction {
        user: String,
        item: String,
        score: f64,
    },
    Suggestion {
        user: String,
        items: Vec<ScoredItem>,
    },
    Stats(EngineStats),
}

impl Query {
    pub fn run(&self, engine: &RecommendationEngine) -> Result<QueryReport> {
        tracing::debug!("Running query {:?}", self);
        let report = match self {
            Query::Similarity { user_a, user_b } => QueryReport::Similarity {
                user_a: user_a.clone(),
                user_b: user_b.clone(),
                score: engine.similarity(user_a.as_str(), user_b.as_str())?,
            },
            Query::Prediction { user, item } => QueryReport::Prediction {
                user: user.clone(),
                item: item.clone(),
                score: engine.prediction(user.as_str(), item.as_str())?,
            },
            Query::Suggestion { user, limit } => QueryReport::Suggestion {
                user: user.clone(),
                items: engine.scored_suggestions(user.as_str(), *limit)?,
            },
            Query::Stats => QueryReport::Stats(engine.stats()),
        };
        Ok(report)
    }
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryReport::Similarity {
                user_a,
                user_b,
                score,
            } => write!(f, "similarity({}, {}) = {:.4}", user_a, user_b, score),
            QueryReport::Prediction { user, item, score } => {
                write!(f, "prediction({}, {}) = {:.4}", user, item, score)
            }
            QueryReport::Suggestion { user, items } => {
                if items.is_empty() {
                    return write!(f, "no suggestions for {}", user);
                }
                writeln!(f, "suggestions for {}:", user)?;
                for (rank, scored) in items.iter().enumerate() {
                    write!(f, "{:>3}. {} ({:.4})", rank + 1, scored.item, scored.score)?;
                    if rank + 1 < items.len() {
                        writeln!(f)?;
                    }
                }
                Ok(())
            }
            QueryReport::Stats(stats) => write!(
                f,
                "users: {}, items: {}, likes: {}, dislikes: {}",
                stats.users, stats.items, stats.likes, stats.dislikes
            ),
        }
    }
}
