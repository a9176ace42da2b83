use crate::core::engine::RecommendationEngine;
use crate::core::{Feedback, FeedbackEvent, FeedbackSource, Identifier};
use crate::utils::error::{Result, SibylError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub likes: usize,
    pub dislikes: usize,
    pub users: usize,
    pub items: usize,
}

/// Replays events into `engine` in order. Stops at the first rejected row.
///
/// Events are numbered by position, starting at 1.
pub fn apply_events<U, I, It>(
    engine: &mut RecommendationEngine<U, I>,
    events: It,
) -> Result<IngestSummary>
where
    U: Identifier + Clone,
    I: Identifier + Clone,
    It: IntoIterator<Item = FeedbackEvent<U, I>>,
{
    apply_rows(engine, (1u64..).zip(events))
}

/// Replays `(line, event)` rows into `engine`. A rejected row's error names
/// its line.
pub fn apply_rows<U, I, It>(
    engine: &mut RecommendationEngine<U, I>,
    rows: It,
) -> Result<IngestSummary>
where
    U: Identifier + Clone,
    I: Identifier + Clone,
    It: IntoIterator<Item = (u64, FeedbackEvent<U, I>)>,
{
    let mut summary = IngestSummary::default();

    for (line, event) in rows {
        let action = event.action;
        if let Err(e) = engine.record(event.user, event.item, action) {
            tracing::error!("Rejected feedback on line {}: {}", line, e);
            return Err(match e {
                SibylError::InvalidArgument {
                    field,
                    value,
                    reason,
                } => SibylError::InvalidArgument {
                    field: format!("line {} {}", line, field),
                    value,
                    reason,
                },
                other => other,
            });
        }

        match action {
            Feedback::Like => summary.likes += 1,
            Feedback::Dislike => summary.dislikes += 1,
        }
    }

    summary.users = engine.user_count();
    summary.items = engine.item_count();
    Ok(summary)
}

/// Loads a [`FeedbackSource`] into an engine.
pub struct Ingestor<S: FeedbackSource> {
    source: S,
}

impl<S: FeedbackSource> Ingestor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn load_into(&self, engine: &mut RecommendationEngine) -> Result<IngestSummary> {
        tracing::info!("Reading feedback from {}", self.source.describe());
        let rows = self.source.rows()?;
        tracing::debug!("Read {} feedback rows", rows.len());

        let summary = apply_rows(engine, rows)?;
        tracing::info!(
            "Ingested {} likes and {} dislikes ({} users, {} items)",
            summary.likes,
            summary.dislikes,
            summary.users,
            summary.items
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_events_counts() {
        let mut engine: RecommendationEngine = RecommendationEngine::new();
        let summary = apply_events(
            &mut engine,
            vec![
                FeedbackEvent::like("olivier", "dune"),
                FeedbackEvent::like("audrey", "dune"),
                FeedbackEvent::dislike("audrey", "solaris"),
            ],
        )
        .unwrap();

        assert_eq!(
            summary,
            IngestSummary {
                likes: 2,
                dislikes: 1,
                users: 2,
                items: 2,
            }
        );
        assert_eq!(engine.similarity("olivier", "audrey").unwrap(), 0.5);
    }

    #[test]
    fn test_apply_events_rejects_blank_ids() {
        let mut engine: RecommendationEngine = RecommendationEngine::new();
        let err = apply_events(
            &mut engine,
            vec![
                FeedbackEvent::like("olivier", "dune"),
                FeedbackEvent::like("", "dune"),
            ],
        )
        .unwrap_err();

        match err {
            SibylError::InvalidArgument { field, .. } => assert_eq!(field, "line 2 user_id"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(engine.user_count(), 1);
    }

    #[test]
    fn test_apply_rows_reports_source_line() {
        let mut engine: RecommendationEngine = RecommendationEngine::new();
        let err = apply_rows(
            &mut engine,
            vec![
                (3, FeedbackEvent::like("olivier", "dune")),
                (7, FeedbackEvent::dislike("olivier", " ")),
            ],
        )
        .unwrap_err();

        match err {
            SibylError::InvalidArgument { field, .. } => assert_eq!(field, "line 7 item_id"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ingestor_loads_in_memory_source() {
        let source: Vec<FeedbackEvent> = vec![
            FeedbackEvent::like("olivier", "dune"),
            FeedbackEvent::dislike("olivier", "dune"),
        ];
        let mut engine = RecommendationEngine::new();
        let summary = Ingestor::new(source).load_into(&mut engine).unwrap();

        assert_eq!(summary.likes, 1);
        assert_eq!(summary.dislikes, 1);
        let user = engine.user("olivier").unwrap();
        assert!(user.likes().is_empty());
        assert_eq!(user.dislikes().to_vec(), vec!["dune".to_string()]);
    }
}
