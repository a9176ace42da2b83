use crate::domain::model::FeedbackEvent;
use crate::utils::error::Result;

/// Anything able to produce a batch of feedback rows.
pub trait FeedbackSource {
    /// Rows paired with the line they were read from, counted from 1.
    fn rows(&self) -> Result<Vec<(u64, FeedbackEvent)>>;

    fn events(&self) -> Result<Vec<FeedbackEvent>> {
        Ok(self.rows()?.into_iter().map(|(_, event)| event).collect())
    }

    fn describe(&self) -> String {
        "feedback source".to_string()
    }
}

/// In-memory events are numbered by position.
impl FeedbackSource for Vec<FeedbackEvent> {
    fn rows(&self) -> Result<Vec<(u64, FeedbackEvent)>> {
        Ok((1u64..).zip(self.iter().cloned()).collect())
    }

    fn describe(&self) -> String {
        format!("{} in-memory events", self.len())
    }
}
