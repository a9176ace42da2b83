//! Bipartite like/dislike relation and the queries derived from it.
//!
//! ```
//! use sibyl::RecommendationEngine;
//!
//! let mut engine: RecommendationEngine<String, i32> = RecommendationEngine::new();
//! engine.record_like("olivier", 1)?.record_like("audrey", 1)?;
//! assert_eq!(engine.similarity("olivier", "audrey")?, 1.0);
//! # Ok::<(), sibyl::SibylError>(())
//! ```

use crate::core::sorted_set::SortedSet;
use crate::domain::model::{Feedback, Identifier, ItemRecord, ScoredItem, UserRecord};
use crate::utils::error::{Result, SibylError};
use crate::utils::validation::validate_identifier;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub users: usize,
    pub items: usize,
    pub likes: usize,
    pub dislikes: usize,
}

/// In-memory recommendation space owned by its caller.
///
/// Records are created on first reference and never removed. The engine is
/// not synchronized: callers sharing one across threads must serialize
/// writes themselves.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<U = String, I = String> {
    users: BTreeMap<U, UserRecord<I>>,
    items: BTreeMap<I, ItemRecord<U>>,
    next_registration: u64,
}

impl<U, I> Default for RecommendationEngine<U, I> {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            items: BTreeMap::new(),
            next_registration: 0,
        }
    }
}

impl<U, I> RecommendationEngine<U, I>
where
    U: Identifier + Clone,
    I: Identifier + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_like(
        &mut self,
        user_id: impl Into<U>,
        item_id: impl Into<I>,
    ) -> Result<&mut Self> {
        self.record(user_id.into(), item_id.into(), Feedback::Like)
    }

    pub fn record_dislike(
        &mut self,
        user_id: impl Into<U>,
        item_id: impl Into<I>,
    ) -> Result<&mut Self> {
        self.record(user_id.into(), item_id.into(), Feedback::Dislike)
    }

    /// Upserts both records, then moves the pair to the side given by `feedback`.
    pub fn record(&mut self, user_id: U, item_id: I, feedback: Feedback) -> Result<&mut Self> {
        validate_identifier("user_id", &user_id)?;
        validate_identifier("item_id", &item_id)?;

        let next_registration = &mut self.next_registration;
        let item = self.items.entry(item_id.clone()).or_insert_with(|| {
            let record = ItemRecord::new(*next_registration);
            *next_registration += 1;
            tracing::debug!(item = %item_id, registration = record.registration, "registered item");
            record
        });
        let user = self.users.entry(user_id.clone()).or_default();

        match feedback {
            Feedback::Like => {
                user.dislikes.delete(&item_id);
                item.disliked_by.delete(&user_id);
                user.likes.add(item_id.clone());
                item.liked_by.add(user_id.clone());
            }
            Feedback::Dislike => {
                user.likes.delete(&item_id);
                item.liked_by.delete(&user_id);
                user.dislikes.add(item_id.clone());
                item.disliked_by.add(user_id.clone());
            }
        }

        tracing::debug!(user = %user_id, item = %item_id, %feedback, "recorded feedback");
        Ok(self)
    }

    /// Signed agreement between two users, in `[-1, 1]`.
    ///
    /// `(agreements - disagreements) / |every item either user rated|`.
    /// Both users must have rated something.
    pub fn similarity<Q>(&self, user_a: &Q, user_b: &Q) -> Result<f64>
    where
        U: Borrow<Q>,
        Q: Identifier + ?Sized,
    {
        let a = self.user_record(user_a)?;
        let b = self.user_record(user_b)?;
        similarity_of(a, b)
    }

    /// Mean signed similarity between `user_id` and everyone who rated `item_id`.
    ///
    /// Likers contribute their similarity, dislikers its negation. The user
    /// need not have rated the item; if they did, their self-similarity of 1
    /// is part of the mean.
    pub fn prediction<QU, QI>(&self, user_id: &QU, item_id: &QI) -> Result<f64>
    where
        U: Borrow<QU>,
        I: Borrow<QI>,
        QU: Identifier + ?Sized,
        QI: Identifier + ?Sized,
    {
        let user = self.user_record(user_id)?;
        let item = self.item_record(item_id)?;
        if item.rater_count() == 0 {
            return Err(SibylError::UndefinedComparison {
                message: format!("item '{}' has no raters", item_id),
            });
        }
        self.prediction_of(user, item)
    }

    /// Unrated items for `user_id`, best first.
    pub fn suggestion<Q>(&self, user_id: &Q) -> Result<Vec<I>>
    where
        U: Borrow<Q>,
        Q: Identifier + ?Sized,
    {
        Ok(self
            .scored_suggestions(user_id, None)?
            .into_iter()
            .map(|scored| scored.item)
            .collect())
    }

    /// Unrated items with their predicted score, best first.
    ///
    /// Items the user liked or disliked are excluded. Equal scores keep item
    /// registration order (first time anyone rated the item).
    pub fn scored_suggestions<Q>(
        &self,
        user_id: &Q,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredItem<I>>>
    where
        U: Borrow<Q>,
        Q: Identifier + ?Sized,
    {
        let user = self.user_record(user_id)?;

        let mut ranked = Vec::new();
        for (item_id, item) in &self.items {
            if user.has_rated(item_id) {
                continue;
            }
            let score = self.prediction_of(user, item)?;
            ranked.push((item.registration, ScoredItem { item: item_id.clone(), score }));
        }

        ranked.sort_by(|(reg_a, a), (reg_b, b)| {
            b.score.total_cmp(&a.score).then_with(|| reg_a.cmp(reg_b))
        });

        let candidates = ranked.len();
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }

        tracing::debug!(user = %user_id, candidates, returned = ranked.len(), "ranked suggestions");
        Ok(ranked.into_iter().map(|(_, scored)| scored).collect())
    }

    pub fn user<Q>(&self, user_id: &Q) -> Option<&UserRecord<I>>
    where
        U: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.users.get(user_id)
    }

    pub fn item<Q>(&self, item_id: &Q) -> Option<&ItemRecord<U>>
    where
        I: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.get(item_id)
    }

    pub fn users(&self) -> impl Iterator<Item = (&U, &UserRecord<I>)> {
        self.users.iter()
    }

    /// Items in registration order.
    pub fn items(&self) -> impl Iterator<Item = (&I, &ItemRecord<U>)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by_key(|(_, record)| record.registration);
        items.into_iter()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn stats(&self) -> EngineStats {
        let (likes, dislikes) = self
            .users
            .values()
            .fold((0, 0), |(likes, dislikes), user| {
                (likes + user.likes.len(), dislikes + user.dislikes.len())
            });
        EngineStats {
            users: self.users.len(),
            items: self.items.len(),
            likes,
            dislikes,
        }
    }

    fn user_record<Q>(&self, user_id: &Q) -> Result<&UserRecord<I>>
    where
        U: Borrow<Q>,
        Q: Identifier + ?Sized,
    {
        validate_identifier("user_id", user_id)?;
        self.users
            .get(user_id)
            .ok_or_else(|| SibylError::unknown_user(user_id))
    }

    fn item_record<Q>(&self, item_id: &Q) -> Result<&ItemRecord<U>>
    where
        I: Borrow<Q>,
        Q: Identifier + ?Sized,
    {
        validate_identifier("item_id", item_id)?;
        self.items
            .get(item_id)
            .ok_or_else(|| SibylError::unknown_item(item_id))
    }

    fn prediction_of(&self, user: &UserRecord<I>, item: &ItemRecord<U>) -> Result<f64> {
        let raters = item.rater_count();
        if raters == 0 {
            return Err(SibylError::UndefinedComparison {
                message: "item has no raters".to_string(),
            });
        }

        let mut sum = 0.0;
        let mut accumulate = |rater: &U, sign: f64| -> ControlFlow<SibylError> {
            match self.rater_similarity(user, rater) {
                Ok(similarity) => {
                    tracing::trace!(rater = %rater, similarity, sign, "rater contribution");
                    sum += sign * similarity;
                    ControlFlow::Continue(())
                }
                Err(err) => ControlFlow::Break(err),
            }
        };

        if let Some(err) = item.liked_by.for_each(|rater| accumulate(rater, 1.0)) {
            return Err(err);
        }
        if let Some(err) = item.disliked_by.for_each(|rater| accumulate(rater, -1.0)) {
            return Err(err);
        }

        Ok(sum / raters as f64)
    }

    fn rater_similarity(&self, user: &UserRecord<I>, rater: &U) -> Result<f64> {
        let rater_record = self
            .users
            .get(rater)
            .ok_or_else(|| SibylError::unknown_user(rater))?;
        similarity_of(user, rater_record)
    }
}

fn similarity_of<I: Ord + Clone>(a: &UserRecord<I>, b: &UserRecord<I>) -> Result<f64> {
    let overlap = |x: &SortedSet<I>, y: &SortedSet<I>| -> Result<usize> {
        Ok(SortedSet::intersection(&[x, y])?.len())
    };

    let agreements = overlap(&a.likes, &b.likes)? + overlap(&a.dislikes, &b.dislikes)?;
    let disagreements = overlap(&a.likes, &b.dislikes)? + overlap(&a.dislikes, &b.likes)?;
    let total = SortedSet::union(&[&a.likes, &a.dislikes, &b.likes, &b.dislikes])?.len();

    if total == 0 {
        return Err(SibylError::UndefinedComparison {
            message: "neither user has rated any item".to_string(),
        });
    }

    Ok((agreements as f64 - disagreements as f64) / total as f64)
}
