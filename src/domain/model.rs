use crate::core::sorted_set::SortedSet;
use crate::utils::error::{Result, SibylError};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability shared by user and item identifiers.
///
/// Identifiers only need a total order (they key the relation) and a
/// printable form for errors and logs. Strings are blank when empty or
/// whitespace-only; integer ids never are.
pub trait Identifier: Ord + fmt::Display {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Identifier for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Identifier for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

macro_rules! integer_identifier {
    ($($ty:ty),*) => {
        $(impl Identifier for $ty {})*
    };
}

integer_identifier!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Like,
    Dislike,
}

/// Actions are matched without regard to ASCII case.
impl FromStr for Feedback {
    type Err = SibylError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("like") {
            Ok(Feedback::Like)
        } else if s.eq_ignore_ascii_case("dislike") {
            Ok(Feedback::Dislike)
        } else {
            Err(SibylError::InvalidArgument {
                field: "action".to_string(),
                value: s.to_string(),
                reason: "expected 'like' or 'dislike'".to_string(),
            })
        }
    }
}

impl<'de> Deserialize<'de> for Feedback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Like => write!(f, "like"),
            Feedback::Dislike => write!(f, "dislike"),
        }
    }
}

/// One row of implicit feedback, as fed by an ingestion source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent<U = String, I = String> {
    pub user: U,
    pub item: I,
    pub action: Feedback,
}

impl<U, I> FeedbackEvent<U, I> {
    pub fn like(user: impl Into<U>, item: impl Into<I>) -> Self {
        Self {
            user: user.into(),
            item: item.into(),
            action: Feedback::Like,
        }
    }

    pub fn dislike(user: impl Into<U>, item: impl Into<I>) -> Self {
        Self {
            user: user.into(),
            item: item.into(),
            action: Feedback::Dislike,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem<I = String> {
    pub item: I,
    pub score: f64,
}

/// Items a user has rated. An item id never sits in both sets.
#[derive(Debug, Clone)]
pub struct UserRecord<I> {
    pub(crate) likes: SortedSet<I>,
    pub(crate) dislikes: SortedSet<I>,
}

impl<I: Ord + Clone> Default for UserRecord<I> {
    fn default() -> Self {
        Self {
            likes: SortedSet::new(),
            dislikes: SortedSet::new(),
        }
    }
}

impl<I: Ord + Clone> UserRecord<I> {
    pub fn likes(&self) -> &SortedSet<I> {
        &self.likes
    }

    pub fn dislikes(&self) -> &SortedSet<I> {
        &self.dislikes
    }

    pub fn has_rated(&self, item: &I) -> bool {
        self.likes.has(item) || self.dislikes.has(item)
    }

    pub fn rated_count(&self) -> usize {
        self.likes.len() + self.dislikes.len()
    }
}

/// Users who rated an item, plus the order in which the item first appeared.
#[derive(Debug, Clone)]
pub struct ItemRecord<U> {
    pub(crate) liked_by: SortedSet<U>,
    pub(crate) disliked_by: SortedSet<U>,
    pub(crate) registration: u64,
}

impl<U: Ord + Clone> ItemRecord<U> {
    pub(crate) fn new(registration: u64) -> Self {
        Self {
            liked_by: SortedSet::new(),
            disliked_by: SortedSet::new(),
            registration,
        }
    }

    pub fn liked_by(&self) -> &SortedSet<U> {
        &self.liked_by
    }

    pub fn disliked_by(&self) -> &SortedSet<U> {
        &self.disliked_by
    }

    /// Zero-based position of this item among all registered items.
    pub fn registration(&self) -> u64 {
        self.registration
    }

    pub fn rater_count(&self) -> usize {
        self.liked_by.len() + self.disliked_by.len()
    }
}
