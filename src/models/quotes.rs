use serde::Serialize;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Quote {
    pub id: i64,
    pub content: String,
    pub context: String,
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
    pub is_active: bool,
}

/// a quote joined with the sum of its votes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ScoredQuote {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub quote: Quote,
    pub score: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuote {
    pub content: String,
    pub context: String,
    pub author: String,
}

impl NewQuote {
    pub fn new(
        content: impl Into<String>,
        context: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            context: context.into(),
            author: author.into(),
        }
    }
}

/// what happened to a quote submitted through [`crate::Store::add`].
///
/// rejections are expected outcomes and never surface as errors.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddOutcome {
    Added { id: i64 },
    Rejected(Rejection),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    ForbiddenContext { context: String },
    Duplicate { similar_to: i64, similarity: f64 },
}

impl AddOutcome {
    pub fn added_id(&self) -> Option<i64> {
        match self {
            AddOutcome::Added { id } => Some(*id),
            AddOutcome::Rejected(_) => None,
        }
    }
}
