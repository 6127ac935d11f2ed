use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque story key. The API hands out both numeric and string ids; the
/// client passes them through without validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryId::Number(n) => write!(f, "{n}"),
            StoryId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StoryId {
    fn from(n: i64) -> Self {
        StoryId::Number(n)
    }
}

impl From<i32> for StoryId {
    fn from(n: i32) -> Self {
        StoryId::Number(n.into())
    }
}

impl From<&str> for StoryId {
    fn from(s: &str) -> Self {
        StoryId::Text(s.to_string())
    }
}

impl From<String> for StoryId {
    fn from(s: String) -> Self {
        StoryId::Text(s)
    }
}

/// Reaction verbs accepted by the stories collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reaction {
    Like,
    Unlike,
}

/// Body for `POST /stories` reaction calls.
#[derive(Debug, Serialize)]
pub(crate) struct ReactionRequest {
    pub id: StoryId,
    pub action: Reaction,
}

/// Body for `PATCH /stories` publicity review calls.
#[derive(Debug, Serialize)]
pub(crate) struct PublicityRequest {
    pub id: StoryId,
    pub reviewed: u8,
    pub public: u8,
}

/// Body for `PATCH /stories` newsletter review calls.
#[derive(Debug, Serialize)]
pub(crate) struct NewsletterRequest {
    pub id: StoryId,
    pub newsletterreviewed: u8,
    pub newsletter: u8,
}
