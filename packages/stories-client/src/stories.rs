use serde_json::Value;

use crate::error::{Result, StoriesError};
use crate::transport::Transport;
use crate::types::{NewsletterRequest, PublicityRequest, Reaction, ReactionRequest, StoryId};

/// Story actions over an injected [`Transport`].
///
/// Stateless: every call maps to exactly one HTTP request, and every
/// transport failure propagates to the caller unchanged. Independently
/// issued calls carry no ordering guarantee; callers serialize dependent
/// actions themselves.
pub struct StoriesClient<T> {
    transport: T,
}

impl<T: Transport> StoriesClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch a single story. Returns the response body as-is.
    pub async fn fetch_details(&self, id: impl Into<StoryId>) -> Result<Value> {
        let id = id.into();
        tracing::debug!(%id, "fetching story");
        self.transport.get_v2(&format!("/story/{id}")).await
    }

    /// Submit a new story. Returns the id the server generated for it.
    pub async fn create(&self, payload: Value) -> Result<StoryId> {
        let response = self.transport.put("/stories", payload).await?;
        match response.get("id") {
            Some(Value::Number(n)) => n.as_i64().map(StoryId::Number).ok_or_else(|| {
                StoriesError::Contract("non-integer id in create response".into())
            }),
            Some(Value::String(s)) => Ok(StoryId::Text(s.clone())),
            _ => Err(StoriesError::Contract("missing id in create response".into())),
        }
    }

    /// Mark a story as liked.
    pub async fn mark_liked(&self, id: impl Into<StoryId>) -> Result<Value> {
        self.react(id.into(), Reaction::Like).await
    }

    /// Withdraw a like from a story.
    pub async fn mark_unliked(&self, id: impl Into<StoryId>) -> Result<Value> {
        self.react(id.into(), Reaction::Unlike).await
    }

    async fn react(&self, id: StoryId, action: Reaction) -> Result<Value> {
        tracing::debug!(%id, ?action, "story reaction");
        let body = serde_json::to_value(ReactionRequest { id, action })?;
        self.transport.post("/stories", body).await
    }

    /// Record the publicity review decision. The story is marked reviewed
    /// either way; `allowed` selects whether it may be used publicly.
    pub async fn set_publicity_use(&self, id: impl Into<StoryId>, allowed: bool) -> Result<Value> {
        let id = id.into();
        tracing::debug!(%id, allowed, "publicity review");
        let body = serde_json::to_value(PublicityRequest {
            id,
            reviewed: 1,
            public: u8::from(allowed),
        })?;
        self.transport.patch("/stories", body).await
    }

    /// Record the newsletter review decision. The story is marked reviewed
    /// either way; `allowed` selects whether it may appear in the newsletter.
    pub async fn set_newsletter_use(&self, id: impl Into<StoryId>, allowed: bool) -> Result<Value> {
        let id = id.into();
        tracing::debug!(%id, allowed, "newsletter review");
        let body = serde_json::to_value(NewsletterRequest {
            id,
            newsletterreviewed: 1,
            newsletter: u8::from(allowed),
        })?;
        self.transport.patch("/stories", body).await
    }
}
