use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoriesError>;

/// Error type for stories API operations.
///
/// The client performs no local recovery; transport failures and non-2xx
/// responses surface to the caller unchanged.
#[derive(Debug, Error)]
pub enum StoriesError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("stories API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server response broke the API contract.
    #[error("malformed response: {0}")]
    Contract(String),
}
