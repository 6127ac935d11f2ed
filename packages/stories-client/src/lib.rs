//! REST client for the stories collection API.
//!
//! A thin façade translating story actions (fetch, submit, like/unlike,
//! publicity and newsletter review) into HTTP calls against the `/stories`
//! collection. The HTTP layer is injected through the [`Transport`] trait;
//! [`HttpTransport`] is the `reqwest`-backed implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use stories_client::{HttpTransport, StoriesClient};
//!
//! let transport = HttpTransport::new("https://api.example.org")?;
//! let client = StoriesClient::new(transport);
//!
//! let story = client.fetch_details(42).await?;
//! println!("{story}");
//!
//! client.mark_liked(42).await?;
//! ```

pub mod error;
pub mod stories;
pub mod transport;
pub mod types;

pub use error::{Result, StoriesError};
pub use stories::StoriesClient;
pub use transport::{HttpTransport, Transport};
pub use types::{Reaction, StoryId};
