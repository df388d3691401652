//! Client for the Bluesky public read API.
//!
//! Fetches posts and author feeds from the unauthenticated AppView,
//! normalizes them into a stable [`Post`]/[`Media`] model for an
//! embedding layer to render, and caches handle→DID resolution through
//! a pluggable [`HandleStore`].

use std::sync::Arc;
use std::time::Duration;

use crate::client::ClientOpts;
use crate::error::Result;

#[derive(Default)]
pub struct BlueskyOpts {
    pub api_url: Option<String>,
    pub timeout: Option<Duration>,
    /// Persistence for resolved handles. Defaults to an in-memory store.
    pub store: Option<Arc<dyn HandleStore>>,
}

/// Facade combining the API client with the cached handle resolver.
#[derive(Clone)]
pub struct Bluesky {
    pub client: BlueskyClient,
    pub handles: HandleResolver,
}

impl Bluesky {
    pub fn new(opts: BlueskyOpts) -> Self {
        let BlueskyOpts {
            api_url,
            timeout,
            store,
        } = opts;
        let client = BlueskyClient::new(ClientOpts { api_url, timeout });
        let store = store.unwrap_or_else(|| Arc::new(MemoryHandleStore::new()));

        Self {
            handles: HandleResolver::new(client.clone(), store),
            client,
        }
    }

    /// Turn a bsky.app post URL into the post's at-uri, resolving the
    /// handle in the URL through the cache.
    ///
    /// `Ok(None)` when the URL is not a post URL or the handle cannot be
    /// resolved; callers fall back to leaving the URL as-is.
    pub async fn post_url_to_at_uri(&self, url: &str) -> Result<Option<String>> {
        let Some((handle, rkey)) = uri::parse_post_url(url) else {
            return Ok(None);
        };
        match self.handles.resolve(handle).await? {
            Some(did) => Ok(Some(uri::post_at_uri(&did, rkey))),
            None => Ok(None),
        }
    }
}

pub mod cache;
pub mod client;
pub mod embed;
pub mod error;
pub mod feed;
pub mod lexicon;
pub mod post;
pub mod uri;

pub use crate::cache::{CachedHandle, HandleResolver, HandleStore, MemoryHandleStore};
pub use crate::client::{BlueskyClient, PUBLIC_API_URL};
pub use crate::embed::{ExternalLink, Media, PostImage};
pub use crate::error::Error;
pub use crate::feed::FeedParams;
pub use crate::post::{Author, Post};
