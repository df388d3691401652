//! Bluesky public read API client.
//!
//! Three unauthenticated GET endpoints over HTTPS. The HTTP status is
//! the sole success discriminant: 200 means a decodable body, anything
//! else surfaces as [`Error::Api`] with the upstream message. One
//! attempt per call; there is no retry or backoff here.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::feed::{FEED_FILTER, FeedParams, filter_reposts};
use crate::lexicon::{AuthorFeed, GetPosts, ResolvedHandle, XrpcErrorBody};
use crate::post::Post;

/// Public AppView, no credentials required.
pub const PUBLIC_API_URL: &str = "https://public.api.bsky.app";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default)]
pub struct ClientOpts {
    /// Base URL of the read API. Defaults to [`PUBLIC_API_URL`].
    pub api_url: Option<String>,
    /// Connection-level timeout owned by the transport.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct BlueskyClient {
    http: reqwest::Client,
    api_url: String,
}

impl Default for BlueskyClient {
    fn default() -> Self {
        Self::new(ClientOpts::default())
    }
}

impl BlueskyClient {
    pub fn new(opts: ClientOpts) -> Self {
        let http = reqwest::Client::builder()
            .timeout(opts.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_url: opts.api_url.unwrap_or_else(|| PUBLIC_API_URL.to_string()),
        }
    }

    /// Fetch a single post by at-uri.
    ///
    /// `Ok(None)` means the post does not exist (the endpoint answered
    /// 200 with an empty list). A malformed post body is an error, not a
    /// silent miss.
    pub async fn get_post(&self, at_uri: &str) -> Result<Option<Post>> {
        let url = format!("{}/xrpc/app.bsky.feed.getPosts", self.api_url);

        debug!(at_uri, "fetching post");

        let response = self.http.get(&url).query(&[("uris", at_uri)]).send().await?;

        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }

        let body: GetPosts = response.json().await?;
        match body.posts.into_iter().next() {
            None => {
                debug!(at_uri, "post not found");
                Ok(None)
            }
            Some(view) => Post::from_view(view).map(Some),
        }
    }

    /// Fetch an author feed and normalize it.
    ///
    /// Reposts are dropped unless `params.include_reposts`; items that
    /// fail normalization are skipped with a warning so one bad post
    /// cannot take the whole feed down.
    pub async fn get_author_feed(&self, params: &FeedParams) -> Result<Vec<Post>> {
        let url = format!("{}/xrpc/app.bsky.feed.getAuthorFeed", self.api_url);
        let limit = params.limit.to_string();

        debug!(actor = params.actor(), limit = params.limit, "fetching author feed");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("actor", params.actor()),
                ("limit", limit.as_str()),
                ("filter", FEED_FILTER),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }

        let body: AuthorFeed = response.json().await?;
        let items = filter_reposts(body.feed, params.include_reposts);

        let mut posts = Vec::with_capacity(items.len());
        for item in items {
            match Post::from_feed_item(item) {
                Ok(post) => posts.push(post),
                Err(err) => warn!(actor = params.actor(), %err, "skipping malformed feed item"),
            }
        }
        Ok(posts)
    }

    /// Resolve a handle to its DID, uncached.
    pub async fn resolve_handle(&self, handle: &str) -> Result<String> {
        let url = format!("{}/xrpc/com.atproto.identity.resolveHandle", self.api_url);

        debug!(handle, "resolving handle");

        let response = self
            .http
            .get(&url)
            .query(&[("handle", handle)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(read_api_error(response).await);
        }

        let body: ResolvedHandle = response.json().await?;
        Ok(body.did)
    }
}

/// Build an [`Error::Api`] from a non-200 response, preferring the XRPC
/// error body's message when one is present.
async fn read_api_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let message = match response.json::<XrpcErrorBody>().await {
        Ok(body) => body.into_message(),
        Err(_) => None,
    };
    Error::Api {
        status: status.as_u16(),
        message: message
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string()),
    }
}
