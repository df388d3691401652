//! Canonical post model and normalization from raw post views.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::embed::{Media, resolve_embed};
use crate::error::{Error, Result};
use crate::lexicon::{FeedViewPost, PostView};
use crate::uri;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub handle: String,
    pub display_name: String,
    pub avatar: String,
}

/// Normalized, render-ready snapshot of a post. Constructed once per
/// fetch and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub text: String,
    /// ISO-8601 creation timestamp, verbatim from the record.
    pub created_at: String,
    /// Canonical `at://<did>/<collection>/<rkey>` uri.
    pub uri: String,
    /// Public bsky.app URL, always derived from `uri` and the author
    /// handle rather than trusted from the response.
    pub url: String,
    pub media: Option<Media>,
    pub author: Author,
    pub replies: usize,
    pub reposts: usize,
    pub likes: usize,
}

impl Post {
    /// Normalize a decoded post view.
    ///
    /// Fails only on a missing `uri` or `author.handle`, or on an embed
    /// with a known discriminant that does not decode.
    pub fn from_view(view: PostView) -> Result<Post> {
        if view.uri.is_empty() {
            return Err(Error::malformed("post missing uri"));
        }
        if view.author.handle.is_empty() {
            return Err(Error::malformed(format!(
                "post {} missing author.handle",
                view.uri
            )));
        }

        let media = resolve_embed(view.embed.as_ref())?;
        let url = uri::post_web_url(&view.author.handle, uri::rkey(&view.uri));

        Ok(Post {
            text: view.record.text,
            created_at: view.record.created_at,
            uri: view.uri,
            url,
            media,
            author: Author {
                handle: view.author.handle,
                display_name: view.author.display_name.unwrap_or_default(),
                avatar: view.author.avatar.unwrap_or_default(),
            },
            replies: view.reply_count.unwrap_or_default(),
            reposts: view.repost_count.unwrap_or_default(),
            likes: view.like_count.unwrap_or_default(),
        })
    }

    /// Normalize one raw author-feed item.
    pub fn from_feed_item(item: Value) -> Result<Post> {
        let item: FeedViewPost = serde_json::from_value(item)?;
        Post::from_view(item.post)
    }
}
