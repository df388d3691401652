//! Wire types for the public read endpoints.
//!
//! A trimmed read-side lexicon: only the shapes returned by
//! app.bsky.feed.getPosts, app.bsky.feed.getAuthorFeed and
//! com.atproto.identity.resolveHandle, with everything the embed layer
//! does not consume left out. Field optionality is looser than the
//! published lexicons on purpose so that one odd post degrades to a
//! per-item error instead of failing a whole response decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// $type discriminant for a repost reason on a feed item.
pub const REASON_REPOST: &str = "app.bsky.feed.defs#reasonRepost";

/// $type discriminants for the embed views the resolver understands.
pub const EMBED_IMAGES_VIEW: &str = "app.bsky.embed.images#view";
pub const EMBED_VIDEO_VIEW: &str = "app.bsky.embed.video#view";
pub const EMBED_EXTERNAL_VIEW: &str = "app.bsky.embed.external#view";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorViewBasic {
    #[serde(default)]
    pub did: String,
    #[serde(default)]
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// The app.bsky.feed.post record carried inside a post view. Both fields
/// are optional upstream on legacy records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub text: String,
    /// Client-declared creation timestamp, ISO-8601. Passed through
    /// verbatim, never re-parsed here.
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(default)]
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(default)]
    pub author: AuthorViewBasic,
    #[serde(default)]
    pub record: PostRecord,
    /// Raw embed payload. Kept as a Value so unknown future embed types
    /// pass through to the resolver instead of failing the decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repost_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedViewPost {
    pub post: PostView,
    /// Repost/pin reason. Loosely typed: the filter only looks at the
    /// $type discriminant, and new reason kinds must not break decoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_context: Option<String>,
}

/// app.bsky.feed.getAuthorFeed output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthorFeed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Items are decoded individually downstream so one malformed post
    /// skips that post, not the whole feed.
    #[serde(default)]
    pub feed: Vec<Value>,
}

/// app.bsky.feed.getPosts output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GetPosts {
    #[serde(default)]
    pub posts: Vec<PostView>,
}

/// com.atproto.identity.resolveHandle output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResolvedHandle {
    pub did: String,
}

/// Error body the XRPC endpoints return alongside a non-200 status.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct XrpcErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl XrpcErrorBody {
    /// Best human-readable message: prefer the long-form message, fall
    /// back to the error code.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// A set of images embedded in a post.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesView {
    pub images: Vec<ViewImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewImage {
    /// Fully-qualified CDN URL of the thumbnail.
    #[serde(default)]
    pub thumb: String,
    /// Fully-qualified CDN URL of the large rendition.
    #[serde(default)]
    pub fullsize: String,
    /// Alt text description of the image, for accessibility.
    #[serde(default)]
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
}

/// width:height aspect ratio. May be approximate.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AspectRatio {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// HLS playlist URL.
    pub playlist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
}

/// Externally linked content (a URL and 'card') embedded in a post.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalView {
    pub external: ViewExternal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewExternal {
    pub uri: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}
