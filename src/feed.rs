//! Author-feed request settings and the repost filter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lexicon::REASON_REPOST;

/// The getAuthorFeed filter this crate always requests: top-level posts
/// only, replies excluded server-side.
pub const FEED_FILTER: &str = "posts_no_replies";

fn default_limit() -> usize {
    5
}

/// Settings for one author-feed fetch. Deserializable from stored
/// configuration; `limit` defaults to 5 and reposts are excluded unless
/// asked for.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    pub handle: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub include_reposts: bool,
}

impl FeedParams {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            limit: default_limit(),
            include_reposts: false,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_reposts(mut self, include_reposts: bool) -> Self {
        self.include_reposts = include_reposts;
        self
    }

    /// Actor parameter for the request. Handles are often stored with a
    /// display-style leading `@`, which the API does not accept.
    pub fn actor(&self) -> &str {
        self.handle.trim_start_matches('@')
    }
}

/// Drop repost items from a raw feed unless they were asked for.
///
/// A repost is an item whose `reason.$type` equals the repost-reason
/// discriminant, exact and case-sensitive. The filter is stable: the
/// surviving items keep their relative order, and nothing is deduplicated.
pub fn filter_reposts(feed: Vec<Value>, include_reposts: bool) -> Vec<Value> {
    if include_reposts {
        return feed;
    }
    feed.into_iter()
        .filter(|item| !is_repost(item))
        .collect()
}

fn is_repost(item: &Value) -> bool {
    item.get("reason")
        .and_then(|reason| reason.get("$type"))
        .and_then(Value::as_str)
        == Some(REASON_REPOST)
}
