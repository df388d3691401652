//! at-uri and bsky.app URL helpers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Collection NSID for feed posts.
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

static POST_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://bsky\.app/profile/([^/]+)/post/([^/?#\s]+)")
        .expect("post URL regex compiles")
});

/// Record key of an at-uri: the final `/`-delimited segment.
pub fn rkey(at_uri: &str) -> &str {
    at_uri.rsplit('/').next().unwrap_or_default()
}

/// Build the at-uri of a post record under the given repo.
pub fn post_at_uri(did: &str, rkey: &str) -> String {
    format!("at://{did}/{POST_COLLECTION}/{rkey}")
}

/// Public web URL of a post on bsky.app. Always derived from the author
/// handle and the record key, never taken from upstream data.
pub fn post_web_url(handle: &str, rkey: &str) -> String {
    format!("https://bsky.app/profile/{handle}/post/{rkey}")
}

/// Parse a bsky.app post URL into `(handle, rkey)`.
pub fn parse_post_url(url: &str) -> Option<(&str, &str)> {
    let captures = POST_URL_RE.captures(url)?;
    let handle = captures.get(1)?.as_str();
    let rkey = captures.get(2)?.as_str();
    Some((handle, rkey))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rkey_is_last_segment() {
        assert_eq!(
            rkey("at://did:plc:xyz123/app.bsky.feed.post/abc456"),
            "abc456"
        );
        assert_eq!(rkey("abc456"), "abc456");
    }

    #[test]
    fn test_post_at_uri() {
        assert_eq!(
            post_at_uri("did:plc:44ybard66vv44zksje25o7dz", "3jwdwj2ctlk26"),
            "at://did:plc:44ybard66vv44zksje25o7dz/app.bsky.feed.post/3jwdwj2ctlk26"
        );
    }

    #[test]
    fn test_parse_post_url() {
        let (handle, rkey) =
            parse_post_url("https://bsky.app/profile/alice.example/post/3jwdwj2ctlk26").unwrap();
        assert_eq!(handle, "alice.example");
        assert_eq!(rkey, "3jwdwj2ctlk26");

        // Trailing query strings and fragments are ignored.
        let (_, rkey) =
            parse_post_url("http://bsky.app/profile/alice.example/post/3jwdwj2ctlk26?ref=x")
                .unwrap();
        assert_eq!(rkey, "3jwdwj2ctlk26");
    }

    #[test]
    fn test_parse_post_url_rejects_other_urls() {
        assert!(parse_post_url("https://bsky.app/profile/alice.example").is_none());
        assert!(parse_post_url("https://example.com/profile/a/post/b").is_none());
        assert!(parse_post_url("not a url").is_none());
    }
}
