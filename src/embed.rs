//! Media variant resolution.
//!
//! Turns the raw `embed` payload of a post view into the canonical
//! [`Media`] union. Dispatch is an exact, case-sensitive match on the
//! `$type` discriminant; discriminants this crate does not know yet
//! resolve to `None` so future embed types render as text-only posts
//! instead of errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::lexicon::{
    EMBED_EXTERNAL_VIEW, EMBED_IMAGES_VIEW, EMBED_VIDEO_VIEW, ExternalView, ImagesView, VideoView,
};

/// Canonical media attachment of a post.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Media {
    Images { images: Vec<PostImage> },
    Video { playlist: String },
    External(ExternalLink),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PostImage {
    pub alt: String,
    pub fullsize: String,
    pub thumb: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExternalLink {
    pub uri: String,
    pub title: String,
    pub description: String,
    /// Card thumbnail URL. Optional upstream; empty string when absent.
    pub thumb: String,
}

/// Resolve a raw embed payload into canonical media.
///
/// Absent payloads and unknown `$type` values resolve to `Ok(None)`.
/// A known `$type` whose body does not decode is a malformed response.
pub fn resolve_embed(embed: Option<&Value>) -> Result<Option<Media>> {
    let Some(embed) = embed else {
        return Ok(None);
    };
    if embed.is_null() {
        return Ok(None);
    }

    let Some(discriminant) = embed.get("$type").and_then(Value::as_str) else {
        return Ok(None);
    };

    match discriminant {
        EMBED_IMAGES_VIEW => {
            let view: ImagesView = decode(embed, discriminant)?;
            let images = view
                .images
                .into_iter()
                .map(|img| PostImage {
                    alt: img.alt,
                    fullsize: img.fullsize,
                    thumb: img.thumb,
                })
                .collect();
            Ok(Some(Media::Images { images }))
        }
        EMBED_VIDEO_VIEW => {
            let view: VideoView = decode(embed, discriminant)?;
            Ok(Some(Media::Video {
                playlist: view.playlist,
            }))
        }
        EMBED_EXTERNAL_VIEW => {
            let view: ExternalView = decode(embed, discriminant)?;
            Ok(Some(Media::External(ExternalLink {
                uri: view.external.uri,
                title: view.external.title,
                description: view.external.description,
                thumb: view.external.thumb.unwrap_or_default(),
            })))
        }
        _ => Ok(None),
    }
}

fn decode<T: serde::de::DeserializeOwned>(embed: &Value, discriminant: &str) -> Result<T> {
    serde_json::from_value(embed.clone())
        .map_err(|err| Error::malformed(format!("bad {discriminant} embed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_embed_resolves_to_none() {
        assert_eq!(resolve_embed(None).unwrap(), None);
        assert_eq!(resolve_embed(Some(&Value::Null)).unwrap(), None);
    }

    #[test]
    fn test_images_embed_round_trips_fields() {
        let embed = json!({
            "$type": "app.bsky.embed.images#view",
            "images": [
                {
                    "alt": "An image",
                    "fullsize": "https://example.com/full.jpg",
                    "thumb": "https://example.com/thumb.jpg",
                    "aspectRatio": { "height": 1080, "width": 1920 }
                },
                {
                    "alt": "",
                    "fullsize": "https://example.com/full2.jpg",
                    "thumb": "https://example.com/thumb2.jpg"
                }
            ]
        });

        let media = resolve_embed(Some(&embed)).unwrap().unwrap();
        let Media::Images { images } = media else {
            panic!("expected images variant, got {media:?}");
        };
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].alt, "An image");
        assert_eq!(images[0].fullsize, "https://example.com/full.jpg");
        assert_eq!(images[0].thumb, "https://example.com/thumb.jpg");
        assert_eq!(images[1].alt, "");
    }

    #[test]
    fn test_image_fields_default_to_empty_strings() {
        let embed = json!({
            "$type": "app.bsky.embed.images#view",
            "images": [{ "fullsize": "https://example.com/full.jpg" }]
        });

        let media = resolve_embed(Some(&embed)).unwrap().unwrap();
        let Media::Images { images } = media else {
            panic!("expected images variant");
        };
        assert_eq!(images[0].alt, "");
        assert_eq!(images[0].thumb, "");
    }

    #[test]
    fn test_video_embed_uses_playlist() {
        let embed = json!({
            "$type": "app.bsky.embed.video#view",
            "cid": "bafyvideo",
            "playlist": "https://example.com/video.m3u8"
        });

        let media = resolve_embed(Some(&embed)).unwrap().unwrap();
        assert_eq!(
            media,
            Media::Video {
                playlist: "https://example.com/video.m3u8".to_string()
            }
        );
    }

    #[test]
    fn test_external_embed_maps_card_fields() {
        let embed = json!({
            "$type": "app.bsky.embed.external#view",
            "external": {
                "uri": "https://example.com",
                "title": "Example Title",
                "description": "Example Description",
                "thumb": "https://example.com/thumb.jpg"
            }
        });

        let media = resolve_embed(Some(&embed)).unwrap().unwrap();
        assert_eq!(
            media,
            Media::External(ExternalLink {
                uri: "https://example.com".to_string(),
                title: "Example Title".to_string(),
                description: "Example Description".to_string(),
                thumb: "https://example.com/thumb.jpg".to_string(),
            })
        );
    }

    #[test]
    fn test_external_embed_missing_thumb_defaults_to_empty() {
        let embed = json!({
            "$type": "app.bsky.embed.external#view",
            "external": {
                "uri": "https://example.com",
                "title": "Example Title",
                "description": "Example Description"
            }
        });

        let media = resolve_embed(Some(&embed)).unwrap().unwrap();
        let Media::External(link) = media else {
            panic!("expected external variant");
        };
        assert_eq!(link.thumb, "");
    }

    #[test]
    fn test_external_embed_missing_uri_is_malformed() {
        let embed = json!({
            "$type": "app.bsky.embed.external#view",
            "external": { "title": "Example Title", "description": "d" }
        });

        let err = resolve_embed(Some(&embed)).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)), "got {err:?}");
    }

    #[test]
    fn test_unknown_discriminant_resolves_to_none() {
        let embed = json!({
            "$type": "app.bsky.embed.recordWithMedia#view",
            "record": {}
        });
        assert_eq!(resolve_embed(Some(&embed)).unwrap(), None);

        // Missing discriminant entirely is also not an error.
        let embed = json!({ "images": [] });
        assert_eq!(resolve_embed(Some(&embed)).unwrap(), None);
    }

    #[test]
    fn test_discriminant_match_is_case_sensitive() {
        let embed = json!({
            "$type": "app.bsky.embed.Images#view",
            "images": []
        });
        assert_eq!(resolve_embed(Some(&embed)).unwrap(), None);
    }
}
