use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Mapped records (what the rest of the app consumes)
// ---------------------------------------------------------------------------

/// Channel snapshot: fetched once per search, replaced wholesale on the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub thumbnails: ThumbnailSet,
    pub statistics: ChannelStatistics,
}

/// Aggregate channel counters. The API reports these as numeric strings and
/// omits hidden ones (e.g. subscriber count), which default to `"0"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default = "zero")]
    pub view_count: String,
    #[serde(default = "zero")]
    pub subscriber_count: String,
    #[serde(default = "zero")]
    pub video_count: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub published_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub thumbnails: ThumbnailSet,
    pub statistics: VideoStatistics,
}

/// Per-video counters as numeric strings, defaulting to `"0"` when the
/// payload omits them (likes/comments can be disabled per video).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default = "zero")]
    pub view_count: String,
    #[serde(default = "zero")]
    pub like_count: String,
    #[serde(default = "zero")]
    pub comment_count: String,
}

impl Default for ChannelStatistics {
    fn default() -> Self {
        Self {
            view_count: zero(),
            subscriber_count: zero(),
            video_count: zero(),
        }
    }
}

impl Default for VideoStatistics {
    fn default() -> Self {
        Self {
            view_count: zero(),
            like_count: zero(),
            comment_count: zero(),
        }
    }
}

fn zero() -> String {
    "0".to_owned()
}

/// A top-level comment on a video. Fetched on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text_display: String,
    pub author_display_name: String,
    #[serde(default)]
    pub author_profile_image_url: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThumbnailSet {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

// ---------------------------------------------------------------------------
// Raw API payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResource {
    pub id: String,
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub thumbnails: ThumbnailSet,
}

impl From<ChannelResource> for Channel {
    fn from(item: ChannelResource) -> Self {
        Self {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            custom_url: item.snippet.custom_url,
            thumbnails: item.snippet.thumbnails,
            statistics: item.statistics,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub published_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub thumbnails: ThumbnailSet,
}

impl From<VideoResource> for Video {
    fn from(item: VideoResource) -> Self {
        Self {
            id: item.id,
            published_at: item.snippet.published_at,
            title: item.snippet.title,
            description: item.snippet.description,
            tags: item.snippet.tags,
            thumbnails: item.snippet.thumbnails,
            statistics: item.statistics,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub text_display: String,
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub author_profile_image_url: String,
    pub published_at: DateTime<Utc>,
}

impl From<CommentThread> for Comment {
    fn from(item: CommentThread) -> Self {
        let snippet = item.snippet.top_level_comment.snippet;
        Self {
            id: item.id,
            text_display: snippet.text_display,
            author_display_name: snippet.author_display_name,
            author_profile_image_url: snippet.author_profile_image_url,
            published_at: snippet.published_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Shape of a YouTube API error body: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_video_statistics_default_to_zero() {
        let raw = serde_json::json!({
            "id": "vid123",
            "snippet": {
                "publishedAt": "2024-03-01T12:00:00Z",
                "title": "테스트 영상",
                "description": "",
            },
            "statistics": { "viewCount": "42" },
        });

        let video: Video = serde_json::from_value::<VideoResource>(raw).unwrap().into();
        assert_eq!(video.statistics.view_count, "42");
        assert_eq!(video.statistics.like_count, "0");
        assert_eq!(video.statistics.comment_count, "0");
    }

    #[test]
    fn hidden_subscriber_count_defaults_to_zero() {
        let raw = serde_json::json!({
            "id": "UCabcdefghijklmnopqrstuv",
            "snippet": { "title": "채널" },
            "statistics": { "viewCount": "100", "videoCount": "3" },
        });

        let channel: Channel = serde_json::from_value::<ChannelResource>(raw).unwrap().into();
        assert_eq!(channel.statistics.subscriber_count, "0");
        assert_eq!(channel.statistics.view_count, "100");
        assert!(channel.custom_url.is_none());
    }

    #[test]
    fn comment_thread_flattens_to_top_level_comment() {
        let raw = serde_json::json!({
            "id": "c1",
            "snippet": {
                "topLevelComment": {
                    "snippet": {
                        "textDisplay": "좋은 영상이에요!",
                        "authorDisplayName": "viewer",
                        "authorProfileImageUrl": "https://example.com/a.jpg",
                        "publishedAt": "2024-05-02T08:30:00Z",
                    }
                }
            },
        });

        let comment: Comment = serde_json::from_value::<CommentThread>(raw).unwrap().into();
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.text_display, "좋은 영상이에요!");
        assert_eq!(comment.author_display_name, "viewer");
    }

    #[test]
    fn error_envelope_extracts_upstream_message() {
        let body = r#"{"error": {"code": 403, "message": "quotaExceeded", "errors": []}}"#;
        let env: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.error.message, "quotaExceeded");
    }
}
