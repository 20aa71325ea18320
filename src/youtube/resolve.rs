use crate::youtube::types::SearchListResponse;
use crate::youtube::{YouTubeClient, YouTubeError};

/// Channel IDs start with `UC` and run well past 20 characters; anything
/// matching that shape is used as-is without a lookup.
pub(crate) fn looks_like_channel_id(input: &str) -> bool {
    input.starts_with("UC") && input.len() > 20
}

/// Extract a handle from a channel URL (`youtube.com/@handle`), a leading
/// `@`, or fall back to the raw input.
pub(crate) fn extract_handle(input: &str) -> &str {
    if let Some(pos) = input.find("youtube.com/@") {
        let rest = &input[pos + "youtube.com/@".len()..];
        let end = rest.find(['/', '?']).unwrap_or(rest.len());
        return &rest[..end];
    }
    input.strip_prefix('@').unwrap_or(input)
}

impl YouTubeClient {
    /// Resolve a free-form channel reference (ID, `@handle`, or URL) to a
    /// canonical channel ID.
    ///
    /// Non-ID inputs go through a single channel search; the first result
    /// wins. Zero results fail with [`YouTubeError::ChannelNotFound`].
    pub async fn resolve_channel_id(&self, input: &str) -> Result<String, YouTubeError> {
        let cleaned = input.trim();

        if looks_like_channel_id(cleaned) {
            return Ok(cleaned.to_owned());
        }

        let query = format!("@{}", extract_handle(cleaned));
        let data: SearchListResponse = self
            .get(
                "search",
                &[
                    ("part", "id"),
                    ("q", &query),
                    ("type", "channel"),
                    ("maxResults", "1"),
                ],
            )
            .await?;

        data.items
            .into_iter()
            .find_map(|item| item.id.channel_id)
            .ok_or(YouTubeError::ChannelNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_id_shape_passes_through() {
        assert!(looks_like_channel_id("UC_x5XG1OV2P6uZZ5FSM9Ttw"));
        // Too short, or wrong prefix.
        assert!(!looks_like_channel_id("UC_short"));
        assert!(!looks_like_channel_id("@googledevelopers"));
        assert!(!looks_like_channel_id("googledevelopers1234567890"));
    }

    #[test]
    fn extracts_handle_from_url() {
        assert_eq!(
            extract_handle("https://www.youtube.com/@googledevelopers"),
            "googledevelopers"
        );
        assert_eq!(
            extract_handle("https://youtube.com/@handle/videos"),
            "handle"
        );
        assert_eq!(
            extract_handle("youtube.com/@handle?view=0"),
            "handle"
        );
    }

    #[test]
    fn extracts_handle_from_at_prefix() {
        assert_eq!(extract_handle("@googledevelopers"), "googledevelopers");
    }

    #[test]
    fn bare_word_is_treated_as_handle() {
        assert_eq!(extract_handle("googledevelopers"), "googledevelopers");
    }
}
