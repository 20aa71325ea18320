pub mod channels;
pub mod comments;
pub mod resolve;
pub mod types;
pub mod videos;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum YouTubeError {
    /// No API key configured. User-facing message, shown verbatim.
    #[error("YouTube API 키가 제공되지 않았습니다. API 키를 설정해주세요.")]
    MissingKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Upstream rejected the request; carries the upstream error message.
    #[error("{0}")]
    Api(String),
    #[error("채널을 찾을 수 없습니다. ID, 핸들(@handle) 또는 URL을 확인해주세요.")]
    ChannelNotFound,
    #[error("채널 데이터를 가져올 수 없습니다.")]
    NoChannelData,
    #[error("deserialization error: {0}")]
    Deserialize(String),
}

// ---------------------------------------------------------------------------
// Query parameter helpers
// ---------------------------------------------------------------------------

/// Percent-encoding set for URL query values (encode everything except unreserved chars).
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub(crate) fn encode_query(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE_SET).to_string()
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Thin client for the YouTube Data API v3. All requests are plain GETs
/// authenticated with a `key` query parameter.
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Issue a GET request to an API endpoint with the given query parameters.
    ///
    /// Fails fast with [`YouTubeError::MissingKey`] before touching the
    /// network when no key is configured.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        if self.api_key.is_empty() {
            return Err(YouTubeError::MissingKey);
        }

        let mut url = format!("{BASE_URL}/{endpoint}?key={}", encode_query(&self.api_key));
        for (name, value) in params {
            url.push_str(&format!("&{name}={}", encode_query(value)));
        }

        tracing::debug!(endpoint, "youtube api request");
        let resp = self.http.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Check status and deserialize the body, surfacing the upstream
    /// `error.message` on failure where the body carries one.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: Response,
    ) -> Result<T, YouTubeError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<types::ErrorEnvelope>(&body)
                .ok()
                .map(|env| env.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "YouTube API 요청에 실패했습니다.".to_owned());
            tracing::warn!(status = status.as_u16(), %message, "youtube api error");
            return Err(YouTubeError::Api(message));
        }

        serde_json::from_str::<T>(&body).map_err(|e| YouTubeError::Deserialize(format!("{e}: {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_query_chars() {
        assert_eq!(encode_query("@구글 개발자"), "%40%EA%B5%AC%EA%B8%80%20%EA%B0%9C%EB%B0%9C%EC%9E%90");
        assert_eq!(encode_query("plain-value_1.~"), "plain-value_1.~");
    }

    #[tokio::test]
    async fn empty_key_fails_before_any_request() {
        let client = YouTubeClient::new("");
        let result: Result<types::SearchListResponse, _> = client.get("search", &[]).await;
        assert!(matches!(result, Err(YouTubeError::MissingKey)));
    }
}
