use std::collections::VecDeque;
use std::pin::Pin;

use futures::{Stream, StreamExt};
use reqwest::Response;

use super::GeminiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";

/// Thin client for the Gemini generateContent API, key-in-query
/// authenticated like the statistics API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Issue a blocking `generateContent` call and return the completion text.
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        let url = format!(
            "{BASE_URL}/models/{MODEL}:generateContent?key={}",
            self.api_key
        );
        let resp = self.http.post(&url).json(request).send().await?;
        let body = Self::check_status(resp).await?;

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.text();
        if text.is_empty() {
            return Err(GeminiError::EmptyCompletion);
        }
        Ok(text)
    }

    /// Issue a `streamGenerateContent?alt=sse` call. The returned stream
    /// yields completion text incrementally, one chunk per SSE event.
    pub async fn stream_generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<TextStream, GeminiError> {
        let url = format!(
            "{BASE_URL}/models/{MODEL}:streamGenerateContent?alt=sse&key={}",
            self.api_key
        );
        let resp = self.http.post(&url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(TextStream::new(
            resp.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec())),
        ))
    }

    /// Check status and hand back the body, surfacing the error body on failure.
    async fn check_status(resp: Response) -> Result<String, GeminiError> {
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "gemini api error");
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(resp.text().await?)
    }
}

// ---------------------------------------------------------------------------
// SSE text stream
// ---------------------------------------------------------------------------

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Vec<u8>>> + Send>>;

/// Incremental completion text from a streaming response.
///
/// SSE events arrive as `data: {json}` lines; bytes are buffered until a
/// full line is available, so multi-byte characters split across network
/// chunks reassemble correctly.
pub struct TextStream {
    inner: ByteStream,
    buf: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

impl TextStream {
    fn new(stream: impl Stream<Item = reqwest::Result<Vec<u8>>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(stream),
            buf: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Next text chunk, or `None` once the stream is exhausted.
    pub async fn next_chunk(&mut self) -> Option<Result<String, GeminiError>> {
        loop {
            if let Some(text) = self.pending.pop_front() {
                return Some(Ok(text));
            }
            if self.done {
                return None;
            }
            match self.inner.next().await {
                Some(Ok(bytes)) => {
                    self.buf.extend_from_slice(&bytes);
                    self.drain_events();
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                }
            }
        }
    }

    /// Parse complete `data:` lines out of the byte buffer into pending chunks.
    fn drain_events(&mut self) {
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let Some(data) = line.trim().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data.is_empty() || data == "[DONE]" {
                continue;
            }
            match serde_json::from_str::<GenerateContentResponse>(data) {
                Ok(event) => {
                    let text = event.text();
                    if !text.is_empty() {
                        self.pending.push_back(text);
                    }
                }
                Err(e) => tracing::debug!("skipping unparseable sse event: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_stream(frames: Vec<&'static [u8]>) -> impl Stream<Item = reqwest::Result<Vec<u8>>> {
        futures::stream::iter(frames.into_iter().map(|f| Ok(f.to_vec())))
    }

    #[tokio::test]
    async fn yields_text_per_sse_event() {
        let frames: Vec<&'static [u8]> = vec![
            b"data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"hello \"}]}}]}\n\n",
            b"data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"world\"}]}}]}\n\n",
        ];
        let mut stream = TextStream::new(byte_stream(frames));

        assert_eq!(stream.next_chunk().await.unwrap().unwrap(), "hello ");
        assert_eq!(stream.next_chunk().await.unwrap().unwrap(), "world");
        assert!(stream.next_chunk().await.is_none());
    }

    #[tokio::test]
    async fn reassembles_event_split_across_frames() {
        let frames: Vec<&'static [u8]> = vec![
            b"data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"\xEC\x95\x88",
            b"\xEB\x85\x95\"}]}}]}\n\n",
        ];
        let mut stream = TextStream::new(byte_stream(frames));

        assert_eq!(stream.next_chunk().await.unwrap().unwrap(), "안녕");
        assert!(stream.next_chunk().await.is_none());
    }

    #[tokio::test]
    async fn ignores_non_data_lines_and_done_marker() {
        let frames: Vec<&'static [u8]> = vec![
            b": comment\n\ndata: [DONE]\n\n",
            b"data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"ok\"}]}}]}\n",
        ];
        let mut stream = TextStream::new(byte_stream(frames));

        assert_eq!(stream.next_chunk().await.unwrap().unwrap(), "ok");
        assert!(stream.next_chunk().await.is_none());
    }
}
