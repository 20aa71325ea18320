use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// generateContent request/response
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Free-text request with a temperature.
    pub fn text(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
                response_mime_type: None,
                response_schema: None,
            }),
        }
    }

    /// Schema-constrained JSON request.
    pub fn json(prompt: impl Into<String>, temperature: f32, schema: serde_json::Value) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
                response_mime_type: Some("application/json".to_owned()),
                response_schema: Some(schema),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Content {
    fn user(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.into()),
            }],
            role: Some("user".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Structured insight results
// ---------------------------------------------------------------------------

/// Estimated ad revenue ranges in KRW, with the model's reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueAnalysis {
    pub estimated_monthly_min: f64,
    pub estimated_monthly_max: f64,
    pub estimated_yearly_min: f64,
    pub estimated_yearly_max: f64,
    pub currency: String,
    pub reasoning: String,
}

/// Viewer-reaction analysis for one video's comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAnalysis {
    pub summary: String,
    pub sentiment: Sentiment,
    pub key_topics: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Sentiment shares in percent. After post-processing they sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_request_carries_schema_and_mime_type() {
        let req = GenerateContentRequest::json("prompt", 0.3, serde_json::json!({"type": "OBJECT"}));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
    }

    #[test]
    fn text_request_omits_json_config() {
        let req = GenerateContentRequest::text("prompt", 0.5);
        let value = serde_json::to_value(&req).unwrap();
        assert!(value["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn response_text_concatenates_first_candidate_parts() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "안녕" }, { "text": "하세요" }], "role": "model" }
            }]
        });
        let resp: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.text(), "안녕하세요");
    }

    #[test]
    fn response_text_is_empty_without_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.text(), "");
    }
}
