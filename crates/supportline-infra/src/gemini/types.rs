//! Wire types for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};

use supportline_types::error::UpstreamError;

/// One entry of a conversation: `role` is `user` or `model`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn user(text: &str) -> Self {
        Self::text("user", text)
    }

    pub fn model(text: &str) -> Self {
        Self::text("model", text)
    }

    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![GeminiPart {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [GeminiContent],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, empty when the
    /// content carries no text parts.
    pub fn into_text(self) -> Result<String, UpstreamError> {
        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            UpstreamError::UnexpectedShape("response has no candidates".to_string())
        })?;

        let content = candidate.content.ok_or_else(|| {
            UpstreamError::UnexpectedShape(format!(
                "candidate has no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

        Ok(content.parts.into_iter().filter_map(|part| part.text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_text_joins_parts() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Use "}, {"text": "flashcards."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3, "totalTokenCount": 15}
            }"#,
        );
        assert_eq!(response.usage_metadata.as_ref().unwrap().prompt_token_count, 12);
        assert_eq!(response.into_text().unwrap(), "Use flashcards.");
    }

    #[test]
    fn test_missing_candidates_is_unexpected_shape() {
        let err = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .into_text()
            .unwrap_err();
        assert!(matches!(err, UpstreamError::UnexpectedShape(_)));
    }

    #[test]
    fn test_candidate_without_content_reports_finish_reason() {
        let err = parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#)
            .into_text()
            .unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_content_without_text_parts_is_empty_reply() {
        let text = parse(r#"{"candidates": [{"content": {"role": "model", "parts": []}}]}"#)
            .into_text()
            .unwrap();
        assert_eq!(text, "");

        let text = parse(r#"{"candidates": [{"content": {"role": "model", "parts": [{}]}}]}"#)
            .into_text()
            .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_request_serialization() {
        let contents = vec![GeminiContent::user("hi"), GeminiContent::model("hello")];
        let json = serde_json::to_value(GenerateContentRequest { contents: &contents }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]}
                ]
            })
        );
    }
}
