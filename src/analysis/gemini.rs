//! Gemini `generateContent` client.
//!
//! Uses the `reqwest` blocking client; callers that must stay responsive run
//! it through [`super::AnalysisService::analyze_in_background`].

use crate::config::AnalysisSettings;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const SYSTEM_PROMPT: &str = "You are an expert medical terminology assistant. \
Your responses must be extremely concise and presented as a single paragraph. \
Analyze the user's text and respond in one of the following ways: \
1. If the text is a SINGLE medical term, provide its definition. \
2. If the text compares DIFFERENT DOSAGES of the same drug, briefly explain the difference in their clinical use. \
3. If the text contains MULTIPLE DIFFERENT medical terms, briefly define each and explain their relationship or difference. \
Always keep the entire response short and to the point.";

/// Anything that turns free text into a natural-language explanation.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<String, Error>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated and trimmed.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

pub struct GeminiAnalyzer {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiAnalyzer {
    pub fn new(api_key: String, settings: &AnalysisSettings) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model: settings.model.clone(),
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        })
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: SYSTEM_PROMPT }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        }
    }
}

impl Analyzer for GeminiAnalyzer {
    fn analyze(&self, text: &str) -> Result<String, Error> {
        let prompt = format!("Please analyze: \"{}\"", text);
        let url = format!("{}/{}:generateContent", ENDPOINT, self.model);
        let response: GenerateResponse = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(&prompt))
            .send()?
            .error_for_status()?
            .json()?;
        response.into_text().ok_or(Error::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let analyzer = GeminiAnalyzer::new("k".into(), &AnalysisSettings::default()).unwrap();
        let body = serde_json::to_value(analyzer.request_body("Please analyze: \"bid\"")).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Please analyze: \"bid\"");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 150);
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"  Twice "},{"text":"daily. "}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.into_text().as_deref(), Some("Twice daily."));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(empty.into_text(), None);
    }
}
