//! Google Gemini provider.
//!
//! Sends the extraction prompt with the image inline and asks for a JSON
//! answer constrained by the response schema.

use super::{ExtractionError, ReceiptExtractor, ReceiptImage};
use crate::config::Config;
use crate::error::{Result, SheetError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use delivery_sheet_common::{parse_extraction_response, response_schema, ExtractedDelivery, EXTRACTION_PROMPT};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GeminiResponse {
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
    #[serde(default)]
    thought: bool,
}

pub struct GeminiExtractor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiExtractor {
    /// Fails with [`SheetError::MissingApiKey`] when `api_key` is blank.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SheetError::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.get_api_key()?, &config.model, &config.api_base_url)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(image: &ReceiptImage) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.media_type.clone(),
                            data: STANDARD.encode(&image.bytes),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

/// First non-empty answer part of the first candidate; thought parts are skipped.
fn response_text(response: GeminiResponse) -> std::result::Result<String, ExtractionError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| {
            c.parts
                .into_iter()
                .find(|p| !p.thought && !p.text.trim().is_empty())
        })
        .map(|p| p.text)
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ExtractionError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[async_trait]
impl ReceiptExtractor for GeminiExtractor {
    async fn extract(&self, image: &ReceiptImage) -> std::result::Result<Vec<ExtractedDelivery>, ExtractionError> {
        debug!(
            "sending {} ({}, {} bytes) to {}",
            image.file_name,
            image.media_type,
            image.bytes.len(),
            self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(image))
            .send()
            .await
            .map_err(|e| ExtractionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;
        let text = response_text(payload)?;
        debug!("{}: {}", image.file_name, text);

        parse_extraction_response(&text).map_err(|e| ExtractionError::Parse(e.to_string()))
    }
}
