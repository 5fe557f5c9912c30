//! Gemini Provider - `RoomAnalyzer` and `RoomSynthesizer` over the
//! Generative Language REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(Some(api_key))
//!     .with_analysis_model("gemini-2.5-flash")
//!     .with_synthesis_model("gemini-2.5-flash-image");
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! # Calls
//!
//! - Analysis sends the photo plus an interior-designer prompt and asks for a
//!   JSON document matching [`ANALYSIS_SCHEMA`].
//! - Synthesis sends the photo plus a prompt built from the analysis and asks
//!   for an image-only response.
//! - Assistant chat sends a text-only prompt to the analysis model.
//!
//! Non-success responses are turned into [`ServiceFailure`] carrying the HTTP
//! status, the API's `error.status` code, and its message, so the pipeline's
//! classifier can tell a permission denial from an invalid key.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::domain::redesign::{
    DesignStyle, ImageFormat, RoomAnalysis, RoomImage, ServiceFailure,
};
use crate::ports::{AssistantChat, RoomAnalyzer, RoomSynthesizer};

/// Response schema requested for room analyses.
pub static ANALYSIS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "isRoom": { "type": "BOOLEAN" },
            "roomType": { "type": "STRING" },
            "lighting": { "type": "STRING" },
            "potentialImprovements": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "furnitureIdeas": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "estimatedBudget": { "type": "STRING" }
        },
        "required": ["isRoom", "roomType", "lighting", "potentialImprovements"]
    })
});

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` makes every call fail as an invalid credential.
    api_key: Option<Secret<String>>,
    /// Base URL for the API.
    pub base_url: String,
    /// Model used for the structural analysis.
    pub analysis_model: String,
    /// Model used for image synthesis.
    pub synthesis_model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()).map(Secret::new),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            analysis_model: "gemini-2.5-flash".to_string(),
            synthesis_model: "gemini-2.5-flash-image".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = model.into();
        self
    }

    pub fn with_synthesis_model(mut self, model: impl Into<String>) -> Self {
        self.synthesis_model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Result<&str, ServiceFailure> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .ok_or_else(|| {
                ServiceFailure::new("API key not configured").with_code("API_KEY_INVALID")
            })
    }
}

/// Gemini REST provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ServiceFailure> {
        let api_key = self.config.api_key()?;

        let response = self
            .client
            .post(self.generate_url(model))
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceFailure::new(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    ServiceFailure::new(format!("connection failed: {}", e))
                } else {
                    ServiceFailure::new(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ServiceFailure::new(format!("malformed response: {}", e)))
    }

    async fn handle_response_status(response: Response) -> Result<Response, ServiceFailure> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(failure_from_error_body(status.as_u16(), &body))
    }
}

#[async_trait]
impl RoomAnalyzer for GeminiProvider {
    async fn analyze(
        &self,
        image: &RoomImage,
        style: DesignStyle,
    ) -> Result<RoomAnalysis, ServiceFailure> {
        let request = GenerateRequest {
            contents: vec![Content::image_and_text(image, analysis_prompt(style))],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(ANALYSIS_SCHEMA.clone()),
                response_modalities: None,
            },
        };

        let response = self.generate(&self.config.analysis_model, &request).await?;
        let text = response
            .first_text()
            .ok_or_else(|| ServiceFailure::new("analysis response contained no text"))?;
        parse_analysis(text)
    }
}

#[async_trait]
impl RoomSynthesizer for GeminiProvider {
    async fn synthesize(
        &self,
        image: &RoomImage,
        style: DesignStyle,
        analysis: &RoomAnalysis,
    ) -> Result<RoomImage, ServiceFailure> {
        let request = GenerateRequest {
            contents: vec![Content::image_and_text(
                image,
                synthesis_prompt(style, analysis),
            )],
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            },
        };

        let response = self.generate(&self.config.synthesis_model, &request).await?;
        let inline = response
            .first_inline_data()
            .ok_or_else(|| ServiceFailure::new("synthesis response contained no image"))?;
        RoomImage::from_base64(&inline.mime_type, &inline.data)
            .map_err(|e| ServiceFailure::new(format!("synthesized image unusable: {}", e)))
    }
}

#[async_trait]
impl AssistantChat for GeminiProvider {
    async fn reply(&self, message: &str) -> Result<String, ServiceFailure> {
        let request = GenerateRequest {
            contents: vec![Content::text(assistant_prompt(message))],
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                response_modalities: None,
            },
        };

        let response = self.generate(&self.config.analysis_model, &request).await?;
        response
            .first_text()
            .map(str::to_owned)
            .ok_or_else(|| ServiceFailure::new("assistant response contained no text"))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Prompts
// ════════════════════════════════════════════════════════════════════════════

fn analysis_prompt(style: DesignStyle) -> String {
    format!(
        "You are an expert interior designer. First decide whether this photo shows a room \
         interior; set isRoom accordingly. If it does, identify the room type, describe the \
         lighting you observe, and list concrete improvements that would move the space toward \
         a {} style ({}). Suggest furniture pieces that suit the style and give an estimated \
         budget in INR for the whole makeover. Keep each improvement and furniture idea to one \
         short sentence.",
        style.display_name(),
        style.prompt_description()
    )
}

fn assistant_prompt(message: &str) -> String {
    format!(
        "You are Gruha, a helpful interior design assistant.\nUser: {}",
        message
    )
}

fn synthesis_prompt(style: DesignStyle, analysis: &RoomAnalysis) -> String {
    format!(
        "Redesign this {} in a {} style ({}). Keep the room's layout, windows, and camera angle. \
         Current lighting: {}. Apply these improvements: {}. Feature this furniture: {}. \
         Return a photorealistic image.",
        analysis.room_type(),
        style.display_name(),
        style.prompt_description(),
        analysis.lighting(),
        list_or_none(analysis.potential_improvements()),
        list_or_none(analysis.furniture_ideas())
    )
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none noted".to_string()
    } else {
        items.join("; ")
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response parsing
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    is_room: bool,
    #[serde(default)]
    room_type: String,
    #[serde(default)]
    lighting: String,
    #[serde(default)]
    potential_improvements: Vec<String>,
    #[serde(default)]
    furniture_ideas: Vec<String>,
    #[serde(default)]
    estimated_budget: Option<String>,
}

fn parse_analysis(text: &str) -> Result<RoomAnalysis, ServiceFailure> {
    let payload: AnalysisPayload = serde_json::from_str(text)
        .map_err(|e| ServiceFailure::new(format!("malformed analysis: {}", e)))?;
    if !payload.is_room {
        return Err(
            ServiceFailure::new("The uploaded image is not a room interior.")
                .with_code("INVALID_ROOM_IMAGE"),
        );
    }
    let analysis = RoomAnalysis::new(
        payload.room_type,
        payload.lighting,
        payload.potential_improvements,
    )
    .map_err(|e| ServiceFailure::new(format!("incomplete analysis: {}", e)))?
    .with_furniture_ideas(payload.furniture_ideas);
    Ok(match payload.estimated_budget {
        Some(budget) => analysis.with_estimated_budget(budget),
        None => analysis,
    })
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

fn failure_from_error_body(status: u16, body: &str) -> ServiceFailure {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let failure = ServiceFailure::new(envelope.error.message).with_status(status);
            match envelope.error.status {
                Some(code) => failure.with_code(code),
                None => failure,
            }
        }
        Err(_) => ServiceFailure::new(format!("unexpected status {}: {}", status, body))
            .with_status(status),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: String) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text),
                inline_data: None,
            }],
        }
    }

    fn image_and_text(image: &RoomImage, text: String) -> Self {
        Self {
            parts: vec![
                Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: image.mime_type().to_string(),
                        data: image.to_base64(),
                    }),
                },
                Part {
                    text: Some(text),
                    inline_data: None,
                },
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    fn first_text(&self) -> Option<&str> {
        self.parts().find_map(|p| p.text.as_deref())
    }

    fn first_inline_data(&self) -> Option<&InlineData> {
        self.parts()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| ImageFormat::from_mime(&d.mime_type).is_some())
    }
}
